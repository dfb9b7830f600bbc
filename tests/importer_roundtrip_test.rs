// ==========================================
// Test tích hợp vòng lặp import/export tracker
// ==========================================
// Mục tiêu: xuất đơn ra cột chuẩn rồi nhập lại qua bảng chuẩn hóa
// phải tái tạo đúng giá trị logic (doanh số theo tỉ lệ triệu, ngày,
// chữ trạng thái mang giai đoạn)
// ==========================================

use chrono::NaiveDate;
use std::collections::HashMap;
use xuong_tracker::config::ScheduleSettings;
use xuong_tracker::domain::order::{ProviderSelection, SupplySelection};
use xuong_tracker::domain::types::{Stage, SupplyStatus};
use xuong_tracker::{OrderExporter, OrderImporter};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn payload_to_row(payload: xuong_tracker::TrackerPayload) -> HashMap<String, String> {
    payload
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect()
}

#[test]
fn test_export_then_import_reproduces_logical_fields() {
    let importer = OrderImporter::new(ScheduleSettings::default());
    let exporter = OrderExporter::new(1_000_000);

    // đơn nguồn dựng từ một dòng tracker đầy đủ
    let mut row = HashMap::new();
    row.insert("MADON".to_string(), "DH-RT".to_string());
    let mut source = importer.import_rows(&[row], 0).orders.remove(0);
    source.client = "Anh Minh".into();
    source.value = 54_000_000;
    source.product_type = "Tủ bếp".into();
    source.step_label = "3.1 Soạn hàng & giao lắp".into();
    source.file_received_date = Some(d(2024, 3, 1));
    source.material_order_date = Some(d(2024, 3, 5));
    source.delivery_date = Some(d(2024, 3, 20));
    source.picking_date = Some(d(2024, 3, 10));
    source.duration_days = 4;
    source.board_providers = ProviderSelection::from_text("An Cường, Ba Thanh");
    source.other_supplies = SupplySelection::from_text("Bản lề, Kính [Đã giao]");
    source.assigned_tech = "Tuấn CNC".into();
    source.assigned_worker = "Thợ Nam".into();
    source.delivery_route = "Nội thành".into();
    source.note = "giao buổi sáng".into();
    source.client_phone = "0903123456".into();

    // xuất ra cột chuẩn rồi nhập lại
    let row = payload_to_row(exporter.full_payload(&source));
    let outcome = importer.import_rows(&[row], 0);
    assert!(outcome.rejected.is_empty());
    let back = &outcome.orders[0];

    assert_eq!(back.title, source.title);
    assert_eq!(back.client, source.client);
    assert_eq!(back.value, source.value); // 54 triệu tròn -> không mất
    assert_eq!(back.product_type, source.product_type);
    assert_eq!(back.step_label, source.step_label);
    assert_eq!(back.stage, Stage::DeliveryPrep);
    assert_eq!(back.progress_percent, 100); // chữ trạng thái chứa "3."
    assert_eq!(back.file_received_date, source.file_received_date);
    assert_eq!(back.material_order_date, source.material_order_date);
    assert_eq!(back.delivery_date, source.delivery_date);
    assert_eq!(back.picking_date, source.picking_date);
    assert_eq!(back.duration_days, source.duration_days);
    assert_eq!(back.board_providers, source.board_providers);
    assert_eq!(back.other_supplies.items, source.other_supplies.items);
    assert_eq!(back.other_supplies.status, SupplyStatus::Delivered);
    assert_eq!(back.assigned_tech, source.assigned_tech);
    assert_eq!(back.assigned_worker, source.assigned_worker);
    assert_eq!(back.delivery_route, source.delivery_route);
    assert_eq!(back.note, source.note);
    assert_eq!(back.client_phone, source.client_phone);
}

#[test]
fn test_roundtrip_empty_dates_stay_empty() {
    let importer = OrderImporter::new(ScheduleSettings::default());
    let exporter = OrderExporter::new(1_000_000);

    let mut row = HashMap::new();
    row.insert("MADON".to_string(), "DH-EMPTY".to_string());
    let source = importer.import_rows(&[row], 0).orders.remove(0);

    let row = payload_to_row(exporter.full_payload(&source));
    assert_eq!(row["NGAY-GIAO"], "");
    let back = &importer.import_rows(&[row], 0).orders[0];
    assert_eq!(back.delivery_date, None);
    assert_eq!(back.material_order_date, None);
}

#[test]
fn test_roundtrip_value_scaling_is_whole_millions() {
    let importer = OrderImporter::new(ScheduleSettings::default());
    let exporter = OrderExporter::new(1_000_000);

    let mut row = HashMap::new();
    row.insert("MADON".to_string(), "DH-V".to_string());
    row.insert("TIEN".to_string(), "120".to_string());
    let source = importer.import_rows(&[row], 0).orders.remove(0);
    assert_eq!(source.value, 120_000_000);

    let row = payload_to_row(exporter.full_payload(&source));
    assert_eq!(row["TIEN"], "120"); // tracker giữ số nhỏ
    let back = &importer.import_rows(&[row], 0).orders[0];
    assert_eq!(back.value, source.value);
}
