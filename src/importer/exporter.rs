// ==========================================
// Quản lý xưởng - xuất đơn ra tracker
// ==========================================
// Chiều ngược của bảng chuẩn hóa: mỗi trường logic ghi ra đúng MỘT tên
// cột chuẩn (không alias). Doanh số chia về đơn vị triệu, ngày ghi theo
// định dạng chữ gốc của tracker.
// ==========================================

use crate::domain::order::ProductionOrder;
use crate::importer::sheet_date::format_sheet_date;

/// Payload một dòng tracker: cặp (tên cột chuẩn, giá trị chữ),
/// giữ thứ tự cột ổn định.
pub type TrackerPayload = Vec<(&'static str, String)>;

pub struct OrderExporter {
    value_unit: i64,
}

impl OrderExporter {
    pub fn new(value_unit: i64) -> Self {
        Self {
            value_unit: value_unit.max(1),
        }
    }

    /// Payload đầy đủ cho lưu/tạo đơn trên tracker.
    pub fn full_payload(&self, order: &ProductionOrder) -> TrackerPayload {
        vec![
            ("MADON", order.title.clone()),
            ("KH", order.client.clone()),
            ("TIEN", (order.value / self.value_unit).to_string()),
            ("PHAN-LOAI", order.product_type.clone()),
            ("TT DON HANG", order.step_label.clone()),
            ("VAN", order.board_providers.to_text()),
            ("NGAY-GIAO", format_sheet_date(order.delivery_date)),
            ("TIME", order.duration_days.to_string()),
            ("CNC", order.assigned_tech.clone()),
            ("NGAY-NHAN-FILE", format_sheet_date(order.file_received_date)),
            ("NGAY-DAT-HANG", format_sheet_date(order.material_order_date)),
            ("THO-CHINH", order.assigned_worker.clone()),
            ("SOAN-HANG", format_sheet_date(order.picking_date)),
            ("TUYEN-GIAO", order.delivery_route.clone()),
            ("GHICHU", order.note.clone()),
            ("SDT", order.client_phone.clone()),
            ("VAT-TU-NGOAI", order.other_supplies.to_text()),
        ]
    }

    /// Payload rút gọn cho thao tác tiến bước (chỉ trạng thái + mã đơn).
    pub fn status_payload(&self, order: &ProductionOrder) -> TrackerPayload {
        vec![
            ("TT DON HANG", order.step_label.clone()),
            ("MADON", order.title.clone()),
        ]
    }

    /// Payload rút gọn cho lưu ghi chú.
    pub fn note_payload(&self, order: &ProductionOrder) -> TrackerPayload {
        vec![
            ("GHICHU", order.note.clone()),
            ("MADON", order.title.clone()),
        ]
    }
}
