// ==========================================
// Test tích hợp gộp nhóm & thống kê
// ==========================================
// Mục tiêu: rollup theo tiêu đề chuẩn hóa, năm bộ đếm dashboard
// ==========================================

use chrono::NaiveDate;
use xuong_tracker::config::ScheduleSettings;
use xuong_tracker::engine::GroupingEngine;
use xuong_tracker::{OrderImporter, ProductionOrder};

fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

fn engine() -> GroupingEngine {
    GroupingEngine::new(&ScheduleSettings::default())
}

fn order(title: &str, progress: u8, start: Option<NaiveDate>, duration: i64) -> ProductionOrder {
    let importer = OrderImporter::new(ScheduleSettings::default());
    let mut row = std::collections::HashMap::new();
    row.insert("MADON".to_string(), title.to_string());
    let mut o = importer.import_rows(&[row], 0).orders.remove(0);
    o.progress_percent = progress;
    o.file_received_date = start;
    o.duration_days = duration;
    o
}

// ==========================================
// Gộp nhóm
// ==========================================

#[test]
fn test_group_by_normalized_title_sums_progress() {
    // 40 + 70 = 110 (tổng, không phải trung bình)
    let orders = vec![
        order("DH-05", 40, Some(d(2024, 3, 1)), 2),
        order("  dh-05 ", 70, Some(d(2024, 3, 2)), 2),
    ];
    let groups = engine().group_by_title(&orders);
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].progress_sum, 110);
    assert_eq!(groups[0].average_progress(), 55);
}

#[test]
fn test_group_window_spans_min_start_to_max_end() {
    let orders = vec![
        order("DH-06", 0, Some(d(2024, 3, 10)), 1), // [10, 11]
        order("DH-06", 0, Some(d(2024, 3, 2)), 3),  // [02, 05]
    ];
    let groups = engine().group_by_title(&orders);
    assert_eq!(groups[0].window_start, Some(d(2024, 3, 2)));
    assert_eq!(groups[0].window_end, Some(d(2024, 3, 11)));
}

#[test]
fn test_groups_keep_first_occurrence_order() {
    let orders = vec![
        order("DH-B", 0, None, 1),
        order("DH-A", 0, None, 1),
        order("DH-B", 0, None, 1),
    ];
    let groups = engine().group_by_title(&orders);
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, "DH-B");
    assert_eq!(groups[1].key, "DH-A");
    assert_eq!(groups[0].orders.len(), 2);
}

// ==========================================
// Thống kê dashboard
// ==========================================

#[test]
fn test_stats_three_order_scenario() {
    let today = d(2024, 3, 5);
    let orders = vec![
        // xong 100%
        order("DH-1", 100, Some(d(2024, 3, 1)), 1),
        // 60%, hạn chót hôm qua -> quá hạn
        order("DH-2", 60, Some(d(2024, 3, 1)), 3),
        // 60%, hạn chót 2 ngày nữa -> sắp đến hạn
        order("DH-3", 60, Some(d(2024, 3, 5)), 2),
    ];
    let stats = engine().compute_stats(&orders, today);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.overdue, 1);
    assert_eq!(stats.active, 2);
    assert_eq!(stats.due_soon, 1);
}

#[test]
fn test_due_soon_window_is_inclusive() {
    let today = d(2024, 3, 5);
    // hạn chót đúng hôm nay và đúng mép cửa sổ +3 ngày đều tính
    let orders = vec![
        order("DH-NOW", 50, Some(d(2024, 3, 4)), 1), // hạn 05/03
        order("DH-EDGE", 50, Some(d(2024, 3, 6)), 2), // hạn 08/03
        order("DH-OUT", 50, Some(d(2024, 3, 7)), 2), // hạn 09/03, ngoài cửa sổ
    ];
    let stats = engine().compute_stats(&orders, today);
    assert_eq!(stats.due_soon, 2);
    assert_eq!(stats.overdue, 0);
}

#[test]
fn test_completed_orders_never_overdue() {
    let today = d(2024, 3, 5);
    let orders = vec![order("DH-OLD", 100, Some(d(2024, 1, 1)), 1)];
    let stats = engine().compute_stats(&orders, today);
    assert_eq!(stats.completed, 1);
    assert_eq!(stats.overdue, 0);
    assert_eq!(stats.active, 0);
}
