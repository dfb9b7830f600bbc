// ==========================================
// Quản lý xưởng - gộp nhóm & thống kê dashboard
// ==========================================
// Chạy trên đầu ra của pipeline (tập đơn hiển thị), một lượt duy nhất.
// ==========================================

use crate::config::ScheduleSettings;
use crate::domain::order::ProductionOrder;
use crate::domain::view::{DashboardStats, GroupedOrder};
use chrono::{Duration, NaiveDate};
use std::collections::HashMap;
use tracing::instrument;

pub struct GroupingEngine {
    due_soon_window_days: i64,
}

impl GroupingEngine {
    pub fn new(settings: &ScheduleSettings) -> Self {
        Self {
            due_soon_window_days: settings.due_soon_window_days,
        }
    }

    /// Gộp đơn theo tiêu đề chuẩn hóa (TRIM + UPPER).
    /// Thứ tự nhóm = thứ tự lần gặp đầu trong chuỗi đầu vào.
    #[instrument(skip(self, visible), fields(count = visible.len()))]
    pub fn group_by_title(&self, visible: &[ProductionOrder]) -> Vec<GroupedOrder> {
        let mut groups: Vec<GroupedOrder> = Vec::new();
        let mut index_by_key: HashMap<String, usize> = HashMap::new();

        for order in visible {
            let key = order.title.trim().to_uppercase();
            let idx = *index_by_key.entry(key.clone()).or_insert_with(|| {
                groups.push(GroupedOrder {
                    key,
                    title: order.title.clone(),
                    client: order.client.clone(),
                    orders: Vec::new(),
                    window_start: None,
                    window_end: None,
                    progress_sum: 0,
                });
                groups.len() - 1
            });

            let group = &mut groups[idx];
            if let Some(start) = order.start_date() {
                group.window_start = Some(match group.window_start {
                    Some(s) if s <= start => s,
                    _ => start,
                });
            }
            if let Some(end) = order.end_date() {
                group.window_end = Some(match group.window_end {
                    Some(e) if e >= end => e,
                    _ => end,
                });
            }
            // tổng, không phải trung bình - xem GroupedOrder
            group.progress_sum += order.progress_percent as i64;
            group.orders.push(order.clone());
        }

        groups
    }

    /// Năm bộ đếm dashboard trên tập đơn hiển thị.
    #[instrument(skip(self, visible), fields(count = visible.len()))]
    pub fn compute_stats(&self, visible: &[ProductionOrder], today: NaiveDate) -> DashboardStats {
        let due_soon_limit = today + Duration::days(self.due_soon_window_days);
        let mut stats = DashboardStats {
            total: visible.len(),
            ..Default::default()
        };

        for order in visible {
            if order.is_completed() {
                stats.completed += 1;
                continue;
            }
            // đơn chưa có hạn chót không quá hạn cũng không sắp đến hạn
            if let Some(end) = order.end_date() {
                if end < today {
                    stats.overdue += 1;
                } else if end <= due_soon_limit {
                    stats.due_soon += 1;
                }
            }
        }

        stats.active = stats.total - stats.completed;
        stats
    }
}
