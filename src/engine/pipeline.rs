// ==========================================
// Quản lý xưởng - pipeline lọc & sắp xếp
// ==========================================
// Chuỗi vị từ short-circuit, thứ tự cố định (rẻ/loại nhiều trước):
// 1. bỏ đơn skipped / tiêu đề rỗng hoặc placeholder
// 2. cửa sổ thời gian (giao khoảng [bắt đầu, bắt đầu + thời gian])
// 3. tìm kiếm chuỗi con trên title+client+step_label
// 4. chỉ đơn xong  5. chỉ đơn gấp  6. chỉ đơn quá hạn
// Sắp xếp ổn định; mặc định created_at giảm dần.
// ==========================================

use crate::domain::order::{ProductionOrder, PLACEHOLDER_TITLE};
use crate::domain::view::{SortSpec, ViewCriteria};
use chrono::NaiveDate;
use std::cmp::Ordering;
use tracing::instrument;

pub struct ViewPipeline;

impl ViewPipeline {
    pub fn new() -> Self {
        Self
    }

    /// Tập đơn người vận hành nhìn thấy, đã lọc và sắp xếp.
    /// Không bao giờ sửa tập đầu vào, chỉ trả về view mới.
    #[instrument(skip(self, orders, criteria), fields(total = orders.len()))]
    pub fn visible_orders(
        &self,
        orders: &[ProductionOrder],
        criteria: &ViewCriteria,
        today: NaiveDate,
    ) -> Vec<ProductionOrder> {
        let window = criteria.date_window.range(today);
        let needle = criteria.search.trim().to_lowercase();

        let mut visible: Vec<ProductionOrder> = orders
            .iter()
            .filter(|o| Self::passes(o, criteria, &needle, window, today))
            .cloned()
            .collect();

        Self::sort(&mut visible, criteria.sort);
        visible
    }

    fn passes(
        order: &ProductionOrder,
        criteria: &ViewCriteria,
        needle: &str,
        window: Option<(NaiveDate, NaiveDate)>,
        today: NaiveDate,
    ) -> bool {
        let title = order.title.trim();
        if title.is_empty() || title == PLACEHOLDER_TITLE || order.skipped {
            return false;
        }

        if let Some((range_start, range_end)) = window {
            // đơn không có mốc bắt đầu thì không có khoảng lịch nào giao cửa sổ
            let Some(start) = order.start_date() else {
                return false;
            };
            let Some(end) = order.end_date() else {
                return false;
            };
            if !(start <= range_end && end >= range_start) {
                return false;
            }
        }

        if !needle.is_empty() {
            let blob = format!("{}{}{}", order.title, order.client, order.step_label)
                .to_lowercase();
            if !blob.contains(needle) {
                return false;
            }
        }

        if criteria.completed_only && !order.is_completed() {
            return false;
        }

        if criteria.urgent_only && !order.is_urgent {
            return false;
        }

        if criteria.overdue_only {
            let overdue = !order.is_completed()
                && order.end_date().map(|end| end < today).unwrap_or(false);
            if !overdue {
                return false;
            }
        }

        true
    }

    fn sort(orders: &mut [ProductionOrder], sort: SortSpec) {
        match sort {
            SortSpec::CreatedDesc => {
                orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
            }
            SortSpec::DeadlineAsc => {
                orders.sort_by(|a, b| Self::cmp_deadline(a, b, false));
            }
            SortSpec::DeadlineDesc => {
                orders.sort_by(|a, b| Self::cmp_deadline(a, b, true));
            }
        }
    }

    // Đơn không có hạn chót luôn xếp cuối, bất kể chiều sắp xếp.
    fn cmp_deadline(a: &ProductionOrder, b: &ProductionOrder, descending: bool) -> Ordering {
        match (a.end_date(), b.end_date()) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Greater,
            (Some(_), None) => Ordering::Less,
            (Some(da), Some(db)) => {
                if descending {
                    db.cmp(&da)
                } else {
                    da.cmp(&db)
                }
            }
        }
    }
}

impl Default for ViewPipeline {
    fn default() -> Self {
        Self::new()
    }
}
