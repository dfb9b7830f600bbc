// ==========================================
// Quản lý xưởng - auto-scheduler
// ==========================================
// Chuỗi mốc lịch: nhận file -> đặt ván -> soạn hàng -> giao -> nghiệm thu.
// compute_schedule là hàm thuần, idempotent; gọi lại sau MỌI thay đổi của
// doanh số / ngày đặt ván / NCC ván (tính lại toàn bộ, không cập nhật dở).
// ==========================================

use crate::engine::duration::DurationCalculator;
use crate::domain::order::ProductionOrder;
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// ScheduleOutcome - kết quả một lần tính lịch
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleOutcome {
    pub duration_days: i64,
    pub picking_date: Option<NaiveDate>, // None = chưa xác định (chưa đặt ván)
}

pub struct AutoScheduler {
    calculator: DurationCalculator,
}

impl AutoScheduler {
    pub fn new(calculator: DurationCalculator) -> Self {
        Self { calculator }
    }

    pub fn calculator(&self) -> &DurationCalculator {
        &self.calculator
    }

    /// Tính lịch dẫn xuất của một đơn:
    /// 1. duration_days từ doanh số.
    /// 2. Chưa có ngày đặt ván -> ngày soạn hàng chưa xác định.
    /// 3. Có -> soạn hàng = ngày đặt ván + lead time NCC chậm nhất
    ///    + 1 ngày dỡ/soạn sau khi ván về.
    pub fn compute_schedule(&self, order: &ProductionOrder) -> ScheduleOutcome {
        let duration_days = self.calculator.construction_duration(order.value);
        let picking_date = order.material_order_date.map(|ordered| {
            let lead = self.calculator.provider_lead_days(&order.board_providers);
            ordered + Duration::days(lead + self.calculator.settings().picking_buffer_days)
        });
        ScheduleOutcome {
            duration_days,
            picking_date,
        }
    }

    /// Ghi kết quả tính lịch ngược vào đơn.
    pub fn apply(&self, order: &mut ProductionOrder) {
        let outcome = self.compute_schedule(order);
        order.duration_days = outcome.duration_days;
        order.picking_date = outcome.picking_date;
    }

    /// Ngày nghiệm thu dự kiến = ngày giao + thời gian thi công.
    /// Chỉ để hiển thị, không lưu; chưa có ngày giao -> chưa xác định.
    pub fn acceptance_date(&self, order: &ProductionOrder) -> Option<NaiveDate> {
        order
            .delivery_date
            .map(|d| d + Duration::days(order.duration_days))
    }
}
