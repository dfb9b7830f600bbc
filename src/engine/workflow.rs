// ==========================================
// Quản lý xưởng - máy trạng thái bước sản xuất
// ==========================================
// Trạng thái = các bước trong danh mục, thứ tự cố định.
// Chuyển tiếp chỉ tiến, mỗi lần một bước, qua thao tác "advance" tường minh.
// Bước cuối là terminal: advance tiếp là no-op, stage = done, progress = 100.
// ==========================================

use crate::domain::catalog::WorkflowCatalog;
use crate::domain::order::ProductionOrder;
use crate::domain::types::Stage;
use tracing::debug;

pub struct WorkflowEngine {
    catalog: WorkflowCatalog,
}

impl WorkflowEngine {
    pub fn new(catalog: WorkflowCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &WorkflowCatalog {
        &self.catalog
    }

    /// Giai đoạn thô của một nhãn bước (hàm thuần của nhãn).
    pub fn classify_stage(&self, label: &str) -> Stage {
        Stage::classify(label)
    }

    /// Phần trăm tiến độ theo vị trí trong danh mục:
    /// round(100 * (index + 1) / len). Nhãn ngoài danh mục = 0.
    pub fn progress_for_step(&self, label: &str) -> u8 {
        let len = self.catalog.len();
        if len == 0 {
            return 0;
        }
        match self.catalog.position(label) {
            Some(index) => {
                let pct = (100.0 * (index as f64 + 1.0) / len as f64).round();
                pct as u8
            }
            None => 0,
        }
    }

    /// Bước kế tiếp trong danh mục. Nhãn vắng mặt hoặc đã ở bước cuối
    /// đều trả về bước cuối (advance đơn đã xong là no-op).
    pub fn next_step(&self, current_label: &str) -> String {
        let steps = self.catalog.steps();
        match self.catalog.position(current_label) {
            Some(index) if index + 1 < steps.len() => steps[index + 1].clone(),
            _ => self.catalog.terminal_step().to_string(),
        }
    }

    /// Tiến đơn một bước và tính lại các trường dẫn xuất của quy trình.
    pub fn advance(&self, order: &mut ProductionOrder) {
        let next = self.next_step(&order.step_label);
        debug!(order_id = %order.id, from = %order.step_label, to = %next, "tiến bước");
        self.apply_step(order, next);
    }

    /// Đặt nhãn bước và đồng bộ stage/progress dẫn xuất.
    pub fn apply_step(&self, order: &mut ProductionOrder, label: String) {
        order.progress_percent = self.progress_for_step(&label);
        order.stage = self.classify_stage(&label);
        if self.catalog.is_terminal(&label) {
            // bước cuối ép done/100 bất kể phép làm tròn
            order.stage = Stage::Done;
            order.progress_percent = 100;
        }
        order.step_label = label;
    }
}
