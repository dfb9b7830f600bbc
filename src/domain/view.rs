// ==========================================
// Quản lý xưởng - kiểu dữ liệu view dẫn xuất
// ==========================================
// GroupedOrder / DashboardStats là sản phẩm tạm thời của pipeline,
// tính lại toàn bộ mỗi khi tập đơn hoặc tiêu chí lọc thay đổi.
// ==========================================

use crate::domain::order::ProductionOrder;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

// ==========================================
// DateWindow - bộ lọc khoảng thời gian
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DateWindow {
    #[default]
    All,
    Today,
    Tomorrow,
    ThisWeek, // tuần ISO, neo thứ Hai
}

impl DateWindow {
    /// Cửa sổ [start, end] (bao gồm hai đầu) tương ứng với `today`.
    /// `All` không có cửa sổ.
    pub fn range(&self, today: NaiveDate) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateWindow::All => None,
            DateWindow::Today => Some((today, today)),
            DateWindow::Tomorrow => {
                let d = today + Duration::days(1);
                Some((d, d))
            }
            DateWindow::ThisWeek => {
                let monday =
                    today - Duration::days(today.weekday().num_days_from_monday() as i64);
                Some((monday, monday + Duration::days(6)))
            }
        }
    }
}

// ==========================================
// SortSpec - khóa sắp xếp
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortSpec {
    /// Mặc định: đơn tạo gần nhất lên đầu.
    #[default]
    CreatedDesc,
    /// Theo hạn chót (bắt đầu + thời gian thi công), tăng dần.
    DeadlineAsc,
    /// Theo hạn chót, giảm dần.
    DeadlineDesc,
}

// ==========================================
// ViewCriteria - tiêu chí lọc/sắp xếp
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewCriteria {
    #[serde(default)]
    pub date_window: DateWindow,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub completed_only: bool,
    #[serde(default)]
    pub urgent_only: bool,
    #[serde(default)]
    pub overdue_only: bool,
    #[serde(default)]
    pub sort: SortSpec,
}

// ==========================================
// GroupedOrder - gộp đơn theo tiêu đề chuẩn hóa
// ==========================================
// Khóa nhóm = tiêu đề trim + viết hoa. progress_sum là TỔNG phần trăm
// (không phải trung bình) - hành vi giữ nguyên từ bản gốc; muốn phần
// trăm thì dùng average_progress().
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedOrder {
    pub key: String,   // tiêu đề chuẩn hóa (TRIM + UPPER)
    pub title: String, // tiêu đề của đơn gặp đầu tiên
    pub client: String,
    pub orders: Vec<ProductionOrder>,
    pub window_start: Option<NaiveDate>, // min(ngày bắt đầu)
    pub window_end: Option<NaiveDate>,   // max(bắt đầu + thời gian)
    pub progress_sum: i64,               // tổng progress_percent
}

impl GroupedOrder {
    /// Phần trăm trung bình của nhóm (làm tròn). Nhóm luôn khác rỗng.
    pub fn average_progress(&self) -> i64 {
        let n = self.orders.len() as i64;
        if n == 0 {
            return 0;
        }
        (self.progress_sum + n / 2) / n
    }
}

// ==========================================
// DashboardStats - năm bộ đếm trên tập đơn hiển thị
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub total: usize,
    pub completed: usize, // progress == 100
    pub overdue: usize,   // progress < 100 và hạn chót < hôm nay
    pub active: usize,    // total - completed
    pub due_soon: usize,  // progress < 100 và hạn chót trong [hôm nay, +3 ngày]
}
