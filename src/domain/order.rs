// ==========================================
// Quản lý xưởng - thực thể đơn hàng
// ==========================================
// ProductionOrder là thực thể trung tâm: nhập liệu thô từ người vận hành
// (doanh số, ngày nhận file, ngày đặt ván, ngày giao) + các trường dẫn xuất
// (duration_days, picking_date, progress_percent, stage).
// Trường dẫn xuất luôn được tính lại từ nhập liệu gốc, không sửa tay.
// ==========================================

use crate::domain::types::{Stage, SupplyStatus, SyncState};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tiêu đề placeholder của đơn chưa đặt tên; bị loại khỏi mọi view.
pub const PLACEHOLDER_TITLE: &str = "Chưa đặt tên";

/// Phân loại mặc định cho đơn tạo mới.
pub const DEFAULT_PRODUCT_TYPE: &str = "Hàng lẻ đặt";

/// Nhãn trạng thái fallback khi tracker không có cột trạng thái.
pub const FALLBACK_STEP_LABEL: &str = "Công việc mới";

// ==========================================
// ProviderSelection - tập NCC ván đã chọn
// ==========================================
// Giữ thứ tự hiển thị, nhưng so sánh bằng không phân biệt thứ tự.
// Dạng chữ trong tracker: tên nối bằng ", ".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProviderSelection(Vec<String>);

impl ProviderSelection {
    pub fn new(names: Vec<String>) -> Self {
        Self(names)
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.iter().any(|n| n == name)
    }

    /// Thêm/bỏ một NCC (toggle như UI chọn nhiều).
    pub fn toggle(&mut self, name: &str) {
        if self.contains(name) {
            self.0.retain(|n| n != name);
        } else {
            self.0.push(name.to_string());
        }
    }

    /// Đọc từ ô tracker: tên nối bằng ", ".
    pub fn from_text(text: &str) -> Self {
        Self(
            text.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }

    pub fn to_text(&self) -> String {
        self.0.join(", ")
    }
}

impl PartialEq for ProviderSelection {
    // So sánh theo tập hợp: thứ tự chọn không làm hai lựa chọn khác nhau
    fn eq(&self, other: &Self) -> bool {
        if self.0.len() != other.0.len() {
            return false;
        }
        let mut a: Vec<&String> = self.0.iter().collect();
        let mut b: Vec<&String> = other.0.iter().collect();
        a.sort();
        b.sort();
        a == b
    }
}

impl Eq for ProviderSelection {}

impl fmt::Display for ProviderSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

// ==========================================
// SupplySelection - vật tư phụ + tag trạng thái
// ==========================================
// Tập tên vật tư kèm tối đa một tag trạng thái.
// Dạng chữ trong tracker: "Bản lề, Kính [Đang đặt]".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SupplySelection {
    pub items: Vec<String>,
    pub status: SupplyStatus,
}

impl SupplySelection {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty() && self.status == SupplyStatus::Request
    }

    pub fn toggle(&mut self, name: &str) {
        if self.items.iter().any(|s| s == name) {
            self.items.retain(|s| s != name);
        } else {
            self.items.push(name.to_string());
        }
    }

    /// Đọc từ ô tracker: tách tag "[...]" rồi tách tên theo dấu phẩy.
    pub fn from_text(text: &str) -> Self {
        let status = SupplyStatus::from_text(text);
        let stripped = strip_bracket_tags(text);
        let items = stripped
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self { items, status }
    }

    pub fn to_text(&self) -> String {
        let names = self.items.join(", ");
        match self.status.tag() {
            Some(tag) if names.is_empty() => tag.to_string(),
            Some(tag) => format!("{} {}", names, tag),
            None => names,
        }
    }
}

impl fmt::Display for SupplySelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_text())
    }
}

/// Bỏ mọi đoạn "[...]" khỏi chuỗi (tag trạng thái vật tư).
fn strip_bracket_tags(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_tag = false;
    for ch in text.chars() {
        match ch {
            '[' => in_tag = true,
            ']' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out.trim().to_string()
}

// ==========================================
// ProductionOrder - đơn hàng sản xuất
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionOrder {
    // ===== Định danh =====
    pub id: String,                    // id cục bộ, ổn định, mờ
    pub external_key: Option<String>,  // mã dòng trên tracker (None = chưa sync)

    // ===== Thương mại =====
    pub title: String,  // mã đơn
    pub client: String, // khách hàng
    pub value: i64,     // doanh số, đơn vị đồng
    pub product_type: String,

    // ===== Quy trình =====
    pub step_label: String,    // bước hiện tại, thuộc danh mục bước
    pub stage: Stage,          // giai đoạn thô (dẫn xuất từ tiền tố nhãn)
    pub progress_percent: u8,  // 0..=100, dẫn xuất từ vị trí bước

    // ===== Lịch - nhập liệu =====
    pub file_received_date: Option<NaiveDate>, // ngày nhận file (mốc bắt đầu)
    pub material_order_date: Option<NaiveDate>, // ngày đặt ván
    pub delivery_date: Option<NaiveDate>,      // ngày giao (tự nhập)

    // ===== Lịch - dẫn xuất =====
    pub duration_days: i64,              // thời gian thi công, >= 1
    pub picking_date: Option<NaiveDate>, // ngày soạn hàng (ván về + 1)

    // ===== Nguồn lực =====
    pub board_providers: ProviderSelection, // NCC ván (tham chiếu yếu theo tên)
    pub assigned_tech: String,              // kỹ thuật CNC
    pub assigned_worker: String,            // thợ chính
    pub delivery_route: String,             // tuyến giao
    pub other_supplies: SupplySelection,    // vật tư phụ + tag trạng thái
    pub note: String,
    pub client_phone: String,

    // ===== Cờ =====
    pub is_urgent: bool,
    pub skipped: bool, // loại khỏi mọi view
    pub tags: Vec<String>,

    // ===== Bookkeeping =====
    pub created_at: i64, // mốc millisecond, tie-break sắp xếp mặc định
    #[serde(default)]
    pub sync: SyncState, // đối chiếu với tracker (không rollback khi ghi lỗi)
}

impl ProductionOrder {
    /// Mốc bắt đầu của khoảng lịch = ngày nhận file.
    pub fn start_date(&self) -> Option<NaiveDate> {
        self.file_received_date
    }

    /// Mốc kết thúc = bắt đầu + thời gian thi công.
    /// Đơn chưa có ngày nhận file thì không có khoảng lịch.
    pub fn end_date(&self) -> Option<NaiveDate> {
        self.start_date()
            .map(|d| d + Duration::days(self.duration_days))
    }

    pub fn is_completed(&self) -> bool {
        self.progress_percent >= 100
    }
}

// ==========================================
// OrderDraft - nhập liệu tạo đơn mới
// ==========================================
// Constructor áp mặc định nằm ở tầng API (OrdersApi::create_order).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderDraft {
    pub title: String,
    pub client: String,
    #[serde(default)]
    pub value: i64,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub file_received_date: Option<NaiveDate>,
    #[serde(default)]
    pub material_order_date: Option<NaiveDate>,
    #[serde(default)]
    pub delivery_date: Option<NaiveDate>,
    #[serde(default)]
    pub board_providers: ProviderSelection,
    #[serde(default)]
    pub assigned_tech: String,
    #[serde(default)]
    pub assigned_worker: String,
    #[serde(default)]
    pub delivery_route: String,
    #[serde(default)]
    pub other_supplies: SupplySelection,
    #[serde(default)]
    pub note: String,
    #[serde(default)]
    pub client_phone: String,
}

// ==========================================
// RawOrderRecord - bản ghi thô từ tracker
// ==========================================
// Sản phẩm trung gian của import: đã qua bảng chuẩn hóa tên cột,
// chưa qua chuyển kiểu. Chỉ sống trong luồng import.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawOrderRecord {
    pub order_code: Option<String>,
    pub client: Option<String>,
    pub value_text: Option<String>,
    pub board_provider: Option<String>,
    pub product_type: Option<String>,
    pub status_text: Option<String>,
    pub delivery_date: Option<String>,
    pub duration_text: Option<String>,
    pub technician: Option<String>,
    pub file_received_date: Option<String>,
    pub other_supply: Option<String>,
    pub material_order_date: Option<String>,
    pub worker: Option<String>,
    pub picking_date: Option<String>,
    pub delivery_route: Option<String>,
    pub note: Option<String>,
    pub phone: Option<String>,

    // Số dòng trong file/feed gốc (cho báo cáo loại dòng)
    pub row_number: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_selection_set_equality() {
        let a = ProviderSelection::from_text("An Cường, Ba Thanh");
        let b = ProviderSelection::from_text("Ba Thanh, An Cường");
        assert_eq!(a, b);
        // thứ tự hiển thị vẫn giữ nguyên
        assert_eq!(a.to_text(), "An Cường, Ba Thanh");
        assert_eq!(b.to_text(), "Ba Thanh, An Cường");
    }

    #[test]
    fn test_provider_selection_toggle() {
        let mut sel = ProviderSelection::default();
        sel.toggle("An Cường");
        sel.toggle("Minh Long");
        assert_eq!(sel.to_text(), "An Cường, Minh Long");
        sel.toggle("An Cường");
        assert_eq!(sel.to_text(), "Minh Long");
    }

    #[test]
    fn test_supply_selection_roundtrip() {
        let sel = SupplySelection::from_text("Bản lề, Ray trượt [Đang đặt]");
        assert_eq!(sel.items, vec!["Bản lề", "Ray trượt"]);
        assert_eq!(sel.status, SupplyStatus::Ordering);
        assert_eq!(sel.to_text(), "Bản lề, Ray trượt [Đang đặt]");
    }

    #[test]
    fn test_supply_selection_tag_only() {
        let sel = SupplySelection::from_text("[Đã giao]");
        assert!(sel.items.is_empty());
        assert_eq!(sel.status, SupplyStatus::Delivered);
        assert_eq!(sel.to_text(), "[Đã giao]");
    }

    #[test]
    fn test_end_date_requires_start() {
        let mut order = test_order();
        order.file_received_date = None;
        assert_eq!(order.end_date(), None);

        order.file_received_date = NaiveDate::from_ymd_opt(2024, 3, 4);
        order.duration_days = 2;
        assert_eq!(order.end_date(), NaiveDate::from_ymd_opt(2024, 3, 6));
    }

    fn test_order() -> ProductionOrder {
        ProductionOrder {
            id: "t1".into(),
            external_key: None,
            title: "DH-001".into(),
            client: "Anh Minh".into(),
            value: 0,
            product_type: DEFAULT_PRODUCT_TYPE.into(),
            step_label: "1.1 Cọc khảo sát".into(),
            stage: Stage::Design,
            progress_percent: 0,
            file_received_date: None,
            material_order_date: None,
            delivery_date: None,
            duration_days: 3,
            picking_date: None,
            board_providers: ProviderSelection::default(),
            assigned_tech: String::new(),
            assigned_worker: String::new(),
            delivery_route: String::new(),
            other_supplies: SupplySelection::default(),
            note: String::new(),
            client_phone: String::new(),
            is_urgent: false,
            skipped: false,
            tags: Vec::new(),
            created_at: 0,
            sync: SyncState::Synced,
        }
    }
}
