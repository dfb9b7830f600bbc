// ==========================================
// Quản lý xưởng - dữ liệu danh mục (master data)
// ==========================================
// Danh mục tĩnh, không thuộc sở hữu của đơn hàng nào.
// Đơn hàng tham chiếu NCC theo tên (weak reference): tên bị đổi/xóa
// chỉ để lại tên mồ côi trong board_providers, không phải lỗi.
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// WorkflowCatalog - danh mục bước sản xuất
// ==========================================
// Thứ tự cố định; vị trí quyết định progress_percent,
// tiền tố số quyết định stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowCatalog {
    steps: Vec<String>,
}

impl WorkflowCatalog {
    pub fn new(steps: Vec<String>) -> Self {
        Self { steps }
    }

    pub fn steps(&self) -> &[String] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Vị trí của nhãn trong danh mục (None nếu không có).
    pub fn position(&self, label: &str) -> Option<usize> {
        self.steps.iter().position(|s| s == label)
    }

    /// Bước khởi đầu của đơn mới.
    pub fn first_step(&self) -> &str {
        self.steps.first().map(String::as_str).unwrap_or("")
    }

    /// Bước kết thúc (trạng thái terminal).
    pub fn terminal_step(&self) -> &str {
        self.steps.last().map(String::as_str).unwrap_or("")
    }

    pub fn is_terminal(&self, label: &str) -> bool {
        label == self.terminal_step()
    }
}

impl Default for WorkflowCatalog {
    fn default() -> Self {
        Self::new(
            [
                "1.1 Cọc khảo sát",
                "1.2 Chốt thiết kế",
                "2.1 Đặt ván",
                "2.2 Gia công CNC",
                "2.3 Lắp ráp thô",
                "3.1 Soạn hàng & giao lắp",
                "3.2 Nghiệm thu",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

// ==========================================
// MaterialProvider - nhà cung cấp ván
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialProvider {
    pub name: String,
    pub lead_days: i64, // số ngày ván về sau khi đặt, >= 0
}

impl MaterialProvider {
    pub fn new(name: impl Into<String>, lead_days: i64) -> Self {
        Self {
            name: name.into(),
            lead_days,
        }
    }
}

/// Danh mục NCC ván mặc định của xưởng.
pub fn default_providers() -> Vec<MaterialProvider> {
    vec![
        MaterialProvider::new("An Cường", 3),
        MaterialProvider::new("Ba Thanh", 2),
        MaterialProvider::new("Minh Long", 4),
        MaterialProvider::new("Mộc Phát", 5),
        MaterialProvider::new("Tân Thành", 1),
    ]
}

// ==========================================
// MasterData - danh mục nhân sự / phân loại / vật tư
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MasterData {
    pub tech_team: Vec<String>,     // Kỹ thuật (CNC)
    pub workers: Vec<String>,       // Thợ chính
    pub routes: Vec<String>,        // Tuyến giao
    pub product_types: Vec<String>, // Phân loại đơn
    pub supplies: Vec<String>,      // Vật tư phụ
}

impl Default for MasterData {
    fn default() -> Self {
        Self {
            tech_team: vec_of(&["Tuấn CNC", "Hòa Kỹ Thuật", "Phước Vẽ 3D"]),
            workers: vec_of(&["Thợ Nam", "Thợ Hùng", "Thợ Bảy", "Đội lắp 2"]),
            routes: vec_of(&["Nội thành", "Quận 9 - Thủ Đức", "Bình Dương", "Tỉnh xa"]),
            product_types: vec_of(&["Hàng lẻ đặt", "Công trình", "Tủ bếp", "Showroom"]),
            supplies: vec_of(&["Bản lề", "Ray trượt", "Tay nắm", "Kính", "Đèn LED", "Sơn PU"]),
        }
    }
}

fn vec_of(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
