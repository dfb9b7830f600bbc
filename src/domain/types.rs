// ==========================================
// Quản lý xưởng - định nghĩa kiểu miền
// ==========================================
// Serialization: snake_case (khớp payload front end)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// Giai đoạn sản xuất (Stage)
// ==========================================
// Suy ra từ tiền tố số của nhãn bước ("1." / "2." / "3.1" / "3.2")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Design,       // 1.x - khảo sát & thiết kế
    Material,     // 2.x - đặt ván & gia công
    DeliveryPrep, // 3.1 - soạn hàng & giao
    Done,         // 3.2 - nghiệm thu
}

impl Stage {
    /// Phân loại giai đoạn từ nhãn bước.
    ///
    /// Nhãn không khớp tiền tố nào rơi về giai đoạn sớm nhất.
    pub fn classify(step_label: &str) -> Self {
        let label = step_label.trim();
        if label.starts_with("3.2") {
            Stage::Done
        } else if label.starts_with("3.") {
            Stage::DeliveryPrep
        } else if label.starts_with("2.") {
            Stage::Material
        } else {
            Stage::Design
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Design => write!(f, "design"),
            Stage::Material => write!(f, "material"),
            Stage::DeliveryPrep => write!(f, "delivery_prep"),
            Stage::Done => write!(f, "done"),
        }
    }
}

// ==========================================
// Trạng thái vật tư phụ (Supply Status)
// ==========================================
// Lưu dưới dạng tag chữ trong ô tracker: "[Đang đặt]" / "[Đã giao]"
// Không có tag = Yêu cầu (Request)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SupplyStatus {
    #[default]
    Request,   // Yêu cầu
    Ordering,  // Đang đặt
    Delivered, // Đã giao
}

impl SupplyStatus {
    /// Tag chữ ghi vào tracker; `Request` không có tag.
    pub fn tag(&self) -> Option<&'static str> {
        match self {
            SupplyStatus::Request => None,
            SupplyStatus::Ordering => Some("[Đang đặt]"),
            SupplyStatus::Delivered => Some("[Đã giao]"),
        }
    }

    /// Nhận diện tag trong chuỗi vật tư thô.
    pub fn from_text(text: &str) -> Self {
        if text.contains("[Đang đặt]") {
            SupplyStatus::Ordering
        } else if text.contains("[Đã giao]") {
            SupplyStatus::Delivered
        } else {
            SupplyStatus::Request
        }
    }
}

impl fmt::Display for SupplyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SupplyStatus::Request => write!(f, "request"),
            SupplyStatus::Ordering => write!(f, "ordering"),
            SupplyStatus::Delivered => write!(f, "delivered"),
        }
    }
}

// ==========================================
// Trạng thái đồng bộ (Sync State)
// ==========================================
// Đối chiếu giữa bản ghi local (optimistic) và tracker bên ngoài.
// Ghi thất bại không rollback - đơn giữ nguyên, trạng thái = Failed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SyncState {
    #[default]
    Synced,  // Khớp với tracker
    Pending, // Ghi đang chờ
    Failed,  // Ghi thất bại, cần lưu lại thủ công
}

impl fmt::Display for SyncState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncState::Synced => write!(f, "synced"),
            SyncState::Pending => write!(f, "pending"),
            SyncState::Failed => write!(f, "failed"),
        }
    }
}

// ==========================================
// Mức độ thông báo (Severity)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Info,
    Success,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Error => write!(f, "error"),
        }
    }
}
