// ==========================================
// Quản lý xưởng - tham số lập lịch
// ==========================================
// Công thức xưởng: thời gian thi công = doanh số (triệu) / 40 + 1 ngày đệm.
// Các hằng số gom về một chỗ để file cấu hình ghi đè được.
// ==========================================

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScheduleSettings {
    /// Đơn vị lớn của doanh số (tracker lưu số đã chia cho đơn vị này).
    pub value_unit: i64,
    /// Mẫu số công thức thi công (triệu / divisor).
    pub duration_divisor: i64,
    /// Ngày đệm cộng thêm sau phép chia.
    pub duration_buffer_days: i64,
    /// Sàn của thời gian thi công.
    pub min_duration_days: i64,
    /// Thời gian mặc định cho đơn tạo mới chưa có doanh số.
    pub default_duration_days: i64,
    /// Ngày đệm dỡ/soạn hàng sau khi ván về.
    pub picking_buffer_days: i64,
    /// Cửa sổ "sắp đến hạn" của dashboard (ngày, tính cả hôm nay).
    pub due_soon_window_days: i64,
}

impl Default for ScheduleSettings {
    fn default() -> Self {
        Self {
            value_unit: 1_000_000,
            duration_divisor: 40,
            duration_buffer_days: 1,
            min_duration_days: 1,
            default_duration_days: 3,
            picking_buffer_days: 1,
            due_soon_window_days: 3,
        }
    }
}
