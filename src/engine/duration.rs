// ==========================================
// Quản lý xưởng - tính thời gian & lead time
// ==========================================
// Hàm thuần: doanh số -> số ngày thi công, chọn NCC -> lead time ván.
// Nhập liệu hỏng/thiếu chuẩn hóa về sentinel (0 / rỗng), không báo lỗi.
// ==========================================

use crate::config::ScheduleSettings;
use crate::domain::catalog::MaterialProvider;
use crate::domain::order::ProviderSelection;
use chrono::NaiveDate;

pub struct DurationCalculator {
    settings: ScheduleSettings,
    providers: Vec<MaterialProvider>,
}

impl DurationCalculator {
    pub fn new(settings: ScheduleSettings, providers: Vec<MaterialProvider>) -> Self {
        Self {
            settings,
            providers,
        }
    }

    pub fn settings(&self) -> &ScheduleSettings {
        &self.settings
    }

    /// Thời gian thi công từ doanh số (đồng):
    /// ceil(triệu / 40) + 1 ngày đệm, sàn 1 ngày.
    /// Ceiling để không bao giờ cắt ngắn thời gian danh nghĩa.
    pub fn construction_duration(&self, value: i64) -> i64 {
        let unit = self.settings.value_unit.max(1);
        let divisor = self.settings.duration_divisor.max(1);
        let millions = value.max(0) / unit;
        let base = (millions + divisor - 1) / divisor; // ceil
        (base + self.settings.duration_buffer_days).max(self.settings.min_duration_days)
    }

    /// Số ngày CNC = ngày đặt ván - ngày nhận file, sàn 0.
    /// Thiếu một trong hai mốc -> sentinel 0 (chỉ để hiển thị, không lưu).
    pub fn cnc_duration(
        &self,
        file_received_date: Option<NaiveDate>,
        material_order_date: Option<NaiveDate>,
    ) -> i64 {
        match (file_received_date, material_order_date) {
            (Some(file), Some(order)) => (order - file).num_days().max(0),
            _ => 0,
        }
    }

    /// Lead time ván = MAX lead time trong các NCC đã chọn
    /// (NCC chậm nhất quyết định tiến độ). Tên không có trong danh mục
    /// đóng góp 0; không chọn gì -> 0.
    pub fn provider_lead_days(&self, selection: &ProviderSelection) -> i64 {
        selection
            .names()
            .iter()
            .map(|name| {
                self.providers
                    .iter()
                    .find(|p| &p.name == name)
                    .map(|p| p.lead_days)
                    .unwrap_or(0)
            })
            .max()
            .unwrap_or(0)
    }
}
