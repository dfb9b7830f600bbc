// ==========================================
// Quản lý xưởng - nhập đơn hàng loạt từ tracker
// ==========================================
// Ống import: dòng lỏng -> bảng chuẩn hóa cột -> RawOrderRecord
// -> ProductionOrder định kiểu chặt, hoặc lý do loại có cấu trúc.
// Giá trị hỏng chuẩn hóa về sentinel (0 / rỗng / None); chỉ dòng
// thiếu mã đơn mới bị loại.
// ==========================================

use crate::config::ScheduleSettings;
use crate::domain::order::{
    ProductionOrder, ProviderSelection, RawOrderRecord, SupplySelection, FALLBACK_STEP_LABEL,
};
use crate::domain::types::{Stage, SyncState};
use crate::importer::error::RejectReason;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::sheet_date::parse_sheet_date;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument};

// ==========================================
// ImportOutcome - kết quả một đợt nhập
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub orders: Vec<ProductionOrder>,
    pub rejected: Vec<RejectReason>,
    pub total_rows: usize,
}

pub struct OrderImporter {
    mapper: FieldMapper,
    settings: ScheduleSettings,
}

impl OrderImporter {
    pub fn new(settings: ScheduleSettings) -> Self {
        Self {
            mapper: FieldMapper,
            settings,
        }
    }

    /// Nhập một tập dòng tracker lỏng.
    ///
    /// `now_ms` là mốc created_at gán cho các đơn nhập về (truyền vào
    /// để giữ hàm thuần, tầng API đưa đồng hồ thật).
    #[instrument(skip(self, rows), fields(rows = rows.len()))]
    pub fn import_rows(&self, rows: &[HashMap<String, String>], now_ms: i64) -> ImportOutcome {
        let mut orders = Vec::new();
        let mut rejected = Vec::new();

        for (idx, row) in rows.iter().enumerate() {
            let raw = self.mapper.map_row(row, idx + 1);
            match self.canonicalize(raw, now_ms) {
                Ok(order) => orders.push(order),
                Err(reason) => rejected.push(reason),
            }
        }

        info!(
            imported = orders.len(),
            rejected = rejected.len(),
            "nhập dữ liệu tracker xong"
        );
        ImportOutcome {
            orders,
            rejected,
            total_rows: rows.len(),
        }
    }

    /// RawOrderRecord -> ProductionOrder định kiểu chặt.
    /// Không bao giờ trả về đơn khởi tạo dở dang.
    pub fn canonicalize(
        &self,
        raw: RawOrderRecord,
        now_ms: i64,
    ) -> Result<ProductionOrder, RejectReason> {
        let Some(order_code) = raw.order_code else {
            return Err(RejectReason::MissingOrderCode {
                row: raw.row_number,
            });
        };

        let status_text = raw
            .status_text
            .unwrap_or_else(|| FALLBACK_STEP_LABEL.to_string());
        // hợp đồng tracker: chữ trạng thái chứa "3." nghĩa là đã sang
        // giai đoạn giao/nghiệm thu -> 100%, còn lại coi là đang làm dở 50%
        let progress_percent: u8 = if status_text.contains("3.") { 100 } else { 50 };

        Ok(ProductionOrder {
            id: format!("trk_{}", order_code),
            external_key: Some(order_code.clone()),
            title: order_code,
            client: raw.client.unwrap_or_default(),
            value: parse_sheet_value(raw.value_text.as_deref(), self.settings.value_unit),
            product_type: raw.product_type.unwrap_or_default(),
            stage: Stage::classify(&status_text),
            progress_percent,
            step_label: status_text,
            file_received_date: raw
                .file_received_date
                .as_deref()
                .and_then(parse_sheet_date),
            material_order_date: raw
                .material_order_date
                .as_deref()
                .and_then(parse_sheet_date),
            delivery_date: raw.delivery_date.as_deref().and_then(parse_sheet_date),
            duration_days: parse_duration(
                raw.duration_text.as_deref(),
                self.settings.default_duration_days,
            ),
            picking_date: raw.picking_date.as_deref().and_then(parse_sheet_date),
            board_providers: raw
                .board_provider
                .as_deref()
                .map(ProviderSelection::from_text)
                .unwrap_or_default(),
            assigned_tech: raw.technician.unwrap_or_default(),
            assigned_worker: raw.worker.unwrap_or_default(),
            delivery_route: raw.delivery_route.unwrap_or_default(),
            other_supplies: raw
                .other_supply
                .as_deref()
                .map(SupplySelection::from_text)
                .unwrap_or_default(),
            note: raw.note.unwrap_or_default(),
            client_phone: raw.phone.unwrap_or_default(),
            is_urgent: false,
            skipped: false,
            tags: Vec::new(),
            created_at: now_ms,
            sync: SyncState::Synced,
        })
    }
}

/// Ô doanh số của tracker: chỉ giữ chữ số, nhân với đơn vị triệu.
/// "54" -> 54_000_000; hỏng/rỗng -> 0.
fn parse_sheet_value(text: Option<&str>, unit: i64) -> i64 {
    let digits: String = text
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_digit())
        .collect();
    digits.parse::<i64>().unwrap_or(0).saturating_mul(unit)
}

/// Ô thời gian (ngày); thiếu hoặc không phải số -> mặc định.
fn parse_duration(text: Option<&str>, default_days: i64) -> i64 {
    text.and_then(|t| t.trim().parse::<i64>().ok())
        .filter(|d| *d >= 1)
        .unwrap_or(default_days)
}
