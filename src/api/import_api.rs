// ==========================================
// Quản lý xưởng - API nhập/xuất hàng loạt
// ==========================================
// Nhập: feed tracker hoặc file export (.csv/.xlsx) -> snapshot thay
// tập làm việc. Xuất: đẩy toàn bộ đơn lên tracker theo cột chuẩn.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::types::SyncState;
use crate::i18n::t_with_args;
use crate::importer::error::RejectReason;
use crate::importer::exporter::OrderExporter;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::order_importer::OrderImporter;
use crate::store::order_book::OrderBook;
use crate::store::traits::{Notification, NotificationSink, TrackerClient};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, instrument, warn};

// ==========================================
// ImportSummary - báo cáo một đợt nhập
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub imported: usize,
    pub rejected: Vec<RejectReason>,
}

pub struct ImportApi {
    book: Arc<Mutex<OrderBook>>,
    tracker: Arc<dyn TrackerClient>,
    notifier: Arc<dyn NotificationSink>,
    importer: OrderImporter,
    exporter: OrderExporter,
}

impl ImportApi {
    pub fn new(
        config: &AppConfig,
        book: Arc<Mutex<OrderBook>>,
        tracker: Arc<dyn TrackerClient>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            book,
            tracker,
            notifier,
            importer: OrderImporter::new(config.settings.clone()),
            exporter: OrderExporter::new(config.settings.value_unit),
        }
    }

    fn lock_book(&self) -> ApiResult<MutexGuard<'_, OrderBook>> {
        self.book
            .lock()
            .map_err(|e| ApiError::Internal(format!("không khóa được tập đơn: {}", e)))
    }

    // ==========================================
    // Nhập
    // ==========================================

    /// Tải toàn bộ dòng từ tracker và thay tập làm việc bằng kết quả.
    #[instrument(skip(self))]
    pub async fn import_from_tracker(&self) -> ApiResult<ImportSummary> {
        let rows = match self.tracker.fetch_rows().await {
            Ok(rows) => rows,
            Err(e) => {
                warn!(error = %e, "tải dữ liệu tracker thất bại");
                self.notifier.notify(Notification::error(t_with_args(
                    "import.failed",
                    &[("error", &e.to_string())],
                )));
                return Err(e.into());
            }
        };

        let now_ms = chrono::Utc::now().timestamp_millis();
        let outcome = self.importer.import_rows(&rows, now_ms);
        let summary = ImportSummary {
            total_rows: outcome.total_rows,
            imported: outcome.orders.len(),
            rejected: outcome.rejected,
        };
        self.lock_book()?.apply_snapshot(outcome.orders);

        self.notifier.notify(Notification::success(t_with_args(
            "import.done",
            &[("count", &summary.imported.to_string())],
        )));
        Ok(summary)
    }

    /// Nhập từ file export của tracker (.csv / .xlsx).
    #[instrument(skip_all)]
    pub fn import_from_file<P: AsRef<Path>>(&self, path: P) -> ApiResult<ImportSummary> {
        let path = path.as_ref();
        info!(path = %path.display(), "nhập từ file export tracker");
        let rows = UniversalFileParser.parse(path)?;
        let now_ms = chrono::Utc::now().timestamp_millis();
        let outcome = self.importer.import_rows(&rows, now_ms);
        let summary = ImportSummary {
            total_rows: outcome.total_rows,
            imported: outcome.orders.len(),
            rejected: outcome.rejected,
        };
        self.lock_book()?.apply_snapshot(outcome.orders);
        info!(imported = summary.imported, "nhập từ file xong");
        Ok(summary)
    }

    // ==========================================
    // Xuất
    // ==========================================

    /// Đẩy toàn bộ tập đơn lên tracker (đơn có khóa thì cập nhật dòng,
    /// chưa có thì thêm dòng). Trả về số đơn đẩy thành công; đơn lỗi
    /// mang SyncState::Failed, không chặn các đơn còn lại.
    #[instrument(skip(self))]
    pub async fn export_all(&self) -> ApiResult<usize> {
        let orders = self.lock_book()?.orders().to_vec();

        let pushes = orders.iter().map(|order| {
            let payload = self.exporter.full_payload(order);
            let tracker = Arc::clone(&self.tracker);
            let key = order.external_key.clone();
            async move {
                match key {
                    Some(key) => tracker.update_row(&key, payload).await,
                    None => tracker.add_row(payload).await,
                }
            }
        });
        let results = join_all(pushes).await;

        let mut pushed = 0usize;
        {
            let mut book = self.lock_book()?;
            for (order, result) in orders.iter().zip(results) {
                match result {
                    Ok(()) => {
                        pushed += 1;
                        book.set_sync(&order.id, SyncState::Synced);
                    }
                    Err(e) => {
                        warn!(order_id = %order.id, error = %e, "đẩy đơn lên tracker thất bại");
                        book.set_sync(&order.id, SyncState::Failed);
                    }
                }
            }
        }

        let failed = orders.len() - pushed;
        if failed > 0 {
            self.notifier.notify(Notification::error(t_with_args(
                "export.partial",
                &[("failed", &failed.to_string())],
            )));
        } else {
            self.notifier.notify(Notification::success(t_with_args(
                "export.done",
                &[("count", &pushed.to_string())],
            )));
        }
        Ok(pushed)
    }
}
