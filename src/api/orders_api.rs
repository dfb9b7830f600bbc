// ==========================================
// Quản lý xưởng - API thao tác đơn hàng
// ==========================================
// Mọi thao tác áp vào tập cục bộ TRƯỚC (optimistic, thấy ngay), sau đó
// mới gọi tracker best-effort. Ghi thất bại: không rollback, đơn mang
// SyncState::Failed + thông báo lỗi; lưu lại thủ công là đường retry.
// Các lời ghi không được sắp thứ tự với nhau (last-write-wins).
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::order::{OrderDraft, ProductionOrder};
use crate::domain::types::{Stage, SyncState};
use crate::engine::duration::DurationCalculator;
use crate::engine::scheduler::AutoScheduler;
use crate::engine::workflow::WorkflowEngine;
use crate::i18n::t_with_args;
use crate::importer::exporter::OrderExporter;
use crate::store::order_book::OrderBook;
use crate::store::traits::{Notification, NotificationSink, TrackerClient};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{info, warn};
use uuid::Uuid;

pub struct OrdersApi {
    book: Arc<Mutex<OrderBook>>,
    tracker: Arc<dyn TrackerClient>,
    notifier: Arc<dyn NotificationSink>,
    workflow: WorkflowEngine,
    scheduler: AutoScheduler,
    exporter: OrderExporter,
    default_duration_days: i64,
}

impl OrdersApi {
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
            workflow: WorkflowEngine::new(config.workflow.clone()),
            scheduler: AutoScheduler::new(DurationCalculator::new(
                config.settings.clone(),
                config.providers.clone(),
            )),
            exporter: OrderExporter::new(config.settings.value_unit),
            default_duration_days: config.settings.default_duration_days,
        }
    }

    fn lock_book(&self) -> ApiResult<MutexGuard<'_, OrderBook>> {
        self.book
            .lock()
            .map_err(|e| ApiError::Internal(format!("không khóa được tập đơn: {}", e)))
    }

    /// Store bên ngoài đẩy snapshot toàn bộ: thay tập làm việc.
    pub fn apply_snapshot(&self, orders: Vec<ProductionOrder>) -> ApiResult<()> {
        self.lock_book()?.apply_snapshot(orders);
        Ok(())
    }

    // ==========================================
    // Tạo đơn mới
    // ==========================================

    /// Tạo đơn với mặc định: bước đầu danh mục, progress 0, thời gian
    /// mặc định khi chưa có doanh số (doanh số 0 không phải nhập liệu
    /// thật, không đưa qua công thức).
    pub async fn create_order(&self, draft: OrderDraft) -> ApiResult<ProductionOrder> {
        if draft.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("mã đơn không được rỗng".into()));
        }

        let mut order = ProductionOrder {
            id: Uuid::new_v4().to_string(),
            external_key: None,
            title: draft.title,
            client: draft.client,
            value: draft.value,
            product_type: if draft.product_type.trim().is_empty() {
                crate::domain::order::DEFAULT_PRODUCT_TYPE.to_string()
            } else {
                draft.product_type
            },
            step_label: self.workflow.catalog().first_step().to_string(),
            stage: Stage::Design,
            progress_percent: 0,
            file_received_date: draft.file_received_date,
            material_order_date: draft.material_order_date,
            delivery_date: draft.delivery_date,
            duration_days: self.default_duration_days,
            picking_date: None,
            board_providers: draft.board_providers,
            assigned_tech: draft.assigned_tech,
            assigned_worker: draft.assigned_worker,
            delivery_route: draft.delivery_route,
            other_supplies: draft.other_supplies,
            note: draft.note,
            client_phone: draft.client_phone,
            is_urgent: false,
            skipped: false,
            tags: Vec::new(),
            created_at: chrono::Utc::now().timestamp_millis(),
            sync: SyncState::Pending,
        };

        self.scheduler.apply(&mut order);
        if order.value == 0 {
            order.duration_days = self.default_duration_days;
        }

        self.lock_book()?.upsert(order.clone());
        info!(order_id = %order.id, title = %order.title, "tạo đơn mới");

        let payload = self.exporter.full_payload(&order);
        match self.tracker.add_row(payload).await {
            Ok(()) => {
                order.external_key = Some(order.title.clone());
                order.sync = SyncState::Synced;
                self.lock_book()?.upsert(order.clone());
            }
            Err(e) => self.mark_sync_failed(&mut order, &e.to_string())?,
        }
        Ok(order)
    }

    // ==========================================
    // Sửa đơn
    // ==========================================

    /// Lưu bản sửa của một đơn. Mọi trường dẫn xuất được tính lại từ
    /// nhập liệu gốc (lịch từ doanh số/ngày đặt ván/NCC, tiến độ từ
    /// nhãn bước) - không tin giá trị dẫn xuất do caller đưa vào.
    pub async fn update_order(&self, mut order: ProductionOrder) -> ApiResult<ProductionOrder> {
        if order.title.trim().is_empty() {
            return Err(ApiError::InvalidInput("mã đơn không được rỗng".into()));
        }

        self.scheduler.apply(&mut order);
        order.stage = self.workflow.classify_stage(&order.step_label);
        if self.workflow.catalog().position(&order.step_label).is_some() {
            // nhãn thuộc danh mục: tiến độ theo vị trí bước
            let label = order.step_label.clone();
            self.workflow.apply_step(&mut order, label);
        }

        order.sync = SyncState::Pending;
        self.lock_book()?.upsert(order.clone());

        let payload = self.exporter.full_payload(&order);
        let result = match order.external_key.as_deref() {
            Some(key) => self.tracker.update_row(key, payload).await,
            None => self.tracker.add_row(payload).await,
        };
        match result {
            Ok(()) => {
                if order.external_key.is_none() {
                    order.external_key = Some(order.title.clone());
                }
                order.sync = SyncState::Synced;
                self.lock_book()?.upsert(order.clone());
            }
            Err(e) => self.mark_sync_failed(&mut order, &e.to_string())?,
        }
        Ok(order)
    }

    // ==========================================
    // Tiến bước quy trình
    // ==========================================

    /// Tiến đơn sang bước kế tiếp trong danh mục (chỉ tiến, một bước).
    /// Đơn đã ở bước cuối: no-op, vẫn Ok.
    pub async fn advance_step(&self, id: &str) -> ApiResult<ProductionOrder> {
        let mut order = {
            let mut book = self.lock_book()?;
            let mut order = book
                .get(id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("đơn {}", id)))?;
            self.workflow.advance(&mut order);
            if order.external_key.is_some() {
                order.sync = SyncState::Pending;
            }
            book.upsert(order.clone());
            order
        };

        // cập nhật nhanh trên tracker: chỉ cột trạng thái + mã đơn
        if let Some(key) = order.external_key.clone() {
            let payload = self.exporter.status_payload(&order);
            match self.tracker.update_row(&key, payload).await {
                Ok(()) => {
                    order.sync = SyncState::Synced;
                    self.lock_book()?.set_sync(&order.id, SyncState::Synced);
                    self.notifier.notify(Notification::success(t_with_args(
                        "orders.advanced",
                        &[("step", &order.step_label)],
                    )));
                }
                Err(e) => self.mark_sync_failed(&mut order, &e.to_string())?,
            }
        } else {
            self.notifier.notify(Notification::success(t_with_args(
                "orders.advanced",
                &[("step", &order.step_label)],
            )));
        }
        Ok(order)
    }

    // ==========================================
    // Cờ gấp
    // ==========================================

    /// Bật/tắt cờ gấp. Cờ chỉ sống cục bộ, không có cột tracker.
    pub fn toggle_urgent(&self, id: &str) -> ApiResult<ProductionOrder> {
        let mut book = self.lock_book()?;
        let mut order = book
            .get(id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("đơn {}", id)))?;
        order.is_urgent = !order.is_urgent;
        book.upsert(order.clone());
        Ok(order)
    }

    // ==========================================
    // Ghi chú
    // ==========================================

    pub async fn save_note(&self, id: &str, note: String) -> ApiResult<ProductionOrder> {
        let mut order = {
            let mut book = self.lock_book()?;
            let mut order = book
                .get(id)
                .cloned()
                .ok_or_else(|| ApiError::NotFound(format!("đơn {}", id)))?;
            order.note = note;
            if order.external_key.is_some() {
                order.sync = SyncState::Pending;
            }
            book.upsert(order.clone());
            order
        };

        if let Some(key) = order.external_key.clone() {
            let payload = self.exporter.note_payload(&order);
            match self.tracker.update_row(&key, payload).await {
                Ok(()) => {
                    order.sync = SyncState::Synced;
                    self.lock_book()?.set_sync(&order.id, SyncState::Synced);
                    self.notifier
                        .notify(Notification::success(t_with_args("orders.note_saved", &[])));
                }
                Err(e) => self.mark_sync_failed(&mut order, &e.to_string())?,
            }
        }
        Ok(order)
    }

    // ==========================================
    // Xóa đơn
    // ==========================================

    /// Gỡ đơn khỏi tập cục bộ, và yêu cầu tracker xóa dòng khi đơn có
    /// liên kết. Xóa không được sắp thứ tự với lời ghi đang bay của
    /// cùng đơn; tracker lỗi thì bản xóa cục bộ vẫn giữ nguyên.
    pub async fn delete_order(&self, id: &str) -> ApiResult<()> {
        let removed = self
            .lock_book()?
            .remove(id)
            .ok_or_else(|| ApiError::NotFound(format!("đơn {}", id)))?;

        if let Some(key) = removed.external_key.as_deref() {
            if let Err(e) = self.tracker.delete_row(key).await {
                warn!(order_id = %id, error = %e, "xóa trên tracker thất bại");
                self.notifier.notify(Notification::error(t_with_args(
                    "orders.delete_sync_failed",
                    &[("title", &removed.title), ("error", &e.to_string())],
                )));
                return Ok(()); // không khôi phục bản ghi cục bộ
            }
        }
        self.notifier.notify(Notification::success(t_with_args(
            "orders.deleted",
            &[("title", &removed.title)],
        )));
        Ok(())
    }

    // ==========================================
    // Nội bộ
    // ==========================================

    fn mark_sync_failed(&self, order: &mut ProductionOrder, error: &str) -> ApiResult<()> {
        warn!(order_id = %order.id, error, "ghi tracker thất bại, giữ thay đổi cục bộ");
        order.sync = SyncState::Failed;
        self.lock_book()?.set_sync(&order.id, SyncState::Failed);
        self.notifier.notify(Notification::error(t_with_args(
            "orders.sync_failed",
            &[("title", &order.title), ("error", error)],
        )));
        Ok(())
    }
}
