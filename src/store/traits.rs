// ==========================================
// Quản lý xưởng - seam cộng tác viên ngoài
// ==========================================
// Lõi định nghĩa trait, front end cắm adapter thật (dependency
// inversion - lõi không biết transport của tracker hay cách hiển thị
// thông báo). Ghi tracker là best-effort, last-write-wins: lỗi được
// báo qua NotificationSink, không rollback thay đổi cục bộ.
// ==========================================

use crate::domain::types::Severity;
use crate::importer::exporter::TrackerPayload;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

// ==========================================
// Lỗi phía tracker
// ==========================================
#[derive(Error, Debug)]
pub enum TrackerError {
    #[error("lỗi kết nối tracker: {0}")]
    Transport(String),

    #[error("tracker từ chối thao tác: {0}")]
    Rejected(String),
}

/// Dịch vụ tracker (spreadsheet) bên ngoài.
///
/// Các lời gọi ghi có thể xen kẽ tùy ý với thao tác cục bộ tiếp theo;
/// không có giao thức nào sắp thứ tự chúng (rủi ro mất cập nhật đã
/// được chấp nhận trong thiết kế).
#[async_trait]
pub trait TrackerClient: Send + Sync {
    /// Tải toàn bộ dòng hiện có (bản ghi lỏng, tên cột tùy đời sheet).
    async fn fetch_rows(&self) -> Result<Vec<HashMap<String, String>>, TrackerError>;

    /// Thêm dòng mới.
    async fn add_row(&self, payload: TrackerPayload) -> Result<(), TrackerError>;

    /// Cập nhật dòng theo khóa (mã đơn).
    async fn update_row(&self, key: &str, payload: TrackerPayload) -> Result<(), TrackerError>;

    /// Xóa dòng theo khóa.
    async fn delete_row(&self, key: &str) -> Result<(), TrackerError>;
}

// ==========================================
// Thông báo cho người vận hành
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub message: String,
    pub severity: Severity,
}

impl Notification {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Info,
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Success,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

/// Nơi nhận thông báo {message, severity}. Hiển thị và tự tắt là việc
/// của front end; lõi không quản lý timer.
pub trait NotificationSink: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Sink rỗng cho ngữ cảnh không cần thông báo (test, batch).
pub struct NoOpNotificationSink;

impl NotificationSink for NoOpNotificationSink {
    fn notify(&self, _notification: Notification) {}
}

/// Sink gom thông báo vào bộ nhớ, phục vụ test.
#[derive(Default)]
pub struct CollectingNotificationSink {
    notifications: std::sync::Mutex<Vec<Notification>>,
}

impl CollectingNotificationSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&self) -> Vec<Notification> {
        self.notifications
            .lock()
            .map(|mut g| std::mem::take(&mut *g))
            .unwrap_or_default()
    }
}

impl NotificationSink for CollectingNotificationSink {
    fn notify(&self, notification: Notification) {
        if let Ok(mut guard) = self.notifications.lock() {
            guard.push(notification);
        }
    }
}
