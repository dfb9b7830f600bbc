// ==========================================
// Quản lý xưởng nội thất - thư viện lõi
// ==========================================
// Lõi lập lịch & dẫn xuất view cho đơn hàng gia công: máy trạng thái
// bước sản xuất, công thức thời gian thi công, auto-scheduler, pipeline
// lọc/sắp xếp/gộp nhóm/thống kê, adapter spreadsheet tracker.
// Thư viện cho front end tương tác; không sở hữu UI, CLI hay lưu trữ.
// ==========================================

// Khởi tạo hệ thống đa ngôn ngữ
rust_i18n::i18n!("locales", fallback = "vi");

// ==========================================
// Khai báo module
// ==========================================

// Tầng miền - thực thể & kiểu
pub mod domain;

// Tầng engine - quy tắc nghiệp vụ thuần
pub mod engine;

// Tầng import/export - adapter tracker
pub mod importer;

// Tầng store - tập đơn làm việc + seam cộng tác viên
pub mod store;

// Tầng cấu hình
pub mod config;

// Tầng API - giao diện nghiệp vụ
pub mod api;

// Log
pub mod logging;

// Đa ngôn ngữ
pub mod i18n;

// ==========================================
// Re-export kiểu lõi
// ==========================================

// Kiểu miền
pub use domain::types::{Severity, Stage, SupplyStatus, SyncState};

// Thực thể miền
pub use domain::{
    DashboardStats, DateWindow, GroupedOrder, MasterData, MaterialProvider, OrderDraft,
    ProductionOrder, ProviderSelection, RawOrderRecord, SortSpec, SupplySelection, ViewCriteria,
    WorkflowCatalog,
};

// Engine
pub use engine::{
    AutoScheduler, DurationCalculator, GroupingEngine, ScheduleOutcome, ViewPipeline,
    WorkflowEngine,
};

// Import/export
pub use importer::{ImportOutcome, OrderExporter, OrderImporter, RejectReason, TrackerPayload};

// Store & seam
pub use store::{
    NoOpNotificationSink, Notification, NotificationSink, OrderBook, TrackerClient, TrackerError,
};

// Cấu hình
pub use config::{AppConfig, ScheduleSettings};

// API
pub use api::{ApiError, ApiResult, DashboardApi, DashboardView, ImportApi, ImportSummary, OrdersApi};

/// Phiên bản thư viện.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
