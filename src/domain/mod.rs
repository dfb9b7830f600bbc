// ==========================================
// Quản lý xưởng - tầng miền
// ==========================================
// Thực thể, kiểu, danh mục tham chiếu. Không chứa IO.
// ==========================================

pub mod catalog;
pub mod order;
pub mod types;
pub mod view;

pub use catalog::{default_providers, MasterData, MaterialProvider, WorkflowCatalog};
pub use order::{
    OrderDraft, ProductionOrder, ProviderSelection, RawOrderRecord, SupplySelection,
    DEFAULT_PRODUCT_TYPE, FALLBACK_STEP_LABEL, PLACEHOLDER_TITLE,
};
pub use types::{Severity, Stage, SupplyStatus, SyncState};
pub use view::{DashboardStats, DateWindow, GroupedOrder, SortSpec, ViewCriteria};
