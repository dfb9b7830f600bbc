// ==========================================
// Quản lý xưởng - API dashboard
// ==========================================
// View dẫn xuất cho front end: tập đơn hiển thị, nhóm theo tiêu đề,
// năm bộ đếm. Memo theo (version tập đơn, tiêu chí, ngày): đầu vào đổi
// là tính lại TOÀN BỘ, không cập nhật tăng dần.
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::order::ProductionOrder;
use crate::domain::view::{DashboardStats, GroupedOrder, ViewCriteria};
use crate::engine::grouping::GroupingEngine;
use crate::engine::pipeline::ViewPipeline;
use crate::store::order_book::OrderBook;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::debug;

// ==========================================
// DashboardView - một lần dựng view đầy đủ
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardView {
    pub visible: Vec<ProductionOrder>,
    pub groups: Vec<GroupedOrder>,
    pub stats: DashboardStats,
}

struct MemoEntry {
    version: u64,
    criteria: ViewCriteria,
    today: NaiveDate,
    view: DashboardView,
}

pub struct DashboardApi {
    book: Arc<Mutex<OrderBook>>,
    pipeline: ViewPipeline,
    grouping: GroupingEngine,
    memo: Mutex<Option<MemoEntry>>,
}

impl DashboardApi {
    pub fn new(config: &AppConfig, book: Arc<Mutex<OrderBook>>) -> Self {
        Self {
            book,
            pipeline: ViewPipeline::new(),
            grouping: GroupingEngine::new(&config.settings),
            memo: Mutex::new(None),
        }
    }

    /// Dựng (hoặc lấy từ memo) view đầy đủ cho một tiêu chí.
    pub fn view(&self, criteria: &ViewCriteria, today: NaiveDate) -> ApiResult<DashboardView> {
        let (version, orders) = {
            let book = self
                .book
                .lock()
                .map_err(|e| ApiError::Internal(format!("không khóa được tập đơn: {}", e)))?;
            (book.version(), book.orders().to_vec())
        };

        {
            let memo = self
                .memo
                .lock()
                .map_err(|e| ApiError::Internal(format!("không khóa được memo: {}", e)))?;
            if let Some(entry) = memo.as_ref() {
                if entry.version == version && &entry.criteria == criteria && entry.today == today {
                    return Ok(entry.view.clone());
                }
            }
        }

        debug!(version, "dựng lại view dashboard");
        let visible = self.pipeline.visible_orders(&orders, criteria, today);
        let groups = self.grouping.group_by_title(&visible);
        let stats = self.grouping.compute_stats(&visible, today);
        let view = DashboardView {
            visible,
            groups,
            stats,
        };

        if let Ok(mut memo) = self.memo.lock() {
            *memo = Some(MemoEntry {
                version,
                criteria: criteria.clone(),
                today,
                view: view.clone(),
            });
        }
        Ok(view)
    }

    pub fn visible_orders(
        &self,
        criteria: &ViewCriteria,
        today: NaiveDate,
    ) -> ApiResult<Vec<ProductionOrder>> {
        Ok(self.view(criteria, today)?.visible)
    }

    pub fn grouped_orders(
        &self,
        criteria: &ViewCriteria,
        today: NaiveDate,
    ) -> ApiResult<Vec<GroupedOrder>> {
        Ok(self.view(criteria, today)?.groups)
    }

    pub fn stats(&self, criteria: &ViewCriteria, today: NaiveDate) -> ApiResult<DashboardStats> {
        Ok(self.view(criteria, today)?.stats)
    }
}
