// ==========================================
// Quản lý xưởng - tập đơn trong bộ nhớ
// ==========================================
// Tập đơn làm việc, có version: store bên ngoài đẩy snapshot toàn bộ
// thay thế tập hiện tại; thao tác cục bộ (tạo/sửa/xóa) áp ngay
// (optimistic) và tăng version. Pipeline chỉ đọc, không bao giờ sửa.
// ==========================================

use crate::domain::order::ProductionOrder;
use crate::domain::types::SyncState;
use tracing::debug;

#[derive(Debug, Default)]
pub struct OrderBook {
    orders: Vec<ProductionOrder>,
    version: u64,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Version tăng đơn điệu theo mọi thay đổi quan sát được;
    /// dùng làm khóa memo cho pipeline.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn orders(&self) -> &[ProductionOrder] {
        &self.orders
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&ProductionOrder> {
        self.orders.iter().find(|o| o.id == id)
    }

    /// Store đẩy snapshot đầy đủ: thay cả tập làm việc.
    pub fn apply_snapshot(&mut self, orders: Vec<ProductionOrder>) {
        debug!(count = orders.len(), "nhận snapshot tập đơn");
        self.orders = orders;
        self.version += 1;
    }

    /// Thêm mới hoặc thay bản ghi cùng id.
    pub fn upsert(&mut self, order: ProductionOrder) {
        match self.orders.iter_mut().find(|o| o.id == order.id) {
            Some(slot) => *slot = order,
            None => self.orders.push(order),
        }
        self.version += 1;
    }

    /// Gỡ đơn khỏi tập; trả về bản ghi vừa gỡ nếu có.
    pub fn remove(&mut self, id: &str) -> Option<ProductionOrder> {
        let pos = self.orders.iter().position(|o| o.id == id)?;
        self.version += 1;
        Some(self.orders.remove(pos))
    }

    /// Cập nhật trạng thái đồng bộ của một đơn (kết quả ghi tracker
    /// về sau thao tác cục bộ; đơn có thể đã bị xóa trong lúc ghi).
    pub fn set_sync(&mut self, id: &str, sync: SyncState) {
        if let Some(order) = self.orders.iter_mut().find(|o| o.id == id) {
            order.sync = sync;
            self.version += 1;
        }
    }
}
