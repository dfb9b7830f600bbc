// ==========================================
// Quản lý xưởng - lỗi tầng API
// ==========================================
// Thông điệp lỗi luôn kèm nguyên nhân tường minh. Lưu ý: ghi tracker
// thất bại KHÔNG phải ApiError - thao tác cục bộ vẫn thành công, lỗi
// được báo qua NotificationSink và trạng thái sync của đơn.
// ==========================================

use crate::importer::error::ImportError;
use crate::store::traits::TrackerError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("dữ liệu vào không hợp lệ: {0}")]
    InvalidInput(String),

    #[error("không tìm thấy: {0}")]
    NotFound(String),

    #[error("lỗi tầng import: {0}")]
    Import(#[from] ImportError),

    #[error("lỗi tracker: {0}")]
    Tracker(#[from] TrackerError),

    #[error("lỗi nội bộ: {0}")]
    Internal(String),
}

pub type ApiResult<T> = Result<T, ApiError>;
