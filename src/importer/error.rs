// ==========================================
// Quản lý xưởng - lỗi tầng import
// ==========================================
// thiserror cho lỗi có cấu trúc; giá trị hỏng trong ô dữ liệu KHÔNG phải
// lỗi - chúng chuẩn hóa về sentinel ngay tại field mapper.
// ==========================================

use thiserror::Error;

/// Lỗi tầng import (đọc file / feed tracker).
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== Lỗi file =====
    #[error("file không tồn tại: {0}")]
    FileNotFound(String),

    #[error("định dạng file không hỗ trợ: {0} (chỉ nhận .xlsx/.xls/.csv)")]
    UnsupportedFormat(String),

    #[error("không đọc được file: {0}")]
    FileReadError(String),

    #[error("lỗi phân tích Excel: {0}")]
    ExcelParseError(String),

    #[error("lỗi phân tích CSV: {0}")]
    CsvParseError(String),

    // ===== Lỗi feed tracker =====
    #[error("feed tracker trả về dữ liệu không hợp lệ: {0}")]
    MalformedFeed(String),

    // ===== Chung =====
    #[error("lỗi nội bộ: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Lý do một dòng tracker bị loại (có cấu trúc, không im lặng).
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RejectReason {
    /// Dòng không có mã đơn dưới bất kỳ tên cột nào.
    MissingOrderCode { row: usize },
}

impl std::fmt::Display for RejectReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RejectReason::MissingOrderCode { row } => {
                write!(f, "dòng {}: thiếu mã đơn", row)
            }
        }
    }
}

/// Alias Result cho tầng import.
pub type ImportResult<T> = Result<T, ImportError>;
