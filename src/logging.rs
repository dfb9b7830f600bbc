// ==========================================
// Khởi tạo hệ thống log
// ==========================================
// tracing + tracing-subscriber, mức log cấu hình qua biến môi trường
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// Khởi tạo log.
///
/// # Biến môi trường
/// - RUST_LOG: bộ lọc mức log (mặc định: info)
///   ví dụ: RUST_LOG=debug hoặc RUST_LOG=xuong_tracker=trace
///
/// # Ví dụ
/// ```no_run
/// use xuong_tracker::logging;
/// logging::init();
/// ```
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true)
        .init();
}

/// Khởi tạo log cho môi trường test (mức chi tiết hơn, writer của test).
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
