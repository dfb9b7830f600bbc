// ==========================================
// Đa ngôn ngữ (i18n)
// ==========================================
// rust-i18n; tiếng Việt mặc định, có tiếng Anh.
// Macro rust_i18n::i18n! đã khởi tạo trong lib.rs.
// ==========================================

/// Ngôn ngữ hiện tại.
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// Đặt ngôn ngữ ("vi" hoặc "en").
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// Dịch thông điệp (không tham số).
pub fn t(key: &str) -> String {
    rust_i18n::t!(key).to_string()
}

/// Dịch thông điệp với tham số dạng %{name}.
pub fn t_with_args(key: &str, args: &[(&str, &str)]) -> String {
    let mut result = rust_i18n::t!(key).to_string();
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
