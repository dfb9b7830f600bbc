// ==========================================
// Quản lý xưởng - định dạng ngày của tracker
// ==========================================
// Tracker ghi ngày dạng chữ dd/mm/yyyy. Import chấp nhận thêm d/m/yyyy
// và ISO yyyy-mm-dd; chuỗi khác chuẩn hóa về rỗng (sentinel), không lỗi.
// Export luôn ghi dd/mm/yyyy.
// ==========================================

use chrono::NaiveDate;

/// Định dạng ngày gốc của tracker.
const SHEET_DATE_FORMAT: &str = "%d/%m/%Y";

/// Đọc ô ngày của tracker. Chuỗi rỗng hoặc không nhận dạng được -> None.
pub fn parse_sheet_date(text: &str) -> Option<NaiveDate> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(trimmed, SHEET_DATE_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%d/%m/%y"))
        .or_else(|_| NaiveDate::parse_from_str(trimmed, "%Y-%m-%d"))
        .ok()
}

/// Ghi ngày ra ô tracker; None -> chuỗi rỗng.
pub fn format_sheet_date(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(SHEET_DATE_FORMAT).to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn test_parse_native_format() {
        assert_eq!(parse_sheet_date("16/01/2024"), Some(d(2024, 1, 16)));
        assert_eq!(parse_sheet_date(" 5/3/2024 "), Some(d(2024, 3, 5)));
    }

    #[test]
    fn test_parse_iso_compat() {
        assert_eq!(parse_sheet_date("2024-01-16"), Some(d(2024, 1, 16)));
    }

    #[test]
    fn test_garbage_normalizes_to_none() {
        assert_eq!(parse_sheet_date(""), None);
        assert_eq!(parse_sheet_date("mai giao"), None);
        assert_eq!(parse_sheet_date("32/13/2024"), None);
    }

    #[test]
    fn test_format_roundtrip() {
        let date = Some(d(2024, 1, 16));
        assert_eq!(format_sheet_date(date), "16/01/2024");
        assert_eq!(parse_sheet_date(&format_sheet_date(date)), date);
        assert_eq!(format_sheet_date(None), "");
    }
}
