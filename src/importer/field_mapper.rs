// ==========================================
// Quản lý xưởng - bảng chuẩn hóa tên cột tracker
// ==========================================
// Tracker là spreadsheet sống: tên cột đã đổi nhiều lần qua các đời sheet.
// Mỗi trường logic có danh sách tên cột khả dĩ, CỘT CÓ MẶT ĐẦU TIÊN THẮNG
// (kể cả khi ô rỗng - giống hành vi sheet cũ), không cột nào khớp -> rỗng.
// Bảng này là hợp đồng giao tiếp với tracker, không tự ý thêm bớt alias.
// ==========================================

use crate::domain::order::RawOrderRecord;
use std::collections::HashMap;

pub struct FieldMapper;

impl FieldMapper {
    /// Chuẩn hóa một dòng tracker thô thành RawOrderRecord.
    pub fn map_row(&self, row: &HashMap<String, String>, row_number: usize) -> RawOrderRecord {
        RawOrderRecord {
            order_code: self.get_val(row, &["MADON", "Ma don", "Mã Đơn"]),
            client: self.get_val(
                row,
                &["KHACHHANG", "Khach hang", "KHACH HANG", "KH", "Tenkhach"],
            ),
            value_text: self.get_val(row, &["TIEN", "Tien", "Doanh so", "Doanhso"]),
            board_provider: self.get_val(row, &["VAN", "Van", "van", "Nha Cung Cap", "NCC"]),
            product_type: self.get_val(row, &["PHAN-LOAI", "Phan loai", "Phanloai"]),
            status_text: self.get_val(row, &["TT DON HANG", "Trang thai", "Status", "status"]),
            delivery_date: self.get_val(row, &["NGAY-GIAO", "Ngay giao"]),
            duration_text: self.get_val(row, &["TIME", "Time", "Thoi gian", "Duration"]),
            technician: self.get_val(row, &["CNC", "Ky thuat", "Nguoilam"]),
            file_received_date: self.get_val(row, &["NGAY-NHAN-FILE", "Ngay nhan file"]),
            other_supply: self.get_val(row, &["VAT-TU-NGOAI", "Vat tu phu"]),
            material_order_date: self.get_val(row, &["NGAY-DAT-HANG", "Ngay dat van"]),
            worker: self.get_val(row, &["THO-CHINH", "Tho chinh", "thophutrach"]),
            picking_date: self.get_val(row, &["SOAN-HANG", "Soan hang"]),
            delivery_route: self.get_val(row, &["TUYEN GIAO", "Tuyen giao", "TUYEN-GIAO"]),
            note: self.get_val(row, &["GHICHU", "Ghi chu"]),
            phone: self.get_val(row, &["SDT"]),
            row_number,
        }
    }

    /// Cột có mặt đầu tiên thắng; giá trị trim, rỗng -> None.
    fn get_val(&self, row: &HashMap<String, String>, aliases: &[&str]) -> Option<String> {
        for alias in aliases {
            if let Some(value) = row.get(*alias) {
                let trimmed = value.trim();
                if trimmed.is_empty() {
                    return None;
                }
                return Some(trimmed.to_string());
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_first_present_alias_wins() {
        let r = row(&[("MADON", "DH-01"), ("Ma don", "DH-KHAC")]);
        let rec = FieldMapper.map_row(&r, 1);
        assert_eq!(rec.order_code.as_deref(), Some("DH-01"));
    }

    #[test]
    fn test_fallback_alias() {
        let r = row(&[("Ma don", "DH-02"), ("KH", "Anh Tuấn")]);
        let rec = FieldMapper.map_row(&r, 1);
        assert_eq!(rec.order_code.as_deref(), Some("DH-02"));
        assert_eq!(rec.client.as_deref(), Some("Anh Tuấn"));
    }

    #[test]
    fn test_present_but_empty_column_stops_lookup() {
        // cột đầu có mặt nhưng rỗng: dừng tra cứu, kết quả rỗng
        // (hành vi sheet cũ, giữ nguyên)
        let r = row(&[("MADON", ""), ("Ma don", "DH-03")]);
        let rec = FieldMapper.map_row(&r, 1);
        assert_eq!(rec.order_code, None);
    }

    #[test]
    fn test_values_trimmed() {
        let r = row(&[("MADON", "  DH-04  "), ("GHICHU", " gấp ")]);
        let rec = FieldMapper.map_row(&r, 1);
        assert_eq!(rec.order_code.as_deref(), Some("DH-04"));
        assert_eq!(rec.note.as_deref(), Some("gấp"));
    }

    #[test]
    fn test_no_alias_matches() {
        let r = row(&[("CỘT LẠ", "x")]);
        let rec = FieldMapper.map_row(&r, 7);
        assert_eq!(rec.order_code, None);
        assert_eq!(rec.row_number, 7);
    }
}
