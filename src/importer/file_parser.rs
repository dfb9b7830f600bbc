// ==========================================
// Quản lý xưởng - đọc file export của tracker
// ==========================================
// Tracker là spreadsheet; ngoài feed trực tiếp, người vận hành còn
// nhập hàng loạt từ file export .csv / .xlsx. Cả hai đường đều quy về
// cùng một dạng dòng lỏng: HashMap<tên cột, giá trị chữ>.
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook, Reader, Xlsx};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

/// Nguồn dòng lỏng cho import.
pub trait FileParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>>;
}

// ==========================================
// CSV
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let file = File::open(file_path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // sheet export hay lệch số cột giữa các dòng
            .from_reader(file);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for result in reader.records() {
            let record = result?;
            let mut row_map = HashMap::new();
            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), value.trim().to_string());
                }
            }
            // bỏ dòng trắng hoàn toàn
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row_map);
        }

        Ok(rows)
    }
}

// ==========================================
// Excel
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_rows(&self, file_path: &Path) -> ImportResult<Vec<HashMap<String, String>>> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        let mut workbook: Xlsx<_> = open_workbook(file_path)
            .map_err(|e: calamine::XlsxError| ImportError::ExcelParseError(e.to_string()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("file Excel không có sheet".to_string()))?;

        let range = workbook
            .worksheet_range(&sheet_name)
            .map_err(|e| ImportError::ExcelParseError(e.to_string()))?;

        let mut row_iter = range.rows();
        let header_row = row_iter
            .next()
            .ok_or_else(|| ImportError::ExcelParseError("file Excel không có dòng dữ liệu".to_string()))?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        let mut rows = Vec::new();
        for data_row in row_iter {
            let mut row_map = HashMap::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row_map.insert(header.clone(), cell.to_string().trim().to_string());
                }
            }
            if row_map.values().all(|v| v.is_empty()) {
                continue;
            }
            rows.push(row_map);
        }

        Ok(rows)
    }
}

// ==========================================
// Chọn parser theo đuôi file
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse<P: AsRef<Path>>(
        &self,
        file_path: P,
    ) -> ImportResult<Vec<HashMap<String, String>>> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_rows(path),
            "xlsx" | "xls" => ExcelParser.parse_rows(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_csv_rows_keyed_by_header() {
        let mut temp = NamedTempFile::new().unwrap();
        writeln!(temp, "MADON,KH,TIEN").unwrap();
        writeln!(temp, "DH-01,Anh Minh,54").unwrap();
        writeln!(temp, ",,").unwrap(); // dòng trắng bị bỏ
        writeln!(temp, "DH-02,Chị Hương,120").unwrap();

        let rows = CsvParser.parse_rows(temp.path()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["MADON"], "DH-01");
        assert_eq!(rows[1]["TIEN"], "120");
    }

    #[test]
    fn test_missing_file() {
        let err = CsvParser
            .parse_rows(Path::new("/không/tồn/tại.csv"))
            .unwrap_err();
        assert!(matches!(err, ImportError::FileNotFound(_)));
    }

    #[test]
    fn test_unsupported_extension() {
        let temp = NamedTempFile::with_suffix(".pdf").unwrap();
        let err = UniversalFileParser.parse(temp.path()).unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedFormat(_)));
    }
}
