// ==========================================
// Quản lý xưởng - tầng cấu hình
// ==========================================
// Tham số lập lịch + danh mục tham chiếu, ghi đè được bằng file JSON
// trong thư mục cấu hình hệ thống; thiếu file thì dùng mặc định built-in.
// ==========================================

pub mod settings;

pub use settings::ScheduleSettings;

use crate::domain::catalog::{default_providers, MasterData, MaterialProvider, WorkflowCatalog};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Cấu hình đầy đủ của lõi: tham số + danh mục.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub settings: ScheduleSettings,
    pub workflow: WorkflowCatalog,
    pub providers: Vec<MaterialProvider>,
    pub master_data: MasterData,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            settings: ScheduleSettings::default(),
            workflow: WorkflowCatalog::default(),
            providers: default_providers(),
            master_data: MasterData::default(),
        }
    }
}

impl AppConfig {
    /// Đường dẫn file cấu hình mặc định: `<config_dir>/xuong-tracker/config.json`.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("xuong-tracker").join("config.json"))
    }

    /// Đọc cấu hình từ file JSON.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Read(path.display().to_string(), e.to_string()))?;
        let config: AppConfig = serde_json::from_str(&text)
            .map_err(|e| ConfigError::Parse(path.display().to_string(), e.to_string()))?;
        debug!(path = %path.display(), "đã đọc cấu hình");
        Ok(config)
    }

    /// Đọc cấu hình từ vị trí mặc định; thiếu file hoặc file hỏng thì
    /// cảnh báo và dùng mặc định built-in.
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load(&path) {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "cấu hình không đọc được, dùng mặc định");
                Self::default()
            }
        }
    }
}

/// Lỗi tầng cấu hình.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("không đọc được file cấu hình {0}: {1}")]
    Read(String, String),

    #[error("file cấu hình {0} sai định dạng: {1}")]
    Parse(String, String),
}
