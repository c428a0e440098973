use std::io;
use std::path::PathBuf;

use crate::config::config::ConflictMode;

// 應用配置結構體，封裝所有參數
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub start_dir: PathBuf,
    pub docling_program: String,
    pub conflict_mode: ConflictMode,
    pub show_progress: bool,
    pub log_level: String,
}

// 配置來源的 Port
pub trait ConfigPort {
    fn get_config(&self) -> io::Result<AppConfig>;
}
