use std::io;
use std::path::PathBuf;

use crate::config::config::ConflictMode;
use crate::config::ports::{AppConfig, ConfigPort};
use crate::service::docling::DEFAULT_DOCLING_PROGRAM;

// 配置服務，包裝選定的配置適配器
pub struct ConfigService {
    config_port: Box<dyn ConfigPort>,
}

impl ConfigService {
    pub fn new(config_port: Box<dyn ConfigPort>) -> Self {
        ConfigService { config_port }
    }

    pub fn get_config(&self) -> io::Result<AppConfig> {
        self.config_port.get_config()
    }
}

// 預設配置適配器：目前目錄、docling、衝突時詢問
pub struct DefaultConfigAdapter;

impl DefaultConfigAdapter {
    pub fn new() -> Self {
        DefaultConfigAdapter
    }
}

impl Default for DefaultConfigAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigPort for DefaultConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        Ok(AppConfig {
            start_dir: PathBuf::from("."),
            docling_program: DEFAULT_DOCLING_PROGRAM.to_string(),
            conflict_mode: ConflictMode::Prompt,
            show_progress: true,
            log_level: "info".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_adapter_prompts_on_conflict() {
        let service = ConfigService::new(Box::new(DefaultConfigAdapter::new()));
        let config = service.get_config().unwrap();
        assert_eq!(config.conflict_mode, ConflictMode::Prompt);
        assert_eq!(config.docling_program, "docling");
        assert!(config.show_progress);
    }
}
