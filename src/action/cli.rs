use std::io;
use std::path::PathBuf;
use clap::Parser;

use crate::action::interactive::process_interactive_mode;
use crate::config::config::{validate_start_dir, Cli};
use crate::config::ports::{AppConfig, ConfigPort};
use crate::service::config_service::{ConfigService, DefaultConfigAdapter};
use crate::utils::utils::setup_logging;

pub fn process_args(args: Vec<String>) -> io::Result<usize> {
    let (config_port, show_config): (Box<dyn ConfigPort>, bool) = if args.len() == 1 {
        (Box::new(DefaultConfigAdapter::new()), false)
    } else {
        let cli = Cli::parse_from(args);
        let show_config = cli.show_config;
        (Box::new(CliConfigAdapter::new(cli)), show_config)
    };

    let config = ConfigService::new(config_port).get_config()?;
    setup_logging(&config.log_level)?;
    if show_config {
        println!("實際使用的配置：{:#?}", config);
    }
    log::info!("啟動互動模式，起始目錄：{}", config.start_dir.display());
    process_interactive_mode(config)
}

// CLI 配置適配器
pub struct CliConfigAdapter {
    cli: Cli,
}

impl CliConfigAdapter {
    pub fn new(cli: Cli) -> Self {
        CliConfigAdapter { cli }
    }
}

impl ConfigPort for CliConfigAdapter {
    fn get_config(&self) -> io::Result<AppConfig> {
        let start_dir = validate_start_dir(&self.cli.start_dir)?;
        Ok(AppConfig {
            start_dir: PathBuf::from(start_dir),
            docling_program: self.cli.docling.clone(),
            conflict_mode: self.cli.on_conflict,
            show_progress: !self.cli.no_progress,
            log_level: self.cli.log_level.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::config::ConflictMode;

    #[test]
    fn cli_adapter_maps_options() {
        let tmp = tempfile::tempdir().unwrap();
        let start = tmp.path().to_string_lossy().to_string();
        let cli = Cli::parse_from([
            "doc_to_markdown",
            "--start-dir",
            start.as_str(),
            "--on-conflict",
            "overwrite",
            "--no-progress",
            "--log-level",
            "warn",
        ]);

        let config = CliConfigAdapter::new(cli).get_config().unwrap();
        assert_eq!(config.start_dir, tmp.path());
        assert_eq!(config.conflict_mode, ConflictMode::Overwrite);
        assert!(!config.show_progress);
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn cli_adapter_rejects_missing_start_dir() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("nope").to_string_lossy().to_string();
        let cli = Cli::parse_from(["doc_to_markdown", "--start-dir", missing.as_str()]);
        let err = CliConfigAdapter::new(cli).get_config().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }
}
