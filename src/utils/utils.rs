use std::io::{self, Write};
use std::path::Path;
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use chrono::Local;
use indicatif::{ProgressBar, ProgressStyle};
use regex::Regex;

pub fn setup_logging(log_level: &str) -> io::Result<()> {
    let log_level_filter = match log_level {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "debug" => log::LevelFilter::Debug,
        _ => log::LevelFilter::Info,
    };
    env_logger::Builder::new()
        .filter_level(log_level_filter)
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.target(),
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("日誌初始化失敗: {}", e)))
}

/// 轉換期間顯示的旋轉指示器
pub struct ConversionSpinner {
    pb: ProgressBar,
    start: Instant,
}

impl ConversionSpinner {
    pub fn new(message: String, show_progress: bool) -> Self {
        let pb = if show_progress {
            let pb = ProgressBar::new_spinner();
            if let Ok(style) = ProgressStyle::default_spinner().template("{spinner} {msg} [{elapsed}]") {
                pb.set_style(style);
            }
            pb.enable_steady_tick(Duration::from_millis(120));
            pb
        } else {
            ProgressBar::hidden()
        };
        pb.set_message(message);
        ConversionSpinner { pb, start: Instant::now() }
    }

    pub fn finish(&self, markdown_bytes: usize) {
        self.pb.finish_with_message(format!(
            "完成，Markdown 大小：{}，耗時 {:.1} 秒",
            format_file_size(markdown_bytes),
            self.start.elapsed().as_secs_f64()
        ));
    }

    pub fn fail(&self) {
        self.pb.abandon_with_message("轉換失敗");
    }
}

pub fn format_file_size(size: usize) -> String {
    if size < 1024 * 1024 {
        format!("{:.2} KB", size as f64 / 1024.0)
    } else {
        format!("{:.2} MB", size as f64 / (1024.0 * 1024.0))
    }
}

fn invalid_name_chars() -> &'static Regex {
    static INVALID: OnceLock<Regex> = OnceLock::new();
    INVALID.get_or_init(|| Regex::new(r#"[\\/:*?"<>|\x00-\x1f]"#).expect("固定的正規表示式"))
}

/// 將建議名稱清理為可用的檔名（不含副檔名）
pub fn sanitize_file_name(name: &str) -> String {
    let cleaned = invalid_name_chars().replace_all(name.trim(), "_");
    let cleaned = cleaned.trim_end_matches(['.', ' ']);
    if cleaned.is_empty() {
        "document".to_string()
    } else {
        cleaned.to_string()
    }
}

/// 以相對於目前目錄的形式顯示路徑，無法計算時顯示原路徑
pub fn display_path(path: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(path, cwd))
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| path.to_path_buf())
        .display()
        .to_string()
}
