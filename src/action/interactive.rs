use dialoguer::{Input, Select};
use log::warn;
use std::io;
use std::path::{Path, PathBuf};

use crate::action::shell::ConverterShell;
use crate::config::ports::AppConfig;
use crate::facade::conversion_facade::ConversionFacade;
use crate::models::format::supported_formats_label;
use crate::service::docling::DoclingConverter;
use crate::service::traits::i_service::{FileSelectorTrait, OverwriteChoice};
use crate::service::writer::MarkdownWriter;
use crate::utils::browser::{list_entries, BrowserEntry};

const TYPE_PATH_ITEM: &str = "[輸入路徑...]";
const USE_FOLDER_ITEM: &str = "[使用此資料夾]";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    SelectFile,
    ConvertAndSave,
    Quit,
}

impl MenuAction {
    fn label(&self) -> &'static str {
        match self {
            MenuAction::SelectFile => "選擇檔案",
            MenuAction::ConvertAndSave => "轉換並儲存",
            MenuAction::Quit => "離開",
        }
    }
}

pub fn process_interactive_mode(config: AppConfig) -> io::Result<usize> {
    println!("=== 文件轉 Markdown 轉換器 ===");
    println!("{}", supported_formats_label());

    let selector = TerminalSelector::new(&config.start_dir)?;
    let facade = ConversionFacade::new(
        Box::new(DoclingConverter::new(config.docling_program.clone())),
        Box::new(MarkdownWriter::new()),
        config.show_progress,
    );
    let mut shell = ConverterShell::new(Box::new(selector), Box::new(facade), config.conflict_mode)
        .with_status_observer(|state| println!("狀態：{}", state.label()));

    println!("狀態：{}", shell.status_label());
    loop {
        let mut actions = vec![MenuAction::SelectFile];
        if shell.can_convert() {
            actions.push(MenuAction::ConvertAndSave);
        }
        actions.push(MenuAction::Quit);
        let labels: Vec<&str> = actions.iter().map(MenuAction::label).collect();

        let choice = Select::new()
            .with_prompt("請選擇操作（使用方向鍵選擇，按 Enter 確認）")
            .items(&labels)
            .default(if shell.can_convert() { 1 } else { 0 })
            .interact_opt()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("操作選擇失敗: {}", e)))?;

        match choice.map(|i| actions[i]) {
            None | Some(MenuAction::Quit) => break,
            Some(MenuAction::SelectFile) => shell.select_file()?,
            Some(MenuAction::ConvertAndSave) => shell.convert_and_save()?,
        }

        if shell.has_outcome() {
            shell.acknowledge();
        }
    }

    Ok(shell.state().converted)
}

/// 以方向鍵瀏覽目錄的檔案選擇器，按 Esc 取消
pub struct TerminalSelector {
    start_dir: PathBuf,
    input_dir: PathBuf,
    output_dir: PathBuf,
}

impl TerminalSelector {
    pub fn new(start_dir: &Path) -> io::Result<Self> {
        let start_dir = start_dir.canonicalize()?;
        Ok(TerminalSelector {
            input_dir: start_dir.clone(),
            output_dir: start_dir.clone(),
            start_dir,
        })
    }

    fn browse(&self, prompt: &str, items: &[String]) -> io::Result<Option<usize>> {
        Select::new()
            .with_prompt(prompt)
            .items(items)
            .default(0)
            .max_length(15)
            .interact_opt()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("檔案選擇失敗: {}", e)))
    }
}

/// 列出目錄；無法讀取時（權限不足或已被刪除）改往上層目錄，最後退回起始目錄
fn list_or_recover(dir: &mut PathBuf, start_dir: &Path, include_files: bool) -> io::Result<Vec<BrowserEntry>> {
    let candidates: Vec<PathBuf> = dir
        .ancestors()
        .map(Path::to_path_buf)
        .chain(std::iter::once(start_dir.to_path_buf()))
        .collect();
    let mut last_err = None;
    for candidate in candidates {
        match list_entries(&candidate, include_files) {
            Ok(entries) => {
                if candidate != *dir {
                    warn!("無法讀取目錄 {}，改為瀏覽 {}", dir.display(), candidate.display());
                    *dir = candidate;
                }
                return Ok(entries);
            }
            Err(e) => {
                warn!("無法讀取目錄 {}：{}", candidate.display(), e);
                last_err = Some(e);
            }
        }
    }
    Err(last_err.unwrap_or_else(|| io::Error::new(io::ErrorKind::NotFound, "沒有可瀏覽的目錄")))
}

fn prompt_path(prompt: &str, want_file: bool) -> io::Result<Option<PathBuf>> {
    let text: String = Input::new()
        .with_prompt(prompt)
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            let path = Path::new(input.trim());
            if input.trim().is_empty() || !want_file || path.is_file() {
                Ok(())
            } else {
                Err(format!("檔案 '{}' 不存在", input.trim()))
            }
        })
        .interact_text()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e.to_string()))?;
    let text = text.trim();
    Ok(if text.is_empty() { None } else { Some(PathBuf::from(text)) })
}

impl FileSelectorTrait for TerminalSelector {
    fn choose_input_file(&mut self) -> io::Result<Option<PathBuf>> {
        loop {
            let entries = list_or_recover(&mut self.input_dir, &self.start_dir, true)?;
            let mut items: Vec<String> = entries.iter().map(BrowserEntry::label).collect();
            items.push(TYPE_PATH_ITEM.to_string());

            let prompt = format!("選擇輸入檔案（{}，Esc 取消）", self.input_dir.display());
            let Some(index) = self.browse(&prompt, &items)? else {
                return Ok(None);
            };
            match entries.get(index) {
                Some(BrowserEntry::Parent(dir)) | Some(BrowserEntry::Directory(dir)) => {
                    self.input_dir = dir.clone();
                }
                Some(BrowserEntry::File(path)) => {
                    if let Some(parent) = path.parent() {
                        self.output_dir = parent.to_path_buf();
                    }
                    return Ok(Some(path.clone()));
                }
                None => {
                    if let Some(path) = prompt_path("請輸入檔案路徑（留空返回）", true)? {
                        return Ok(Some(path));
                    }
                }
            }
        }
    }

    fn choose_output_directory(&mut self) -> io::Result<Option<PathBuf>> {
        loop {
            let entries = list_or_recover(&mut self.output_dir, &self.start_dir, false)?;
            let mut items = vec![USE_FOLDER_ITEM.to_string()];
            items.extend(entries.iter().map(BrowserEntry::label));
            items.push(TYPE_PATH_ITEM.to_string());

            let prompt = format!("選擇輸出資料夾（{}，Esc 取消）", self.output_dir.display());
            let Some(index) = self.browse(&prompt, &items)? else {
                return Ok(None);
            };
            if index == 0 {
                return Ok(Some(self.output_dir.clone()));
            }
            match entries.get(index - 1) {
                Some(BrowserEntry::Parent(dir)) | Some(BrowserEntry::Directory(dir)) => {
                    self.output_dir = dir.clone();
                }
                Some(BrowserEntry::File(_)) => {}
                None => {
                    if let Some(path) = prompt_path("請輸入輸出資料夾（不存在時自動建立，留空返回）", false)? {
                        return Ok(Some(path));
                    }
                }
            }
        }
    }

    fn confirm_overwrite(&mut self, target: &Path) -> io::Result<Option<OverwriteChoice>> {
        let choice = Select::new()
            .with_prompt(format!("{} 已存在，要如何處理？（Esc 取消）", target.display()))
            .items(&["覆寫", "保留兩者（自動改名）"])
            .default(1)
            .interact_opt()
            .map_err(|e| io::Error::new(io::ErrorKind::Other, format!("覆寫確認失敗: {}", e)))?;
        Ok(choice.map(|i| if i == 0 { OverwriteChoice::Overwrite } else { OverwriteChoice::KeepBoth }))
    }
}
