use std::io;
use std::path::PathBuf;

use log::{debug, info, warn};

use crate::config::config::ConflictMode;
use crate::error::ConvertError;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConflictPolicy, ConversionRequest};
use crate::models::format::SourceFormat;
use crate::service::traits::i_service::{FileSelectorTrait, OverwriteChoice};
use crate::utils::utils::display_path;

/// 狀態列顯示的狀態
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Ready,
    Converting,
    Success(PathBuf),
    Error(String),
}

/// 殼層持有的全部狀態
#[derive(Debug, Default)]
pub struct ShellState {
    pub status: Status,
    pub selected_input: Option<PathBuf>,
    pub converted: usize,
}

impl ShellState {
    pub fn label(&self) -> String {
        match &self.status {
            Status::Idle => "請選擇要轉換的檔案".to_string(),
            Status::Ready => match self.selected_input.as_ref().and_then(|p| p.file_name()) {
                Some(name) => format!("已選擇檔案：{}", name.to_string_lossy()),
                None => "已選擇檔案".to_string(),
            },
            Status::Converting => "正在轉換文件...".to_string(),
            Status::Success(path) => format!("轉換完成，已儲存至：{}", display_path(path)),
            Status::Error(message) => format!("錯誤：{}", message),
        }
    }
}

/// 串接檔案選擇器與轉換流程的控制器
///
/// 一次只處理一個請求；「轉換並儲存」僅在 `Ready` 狀態下有效。
pub struct ConverterShell {
    state: ShellState,
    selector: Box<dyn FileSelectorTrait>,
    facade: Box<dyn ConversionFacadeTrait>,
    conflict_mode: ConflictMode,
    status_observer: Option<Box<dyn FnMut(&ShellState)>>,
}

impl ConverterShell {
    pub fn new(
        selector: Box<dyn FileSelectorTrait>,
        facade: Box<dyn ConversionFacadeTrait>,
        conflict_mode: ConflictMode,
    ) -> Self {
        ConverterShell {
            state: ShellState::default(),
            selector,
            facade,
            conflict_mode,
            status_observer: None,
        }
    }

    /// 每次狀態改變後呼叫，供介面更新狀態列
    pub fn with_status_observer(mut self, observer: impl FnMut(&ShellState) + 'static) -> Self {
        self.status_observer = Some(Box::new(observer));
        self
    }

    pub fn state(&self) -> &ShellState {
        &self.state
    }

    pub fn status(&self) -> &Status {
        &self.state.status
    }

    pub fn status_label(&self) -> String {
        self.state.label()
    }

    pub fn can_convert(&self) -> bool {
        self.state.status == Status::Ready
    }

    /// 最近一次轉換的結果是否尚待使用者確認
    pub fn has_outcome(&self) -> bool {
        matches!(self.state.status, Status::Success(_) | Status::Error(_))
    }

    pub fn select_file(&mut self) -> io::Result<()> {
        match self.selector.choose_input_file()? {
            Some(path) => {
                info!("已選擇檔案：{}", path.display());
                self.state.selected_input = Some(path);
                self.set_status(Status::Ready);
            }
            None => debug!("取消選擇輸入檔案"),
        }
        Ok(())
    }

    /// 選擇輸出目錄、處理同名衝突後執行轉換
    ///
    /// 任何取消都讓狀態停在 `Ready`；轉換錯誤只會反映在狀態上，不會中斷程式。
    /// 只有終端互動本身失敗時才回傳錯誤。
    pub fn convert_and_save(&mut self) -> io::Result<()> {
        if !self.can_convert() {
            warn!("目前狀態無法轉換：{:?}", self.state.status);
            return Ok(());
        }
        let Some(input) = self.state.selected_input.clone() else {
            self.set_status(Status::Idle);
            return Ok(());
        };
        if let Err(e) = SourceFormat::from_path(&input) {
            self.fail(e);
            return Ok(());
        }

        let Some(output_dir) = self.selector.choose_output_directory()? else {
            debug!("取消選擇輸出目錄");
            return Ok(());
        };
        let mut request = ConversionRequest::new(input, output_dir, ConflictPolicy::Fail);
        let Some(policy) = self.resolve_conflict(&request)? else {
            debug!("取消覆寫確認");
            return Ok(());
        };
        request.conflict_policy = policy;

        self.set_status(Status::Converting);
        match self.facade.execute_conversion(&request) {
            Ok(outcome) => {
                info!(
                    "{} 轉換完成：{}",
                    outcome.source_format,
                    outcome.output_path.display()
                );
                self.state.converted += 1;
                self.set_status(Status::Success(outcome.output_path));
            }
            Err(e) => self.fail(e),
        }
        Ok(())
    }

    /// 使用者看過結果後回到 `Idle`
    pub fn acknowledge(&mut self) {
        if self.has_outcome() {
            self.state.selected_input = None;
            self.set_status(Status::Idle);
        }
    }

    fn resolve_conflict(&mut self, request: &ConversionRequest) -> io::Result<Option<ConflictPolicy>> {
        if let Some(policy) = self.conflict_mode.preset_policy() {
            return Ok(Some(policy));
        }
        let target = self.facade.planned_output(request);
        if !target.exists() {
            return Ok(Some(ConflictPolicy::Fail));
        }
        Ok(self.selector.confirm_overwrite(&target)?.map(|choice| match choice {
            OverwriteChoice::Overwrite => ConflictPolicy::Overwrite,
            OverwriteChoice::KeepBoth => ConflictPolicy::Rename,
        }))
    }

    fn set_status(&mut self, status: Status) {
        self.state.status = status;
        if let Some(observer) = self.status_observer.as_mut() {
            observer(&self.state);
        }
    }

    fn fail(&mut self, error: ConvertError) {
        warn!("{}", error);
        self.set_status(Status::Error(error.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_reflect_status() {
        let mut state = ShellState::default();
        assert_eq!(state.label(), "請選擇要轉換的檔案");

        state.selected_input = Some(PathBuf::from("/docs/report.docx"));
        state.status = Status::Ready;
        assert_eq!(state.label(), "已選擇檔案：report.docx");

        state.status = Status::Error("壞檔".to_string());
        assert_eq!(state.label(), "錯誤：壞檔");
    }
}
