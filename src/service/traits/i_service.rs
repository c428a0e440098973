use std::io;
use std::path::{Path, PathBuf};

use crate::error::ConvertResult;
use crate::models::conversion::{ConflictPolicy, ConversionResult};

// 外部轉換引擎的接口，僅暴露單一方法以便替換與測試
pub trait DocumentConverter: Send + Sync {
    /// 將輸入文件轉為 Markdown
    /// # 參數
    /// - input: 輸入文件路徑
    /// # 回傳
    /// - 成功時返回 Markdown 與來源格式
    fn convert(&self, input: &Path) -> ConvertResult<ConversionResult>;
}

// Markdown 寫入服務接口
pub trait MarkdownWriterTrait: Send + Sync {
    /// 依建議名稱計算輸出路徑，不觸碰檔案系統
    fn target_path(&self, output_dir: &Path, suggested_name: &str) -> PathBuf;

    /// 寫入 Markdown，返回實際寫入的檔案路徑
    fn write(
        &self,
        markdown: &str,
        output_dir: &Path,
        suggested_name: &str,
        policy: ConflictPolicy,
    ) -> ConvertResult<PathBuf>;
}

/// 使用者選擇覆寫衝突時的答覆
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverwriteChoice {
    Overwrite,
    KeepBoth,
}

// 檔案選擇器接口，`Ok(None)` 代表使用者取消
pub trait FileSelectorTrait {
    fn choose_input_file(&mut self) -> io::Result<Option<PathBuf>>;

    fn choose_output_directory(&mut self) -> io::Result<Option<PathBuf>>;

    fn confirm_overwrite(&mut self, target: &Path) -> io::Result<Option<OverwriteChoice>>;
}
