use std::path::PathBuf;

use crate::error::ConvertResult;
use crate::models::conversion::{ConversionOutcome, ConversionRequest};

// Facade 接口，負責協調轉換與寫入
pub trait ConversionFacadeTrait: Send + Sync {
    /// 轉換請求的輸入文件並寫出 Markdown
    /// # 參數
    /// - request: 輸入路徑、輸出目錄與衝突策略
    /// # 回傳
    /// - 成功時返回寫入結果，失敗時返回轉換錯誤
    fn execute_conversion(&self, request: &ConversionRequest) -> ConvertResult<ConversionOutcome>;

    /// 請求若以原名寫入時的目標路徑
    fn planned_output(&self, request: &ConversionRequest) -> PathBuf;
}
