use std::path::PathBuf;

use log::{info, warn};

use crate::error::ConvertResult;
use crate::facade::traits::i_conversion::ConversionFacadeTrait;
use crate::models::conversion::{ConversionOutcome, ConversionRequest};
use crate::models::format::SourceFormat;
use crate::service::traits::i_service::{DocumentConverter, MarkdownWriterTrait};
use crate::utils::utils::ConversionSpinner;

pub struct ConversionFacade {
    converter: Box<dyn DocumentConverter>,
    writer: Box<dyn MarkdownWriterTrait>,
    show_progress: bool,
}

impl ConversionFacade {
    pub fn new(
        converter: Box<dyn DocumentConverter>,
        writer: Box<dyn MarkdownWriterTrait>,
        show_progress: bool,
    ) -> Self {
        ConversionFacade {
            converter,
            writer,
            show_progress,
        }
    }
}

impl ConversionFacadeTrait for ConversionFacade {
    fn execute_conversion(&self, request: &ConversionRequest) -> ConvertResult<ConversionOutcome> {
        // 啟動轉換程式前先擋下不支援的格式
        SourceFormat::from_path(&request.input_path)?;
        info!(
            "開始轉換，輸入檔案：{}，輸出目錄：{}",
            request.input_path.display(),
            request.output_dir.display()
        );

        let spinner = ConversionSpinner::new(
            format!("正在轉換 {} ...", request.input_path.display()),
            self.show_progress,
        );
        let result = match self.converter.convert(&request.input_path) {
            Ok(result) => result,
            Err(e) => {
                spinner.fail();
                warn!("轉換失敗：{}", e);
                return Err(e);
            }
        };

        let output_path = match self.writer.write(
            &result.markdown,
            &request.output_dir,
            &request.suggested_name(),
            request.conflict_policy,
        ) {
            Ok(path) => path,
            Err(e) => {
                spinner.fail();
                warn!("寫入失敗：{}", e);
                return Err(e);
            }
        };
        spinner.finish(result.markdown.len());

        Ok(ConversionOutcome {
            output_path,
            source_format: result.source_format,
            markdown_bytes: result.markdown.len(),
        })
    }

    fn planned_output(&self, request: &ConversionRequest) -> PathBuf {
        self.writer.target_path(&request.output_dir, &request.suggested_name())
    }
}
