use std::io;

use doc_to_markdown::action::cli::process_args;

fn main() -> io::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let converted = process_args(args)?;
    log::info!("程式結束，本次共轉換 {} 個檔案", converted);
    println!("再見！本次共轉換 {} 個檔案。", converted);
    Ok(())
}
