use crate::error::Result;
use codeshift_common::naming::fixed_file_name;
use codeshift_common::session::NO_ADVICE;
use codeshift_common::{FileRecord, LogBook};
use std::path::{Path, PathBuf};

pub const ADVICE_REPORT: &str = "advice.md";
pub const LOG_DIR: &str = "logs";

/// 変換に成功したレコードを `{stem}_fixed{ext}` で保存
///
/// 同じベース名のファイルは後のレコードで上書きされる。
pub fn write_converted_files(records: &[FileRecord], output_dir: &Path) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(output_dir)?;

    let mut written = Vec::new();
    for record in records.iter().filter(|r| !r.has_error() && !r.new_code.is_empty()) {
        let path = output_dir.join(fixed_file_name(&record.file_name));
        std::fs::write(&path, &record.new_code)?;
        written.push(path);
    }
    Ok(written)
}

/// ファイルごとの提案とエラーをMarkdownにまとめる
pub fn render_advice_report(records: &[FileRecord], generated_at: &str) -> String {
    let mut out = format!("# 変換レポート\n\n生成日時: {}\n\n", generated_at);

    for record in records {
        out.push_str(&format!("## {}\n\n", record.file_name));
        if record.has_error() {
            out.push_str(&format!("> ⚠ {}\n\n", record.error));
        }
        let advice = record
            .advice
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(NO_ADVICE);
        out.push_str(advice.trim_end());
        out.push_str("\n\n");
    }
    out
}

pub fn write_advice_report(records: &[FileRecord], output_dir: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(output_dir)?;
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let path = output_dir.join(ADVICE_REPORT);
    std::fs::write(&path, render_advice_report(records, &generated_at))?;
    Ok(path)
}

/// 相対パスから衝突しないログファイル名を作る: `p/src/A.java` → `p__src__A.java.log`
pub fn log_file_name(file_name: &str) -> String {
    format!("{}.log", file_name.trim_matches('/').replace('/', "__"))
}

/// ログブックを `logs/` にファイルごとに保存
pub fn write_logs(logs: &LogBook, output_dir: &Path) -> Result<Vec<PathBuf>> {
    if logs.is_empty() {
        return Ok(Vec::new());
    }
    let dir = output_dir.join(LOG_DIR);
    std::fs::create_dir_all(&dir)?;

    let mut written = Vec::new();
    for (file_name, text) in logs.iter() {
        let path = dir.join(log_file_name(file_name));
        std::fs::write(&path, text)?;
        written.push(path);
    }
    Ok(written)
}
