//! 成果物の書き出し
//!
//! - downloads: パイプラインが生成したファイルを出力ディレクトリへ保存
//! - report: 変換結果・提案レポート・実行ログの保存

pub mod downloads;
pub mod report;

pub use downloads::DirDownloader;
pub use report::{write_advice_report, write_converted_files, write_logs};

use std::path::{Path, PathBuf};

/// 出力先を決める（未指定なら 入力フォルダ/codeshift-out）
pub fn resolve_output_dir(folder: &Path, output: Option<PathBuf>, configured: Option<&Path>) -> PathBuf {
    output
        .or_else(|| configured.map(Path::to_path_buf))
        .unwrap_or_else(|| folder.join("codeshift-out"))
}
