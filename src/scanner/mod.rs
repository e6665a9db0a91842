//! フォルダ読み込み
//!
//! ブラウザのフォルダ選択と同じく、選択したフォルダ名から始まる
//! `/` 区切りの相対パスをファイル名にする。

use crate::error::{CodeshiftError, Result};
use codeshift_common::FileRecord;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::{DirEntry, WalkDir};

/// デフォルトで読み飛ばすディレクトリ
const SKIPPED_DIRS: &[&str] = &["target", "node_modules"];

#[derive(Debug, Clone, Copy, Default)]
pub struct IntakeOptions {
    /// 隠しファイル・ビルドディレクトリも含める
    pub include_hidden: bool,
}

fn is_skipped(entry: &DirEntry) -> bool {
    // ルート自体は対象外
    if entry.depth() == 0 {
        return false;
    }
    let name = entry.file_name().to_string_lossy();
    name.starts_with('.') || (entry.file_type().is_dir() && SKIPPED_DIRS.contains(&name.as_ref()))
}

/// フォルダ内の全ファイルをレコードにする
///
/// 読めないファイル（I/Oエラー・UTF-8以外）はエラー付きのレコードになる。
pub fn read_folder(folder: &Path, options: IntakeOptions) -> Result<Vec<FileRecord>> {
    if !folder.is_dir() {
        return Err(CodeshiftError::FolderNotFound(folder.display().to_string()));
    }

    let root_name = folder
        .canonicalize()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().to_string()))
        .unwrap_or_else(|| "upload".to_string());

    let mut records = Vec::new();

    for entry in WalkDir::new(folder)
        .follow_links(false)
        .into_iter()
        .filter_entry(|e| options.include_hidden || !is_skipped(e))
    {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("走査できないエントリ: {}", e);
                continue;
            }
        };

        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(folder)
            .unwrap_or(entry.path())
            .components()
            .map(|c| c.as_os_str().to_string_lossy().to_string())
            .collect::<Vec<_>>()
            .join("/");
        let file_name = format!("{}/{}", root_name, relative);

        let record = FileRecord::from_read(&file_name, std::fs::read_to_string(entry.path()));
        if record.has_error() {
            warn!(file = %file_name, "{}", record.error);
        } else {
            debug!(file = %file_name, bytes = record.old_code.len(), "読み込み");
        }
        records.push(record);
    }

    if records.is_empty() {
        return Err(codeshift_common::Error::NoFilesFound(folder.display().to_string()).into());
    }

    // ファイル名でソート
    records.sort_by(|a, b| a.file_name.cmp(&b.file_name));

    Ok(records)
}
