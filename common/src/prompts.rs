//! 変換リクエスト文の生成
//!
//! 変換APIにはプロンプト・ファイル名・コードを1つのテキストに埋め込んで送る。

use crate::types::FileRecord;

/// 初回変換用: 元のコードを送る
pub fn build_conversion_request(prompt: &str, record: &FileRecord) -> String {
    format!(
        "### User Prompt:\n{}\n\n### File: {}\n\n{}",
        prompt, record.file_name, record.old_code
    )
}

/// AI Rethink用: 現在の変換結果を送る
pub fn build_rethink_request(prompt: &str, record: &FileRecord) -> String {
    format!(
        "### AI Rethink Request:\n\n{}\n\n### File: {}\n\n{}",
        prompt, record.file_name, record.new_code
    )
}
