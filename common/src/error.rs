//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Prompt を入力してください")]
    EmptyPrompt,

    #[error("ファイルが選択されていません")]
    NoSelection,

    #[error("ファイルが見つかりません: {0}")]
    NoFilesFound(String),

    #[error("Encoding error: {0}")]
    Encoding(String),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// バックエンド呼び出しの失敗
///
/// タイムアウトは他の通信エラーと区別して表示する。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("リクエストがタイムアウトしました（{seconds}秒）。バックエンドの処理時間が長すぎます")]
    Timeout { seconds: u64 },

    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("通信エラー: {0}")]
    Network(String),

    #[error("レスポンスの解析に失敗: {0}")]
    Decode(String),

    #[error("レスポンスに {0} が含まれていません")]
    MissingField(&'static str),
}

impl BackendError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, BackendError::Timeout { .. })
    }
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
