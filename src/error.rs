use thiserror::Error;

#[derive(Error, Debug)]
pub enum CodeshiftError {
    #[error(transparent)]
    Common(#[from] codeshift_common::Error),

    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("HTTPクライアントの初期化に失敗: {0}")]
    Http(String),

    #[error("対話入力エラー: {0}")]
    Dialog(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

impl From<codeshift_common::BackendError> for CodeshiftError {
    fn from(e: codeshift_common::BackendError) -> Self {
        CodeshiftError::Common(e.into())
    }
}

impl From<dialoguer::Error> for CodeshiftError {
    fn from(e: dialoguer::Error) -> Self {
        CodeshiftError::Dialog(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CodeshiftError>;
