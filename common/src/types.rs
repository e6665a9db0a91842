//! レコードの型定義
//!
//! CLIとWeb(WASM)で共有される型:
//! - FileRecord: アップロードされた1ファイルと、その派生成果物
//! - ProcessingMode: 独立ファイル / 関連ファイルの処理モード

use crate::naming;
use serde::{Deserialize, Serialize};

/// アップロードされたファイル1件
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileRecord {
    /// アップロード時の相対パス（セッション内で一意）
    pub file_name: String,

    /// 元のソースコード
    pub old_code: String,

    /// 最新の変換結果（変換前は空）
    #[serde(default)]
    pub new_code: String,

    #[serde(default)]
    pub loading: bool,

    /// 直近の失敗メッセージ（なければ空）
    #[serde(default)]
    pub error: String,

    /// 読み込みに失敗したファイル（変換対象にしない）
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub read_failed: bool,

    /// バックエンドからの提案（Markdown）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit_test_code: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dockerfile_content: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yaml_content: Option<String>,
}

impl FileRecord {
    /// 読み込み直後のレコード（変換待ち）
    pub fn pending(file_name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            old_code: content.into(),
            loading: true,
            ..Default::default()
        }
    }

    /// 読み込みに失敗したファイル
    ///
    /// 内容は空のまま、エラーを明示して待機状態にはしない。
    pub fn unreadable(file_name: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self {
            file_name: file_name.into(),
            error: format!("読み込み失敗: {}", reason),
            read_failed: true,
            ..Default::default()
        }
    }

    /// 読み込み結果からレコードを作る
    pub fn from_read<E: std::fmt::Display>(
        file_name: impl Into<String>,
        read: std::result::Result<String, E>,
    ) -> Self {
        match read {
            Ok(content) => Self::pending(file_name, content),
            Err(e) => Self::unreadable(file_name, e),
        }
    }

    /// パスの最後の要素
    pub fn base_name(&self) -> &str {
        naming::base_name(&self.file_name)
    }

    /// テスト実行に必要な3つの成果物が揃っているか
    pub fn has_test_artifacts(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.unit_test_code)
            && present(&self.dockerfile_content)
            && present(&self.yaml_content)
    }

    pub fn has_error(&self) -> bool {
        !self.error.is_empty()
    }
}

/// 変換モード
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingMode {
    /// ファイルごとに独立して変換（並列）
    #[default]
    Single,
    /// 全ファイルをまとめて1回で変換
    Multi,
}

impl ProcessingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingMode::Single => "single",
            ProcessingMode::Multi => "multi",
        }
    }

    /// 画面表示用ラベル
    pub fn label(&self) -> &'static str {
        match self {
            ProcessingMode::Single => "独立ファイル",
            ProcessingMode::Multi => "関連ファイル",
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            ProcessingMode::Single => ProcessingMode::Multi,
            ProcessingMode::Multi => ProcessingMode::Single,
        }
    }
}

impl std::str::FromStr for ProcessingMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "single" | "independent" | "s" => Ok(ProcessingMode::Single),
            "multi" | "batch" | "m" => Ok(ProcessingMode::Multi),
            _ => Err(format!("Unknown mode: {}. Use single or multi", s)),
        }
    }
}

impl std::fmt::Display for ProcessingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_record() {
        let record = FileRecord::pending("proj/src/A.java", "class A {}");
        assert_eq!(record.old_code, "class A {}");
        assert!(record.new_code.is_empty());
        assert!(record.loading);
        assert!(!record.has_error());
        assert_eq!(record.base_name(), "A.java");
    }

    #[test]
    fn test_unreadable_record_does_not_wait() {
        let record = FileRecord::from_read::<&str>("proj/bin.dat", Err("invalid UTF-8"));
        assert!(record.old_code.is_empty());
        assert!(!record.loading);
        assert!(record.error.contains("invalid UTF-8"));
        assert!(record.read_failed);
    }

    #[test]
    fn test_has_test_artifacts_requires_all_three() {
        let mut record = FileRecord::pending("A.java", "");
        record.unit_test_code = Some("class ATest {}".into());
        record.dockerfile_content = Some("FROM openjdk".into());
        assert!(!record.has_test_artifacts());

        record.yaml_content = Some(String::new());
        assert!(!record.has_test_artifacts());

        record.yaml_content = Some("kind: Job".into());
        assert!(record.has_test_artifacts());
    }

    #[test]
    fn test_record_serialize_camel_case() {
        let record = FileRecord::pending("A.java", "class A {}");
        let json = serde_json::to_string(&record).expect("シリアライズ失敗");
        assert!(json.contains("\"fileName\":\"A.java\""));
        assert!(json.contains("\"oldCode\":\"class A {}\""));
        assert!(!json.contains("unitTestCode"));
    }

    #[test]
    fn test_processing_mode_from_str() {
        assert_eq!("single".parse::<ProcessingMode>(), Ok(ProcessingMode::Single));
        assert_eq!("MULTI".parse::<ProcessingMode>(), Ok(ProcessingMode::Multi));
        assert!("both".parse::<ProcessingMode>().is_err());
        assert_eq!(ProcessingMode::Single.toggled(), ProcessingMode::Multi);
    }
}
