//! バックエンド契約
//!
//! 変換API・テスト生成API・デプロイ設定生成API・クラスタ実行APIの
//! リクエスト/レスポンス型と、それらを呼び出す `Backend` トレイト。
//! HTTP実装はCLI（reqwest）とWeb（fetch）にそれぞれある。

use crate::encoding::encode_text;
use crate::error::BackendError;
use serde::{Deserialize, Serialize};

/// HTTPパス
pub mod routes {
    pub const UNIFIED_OPERATION: &str = "/unified_operation";
    pub const PROCESS_MULTI_FILES: &str = "/process_multi_files";
    pub const GENERATE_UNIT_TEST: &str = "/generate_unit_test";
    pub const DEPLOYMENT_FILES: &str = "/deployment_files";
    pub const SUBMIT_FILES: &str = "/submit_files";
}

/// バックエンド呼び出し
///
/// 実装はランタイム非依存（Webではシングルスレッドのイベントループ上で動く）。
#[allow(async_fn_in_trait)]
pub trait Backend {
    /// 1ファイル変換（プロンプト・ファイル名・コードを埋め込んだテキストを送る）
    async fn unified_operation(&self, request_text: &str) -> Result<UnifiedResponse, BackendError>;

    /// 複数ファイルをまとめて変換
    async fn process_multi_files(
        &self,
        prompt: &str,
        files: &[MultiFileInput],
    ) -> Result<MultiFileResponse, BackendError>;

    async fn generate_unit_test(&self, file_name: &str, code: &str) -> Result<UnitTestResponse, BackendError>;

    /// Dockerfile と YAML を生成
    async fn deployment_files(&self, file_name: &str, code: &str) -> Result<DeploymentFiles, BackendError>;

    /// クラスタへ送信して実行
    async fn deploy(&self, bundle: &SubmissionBundle) -> Result<DeployResponse, BackendError>;
}

// =============================================
// リクエスト
// =============================================

#[derive(Debug, Clone, Serialize)]
pub struct UnifiedRequest<'a> {
    pub code: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFileInput {
    pub file_name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct MultiFileRequest<'a> {
    pub prompt: &'a str,
    pub files: &'a [MultiFileInput],
}

/// generate_unit_test / deployment_files 共通
#[derive(Debug, Clone, Serialize)]
pub struct CodeRequest<'a> {
    pub file_name: &'a str,
    pub code: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFile {
    pub filename: String,
    /// Base64（UTF-8セーフ）
    pub content: String,
}

/// クラスタへ送る送信バンドル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionBundle {
    pub code_files: Vec<CodeFile>,
    pub job_yaml: String,
    pub dockerfile: String,
}

impl SubmissionBundle {
    /// 平文を受け取り、すべてBase64化したバンドルを作る
    pub fn encode(filename: &str, code: &str, job_yaml: &str, dockerfile: &str) -> Self {
        Self {
            code_files: vec![CodeFile {
                filename: filename.to_string(),
                content: encode_text(code),
            }],
            job_yaml: encode_text(job_yaml),
            dockerfile: encode_text(dockerfile),
        }
    }
}

// =============================================
// レスポンス
// =============================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionResult {
    #[serde(default)]
    pub converted_code: String,
    #[serde(default)]
    pub suggestions: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnifiedResponse {
    #[serde(default)]
    pub result: Option<ConversionResult>,
}

impl UnifiedResponse {
    pub fn into_result(self) -> Result<ConversionResult, BackendError> {
        self.result.ok_or(BackendError::MissingField("result"))
    }
}

/// 提案は文字列または文字列の配列で返る
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Suggestions {
    Text(String),
    List(Vec<String>),
}

impl Suggestions {
    /// 1つのMarkdownブロックにまとめる
    pub fn joined(&self) -> String {
        match self {
            Suggestions::Text(text) => text.clone(),
            Suggestions::List(items) => items.join("\n"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchFileResult {
    pub file_name: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub suggestions: Option<Suggestions>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiFileResponse {
    #[serde(default)]
    pub files: Option<Vec<BatchFileResult>>,
}

impl MultiFileResponse {
    pub fn into_files(self) -> Result<Vec<BatchFileResult>, BackendError> {
        self.files.ok_or(BackendError::MissingField("files"))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitTestResponse {
    #[serde(default)]
    pub unit_test: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentFiles {
    #[serde(default)]
    pub dockerfile: Option<String>,
    #[serde(default)]
    pub yaml: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileLog {
    pub file_name: String,
    #[serde(default)]
    pub log: String,
}

/// クラスタ実行結果
///
/// `kubectl_logs` と `logs` はBase64。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeployResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub kubectl_logs: Option<String>,
    #[serde(default)]
    pub logs: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub log: Option<String>,
    #[serde(default)]
    pub files: Option<Vec<FileLog>>,
}

impl DeployResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoding::decode_text;

    #[test]
    fn test_bundle_serialize_shape() {
        let bundle = SubmissionBundle::encode("A.java", "class A {}", "kind: Job", "FROM openjdk:17");
        let value = serde_json::to_value(&bundle).expect("シリアライズ失敗");
        assert_eq!(value["code_files"][0]["filename"], "A.java");
        assert_eq!(
            decode_text(value["code_files"][0]["content"].as_str().unwrap()).unwrap(),
            "class A {}"
        );
        assert_eq!(decode_text(value["job_yaml"].as_str().unwrap()).unwrap(), "kind: Job");
        assert_eq!(decode_text(value["dockerfile"].as_str().unwrap()).unwrap(), "FROM openjdk:17");
    }

    #[test]
    fn test_unified_response_deserialize() {
        let json = r#"{"result": {"converted_code": "class A { }", "suggestions": "ok"}}"#;
        let response: UnifiedResponse = serde_json::from_str(json).expect("デシリアライズ失敗");
        let result = response.into_result().unwrap();
        assert_eq!(result.converted_code, "class A { }");
        assert_eq!(result.suggestions.as_deref(), Some("ok"));
    }

    #[test]
    fn test_unified_response_without_result() {
        let response: UnifiedResponse = serde_json::from_str(r#"{"detail": "oops"}"#).unwrap();
        assert_eq!(response.into_result(), Err(BackendError::MissingField("result")));
    }

    #[test]
    fn test_suggestions_text_or_list() {
        let json = r#"{"files": [
            {"file_name": "A.java", "content": "a", "suggestions": "one"},
            {"file_name": "B.java", "content": "b", "suggestions": ["x", "y"]},
            {"file_name": "C.java", "content": "c"}
        ]}"#;
        let files = serde_json::from_str::<MultiFileResponse>(json)
            .unwrap()
            .into_files()
            .unwrap();
        assert_eq!(files[0].suggestions.as_ref().unwrap().joined(), "one");
        assert_eq!(files[1].suggestions.as_ref().unwrap().joined(), "x\ny");
        assert!(files[2].suggestions.is_none());
    }

    #[test]
    fn test_deploy_response_partial_fields() {
        let json = r#"{"status": "success", "kubectl_logs": "T0sK"}"#;
        let response: DeployResponse = serde_json::from_str(json).unwrap();
        assert!(response.is_success());
        assert_eq!(response.kubectl_logs.as_deref(), Some("T0sK"));
        assert!(response.files.is_none());
    }
}
