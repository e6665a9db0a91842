//! ファイルごとの実行ログ
//!
//! クラスタの応答をラベル付きセクションとして追記する。
//! 1セクションは `=== LABEL ===\n{本文}\n\n` の形。

use crate::backend::DeployResponse;
use crate::encoding::decode_log;
use serde::Serialize;
use std::collections::BTreeMap;

pub const KUBECTL_LABEL: &str = "KUBECTL LOGS";
pub const EXECUTION_LABEL: &str = "EXECUTION LOGS";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LogBook {
    entries: BTreeMap<String, String>,
}

impl LogBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.entries.get(file_name).map(String::as_str)
    }

    pub fn contains(&self, file_name: &str) -> bool {
        self.entries.contains_key(file_name)
    }

    pub fn file_names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 1セクションをまとめて追記
    pub fn append_section(&mut self, file_name: &str, label: &str, text: &str) {
        let entry = self.entries.entry(file_name.to_string()).or_default();
        entry.push_str(&format!("=== {} ===\n{}\n\n", label, text));
    }

    /// クラスタの応答をログに反映
    ///
    /// 応答を受け取った時点で空のエントリを作る。
    /// kubectlログは成功時のみ。実行ログがなければ単一/複数ファイル形式を見る。
    pub fn record_response(&mut self, file_name: &str, response: &DeployResponse) {
        self.entries.entry(file_name.to_string()).or_default();

        if response.is_success() {
            if let Some(kubectl) = response.kubectl_logs.as_deref().filter(|s| !s.is_empty()) {
                self.append_section(file_name, KUBECTL_LABEL, &decode_log(kubectl));
            }
        }

        if let Some(logs) = response.logs.as_deref().filter(|s| !s.is_empty()) {
            self.append_section(file_name, EXECUTION_LABEL, &decode_log(logs));
        } else if let (Some(name), Some(log)) = (
            response.file_name.as_deref().filter(|s| !s.is_empty()),
            response.log.as_deref().filter(|s| !s.is_empty()),
        ) {
            self.append_section(file_name, name, log);
        } else if let Some(files) = &response.files {
            for f in files {
                self.append_section(file_name, &f.file_name, &f.log);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::FileLog;
    use crate::encoding::encode_text;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_kubectl_logs_decoded_under_label() {
        let mut book = LogBook::new();
        let response = DeployResponse {
            status: "success".into(),
            kubectl_logs: Some(encode_text("OK\n")),
            ..Default::default()
        };
        book.record_response("proj/A.java", &response);
        assert_eq!(book.get("proj/A.java").unwrap(), "=== KUBECTL LOGS ===\nOK\n\n\n");
    }

    #[test]
    fn test_kubectl_logs_ignored_when_not_success() {
        let mut book = LogBook::new();
        let response = DeployResponse {
            status: "failed".into(),
            kubectl_logs: Some(encode_text("pod crashed")),
            ..Default::default()
        };
        book.record_response("A.java", &response);
        assert_eq!(book.get("A.java"), Some(""));
    }

    #[test]
    fn test_execution_logs_take_priority_over_file_forms() {
        let mut book = LogBook::new();
        let response = DeployResponse {
            status: "success".into(),
            logs: Some(encode_text("BUILD SUCCESS")),
            file_name: Some("ATest.java".into()),
            log: Some("ignored".into()),
            ..Default::default()
        };
        book.record_response("A.java", &response);
        let log = book.get("A.java").unwrap();
        assert!(log.contains("=== EXECUTION LOGS ===\nBUILD SUCCESS\n\n"));
        assert!(!log.contains("ignored"));
    }

    #[test]
    fn test_files_list_sections() {
        let mut book = LogBook::new();
        let response = DeployResponse {
            status: "success".into(),
            files: Some(vec![
                FileLog {
                    file_name: "ATest.java".into(),
                    log: "1 passed".into(),
                },
                FileLog {
                    file_name: "BTest.java".into(),
                    log: "2 passed".into(),
                },
            ]),
            ..Default::default()
        };
        book.record_response("A.java", &response);
        assert_eq!(
            book.get("A.java").unwrap(),
            "=== ATest.java ===\n1 passed\n\n=== BTest.java ===\n2 passed\n\n"
        );
    }

    #[test]
    fn test_sections_accumulate_per_file() {
        let mut book = LogBook::new();
        book.append_section("A.java", "first", "1");
        book.append_section("B.java", "other", "x");
        book.append_section("A.java", "second", "2");
        assert_eq!(book.get("A.java").unwrap(), "=== first ===\n1\n\n=== second ===\n2\n\n");
        assert_eq!(book.file_names().collect::<Vec<_>>(), vec!["A.java", "B.java"]);
        assert_eq!(book.len(), 2);
    }
}
