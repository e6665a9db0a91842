//! セッション状態とイベント
//!
//! 状態の変更はすべて `SessionState::apply` を通す。
//! パイプラインはイベントを発行するだけで、状態そのものは持たない。
//! アップロードのたびに状態は作り直される。

use crate::backend::{BatchFileResult, ConversionResult};
use crate::logbook::LogBook;
use crate::naming::base_name;
use crate::types::{FileRecord, ProcessingMode};
use serde::Serialize;

pub const NO_ADVICE: &str = "提案はまだありません";

/// 進捗カウンタ
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub done: usize,
    pub total: usize,
}

impl Progress {
    /// 0.0〜1.0
    pub fn ratio(&self) -> f32 {
        if self.total == 0 {
            return 0.0;
        }
        (self.done.min(self.total) as f32) / (self.total as f32)
    }
}

/// テスト実行の状態表示
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum TestStatus {
    #[default]
    Idle,
    InProgress,
    Complete,
}

impl std::fmt::Display for TestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TestStatus::Idle => write!(f, ""),
            TestStatus::InProgress => write!(f, "プロジェクトをクラスタでテスト中…"),
            TestStatus::Complete => write!(f, "すべてのファイルのテストが完了しました"),
        }
    }
}

/// パイプラインの各段階の完了を表すイベント
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// アップロード完了（状態をリセット）
    Uploaded(Vec<FileRecord>),
    ModeChanged(ProcessingMode),
    Selected(String),
    /// 差分ビューでの直接編集
    CodeEdited { file_name: String, code: String },

    ConversionStarted { total: usize },
    Converted {
        file_name: String,
        outcome: Result<ConversionResult, String>,
    },
    BatchConverted(Result<Vec<BatchFileResult>, String>),
    RethinkStarted { file_name: String },
    Rethought {
        file_name: String,
        outcome: Result<ConversionResult, String>,
    },
    /// 変換オーバーレイを閉じる
    UpdateFinished,

    DeployStarted,
    DeployFinished,

    TestStarted,
    UnitTestGenerated { file_name: String, code: String },
    TestArtifactsGenerated {
        file_name: String,
        dockerfile: Option<String>,
        yaml: Option<String>,
    },
    TestFinished,

    /// 進捗フィードに1行追加
    ProgressNoted(String),
    /// ログブックを丸ごと差し替え
    LogsPublished(LogBook),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionState {
    pub records: Vec<FileRecord>,
    /// 選択中レコードのキー
    pub selected: Option<String>,
    pub logs: LogBook,
    pub mode: ProcessingMode,
    pub progress: Progress,
    /// 変換中（オーバーレイ表示）
    pub updating: bool,
    pub deploying: bool,
    pub testing: bool,
    pub test_status: TestStatus,
    pub test_progress: Vec<String>,
}

impl SessionState {
    pub fn new(mode: ProcessingMode) -> Self {
        Self {
            mode,
            ..Default::default()
        }
    }

    pub fn record(&self, file_name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.file_name == file_name)
    }

    fn record_mut(&mut self, file_name: &str) -> Option<&mut FileRecord> {
        self.records.iter_mut().find(|r| r.file_name == file_name)
    }

    pub fn selected(&self) -> Option<&FileRecord> {
        self.selected.as_deref().and_then(|name| self.record(name))
    }

    /// 選択中レコードの複製（Rethink等、状態を借用したまま実行できない処理用）
    pub fn selected_snapshot(&self) -> crate::Result<FileRecord> {
        self.selected().cloned().ok_or(crate::Error::NoSelection)
    }

    /// 選択中レコードの提案（なければ既定文）
    pub fn selected_advice(&self) -> &str {
        self.selected()
            .and_then(|r| r.advice.as_deref())
            .filter(|a| !a.is_empty())
            .unwrap_or(NO_ADVICE)
    }

    pub fn is_busy(&self) -> bool {
        self.updating || self.deploying || self.testing
    }

    /// イベントを適用して次の状態へ
    pub fn apply(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Uploaded(records) => {
                *self = Self {
                    records,
                    mode: self.mode,
                    ..Default::default()
                };
            }
            SessionEvent::ModeChanged(mode) => self.mode = mode,
            SessionEvent::Selected(file_name) => {
                if self.record(&file_name).is_some() {
                    self.selected = Some(file_name);
                }
            }
            SessionEvent::CodeEdited { file_name, code } => {
                if let Some(record) = self.record_mut(&file_name) {
                    record.new_code = code;
                }
            }

            SessionEvent::ConversionStarted { total } => {
                self.progress = Progress { done: 0, total };
                self.updating = true;
                for record in self.records.iter_mut().filter(|r| !r.read_failed) {
                    record.loading = true;
                    record.error.clear();
                }
            }
            SessionEvent::Converted { file_name, outcome } => {
                if let Some(record) = self.record_mut(&file_name) {
                    match outcome {
                        Ok(result) => {
                            record.new_code = if result.converted_code.is_empty() {
                                record.old_code.clone()
                            } else {
                                result.converted_code
                            };
                            record.advice = result.suggestions;
                            record.error.clear();
                        }
                        Err(message) => record.error = message,
                    }
                    record.loading = false;
                }
                self.progress.done += 1;
            }
            SessionEvent::BatchConverted(outcome) => {
                self.apply_batch(outcome);
                self.progress.done = self.progress.total;
            }
            SessionEvent::RethinkStarted { file_name } => {
                self.progress = Progress { done: 0, total: 1 };
                self.updating = true;
                if let Some(record) = self.record_mut(&file_name) {
                    record.loading = true;
                }
            }
            SessionEvent::Rethought { file_name, outcome } => {
                if let Some(record) = self.record_mut(&file_name) {
                    match outcome {
                        Ok(result) => {
                            if !result.converted_code.is_empty() {
                                record.new_code = result.converted_code;
                            }
                            record.advice = result.suggestions;
                            record.error.clear();
                        }
                        Err(message) => record.error = message,
                    }
                    record.loading = false;
                }
                self.progress.done = 1;
            }
            SessionEvent::UpdateFinished => self.updating = false,

            SessionEvent::DeployStarted => self.deploying = true,
            SessionEvent::DeployFinished => self.deploying = false,

            SessionEvent::TestStarted => {
                self.testing = true;
                self.test_status = TestStatus::InProgress;
                self.test_progress = vec!["プロジェクトのテストを開始…".to_string()];
                self.logs = LogBook::default();
            }
            SessionEvent::UnitTestGenerated { file_name, code } => {
                if let Some(record) = self.record_mut(&file_name) {
                    record.unit_test_code = Some(code);
                }
            }
            SessionEvent::TestArtifactsGenerated { file_name, dockerfile, yaml } => {
                if let Some(record) = self.record_mut(&file_name) {
                    record.dockerfile_content = dockerfile;
                    record.yaml_content = yaml;
                }
            }
            SessionEvent::TestFinished => {
                self.test_progress.push("クラスタでのデプロイテスト完了".to_string());
                self.test_status = TestStatus::Complete;
                self.testing = false;
            }

            SessionEvent::ProgressNoted(line) => self.test_progress.push(line),
            SessionEvent::LogsPublished(logs) => self.logs = logs,
        }
    }

    /// バッチ結果はパスの最後の要素だけで突き合わせる
    ///
    /// 別ディレクトリに同名ファイルがあると、どちらも同じ結果を受け取る。
    fn apply_batch(&mut self, outcome: Result<Vec<BatchFileResult>, String>) {
        match outcome {
            Ok(results) => {
                for record in self.records.iter_mut().filter(|r| !r.read_failed) {
                    let name = base_name(&record.file_name);
                    match results.iter().find(|r| r.file_name == name) {
                        Some(found) => {
                            record.new_code = found.content.clone();
                            record.advice = found.suggestions.as_ref().map(|s| s.joined());
                            record.error.clear();
                        }
                        None => record.error = "バッチ結果に含まれていません".to_string(),
                    }
                    record.loading = false;
                }
            }
            Err(message) => {
                for record in self.records.iter_mut().filter(|r| !r.read_failed) {
                    record.error = message.clone();
                    record.loading = false;
                }
            }
        }
    }
}
