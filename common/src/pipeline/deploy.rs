//! デプロイ設定パイプライン
//!
//! レコードごとに順番に:
//! 1. 現在の変換結果から Dockerfile / YAML を生成
//! 2. 生成物と変換後コードをダウンロード
//! 3. Base64化したバンドルをクラスタへ送信し、ログを集める
//!
//! ログブックは全レコードを試した後に1回だけ発行する。

use super::{submit, Downloader, RunSummary};
use crate::backend::{Backend, SubmissionBundle};
use crate::logbook::LogBook;
use crate::naming::{base_name, dockerfile_name, fixed_file_name, manifest_name};
use crate::session::SessionEvent;
use crate::types::FileRecord;
use tracing::{error, warn};

pub async fn deploy_all<B: Backend, D: Downloader>(
    backend: &B,
    downloader: &mut D,
    records: &[FileRecord],
    mut emit: impl FnMut(SessionEvent),
) -> RunSummary {
    let mut logs = LogBook::new();
    let mut summary = RunSummary::default();

    emit(SessionEvent::DeployStarted);

    for record in records {
        let name = base_name(&record.file_name);

        // 1. 設定ファイル生成
        let files = match backend.deployment_files(name, &record.new_code).await {
            Ok(files) => files,
            Err(e) => {
                error!(file = %record.file_name, "デプロイ設定の生成に失敗: {}", e);
                emit(SessionEvent::ProgressNoted(format!(
                    "デプロイ設定の生成に失敗: {}",
                    record.file_name
                )));
                summary.failed += 1;
                continue;
            }
        };

        // 2. ダウンロード
        let mut outputs: Vec<(String, &str)> = Vec::new();
        if let Some(dockerfile) = files.dockerfile.as_deref().filter(|s| !s.is_empty()) {
            outputs.push((dockerfile_name(&record.file_name), dockerfile));
        }
        if let Some(yaml) = files.yaml.as_deref().filter(|s| !s.is_empty()) {
            outputs.push((manifest_name(&record.file_name), yaml));
        }
        outputs.push((fixed_file_name(&record.file_name), record.new_code.as_str()));
        for (file_name, content) in outputs {
            if let Err(e) = downloader.download(&file_name, content) {
                warn!(file = %file_name, "ダウンロード失敗: {}", e);
            }
        }

        // 3. クラスタ送信
        let bundle = SubmissionBundle::encode(
            name,
            &record.new_code,
            files.yaml.as_deref().unwrap_or_default(),
            files.dockerfile.as_deref().unwrap_or_default(),
        );
        match submit(backend, &bundle, &record.file_name, &mut logs).await {
            Ok(()) => {
                summary.submitted += 1;
                emit(SessionEvent::ProgressNoted(format!(
                    "デプロイ完了: {}",
                    record.file_name
                )));
            }
            Err(message) => {
                summary.failed += 1;
                emit(SessionEvent::ProgressNoted(message));
            }
        }
    }

    emit(SessionEvent::LogsPublished(logs));
    emit(SessionEvent::DeployFinished);

    summary
}
