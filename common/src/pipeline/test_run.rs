//! プロジェクトテストパイプライン
//!
//! 全レコードについてユニットテスト生成 → テスト用デプロイ設定生成を順に行い、
//! 成果物が3つ揃ったレコードだけをクラスタで実行する。

use super::{submit, RunSummary};
use crate::backend::{Backend, DeploymentFiles, SubmissionBundle};
use crate::logbook::LogBook;
use crate::naming::{base_name, test_file_name};
use crate::session::SessionEvent;
use crate::types::FileRecord;
use tracing::{debug, error};

pub async fn test_project<B: Backend>(
    backend: &B,
    records: &[FileRecord],
    mut emit: impl FnMut(SessionEvent),
) -> RunSummary {
    let mut summary = RunSummary::default();

    emit(SessionEvent::TestStarted);

    // 生成した成果物はレコードへ反映しつつ、送信用にも手元に持つ
    let mut prepared: Vec<FileRecord> = Vec::with_capacity(records.len());

    for record in records {
        let name = base_name(&record.file_name);

        // 1. ユニットテスト生成
        let unit_test = match backend.generate_unit_test(name, &record.new_code).await {
            Ok(response) => response.unit_test,
            Err(e) => {
                error!(file = %record.file_name, "ユニットテスト生成に失敗: {}", e);
                emit(SessionEvent::ProgressNoted(format!(
                    "ユニットテスト生成に失敗: {}",
                    record.file_name
                )));
                summary.failed += 1;
                continue;
            }
        };
        emit(SessionEvent::UnitTestGenerated {
            file_name: record.file_name.clone(),
            code: unit_test.clone(),
        });
        emit(SessionEvent::ProgressNoted(format!(
            "ユニットテスト生成完了: {}",
            record.file_name
        )));

        // 2. テスト用のデプロイ設定生成
        let test_name = test_file_name(&record.file_name);
        let DeploymentFiles { dockerfile, yaml } =
            match backend.deployment_files(&test_name, &unit_test).await {
                Ok(files) => files,
                Err(e) => {
                    error!(file = %test_name, "テスト用デプロイ設定の生成に失敗: {}", e);
                    emit(SessionEvent::ProgressNoted(format!(
                        "テスト用デプロイ設定の生成に失敗: {}",
                        test_name
                    )));
                    summary.failed += 1;
                    continue;
                }
            };
        emit(SessionEvent::TestArtifactsGenerated {
            file_name: record.file_name.clone(),
            dockerfile: dockerfile.clone(),
            yaml: yaml.clone(),
        });
        emit(SessionEvent::ProgressNoted(format!(
            "デプロイ設定生成完了: {}",
            test_name
        )));

        prepared.push(FileRecord {
            unit_test_code: Some(unit_test),
            dockerfile_content: dockerfile,
            yaml_content: yaml,
            ..record.clone()
        });
    }

    // 3. 成果物が揃ったものだけ送信
    let mut logs = LogBook::new();
    for record in prepared.iter() {
        if !record.has_test_artifacts() {
            debug!(file = %record.file_name, "テスト成果物が不足しているため送信しない");
            emit(SessionEvent::ProgressNoted(format!(
                "テスト成果物が不足: {}",
                record.file_name
            )));
            summary.failed += 1;
            continue;
        }

        let bundle = SubmissionBundle::encode(
            &test_file_name(&record.file_name),
            record.unit_test_code.as_deref().unwrap_or_default(),
            record.yaml_content.as_deref().unwrap_or_default(),
            record.dockerfile_content.as_deref().unwrap_or_default(),
        );
        match submit(backend, &bundle, &record.file_name, &mut logs).await {
            Ok(()) => summary.submitted += 1,
            Err(message) => {
                summary.failed += 1;
                emit(SessionEvent::ProgressNoted(message));
            }
        }
    }

    emit(SessionEvent::LogsPublished(logs));
    emit(SessionEvent::TestFinished);

    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::DeployResponse;
    use crate::encoding::{decode_text, encode_text};
    use crate::error::BackendError;
    use crate::pipeline::scripted::ScriptedBackend;
    use crate::session::{SessionState, TestStatus};
    use futures::executor::block_on;
    use pretty_assertions::assert_eq;

    fn converted_state(entries: &[(&str, &str)]) -> SessionState {
        let mut state = SessionState::default();
        state.apply(SessionEvent::Uploaded(
            entries
                .iter()
                .map(|(name, _)| FileRecord::pending(*name, "old"))
                .collect(),
        ));
        for (name, code) in entries {
            state.apply(SessionEvent::CodeEdited {
                file_name: name.to_string(),
                code: code.to_string(),
            });
        }
        state
    }

    fn files(dockerfile: &str, yaml: &str) -> DeploymentFiles {
        DeploymentFiles {
            dockerfile: Some(dockerfile.into()),
            yaml: Some(yaml.into()),
        }
    }

    #[test]
    fn test_unit_test_failure_means_no_submission_and_no_log() {
        let backend = ScriptedBackend::default()
            .with_unit_test("A.java", Err(BackendError::Http { status: 500, body: "boom".into() }));
        let mut state = converted_state(&[("proj/A.java", "class A { }")]);
        let records = state.records.clone();

        let summary = block_on(test_project(&backend, &records, |ev| state.apply(ev)));

        assert_eq!(summary, RunSummary { submitted: 0, failed: 1 });
        assert!(backend.bundles().is_empty());
        assert!(backend.deployment_requests().is_empty());
        assert!(!state.logs.contains("proj/A.java"));
        assert!(state.logs.is_empty());
        assert_eq!(state.record("proj/A.java").unwrap().unit_test_code, None);
        assert_eq!(state.test_status, TestStatus::Complete);
        assert!(!state.testing);
    }

    #[test]
    fn test_full_run_submits_test_bundle() {
        let backend = ScriptedBackend::default()
            .with_unit_test("A.java", Ok("class ATest { }".into()))
            .with_deployment_files("ATest.java", Ok(files("FROM maven", "kind: Job")))
            .with_deploy(
                "ATest.java",
                Ok(DeployResponse {
                    status: "success".into(),
                    kubectl_logs: Some(encode_text("job created\n")),
                    logs: Some(encode_text("Tests run: 1, Failures: 0")),
                    ..Default::default()
                }),
            );
        let mut state = converted_state(&[("proj/src/A.java", "class A { }")]);
        let records = state.records.clone();

        let summary = block_on(test_project(&backend, &records, |ev| state.apply(ev)));

        assert_eq!(summary, RunSummary { submitted: 1, failed: 0 });
        assert_eq!(
            backend.unit_test_requests(),
            vec![("A.java".to_string(), "class A { }".to_string())]
        );
        assert_eq!(
            backend.deployment_requests(),
            vec![("ATest.java".to_string(), "class ATest { }".to_string())]
        );

        let bundle = &backend.bundles()[0];
        assert_eq!(bundle.code_files[0].filename, "ATest.java");
        assert_eq!(decode_text(&bundle.code_files[0].content).unwrap(), "class ATest { }");
        assert_eq!(decode_text(&bundle.dockerfile).unwrap(), "FROM maven");

        let record = state.record("proj/src/A.java").unwrap();
        assert!(record.has_test_artifacts());
        assert_eq!(
            state.logs.get("proj/src/A.java"),
            Some(
                "=== KUBECTL LOGS ===\njob created\n\n\n\
                 === EXECUTION LOGS ===\nTests run: 1, Failures: 0\n\n"
            )
        );
        assert_eq!(
            state.test_progress.last().map(String::as_str),
            Some("クラスタでのデプロイテスト完了")
        );
    }

    #[test]
    fn test_missing_manifest_skips_submission() {
        let backend = ScriptedBackend::default()
            .with_unit_test("A.java", Ok("class ATest { }".into()))
            .with_deployment_files(
                "ATest.java",
                Ok(DeploymentFiles {
                    dockerfile: Some("FROM maven".into()),
                    yaml: None,
                }),
            );
        let mut state = converted_state(&[("p/A.java", "a")]);
        let records = state.records.clone();

        let summary = block_on(test_project(&backend, &records, |ev| state.apply(ev)));

        assert_eq!(summary.submitted, 0);
        assert!(backend.bundles().is_empty());
        assert!(state.logs.is_empty());
    }

    #[test]
    fn test_one_failure_does_not_block_other_records() {
        let backend = ScriptedBackend::default()
            .with_unit_test("A.java", Ok("class ATest { }".into()))
            .with_deployment_files("ATest.java", Err(BackendError::Timeout { seconds: 120 }))
            .with_unit_test("B.java", Ok("class BTest { }".into()))
            .with_deployment_files("BTest.java", Ok(files("FROM maven", "kind: Job")))
            .with_deploy("BTest.java", Ok(DeployResponse::default()));
        let mut state = converted_state(&[("p/A.java", "a"), ("p/B.java", "b")]);
        let records = state.records.clone();

        let summary = block_on(test_project(&backend, &records, |ev| state.apply(ev)));

        assert_eq!(summary, RunSummary { submitted: 1, failed: 1 });
        assert_eq!(backend.bundles().len(), 1);
        assert!(state.logs.contains("p/B.java"));
        assert!(!state.logs.contains("p/A.java"));
        assert!(state
            .test_progress
            .iter()
            .any(|line| line.contains("ATest.java") && line.contains("失敗")));
    }

    #[test]
    fn test_previous_logs_are_cleared_on_start() {
        let backend = ScriptedBackend::default();
        let mut state = converted_state(&[("p/A.java", "a")]);
        let mut old = LogBook::new();
        old.append_section("p/A.java", "OLD", "stale");
        state.apply(SessionEvent::LogsPublished(old));
        let records = state.records.clone();

        block_on(test_project(&backend, &records, |ev| state.apply(ev)));

        assert!(state.logs.is_empty());
    }
}
