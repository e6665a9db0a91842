//! 変換パイプライン

use crate::backend::{Backend, MultiFileInput, MultiFileResponse, UnifiedResponse};
use crate::dialog::validate_prompt;
use crate::naming::base_name;
use crate::prompts::{build_conversion_request, build_rethink_request};
use crate::session::SessionEvent;
use crate::types::{FileRecord, ProcessingMode};
use crate::Result;
use futures::stream::{FuturesUnordered, StreamExt};
use tracing::{debug, error};

/// アップロード済みレコードを変換する
///
/// 空のプロンプトはリクエストを送る前にエラーになる。
/// 独立モードは全レコードを並列に送り、完了した順に反映する。
/// 関連モードは1回のバッチ呼び出し。
pub async fn convert_files<B: Backend>(
    backend: &B,
    mode: ProcessingMode,
    records: &[FileRecord],
    prompt: &str,
    mut emit: impl FnMut(SessionEvent),
) -> Result<()> {
    let prompt = validate_prompt(prompt)?;

    // 読み込めなかったファイルは送らず、エラーをそのまま残す
    let readable: Vec<&FileRecord> = records.iter().filter(|r| !r.read_failed).collect();

    emit(SessionEvent::ConversionStarted { total: readable.len() });
    match mode {
        ProcessingMode::Single => convert_each(backend, &readable, prompt, &mut emit).await,
        ProcessingMode::Multi => convert_batch(backend, &readable, prompt, &mut emit).await,
    }
    emit(SessionEvent::UpdateFinished);

    Ok(())
}

async fn convert_each<B: Backend>(
    backend: &B,
    records: &[&FileRecord],
    prompt: &str,
    emit: &mut impl FnMut(SessionEvent),
) {
    let mut pending: FuturesUnordered<_> = records
        .iter()
        .map(move |&record| async move {
            let request = build_conversion_request(prompt, record);
            debug!(file = %record.file_name, chars = request.len(), "変換リクエスト送信");

            let outcome = backend
                .unified_operation(&request)
                .await
                .and_then(UnifiedResponse::into_result)
                .map_err(|e| {
                    error!(file = %record.file_name, "ファイル送信失敗: {}", e);
                    format!("ファイル送信失敗: {}", e)
                });
            (record.file_name.clone(), outcome)
        })
        .collect();

    while let Some((file_name, outcome)) = pending.next().await {
        emit(SessionEvent::Converted { file_name, outcome });
    }
}

async fn convert_batch<B: Backend>(
    backend: &B,
    records: &[&FileRecord],
    prompt: &str,
    emit: &mut impl FnMut(SessionEvent),
) {
    let files: Vec<MultiFileInput> = records
        .iter()
        .map(|r| MultiFileInput {
            file_name: base_name(&r.file_name).to_string(),
            content: r.old_code.clone(),
        })
        .collect();
    debug!(files = files.len(), "バッチ変換リクエスト送信");

    let outcome = backend
        .process_multi_files(prompt, &files)
        .await
        .and_then(MultiFileResponse::into_files)
        .map_err(|e| {
            error!("バッチ処理失敗: {}", e);
            format!("バッチ処理失敗: {}", e)
        });

    emit(SessionEvent::BatchConverted(outcome));
}

/// 選択中レコードの現在の変換結果を、新しいプロンプトで再変換する
pub async fn rethink<B: Backend>(
    backend: &B,
    record: &FileRecord,
    prompt: &str,
    mut emit: impl FnMut(SessionEvent),
) -> Result<()> {
    let prompt = validate_prompt(prompt)?;

    emit(SessionEvent::RethinkStarted {
        file_name: record.file_name.clone(),
    });

    let request = build_rethink_request(prompt, record);
    let outcome = backend
        .unified_operation(&request)
        .await
        .and_then(UnifiedResponse::into_result)
        .map_err(|e| {
            error!(file = %record.file_name, "AI Rethink 失敗: {}", e);
            format!("AI Rethink 失敗: {}", e)
        });

    emit(SessionEvent::Rethought {
        file_name: record.file_name.clone(),
        outcome,
    });
    emit(SessionEvent::UpdateFinished);

    Ok(())
}
