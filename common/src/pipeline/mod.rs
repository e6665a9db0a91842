//! バックエンドを呼び出すパイプライン
//!
//! - convert: 初回変換（独立 / 関連ファイル）と AI Rethink
//! - deploy: デプロイ設定の生成・ダウンロード・クラスタ送信
//! - test_run: ユニットテスト生成からクラスタ実行まで
//!
//! どのパイプラインも状態を持たず、`SessionEvent` を発行するだけ。
//! ランタイムには依存しない（`futures` のみ）。

mod convert;
mod deploy;
mod test_run;

#[cfg(test)]
pub(crate) mod scripted;

pub use convert::{convert_files, rethink};
pub use deploy::deploy_all;
pub use test_run::test_project;

use crate::backend::{Backend, SubmissionBundle};
use crate::logbook::LogBook;
use tracing::{debug, error};

/// 生成ファイルの保存先（CLIはディレクトリ、Webはブラウザのダウンロード）
pub trait Downloader {
    fn download(&mut self, file_name: &str, content: &str) -> crate::Result<()>;
}

/// クラスタ送信の集計
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// 送信まで進んだレコード数
    pub submitted: usize,
    /// 途中で失敗したレコード数
    pub failed: usize,
}

/// バンドルを送信し、応答をログに追記する
///
/// 失敗してもパイプラインは止めない。戻り値は進捗フィード用のメッセージ。
async fn submit<B: Backend>(
    backend: &B,
    bundle: &SubmissionBundle,
    file_name: &str,
    logs: &mut LogBook,
) -> Result<(), String> {
    debug!(file = %file_name, "クラスタへ送信");
    match backend.deploy(bundle).await {
        Ok(response) => {
            debug!(file = %file_name, status = %response.status, "クラスタ応答");
            logs.record_response(file_name, &response);
            Ok(())
        }
        Err(e) if e.is_timeout() => {
            error!(file = %file_name, "クラスタ送信がタイムアウト: {}", e);
            Err(format!("送信タイムアウト: {}", file_name))
        }
        Err(e) => {
            error!(file = %file_name, "処理済みファイルの送信に失敗: {}", e);
            Err(format!("送信失敗: {} ({})", file_name, e))
        }
    }
}
