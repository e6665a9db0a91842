//! 対話式コントロールパネル
//!
//! ブラウザ版と同じ操作（選択・差分・編集・Rethink・デプロイ設定・テスト・ログ）を
//! ターミナルのメニューで行う。

use crate::client::HttpBackend;
use crate::error::{CodeshiftError, Result};
use crate::export::{self, DirDownloader};
use crate::reporter::Reporter;
use codeshift_common::diff::{change_counts, line_diff};
use codeshift_common::{
    convert_files, deploy_all, rethink, test_project, FileRecord, PromptDialog, SessionEvent,
    SessionState,
};
use dialoguer::{Input, Select};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    SelectFile,
    ShowDiff,
    EditCode,
    Rethink,
    DeployConfig,
    TestProject,
    ViewLog,
    ToggleMode,
    Reconvert,
    Quit,
}

const MENU: &[MenuAction] = &[
    MenuAction::SelectFile,
    MenuAction::ShowDiff,
    MenuAction::EditCode,
    MenuAction::Rethink,
    MenuAction::DeployConfig,
    MenuAction::TestProject,
    MenuAction::ViewLog,
    MenuAction::ToggleMode,
    MenuAction::Reconvert,
    MenuAction::Quit,
];

impl MenuAction {
    pub fn label(&self, state: &SessionState) -> String {
        match self {
            MenuAction::SelectFile => "ファイルを選択".into(),
            MenuAction::ShowDiff => "差分と提案を表示".into(),
            MenuAction::EditCode => "変換結果を置き換え（ファイルから読み込み）".into(),
            MenuAction::Rethink => "AI Rethink".into(),
            MenuAction::DeployConfig => "デプロイ設定を生成".into(),
            MenuAction::TestProject => "プロジェクトをテスト".into(),
            MenuAction::ViewLog => format!("ログを表示（{}件）", state.logs.len()),
            MenuAction::ToggleMode => format!("モード切替（現在: {}）", state.mode.label()),
            MenuAction::Reconvert => "全ファイルを再変換".into(),
            MenuAction::Quit => "保存して終了".into(),
        }
    }

    /// 実行できない理由（実行可能なら None）
    pub fn blocked_reason(&self, state: &SessionState) -> Option<&'static str> {
        let selected_loading = state.selected().map(|r| r.loading);
        match self {
            MenuAction::ShowDiff | MenuAction::EditCode if selected_loading.is_none() => {
                Some("ファイルが選択されていません")
            }
            MenuAction::Rethink | MenuAction::DeployConfig => match selected_loading {
                None => Some("ファイルが選択されていません"),
                Some(true) => Some("処理中のファイルです"),
                Some(false) => None,
            },
            MenuAction::TestProject if state.testing => Some("テスト実行中です"),
            MenuAction::ViewLog if state.logs.is_empty() => Some("ログはまだありません"),
            _ => None,
        }
    }
}

/// ファイル一覧の1行
pub fn record_label(record: &FileRecord, selected: bool) -> String {
    let status = if record.loading {
        "…"
    } else if record.has_error() {
        "✗"
    } else if record.new_code.is_empty() {
        " "
    } else {
        "✔"
    };
    let cursor = if selected { ">" } else { " " };
    format!("{} [{}] {}", cursor, status, record.file_name)
}

/// 差分ビュー（行頭に +/-/空白）
pub fn render_diff(record: &FileRecord) -> String {
    let lines = line_diff(&record.old_code, &record.new_code);
    let (added, removed) = change_counts(&lines);

    let mut out = format!("--- {} (+{} -{})\n", record.file_name, added, removed);
    for line in &lines {
        out.push(line.kind.marker());
        out.push_str(&line.text);
        out.push('\n');
    }
    out
}

pub struct Console<'a> {
    backend: &'a HttpBackend,
    reporter: Reporter,
    output_dir: PathBuf,
}

impl<'a> Console<'a> {
    pub fn new(backend: &'a HttpBackend, state: SessionState, output_dir: PathBuf) -> Self {
        Self {
            backend,
            reporter: Reporter::new(state),
            output_dir,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.reporter.state
    }

    pub async fn run(mut self) -> Result<()> {
        let Some(prompt) = ask_prompt("変換プロンプト")? else {
            println!("キャンセルしました");
            return Ok(());
        };
        self.convert(&prompt).await?;

        loop {
            let state = &self.reporter.state;
            println!();
            for record in &state.records {
                println!("{}", record_label(record, state.selected.as_deref() == Some(&record.file_name)));
            }

            let items: Vec<String> = MENU.iter().map(|a| a.label(state)).collect();
            let choice = Select::new()
                .with_prompt("操作を選択")
                .items(&items)
                .default(0)
                .interact()?;
            let action = MENU[choice];

            if let Some(reason) = action.blocked_reason(&self.reporter.state) {
                println!("⚠ {}", reason);
                continue;
            }
            if action == MenuAction::Quit {
                break;
            }

            match self.handle(action).await {
                Ok(()) => {}
                // 端末操作の失敗は続行できない
                Err(e @ CodeshiftError::Dialog(_)) => return Err(e),
                Err(e) => println!("⚠ {}", e),
            }
        }

        self.save()
    }

    /// メニュー操作を1つ実行する（実行可否は呼び出し側で確認済み）
    pub async fn handle(&mut self, action: MenuAction) -> Result<()> {
        match action {
            MenuAction::SelectFile => self.select_file()?,
            MenuAction::ShowDiff => {
                let record = self.reporter.state.selected_snapshot()?;
                println!("{}", render_diff(&record));
                println!("## 提案\n{}", self.reporter.state.selected_advice());
            }
            MenuAction::EditCode => self.edit_code()?,
            MenuAction::Rethink => {
                let record = self.reporter.state.selected_snapshot()?;
                if let Some(prompt) = ask_prompt("AI Rethink プロンプト")? {
                    let reporter = &mut self.reporter;
                    rethink(self.backend, &record, &prompt, |ev| reporter.apply(ev)).await?;
                }
            }
            MenuAction::DeployConfig => {
                let records = self.reporter.state.records.clone();
                let mut downloader = DirDownloader::new(&self.output_dir);
                let reporter = &mut self.reporter;
                let summary = deploy_all(self.backend, &mut downloader, &records, |ev| reporter.apply(ev)).await;
                println!(
                    "✔ 送信 {}件 / 失敗 {}件（保存先: {}）",
                    summary.submitted,
                    summary.failed,
                    downloader.dir().display()
                );
            }
            MenuAction::TestProject => {
                let records = self.reporter.state.records.clone();
                let reporter = &mut self.reporter;
                let summary = test_project(self.backend, &records, |ev| reporter.apply(ev)).await;
                println!("✔ 送信 {}件 / 失敗 {}件", summary.submitted, summary.failed);
            }
            MenuAction::ViewLog => self.view_log()?,
            MenuAction::ToggleMode => {
                let mode = self.reporter.state.mode.toggled();
                self.reporter.apply(SessionEvent::ModeChanged(mode));
                println!("✔ モード: {}", mode.label());
            }
            MenuAction::Reconvert => {
                if let Some(prompt) = ask_prompt("変換プロンプト")? {
                    self.convert(&prompt).await?;
                }
            }
            MenuAction::Quit => {}
        }
        Ok(())
    }

    async fn convert(&mut self, prompt: &str) -> Result<()> {
        let records = self.reporter.state.records.clone();
        let mode = self.reporter.state.mode;
        let reporter = &mut self.reporter;
        convert_files(self.backend, mode, &records, prompt, |ev| reporter.apply(ev)).await?;
        Ok(())
    }

    fn select_file(&mut self) -> Result<()> {
        let state = &self.reporter.state;
        let names: Vec<String> = state.records.iter().map(|r| r.file_name.clone()).collect();
        let current = state
            .selected
            .as_ref()
            .and_then(|s| names.iter().position(|n| n == s))
            .unwrap_or(0);
        let index = Select::new()
            .with_prompt("ファイル")
            .items(&names)
            .default(current)
            .interact()?;
        self.reporter.apply(SessionEvent::Selected(names[index].clone()));
        Ok(())
    }

    fn edit_code(&mut self) -> Result<()> {
        let record = self.reporter.state.selected_snapshot()?;
        let path: String = Input::new()
            .with_prompt("置き換えるコードのファイルパス")
            .interact_text()?;
        let code = std::fs::read_to_string(Path::new(path.trim()))?;
        self.reporter.apply(SessionEvent::CodeEdited {
            file_name: record.file_name,
            code,
        });
        println!("✔ 変換結果を置き換えました");
        Ok(())
    }

    fn view_log(&self) -> Result<()> {
        let logs = &self.reporter.state.logs;
        let names: Vec<&str> = logs.file_names().collect();
        let index = Select::new()
            .with_prompt("ログ")
            .items(&names)
            .default(0)
            .interact()?;
        println!("{}", logs.get(names[index]).unwrap_or_default());
        Ok(())
    }

    fn save(&self) -> Result<()> {
        let state = &self.reporter.state;
        let files = export::write_converted_files(&state.records, &self.output_dir)?;
        let report = export::write_advice_report(&state.records, &self.output_dir)?;
        let logs = export::write_logs(&state.logs, &self.output_dir)?;
        println!(
            "✔ 変換結果 {}件・ログ {}件を保存: {}",
            files.len(),
            logs.len(),
            self.output_dir.display()
        );
        println!("✔ レポート: {}", report.display());
        Ok(())
    }
}

/// プロンプト入力ダイアログ
///
/// 空の入力では閉じずに再入力を求める。`:q` でキャンセル。
fn ask_prompt(title: &str) -> Result<Option<String>> {
    let mut dialog = PromptDialog::new(title, |prompt: String| prompt);
    dialog.open();

    while dialog.is_open() {
        let input: String = Input::new()
            .with_prompt(format!("{}（:q でキャンセル）", dialog.title()))
            .allow_empty(true)
            .interact_text()?;
        if input.trim() == ":q" {
            dialog.cancel();
            return Ok(None);
        }
        match dialog.confirm(&input) {
            Ok(prompt) => return Ok(Some(prompt)),
            Err(e) => println!("⚠ {}", e),
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshift_common::LogBook;

    fn state_with(records: Vec<FileRecord>) -> SessionState {
        let mut state = SessionState::default();
        state.apply(SessionEvent::Uploaded(records));
        state
    }

    #[test]
    fn test_record_label_status() {
        let pending = FileRecord::pending("p/A.java", "a");
        assert_eq!(record_label(&pending, true), "> […] p/A.java");

        let failed = FileRecord::unreadable("p/B.bin", "invalid UTF-8");
        assert_eq!(record_label(&failed, false), "  [✗] p/B.bin");

        let done = FileRecord {
            loading: false,
            new_code: "b".into(),
            ..FileRecord::pending("p/C.java", "c")
        };
        assert_eq!(record_label(&done, false), "  [✔] p/C.java");
    }

    #[test]
    fn test_render_diff() {
        let record = FileRecord {
            new_code: "class A { }\n".into(),
            ..FileRecord::pending("p/A.java", "class A {}\n")
        };
        let text = render_diff(&record);
        assert!(text.starts_with("--- p/A.java (+1 -1)\n"));
        assert!(text.contains("-class A {}\n"));
        assert!(text.contains("+class A { }\n"));
    }

    #[test]
    fn test_actions_blocked_without_selection() {
        let state = state_with(vec![FileRecord::pending("p/A.java", "a")]);
        assert!(MenuAction::Rethink.blocked_reason(&state).is_some());
        assert!(MenuAction::ShowDiff.blocked_reason(&state).is_some());
        assert!(MenuAction::ViewLog.blocked_reason(&state).is_some());
        assert_eq!(MenuAction::TestProject.blocked_reason(&state), None);
    }

    #[test]
    fn test_rethink_blocked_while_record_loading() {
        let mut state = state_with(vec![FileRecord::pending("p/A.java", "a")]);
        state.apply(SessionEvent::Selected("p/A.java".into()));
        assert_eq!(MenuAction::Rethink.blocked_reason(&state), Some("処理中のファイルです"));
        assert_eq!(MenuAction::ShowDiff.blocked_reason(&state), None);
    }

    #[test]
    fn test_view_log_enabled_after_logs_published() {
        let mut state = state_with(vec![FileRecord::pending("p/A.java", "a")]);
        let mut logs = LogBook::new();
        logs.append_section("p/A.java", "KUBECTL LOGS", "OK\n");
        state.apply(SessionEvent::LogsPublished(logs));
        assert_eq!(MenuAction::ViewLog.blocked_reason(&state), None);
        assert_eq!(MenuAction::ViewLog.label(&state), "ログを表示（1件）");
    }
}
