//! ターミナル表示つきのセッション
//!
//! パイプラインのイベントを `SessionState` に適用しながら、
//! 進捗バーと結果行を表示する。

use codeshift_common::{SessionEvent, SessionState};
use indicatif::{ProgressBar, ProgressStyle};

pub struct Reporter {
    pub state: SessionState,
    bar: Option<ProgressBar>,
    quiet: bool,
}

impl Reporter {
    pub fn new(state: SessionState) -> Self {
        Self {
            state,
            bar: None,
            quiet: false,
        }
    }

    /// 表示なし（テスト用）
    pub fn quiet(state: SessionState) -> Self {
        Self {
            state,
            bar: None,
            quiet: true,
        }
    }

    pub fn apply(&mut self, event: SessionEvent) {
        if !self.quiet {
            self.show(&event);
        }
        self.state.apply(event);
    }

    fn start_bar(&mut self, total: usize) {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(
            ProgressStyle::with_template("  {bar:40.cyan/blue} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("=>-"),
        );
        self.bar = Some(bar);
    }

    fn line(&self, text: &str) {
        match &self.bar {
            Some(bar) => bar.println(text),
            None => println!("{}", text),
        }
    }

    fn show(&mut self, event: &SessionEvent) {
        match event {
            SessionEvent::ConversionStarted { total } => self.start_bar(*total),
            SessionEvent::RethinkStarted { .. } => self.start_bar(1),
            SessionEvent::Converted { file_name, outcome } | SessionEvent::Rethought { file_name, outcome } => {
                match outcome {
                    Ok(_) => self.line(&format!("  ✔ {}", file_name)),
                    Err(message) => self.line(&format!("  ✗ {}: {}", file_name, message)),
                }
                if let Some(bar) = &self.bar {
                    bar.inc(1);
                    bar.set_message(file_name.clone());
                }
            }
            SessionEvent::BatchConverted(outcome) => {
                match outcome {
                    Ok(files) => self.line(&format!("  ✔ バッチ結果 {}件", files.len())),
                    Err(message) => self.line(&format!("  ✗ {}", message)),
                }
                if let Some(bar) = &self.bar {
                    bar.set_position(bar.length().unwrap_or(0));
                }
            }
            SessionEvent::UpdateFinished => {
                if let Some(bar) = self.bar.take() {
                    bar.finish_and_clear();
                }
            }
            SessionEvent::TestStarted => println!("  プロジェクトのテストを開始…"),
            SessionEvent::ProgressNoted(line) => self.line(&format!("  - {}", line)),
            SessionEvent::TestFinished => println!("  ✔ クラスタでのデプロイテスト完了"),
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use codeshift_common::FileRecord;

    #[test]
    fn test_quiet_reporter_applies_events() {
        let mut reporter = Reporter::quiet(SessionState::default());
        reporter.apply(SessionEvent::Uploaded(vec![FileRecord::pending("p/A.java", "a")]));
        reporter.apply(SessionEvent::Selected("p/A.java".into()));
        assert_eq!(reporter.state.selected.as_deref(), Some("p/A.java"));
    }
}
