//! プロンプト入力ダイアログ
//!
//! 描画方法に依存しない確認/キャンセルの抽象。
//! 確定時のコールバックは空の入力では呼ばれない。

use crate::error::{Error, Result};

/// 空白だけの入力を拒否する
pub fn validate_prompt(input: &str) -> Result<&str> {
    if input.trim().is_empty() {
        return Err(Error::EmptyPrompt);
    }
    Ok(input)
}

/// ダイアログの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DialogState {
    #[default]
    Closed,
    Open,
}

pub struct PromptDialog<F> {
    title: String,
    state: DialogState,
    on_confirm: F,
}

impl<F, T> PromptDialog<F>
where
    F: FnMut(String) -> T,
{
    pub fn new(title: impl Into<String>, on_confirm: F) -> Self {
        Self {
            title: title.into(),
            state: DialogState::Closed,
            on_confirm,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_open(&self) -> bool {
        self.state == DialogState::Open
    }

    pub fn open(&mut self) {
        self.state = DialogState::Open;
    }

    /// 入力を確定する
    ///
    /// 空の入力はエラーを返し、ダイアログは開いたまま。
    /// 有効な入力ならダイアログを閉じてコールバックの戻り値を返す。
    pub fn confirm(&mut self, input: &str) -> Result<T> {
        let prompt = validate_prompt(input)?;
        self.state = DialogState::Closed;
        Ok((self.on_confirm)(prompt.to_string()))
    }

    pub fn cancel(&mut self) {
        self.state = DialogState::Closed;
    }
}
