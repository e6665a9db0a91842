//! ファイル一覧コンポーネント

use codeshift_common::{FileRecord, SessionState};
use leptos::prelude::*;

/// 一覧に表示するレコードの状態
#[derive(Clone, Copy, PartialEq)]
pub enum RecordStatus {
    Waiting,
    Loading,
    Done,
    Error,
}

impl RecordStatus {
    pub fn of(record: &FileRecord) -> Self {
        if record.loading {
            RecordStatus::Loading
        } else if record.has_error() {
            RecordStatus::Error
        } else if record.new_code.is_empty() {
            RecordStatus::Waiting
        } else {
            RecordStatus::Done
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RecordStatus::Waiting => "waiting",
            RecordStatus::Loading => "loading",
            RecordStatus::Done => "done",
            RecordStatus::Error => "error",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RecordStatus::Waiting => "待機中",
            RecordStatus::Loading => "変換中",
            RecordStatus::Done => "完了",
            RecordStatus::Error => "エラー",
        }
    }
}

#[component]
pub fn FileList<F>(state: RwSignal<SessionState>, on_select: F) -> impl IntoView
where
    F: Fn(String) + 'static + Clone + Send + Sync,
{
    view! {
        <ul class="file-list">
            {move || {
                state.with(|s| {
                    s.records
                        .iter()
                        .map(|record| {
                            let status = RecordStatus::of(record);
                            let selected = s.selected.as_deref() == Some(record.file_name.as_str());
                            let name = record.file_name.clone();
                            let on_select = on_select.clone();
                            let error = (!record.error.is_empty()).then(|| record.error.clone());
                            view! {
                                <li
                                    class=format!(
                                        "file-item status-{}{}",
                                        status.as_str(),
                                        if selected { " selected" } else { "" },
                                    )
                                    on:click=move |_| on_select(name.clone())
                                >
                                    <span class="file-status">{status.label()}</span>
                                    <span class="file-name">{record.file_name.clone()}</span>
                                    {error.map(|e| view! { <span class="file-error">{e}</span> })}
                                </li>
                            }
                        })
                        .collect_view()
                })
            }}
        </ul>
    }
}
