//! メインアプリケーションコンポーネント

use crate::api::FetchBackend;
use crate::components::{
    advice_panel::AdvicePanel, code_diff::CodeDiff, file_list::FileList, header::Header,
    log_modal::LogModal, mode_toggle::ModeToggle, progress_bar::ProgressBar,
    prompt_modal::PromptModal, settings_panel::SettingsPanel, test_panel::TestPanel,
    upload_area::UploadArea,
};
use crate::downloads::BrowserDownloader;
use crate::settings_store::load_settings;
use codeshift_common::{
    convert_files, deploy_all, rethink, test_project, FileRecord, ProcessingMode, SessionEvent,
    SessionState,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// どの操作のためにプロンプトを求めているか
#[derive(Clone, Copy, PartialEq)]
pub enum DialogKind {
    Convert,
    Rethink,
}

impl DialogKind {
    pub fn title(&self) -> &'static str {
        match self {
            DialogKind::Convert => "変換プロンプトを入力",
            DialogKind::Rethink => "AI Rethink プロンプトを入力",
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // アプリケーション状態
    let state = RwSignal::new(SessionState::new(ProcessingMode::default()));
    let settings = RwSignal::new(load_settings());
    let dialog = RwSignal::new(None::<DialogKind>);
    let log_file = RwSignal::new(None::<String>);

    let backend = move || FetchBackend::new(settings.get_untracked());
    let sink = move |ev: SessionEvent| state.update(|s| s.apply(ev));

    // アップロード完了 → プロンプト入力へ
    let on_uploaded = move |records: Vec<FileRecord>| {
        state.update(|s| s.apply(SessionEvent::Uploaded(records)));
        dialog.set(Some(DialogKind::Convert));
    };

    let on_prompt_confirm = move |prompt: String| {
        let Some(kind) = dialog.get_untracked() else {
            return;
        };
        dialog.set(None);

        match kind {
            DialogKind::Convert => {
                let (mode, records) = state.with_untracked(|s| (s.mode, s.records.clone()));
                let backend = backend();
                spawn_local(async move {
                    if let Err(e) = convert_files(&backend, mode, &records, &prompt, sink).await {
                        crate::log::error(&format!("変換を開始できません: {}", e));
                    }
                });
            }
            DialogKind::Rethink => match state.with_untracked(|s| s.selected_snapshot()) {
                Ok(record) => {
                    let backend = backend();
                    spawn_local(async move {
                        if let Err(e) = rethink(&backend, &record, &prompt, sink).await {
                            crate::log::error(&format!("AI Rethink を開始できません: {}", e));
                        }
                    });
                }
                Err(e) => crate::log::error(&e.to_string()),
            },
        }
    };

    let on_prompt_cancel = move |_: ()| dialog.set(None);

    let on_select = move |file_name: String| state.update(|s| s.apply(SessionEvent::Selected(file_name)));

    let on_edit = move |file_name: String, code: String| {
        state.update(|s| s.apply(SessionEvent::CodeEdited { file_name, code }));
    };

    let on_toggle_mode = move |_: ()| {
        state.update(|s| {
            let mode = s.mode.toggled();
            s.apply(SessionEvent::ModeChanged(mode));
        });
    };

    let on_rethink = move |_| {
        let ready = state.with_untracked(|s| s.selected().is_some_and(|r| !r.loading));
        if ready {
            dialog.set(Some(DialogKind::Rethink));
        }
    };

    // 押せるかどうかは選択中ファイルで決まるが、対象は全ファイル
    let on_deploy = move |_: ()| {
        let records = state.with_untracked(|s| s.records.clone());
        let backend = backend();
        spawn_local(async move {
            let mut downloader = BrowserDownloader;
            let summary = deploy_all(&backend, &mut downloader, &records, sink).await;
            crate::log::info(&format!("デプロイ: 送信 {}件 / 失敗 {}件", summary.submitted, summary.failed));
        });
    };

    let on_test = move |_: ()| {
        let records = state.with_untracked(|s| s.records.clone());
        let backend = backend();
        spawn_local(async move {
            let summary = test_project(&backend, &records, sink).await;
            crate::log::info(&format!("テスト: 送信 {}件 / 失敗 {}件", summary.submitted, summary.failed));
        });
    };

    let on_view_log = move |file_name: String| log_file.set(Some(file_name));
    let on_close_log = move |_: ()| log_file.set(None);

    let busy = Signal::derive(move || state.with(|s| s.is_busy()));
    let rethink_disabled = move || state.with(|s| s.updating || s.selected().map(|r| r.loading).unwrap_or(true));

    view! {
        <div class="container">
            <Header state=state />

            <SettingsPanel settings=settings />

            <ModeToggle
                mode=Signal::derive(move || state.with(|s| s.mode))
                disabled=busy
                on_toggle=on_toggle_mode
            />

            <UploadArea disabled=busy on_uploaded=on_uploaded />

            <Show
                when=move || state.with(|s| !s.records.is_empty())
                fallback=|| view! { <p class="text-muted">"変換するフォルダを選択してください"</p> }
            >
                <div class="workspace">
                    <FileList state=state on_select=on_select />
                    <div class="main-view">
                        <div class="selected-actions">
                            <button class="btn btn-secondary" disabled=rethink_disabled on:click=on_rethink>
                                "AI Rethink"
                            </button>
                        </div>
                        <CodeDiff state=state on_edit=on_edit />
                        <AdvicePanel state=state />
                    </div>
                </div>
                <TestPanel state=state on_deploy=on_deploy on_test=on_test on_view_log=on_view_log />
            </Show>

            <Show when=move || state.with(|s| s.updating)>
                <div class="overlay">
                    <ProgressBar progress=Signal::derive(move || state.with(|s| s.progress)) label="変換中" />
                </div>
            </Show>

            <PromptModal
                title=Signal::derive(move || dialog.get().map(|k| k.title()).unwrap_or_default().to_string())
                open=Signal::derive(move || dialog.get().is_some())
                on_confirm=on_prompt_confirm
                on_cancel=on_prompt_cancel
            />

            <LogModal state=state file_name=log_file.into() on_close=on_close_log />
        </div>
    }
}
