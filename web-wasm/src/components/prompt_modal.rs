//! プロンプト入力モーダル

use codeshift_common::PromptDialog;
use leptos::prelude::*;

#[component]
pub fn PromptModal<FC, FX>(
    title: Signal<String>,
    open: Signal<bool>,
    on_confirm: FC,
    on_cancel: FX,
) -> impl IntoView
where
    FC: Fn(String) + 'static + Clone + Send + Sync,
    FX: Fn(()) + 'static + Clone + Send + Sync,
{
    let input = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let confirm = move |_| {
        let mut dialog = PromptDialog::new(title.get_untracked(), on_confirm.clone());
        dialog.open();
        // 空の入力ではコールバックは呼ばれず、モーダルは開いたまま
        match dialog.confirm(&input.get_untracked()) {
            Ok(()) => {
                error.set(None);
                input.set(String::new());
            }
            Err(e) => error.set(Some(e.to_string())),
        }
    };

    let cancel = move |_| {
        error.set(None);
        on_cancel(());
    };

    view! {
        <div class=move || if open.get() { "modal open" } else { "modal" }>
            <div class="modal-content">
                <h2>{move || title.get()}</h2>
                <textarea
                    class="prompt-input"
                    rows="6"
                    placeholder="変換の指示を入力..."
                    prop:value=move || input.get()
                    on:input=move |ev| input.set(event_target_value(&ev))
                />
                <p class="modal-error">{move || error.get().unwrap_or_default()}</p>
                <div class="modal-actions">
                    <button class="btn btn-secondary" on:click=cancel>"キャンセル"</button>
                    <button class="btn btn-primary" on:click=confirm>"確定"</button>
                </div>
            </div>
        </div>
    }
}
