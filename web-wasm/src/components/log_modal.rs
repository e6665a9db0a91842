//! ログ表示モーダル

use codeshift_common::SessionState;
use leptos::prelude::*;

#[component]
pub fn LogModal<F>(state: RwSignal<SessionState>, file_name: Signal<Option<String>>, on_close: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    let text = move || {
        file_name
            .get()
            .and_then(|name| state.with(|s| s.logs.get(&name).map(String::from)))
            .unwrap_or_else(|| "ログはありません".to_string())
    };

    view! {
        <div class=move || if file_name.get().is_some() { "modal open" } else { "modal" }>
            <div class="modal-content log-modal">
                <h2>{move || format!("ログ: {}", file_name.get().unwrap_or_default())}</h2>
                <pre class="log-text">{text}</pre>
                <div class="modal-actions">
                    <button
                        class="btn btn-secondary"
                        on:click={
                            let on_close = on_close.clone();
                            move |_| on_close(())
                        }
                    >
                        "閉じる"
                    </button>
                </div>
            </div>
        </div>
    }
}
