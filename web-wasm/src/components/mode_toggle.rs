//! 変換モード切替

use codeshift_common::ProcessingMode;
use leptos::prelude::*;

#[component]
pub fn ModeToggle<F>(mode: Signal<ProcessingMode>, disabled: Signal<bool>, on_toggle: F) -> impl IntoView
where
    F: Fn(()) + 'static + Clone + Send + Sync,
{
    view! {
        <div class="mode-toggle">
            <span class="mode-label">"処理モード:"</span>
            <button
                class=move || format!("btn btn-small mode-{}", mode.get().as_str())
                disabled=move || disabled.get()
                title="独立ファイル: ファイルごとに並列変換 / 関連ファイル: まとめて1回で変換"
                on:click={
                    let on_toggle = on_toggle.clone();
                    move |_| on_toggle(())
                }
            >
                {move || mode.get().label()}
            </button>
        </div>
    }
}
