//! 変換の進捗オーバーレイ

use codeshift_common::session::Progress;
use leptos::prelude::*;

#[component]
pub fn ProgressBar(progress: Signal<Progress>, label: &'static str) -> impl IntoView {
    view! {
        <div class="progress-container">
            <div class="progress-bar">
                <div
                    class="progress-fill"
                    style=move || format!("width: {:.1}%", progress.get().ratio() * 100.0)
                />
            </div>
            <p class="progress-text">
                {move || {
                    let p = progress.get();
                    format!("{} {}/{}", label, p.done, p.total)
                }}
            </p>
        </div>
    }
}
