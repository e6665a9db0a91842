//! ヘッダー（モードと読み込み件数を表示）

use codeshift_common::SessionState;
use leptos::prelude::*;

#[component]
pub fn Header(state: RwSignal<SessionState>) -> impl IntoView {
    view! {
        <header class="header">
            <h1>"Codeshift"</h1>
            <p class="header-summary">{move || state.with(summary)}</p>
        </header>
    }
}

fn summary(state: &SessionState) -> String {
    let mode = state.mode.label();
    let failed = state.records.iter().filter(|r| r.has_error()).count();
    match state.records.len() {
        0 => format!("モード: {}", mode),
        n if failed > 0 => format!("モード: {} ・ {}ファイル（エラー {}件）", mode, n, failed),
        n => format!("モード: {} ・ {}ファイル", mode, n),
    }
}
