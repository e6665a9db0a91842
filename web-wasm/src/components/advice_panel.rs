//! 提案（Markdown）表示

use crate::markdown;
use codeshift_common::SessionState;
use leptos::prelude::*;

#[component]
pub fn AdvicePanel(state: RwSignal<SessionState>) -> impl IntoView {
    view! {
        <div class="advice-panel">
            <h3>"AIからの提案"</h3>
            <div
                class="advice-body"
                inner_html=move || state.with(|s| markdown::to_html(s.selected_advice()))
            />
        </div>
    }
}
