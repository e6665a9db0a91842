//! 選択中ファイルの差分・編集ビュー

use codeshift_common::diff::{change_counts, line_diff};
use codeshift_common::SessionState;
use leptos::prelude::*;

#[component]
pub fn CodeDiff<F>(state: RwSignal<SessionState>, on_edit: F) -> impl IntoView
where
    F: Fn(String, String) + 'static + Clone + Send + Sync,
{
    // 選択が変わったときだけ作り直す（編集中のtextareaを保つ）
    let selected = Memo::new(move |_| state.with(|s| s.selected.clone()));

    view! {
        <div class="code-diff">
            {move || match selected.get() {
                None => view! { <p class="text-muted">"ファイルを選択してください"</p> }.into_any(),
                Some(name) => {
                    let record = {
                        let name = name.clone();
                        move || state.with(|s| s.record(&name).cloned().unwrap_or_default())
                    };
                    let header = record.clone();
                    let value = record.clone();
                    let loading = record.clone();
                    let old_code = record.clone();
                    let lines = record;
                    let on_edit = on_edit.clone();
                    view! {
                        <div class="diff-header">
                            {move || {
                                let r = header();
                                let (added, removed) = change_counts(&line_diff(&r.old_code, &r.new_code));
                                format!("{} (+{} -{})", r.file_name, added, removed)
                            }}
                        </div>
                        <div class="diff-columns">
                            <pre class="old-code">{move || old_code().old_code}</pre>
                            <textarea
                                class="new-code"
                                spellcheck="false"
                                prop:value=move || value().new_code
                                disabled=move || loading().loading
                                on:input=move |ev| on_edit(name.clone(), event_target_value(&ev))
                            />
                        </div>
                        <pre class="diff-lines">
                            {move || {
                                let r = lines();
                                line_diff(&r.old_code, &r.new_code)
                                    .into_iter()
                                    .map(|line| {
                                        view! {
                                            <div class=format!("diff-line diff-{}", line.kind.as_str())>
                                                {format!("{}{}", line.kind.marker(), line.text)}
                                            </div>
                                        }
                                    })
                                    .collect_view()
                            }}
                        </pre>
                    }
                    .into_any()
                }
            }}
        </div>
    }
}
