//! デプロイ/テスト操作と進捗フィード

use codeshift_common::SessionState;
use leptos::prelude::*;

#[component]
pub fn TestPanel<FD, FT, FL>(
    state: RwSignal<SessionState>,
    on_deploy: FD,
    on_test: FT,
    on_view_log: FL,
) -> impl IntoView
where
    FD: Fn(()) + 'static + Clone + Send + Sync,
    FT: Fn(()) + 'static + Clone + Send + Sync,
    FL: Fn(String) + 'static + Clone + Send + Sync,
{
    // 選択中のファイルが処理中なら押せない
    let deploy_disabled = move || {
        state.with(|s| s.deploying || s.selected().map(|r| r.loading).unwrap_or(true))
    };
    let test_disabled = move || state.with(|s| s.testing || s.records.is_empty());

    view! {
        <div class="test-panel">
            <div class="action-buttons">
                <button
                    class="btn btn-secondary"
                    disabled=deploy_disabled
                    on:click={
                        let on_deploy = on_deploy.clone();
                        move |_| on_deploy(())
                    }
                >
                    {move || if state.with(|s| s.deploying) { "生成中..." } else { "デプロイ設定を生成" }}
                </button>
                <button
                    class="btn btn-primary"
                    disabled=test_disabled
                    on:click={
                        let on_test = on_test.clone();
                        move |_| on_test(())
                    }
                >
                    {move || if state.with(|s| s.testing) { "テスト中..." } else { "プロジェクトをテスト" }}
                </button>
            </div>

            <p class="test-status">{move || state.with(|s| s.test_status.to_string())}</p>

            <ul class="progress-feed">
                {move || {
                    state.with(|s| {
                        s.test_progress
                            .iter()
                            .map(|line| view! { <li>{line.clone()}</li> })
                            .collect_view()
                    })
                }}
            </ul>

            <div class="log-links">
                {move || {
                    state.with(|s| {
                        s.logs
                            .file_names()
                            .map(|name| {
                                let name = name.to_string();
                                let label = format!("📄 {}", name);
                                let on_view_log = on_view_log.clone();
                                view! {
                                    <button class="btn btn-tertiary btn-small" on:click=move |_| on_view_log(name.clone())>
                                        {label}
                                    </button>
                                }
                            })
                            .collect_view()
                    })
                }}
            </div>
        </div>
    }
}
