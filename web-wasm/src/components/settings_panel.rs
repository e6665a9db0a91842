//! 接続先設定パネル

use crate::settings_store::{clear_settings, save_settings, Settings};
use leptos::prelude::*;

#[component]
pub fn SettingsPanel(settings: RwSignal<Settings>) -> impl IntoView {
    let (status, set_status) = signal(String::new());

    let on_save = move |_| match save_settings(&settings.get_untracked()) {
        Ok(()) => set_status.set("保存しました".into()),
        Err(e) => set_status.set(e),
    };

    let on_reset = move |_| {
        clear_settings();
        settings.set(Settings::default());
        set_status.set("初期設定に戻しました".into());
    };

    view! {
        <div class="settings-panel">
            <div class="settings-grid">
                <div class="form-group">
                    <label for="ai-url">"変換API"</label>
                    <input
                        type="text"
                        id="ai-url"
                        placeholder="/api"
                        prop:value=move || settings.with(|s| s.ai_base_url.clone())
                        on:input=move |ev| {
                            settings.update(|s| s.ai_base_url = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="deploy-url">"クラスタ実行API"</label>
                    <input
                        type="text"
                        id="deploy-url"
                        placeholder="/deploy"
                        prop:value=move || settings.with(|s| s.deploy_base_url.clone())
                        on:input=move |ev| {
                            settings.update(|s| s.deploy_base_url = event_target_value(&ev));
                        }
                    />
                </div>

                <div class="form-group">
                    <label for="timeout">"タイムアウト（秒）"</label>
                    <input
                        type="number"
                        id="timeout"
                        min="1"
                        prop:value=move || settings.with(|s| s.timeout_seconds.to_string())
                        on:change=move |ev| {
                            let value: u64 = event_target_value(&ev).parse().unwrap_or(120);
                            settings.update(|s| s.timeout_seconds = value.max(1));
                        }
                    />
                </div>

                <div class="form-group">
                    <div class="api-actions">
                        <button class="btn btn-primary btn-small" on:click=on_save>"保存"</button>
                        <button class="btn btn-tertiary btn-small" on:click=on_reset>"初期化"</button>
                    </div>
                    <div class="settings-status">{move || status.get()}</div>
                </div>
            </div>
        </div>
    }
}
