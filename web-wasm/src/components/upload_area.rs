//! フォルダアップロードコンポーネント

use codeshift_common::FileRecord;
use futures::future::join_all;
use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen::prelude::*;
use web_sys::{File, HtmlInputElement};

#[component]
pub fn UploadArea<F>(disabled: Signal<bool>, on_uploaded: F) -> impl IntoView
where
    F: Fn(Vec<FileRecord>) + 'static + Clone + Send + Sync,
{
    let (is_reading, set_is_reading) = signal(false);
    let input_ref = NodeRef::<leptos::html::Input>::new();

    // web-sys に setter がないので属性で付ける
    Effect::new(move |_| {
        if let Some(input) = input_ref.get() {
            let _ = input.set_attribute("webkitdirectory", "");
            let _ = input.set_attribute("directory", "");
        }
    });

    let on_change = move |ev: leptos::ev::Event| {
        let input: HtmlInputElement = event_target(&ev);
        let Some(list) = input.files() else {
            return;
        };
        let files: Vec<File> = (0..list.length()).filter_map(|i| list.get(i)).collect();
        // 同じフォルダを選び直せるようにする
        input.set_value("");
        if files.is_empty() {
            return;
        }

        set_is_reading.set(true);
        let on_uploaded = on_uploaded.clone();
        spawn_local(async move {
            let records = read_files(files).await;
            crate::log::info(&format!("{}件のファイルを読み込み", records.len()));
            set_is_reading.set(false);
            on_uploaded(records);
        });
    };

    let on_click = move |_| {
        if disabled.get_untracked() || is_reading.get_untracked() {
            return;
        }
        if let Some(input) = input_ref.get_untracked() {
            input.click();
        }
    };

    view! {
        <div
            class=move || {
                let mut classes = vec!["upload-area"];
                if disabled.get() || is_reading.get() {
                    classes.push("disabled");
                }
                classes.join(" ")
            }
            on:click=on_click
        >
            <input
                type="file"
                multiple=true
                style="display: none"
                node_ref=input_ref
                on:change=on_change
                on:click=|ev| ev.stop_propagation()
            />
            <Show
                when=move || is_reading.get()
                fallback=|| view! {
                    <div class="upload-icon">"📁"</div>
                    <p>"クリックしてフォルダを選択"</p>
                    <p class="text-muted">"フォルダ内のすべてのファイルを読み込みます"</p>
                }
            >
                <div class="upload-icon">"⏳"</div>
                <p>"読み込み中..."</p>
            </Show>
        </div>
    }
}

/// 全ファイルを読み込む（選択順を保つ）
///
/// 読めなかったファイルはエラー付きのレコードになる。
async fn read_files(files: Vec<File>) -> Vec<FileRecord> {
    let reads = files.into_iter().map(|file| async move {
        let name = relative_path(&file);
        let content = gloo::file::futures::read_as_text(&gloo::file::File::from(file)).await;
        if let Err(e) = &content {
            crate::log::error(&format!("読み込み失敗: {} ({})", name, e));
        }
        FileRecord::from_read(name, content)
    });
    join_all(reads).await
}

/// フォルダ名から始まる相対パス
fn relative_path(file: &File) -> String {
    js_sys::Reflect::get(file, &JsValue::from_str("webkitRelativePath"))
        .ok()
        .and_then(|v| v.as_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| file.name())
}
