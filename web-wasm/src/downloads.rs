//! ブラウザのダウンロード（Blob + aタグ）

use codeshift_common::{Downloader, Error};
use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

pub struct BrowserDownloader;

impl Downloader for BrowserDownloader {
    fn download(&mut self, file_name: &str, content: &str) -> codeshift_common::Result<()> {
        trigger_download(file_name, content).map_err(|e| {
            Error::Io(std::io::Error::other(format!(
                "ダウンロード失敗: {}",
                e.as_string().unwrap_or_else(|| format!("{:?}", e))
            )))
        })
    }
}

fn trigger_download(file_name: &str, content: &str) -> Result<(), JsValue> {
    let parts = js_sys::Array::of1(&JsValue::from_str(content));
    let options = BlobPropertyBag::new();
    options.set_type("text/plain;charset=utf-8");
    let blob = Blob::new_with_str_sequence_and_options(&parts, &options)?;
    let url = Url::create_object_url_with_blob(&blob)?;

    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("document がありません"))?;
    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&url);
    anchor.set_download(file_name);
    anchor.click();

    Url::revoke_object_url(&url)?;
    crate::log::info(&format!("ダウンロード: {}", file_name));
    Ok(())
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_download_multibyte_text() {
        let mut downloader = BrowserDownloader;
        downloader
            .download("A_fixed.java", "// 日本語コメント\nclass A { }\n")
            .expect("ダウンロード失敗");
    }
}
