//! ブラウザコンソールへのログ

use wasm_bindgen::JsValue;
use web_sys::console;

pub fn info(message: &str) {
    console::log_1(&JsValue::from_str(message));
}

pub fn error(message: &str) {
    console::error_1(&JsValue::from_str(message));
}
