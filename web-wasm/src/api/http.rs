//! fetch によるバックエンド呼び出し
//!
//! タイムアウトは gloo のタイマーと競争させて判定する。

use crate::settings_store::Settings;
use codeshift_common::backend::{
    routes, CodeRequest, DeployResponse, DeploymentFiles, MultiFileInput, MultiFileRequest,
    MultiFileResponse, UnifiedRequest, UnifiedResponse, UnitTestResponse,
};
use codeshift_common::{Backend, BackendError, SubmissionBundle};
use futures::future::{select, Either};
use gloo::timers::future::TimeoutFuture;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

pub struct FetchBackend {
    settings: Settings,
}

impl FetchBackend {
    pub fn new(settings: Settings) -> Self {
        Self { settings }
    }

    async fn post<Req, Resp>(
        &self,
        base_url: &str,
        route: &str,
        body: &Req,
        timeout_seconds: u64,
    ) -> Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = join_url(base_url, route);
        let body = serde_json::to_string(body).map_err(|e| BackendError::Decode(e.to_string()))?;
        let request = build_request(&url, &body).map_err(js_error)?;

        let window = web_sys::window().ok_or_else(|| BackendError::Network("window がありません".into()))?;
        let fetch = Box::pin(JsFuture::from(window.fetch_with_request(&request)));
        let deadline = Box::pin(TimeoutFuture::new(timeout_millis(timeout_seconds)));

        let resp_value = match select(fetch, deadline).await {
            Either::Left((result, _)) => result.map_err(js_error)?,
            Either::Right(_) => {
                crate::log::error(&format!("タイムアウト: {}", url));
                return Err(BackendError::Timeout { seconds: timeout_seconds });
            }
        };
        let resp: Response = resp_value.dyn_into().map_err(js_error)?;

        let text = JsFuture::from(resp.text().map_err(js_error)?)
            .await
            .map_err(js_error)?
            .as_string()
            .unwrap_or_default();

        if !resp.ok() {
            crate::log::error(&format!("API error {}: {}", resp.status(), url));
            return Err(BackendError::Http {
                status: resp.status(),
                body: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

fn build_request(url: &str, body: &str) -> Result<Request, JsValue> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts)?;
    request.headers().set("Content-Type", "application/json")?;
    Ok(request)
}

fn js_error(value: JsValue) -> BackendError {
    BackendError::Network(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
}

fn join_url(base_url: &str, route: &str) -> String {
    format!("{}{}", base_url.trim().trim_end_matches('/'), route)
}

fn timeout_millis(seconds: u64) -> u32 {
    u32::try_from(seconds.saturating_mul(1000)).unwrap_or(u32::MAX)
}

impl Backend for FetchBackend {
    async fn unified_operation(&self, request_text: &str) -> Result<UnifiedResponse, BackendError> {
        self.post(
            &self.settings.ai_base_url,
            routes::UNIFIED_OPERATION,
            &UnifiedRequest { code: request_text },
            self.settings.timeout_seconds,
        )
        .await
    }

    async fn process_multi_files(
        &self,
        prompt: &str,
        files: &[MultiFileInput],
    ) -> Result<MultiFileResponse, BackendError> {
        self.post(
            &self.settings.ai_base_url,
            routes::PROCESS_MULTI_FILES,
            &MultiFileRequest { prompt, files },
            self.settings.timeout_seconds,
        )
        .await
    }

    async fn generate_unit_test(&self, file_name: &str, code: &str) -> Result<UnitTestResponse, BackendError> {
        self.post(
            &self.settings.ai_base_url,
            routes::GENERATE_UNIT_TEST,
            &CodeRequest { file_name, code },
            self.settings.timeout_seconds,
        )
        .await
    }

    async fn deployment_files(&self, file_name: &str, code: &str) -> Result<DeploymentFiles, BackendError> {
        self.post(
            &self.settings.ai_base_url,
            routes::DEPLOYMENT_FILES,
            &CodeRequest { file_name, code },
            self.settings.timeout_seconds,
        )
        .await
    }

    async fn deploy(&self, bundle: &SubmissionBundle) -> Result<DeployResponse, BackendError> {
        self.post(
            &self.settings.deploy_base_url,
            routes::SUBMIT_FILES,
            bundle,
            self.settings.deploy_timeout_seconds,
        )
        .await
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_build_request_posts_json() {
        let request = build_request("/api/unified_operation", r#"{"code":"x"}"#).expect("Request作成失敗");
        assert_eq!(request.method(), "POST");
        assert_eq!(
            request.headers().get("Content-Type").expect("ヘッダー取得失敗").as_deref(),
            Some("application/json")
        );
        assert!(request.url().ends_with("/api/unified_operation"));
    }

    #[wasm_bindgen_test]
    async fn wasm_unreachable_backend_is_network_error() {
        let backend = FetchBackend::new(Settings {
            ai_base_url: "http://127.0.0.1:9".into(),
            ..Settings::default()
        });
        let result = backend.unified_operation("### File: A.java").await;
        assert!(matches!(result, Err(BackendError::Network(_))));
    }
}
