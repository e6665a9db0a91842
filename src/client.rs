//! HTTPバックエンド（reqwest）

use crate::config::Config;
use crate::error::{CodeshiftError, Result};
use codeshift_common::backend::{
    routes, CodeRequest, DeployResponse, DeploymentFiles, MultiFileInput, MultiFileRequest,
    MultiFileResponse, UnifiedRequest, UnifiedResponse, UnitTestResponse,
};
use codeshift_common::{Backend, BackendError, SubmissionBundle};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error};

pub struct HttpBackend {
    client: Client,
    ai_base_url: String,
    deploy_base_url: String,
    timeout_seconds: u64,
    deploy_timeout_seconds: u64,
}

impl HttpBackend {
    pub fn new(ai_base_url: impl Into<String>, deploy_base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .build()
            .map_err(|e| CodeshiftError::Http(e.to_string()))?;

        Ok(Self {
            client,
            ai_base_url: ai_base_url.into(),
            deploy_base_url: deploy_base_url.into(),
            timeout_seconds: 120,
            deploy_timeout_seconds: 600,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(config.ai_url(), config.deploy_url())?
            .with_timeout(config.timeout_seconds)
            .with_deploy_timeout(config.deploy_timeout_seconds))
    }

    /// 変換系APIのタイムアウト（秒）
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }

    /// クラスタ実行APIのタイムアウト（秒）
    pub fn with_deploy_timeout(mut self, seconds: u64) -> Self {
        self.deploy_timeout_seconds = seconds;
        self
    }

    async fn post<Req, Resp>(
        &self,
        base_url: &str,
        route: &str,
        body: &Req,
        timeout_seconds: u64,
    ) -> std::result::Result<Resp, BackendError>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", base_url.trim_end_matches('/'), route);
        debug!(url = %url, "POST");

        let response = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(timeout_seconds))
            .json(body)
            .send()
            .await
            .map_err(|e| transport_error(e, timeout_seconds))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response.text().await.unwrap_or_default();
            error!(status, url = %url, "API error: {}", text);
            return Err(BackendError::Http { status, body: text });
        }

        let text = response
            .text()
            .await
            .map_err(|e| transport_error(e, timeout_seconds))?;
        serde_json::from_str(&text).map_err(|e| BackendError::Decode(e.to_string()))
    }
}

fn transport_error(e: reqwest::Error, seconds: u64) -> BackendError {
    if e.is_timeout() {
        BackendError::Timeout { seconds }
    } else {
        BackendError::Network(e.to_string())
    }
}

impl Backend for HttpBackend {
    async fn unified_operation(&self, request_text: &str) -> std::result::Result<UnifiedResponse, BackendError> {
        self.post(
            &self.ai_base_url,
            routes::UNIFIED_OPERATION,
            &UnifiedRequest { code: request_text },
            self.timeout_seconds,
        )
        .await
    }

    async fn process_multi_files(
        &self,
        prompt: &str,
        files: &[MultiFileInput],
    ) -> std::result::Result<MultiFileResponse, BackendError> {
        self.post(
            &self.ai_base_url,
            routes::PROCESS_MULTI_FILES,
            &MultiFileRequest { prompt, files },
            self.timeout_seconds,
        )
        .await
    }

    async fn generate_unit_test(
        &self,
        file_name: &str,
        code: &str,
    ) -> std::result::Result<UnitTestResponse, BackendError> {
        self.post(
            &self.ai_base_url,
            routes::GENERATE_UNIT_TEST,
            &CodeRequest { file_name, code },
            self.timeout_seconds,
        )
        .await
    }

    async fn deployment_files(
        &self,
        file_name: &str,
        code: &str,
    ) -> std::result::Result<DeploymentFiles, BackendError> {
        self.post(
            &self.ai_base_url,
            routes::DEPLOYMENT_FILES,
            &CodeRequest { file_name, code },
            self.timeout_seconds,
        )
        .await
    }

    async fn deploy(&self, bundle: &SubmissionBundle) -> std::result::Result<DeployResponse, BackendError> {
        self.post(
            &self.deploy_base_url,
            routes::SUBMIT_FILES,
            bundle,
            self.deploy_timeout_seconds,
        )
        .await
    }
}
