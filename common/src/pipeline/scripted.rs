//! テスト用のスクリプト化バックエンド

use crate::backend::{
    Backend, BatchFileResult, ConversionResult, DeployResponse, DeploymentFiles, MultiFileInput,
    MultiFileResponse, SubmissionBundle, UnifiedResponse, UnitTestResponse,
};
use crate::error::BackendError;
use crate::naming::base_name;
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub(crate) enum Call {
    Unified(String),
    Batch(String, Vec<MultiFileInput>),
    UnitTest(String, String),
    DeploymentFiles(String, String),
    Deploy(SubmissionBundle),
}

/// 応答はファイル名（パスの最後の要素）ごとに登録する
#[derive(Default)]
pub(crate) struct ScriptedBackend {
    conversions: HashMap<String, Result<ConversionResult, BackendError>>,
    batch: Option<Result<Vec<BatchFileResult>, BackendError>>,
    unit_tests: HashMap<String, Result<String, BackendError>>,
    deployment_files: HashMap<String, Result<DeploymentFiles, BackendError>>,
    deploys: HashMap<String, Result<DeployResponse, BackendError>>,
    calls: RefCell<Vec<Call>>,
}

fn unscripted(what: &str) -> BackendError {
    BackendError::Http {
        status: 404,
        body: format!("no script for {}", what),
    }
}

impl ScriptedBackend {
    pub fn with_conversion(mut self, name: &str, outcome: Result<ConversionResult, BackendError>) -> Self {
        self.conversions.insert(name.to_string(), outcome);
        self
    }

    pub fn with_batch(mut self, outcome: Result<Vec<BatchFileResult>, BackendError>) -> Self {
        self.batch = Some(outcome);
        self
    }

    pub fn with_unit_test(mut self, name: &str, outcome: Result<String, BackendError>) -> Self {
        self.unit_tests.insert(name.to_string(), outcome);
        self
    }

    pub fn with_deployment_files(mut self, name: &str, outcome: Result<DeploymentFiles, BackendError>) -> Self {
        self.deployment_files.insert(name.to_string(), outcome);
        self
    }

    pub fn with_deploy(mut self, code_file: &str, outcome: Result<DeployResponse, BackendError>) -> Self {
        self.deploys.insert(code_file.to_string(), outcome);
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }

    pub fn unified_requests(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Unified(text) => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn batch_requests(&self) -> Vec<(String, Vec<MultiFileInput>)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Batch(prompt, files) => Some((prompt, files)),
                _ => None,
            })
            .collect()
    }

    pub fn unit_test_requests(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::UnitTest(name, code) => Some((name, code)),
                _ => None,
            })
            .collect()
    }

    pub fn deployment_requests(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::DeploymentFiles(name, code) => Some((name, code)),
                _ => None,
            })
            .collect()
    }

    pub fn bundles(&self) -> Vec<SubmissionBundle> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Deploy(bundle) => Some(bundle),
                _ => None,
            })
            .collect()
    }
}

impl Backend for ScriptedBackend {
    async fn unified_operation(&self, request_text: &str) -> Result<UnifiedResponse, BackendError> {
        self.calls.borrow_mut().push(Call::Unified(request_text.to_string()));
        let name = request_text
            .lines()
            .find_map(|l| l.strip_prefix("### File: "))
            .map(base_name)
            .unwrap_or_default();
        let result = self
            .conversions
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(unscripted(name)))?;
        Ok(UnifiedResponse { result: Some(result) })
    }

    async fn process_multi_files(
        &self,
        prompt: &str,
        files: &[MultiFileInput],
    ) -> Result<MultiFileResponse, BackendError> {
        self.calls
            .borrow_mut()
            .push(Call::Batch(prompt.to_string(), files.to_vec()));
        let files = self.batch.clone().unwrap_or_else(|| Err(unscripted("batch")))?;
        Ok(MultiFileResponse { files: Some(files) })
    }

    async fn generate_unit_test(&self, file_name: &str, code: &str) -> Result<UnitTestResponse, BackendError> {
        self.calls
            .borrow_mut()
            .push(Call::UnitTest(file_name.to_string(), code.to_string()));
        let unit_test = self
            .unit_tests
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| Err(unscripted(file_name)))?;
        Ok(UnitTestResponse { unit_test })
    }

    async fn deployment_files(&self, file_name: &str, code: &str) -> Result<DeploymentFiles, BackendError> {
        self.calls
            .borrow_mut()
            .push(Call::DeploymentFiles(file_name.to_string(), code.to_string()));
        self.deployment_files
            .get(file_name)
            .cloned()
            .unwrap_or_else(|| Err(unscripted(file_name)))
    }

    async fn deploy(&self, bundle: &SubmissionBundle) -> Result<DeployResponse, BackendError> {
        self.calls.borrow_mut().push(Call::Deploy(bundle.clone()));
        let name = bundle
            .code_files
            .first()
            .map(|f| f.filename.as_str())
            .unwrap_or_default();
        self.deploys
            .get(name)
            .cloned()
            .unwrap_or_else(|| Err(unscripted(name)))
    }
}
