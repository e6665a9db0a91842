use crate::error::{CodeshiftError, Result};
use codeshift_common::ProcessingMode;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const AI_URL_ENV: &str = "CODESHIFT_AI_URL";
pub const DEPLOY_URL_ENV: &str = "CODESHIFT_DEPLOY_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 変換・テスト生成・デプロイ設定生成API
    pub ai_base_url: String,
    /// クラスタ実行API
    pub deploy_base_url: String,
    pub timeout_seconds: u64,
    /// クラスタ実行は時間がかかるので別に持つ
    pub deploy_timeout_seconds: u64,
    pub default_mode: ProcessingMode,
    pub output_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ai_base_url: "http://localhost:8000".into(),
            deploy_base_url: "http://localhost:8001".into(),
            timeout_seconds: 120,
            deploy_timeout_seconds: 600,
            default_mode: ProcessingMode::Single,
            output_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CodeshiftError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("codeshift").join("config.json"))
    }

    pub fn ai_url(&self) -> String {
        // 環境変数を優先
        env_or(AI_URL_ENV, &self.ai_base_url)
    }

    pub fn deploy_url(&self) -> String {
        env_or(DEPLOY_URL_ENV, &self.deploy_base_url)
    }

    pub fn set_ai_url(&mut self, url: String) -> Result<()> {
        self.ai_base_url = validate_url(url)?;
        self.save()
    }

    pub fn set_deploy_url(&mut self, url: String) -> Result<()> {
        self.deploy_base_url = validate_url(url)?;
        self.save()
    }

    pub fn set_timeout(&mut self, seconds: u64) -> Result<()> {
        if seconds == 0 {
            return Err(CodeshiftError::Config("タイムアウトは1秒以上にしてください".into()));
        }
        self.timeout_seconds = seconds;
        self.save()
    }
}

fn env_or(key: &str, fallback: &str) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value.trim().trim_end_matches('/').to_string(),
        _ => fallback.trim_end_matches('/').to_string(),
    }
}

fn validate_url(url: String) -> Result<String> {
    let trimmed = url.trim().trim_end_matches('/');
    if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        Ok(trimmed.to_string())
    } else {
        Err(CodeshiftError::Config(format!(
            "URLは http:// または https:// で始めてください: {}",
            url
        )))
    }
}
