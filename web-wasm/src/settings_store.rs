//! 接続先設定の保存（localStorage）

use gloo::storage::{LocalStorage, Storage};
use serde::{Deserialize, Serialize};

const STORAGE_KEY: &str = "codeshift.settings";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 変換・テスト生成・デプロイ設定生成API
    pub ai_base_url: String,
    /// クラスタ実行API
    pub deploy_base_url: String,
    pub timeout_seconds: u64,
    pub deploy_timeout_seconds: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ai_base_url: "/api".into(),
            deploy_base_url: "/deploy".into(),
            timeout_seconds: 120,
            deploy_timeout_seconds: 600,
        }
    }
}

/// 保存済みの設定（なければデフォルト）
pub fn load_settings() -> Settings {
    LocalStorage::get(STORAGE_KEY).unwrap_or_default()
}

pub fn save_settings(settings: &Settings) -> Result<(), String> {
    LocalStorage::set(STORAGE_KEY, settings).map_err(|e| format!("保存失敗: {}", e))
}

pub fn clear_settings() {
    LocalStorage::delete(STORAGE_KEY);
}
