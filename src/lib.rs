//! codeshift CLI
//!
//! フォルダを読み込み、AIバックエンドで変換し、デプロイ設定の生成と
//! クラスタでのテストまでをターミナルから行う。

pub mod cli;
pub mod client;
pub mod config;
pub mod console;
pub mod error;
pub mod export;
pub mod logging;
pub mod reporter;
pub mod scanner;
