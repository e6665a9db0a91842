//! バックエンドAPI（fetch）

pub mod http;

pub use http::FetchBackend;
