//! Codeshift Common Library
//!
//! CLIとWeb(WASM)で共有される型・セッション状態・パイプライン

pub mod backend;
pub mod dialog;
pub mod diff;
pub mod encoding;
pub mod error;
pub mod logbook;
pub mod naming;
pub mod pipeline;
pub mod prompts;
pub mod session;
pub mod types;

pub use backend::{Backend, SubmissionBundle};
pub use dialog::{validate_prompt, PromptDialog};
pub use error::{BackendError, Error, Result};
pub use logbook::LogBook;
pub use pipeline::{convert_files, deploy_all, rethink, test_project, Downloader, RunSummary};
pub use session::{SessionEvent, SessionState};
pub use types::{FileRecord, ProcessingMode};
