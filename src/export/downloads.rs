use codeshift_common::Downloader;
use std::path::{Path, PathBuf};
use tracing::info;

/// ダウンロードをディレクトリへのファイル保存で行う
pub struct DirDownloader {
    dir: PathBuf,
    saved: Vec<PathBuf>,
}

impl DirDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            saved: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// 保存したファイル（保存順）
    pub fn saved(&self) -> &[PathBuf] {
        &self.saved
    }
}

impl Downloader for DirDownloader {
    fn download(&mut self, file_name: &str, content: &str) -> codeshift_common::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        let path = self.dir.join(file_name);
        std::fs::write(&path, content)?;
        info!(path = %path.display(), "保存");
        self.saved.push(path);
        Ok(())
    }
}
