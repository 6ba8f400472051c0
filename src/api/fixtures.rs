// src/api/fixtures.rs
//! Page source backed by a local directory of `page{n}.json` files.
//!
//! Useful offline and in tests. A missing file is reported the same way a
//! 404 would be.

use crate::error::{AppError, FetchError};
use crate::model::PageResult;
use crate::types::{PageIndex, ValidationError};
use std::path::{Path, PathBuf};

/// Serves pages from `{dir}/page{n}.json`.
#[derive(Debug, Clone)]
pub struct FixtureDirectory {
    dir: PathBuf,
}

impl FixtureDirectory {
    /// Opens a fixture directory. The directory must exist.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, AppError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ValidationError::InvalidFilePath {
                path: dir.display().to_string(),
                reason: "not a directory".to_string(),
            }
            .into());
        }
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn page_path(&self, page_index: PageIndex) -> PathBuf {
        self.dir.join(page_index.file_name())
    }
}

#[async_trait::async_trait]
impl super::PageSource for FixtureDirectory {
    async fn fetch_page(&self, page_index: PageIndex) -> Result<PageResult, FetchError> {
        let path = self.page_path(page_index);
        log::debug!("READ {}", path.display());
        let body = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| FetchError::transport(page_index, format!("{}: {}", path.display(), e)))?;
        super::parser::parse_page_body(&body, page_index, &path.display().to_string())
    }

    fn describe(&self) -> String {
        self.dir.display().to_string()
    }
}
