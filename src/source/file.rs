//! File-based telemetry source.
//!
//! Reads a JSON snapshot from disk, typically one written by the dump action.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use super::{parse_snapshot, TelemetrySnapshot, TelemetrySource};
use crate::error::Result;

/// A source that re-reads a JSON file on every fetch.
///
/// Unlike a live appliance the file only changes when something rewrites it,
/// but the dashboard treats each read as a fresh snapshot all the same.
#[derive(Debug)]
pub struct FileSource {
    path: PathBuf,
    description: String,
}

impl FileSource {
    /// Create a new file source for the given path.
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let description = format!("file: {}", path.display());
        Self { path, description }
    }

    /// Returns the path being read.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TelemetrySource for FileSource {
    async fn fetch(&self) -> Result<TelemetrySnapshot> {
        let content = tokio::fs::read(&self.path).await?;
        parse_snapshot(&content)
    }

    fn description(&self) -> &str {
        &self.description
    }
}
