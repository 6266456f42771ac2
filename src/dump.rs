//! One-shot dump of the raw snapshot to a file.

use std::path::Path;
use std::time::Duration;

use tracing::info;

use crate::error::Result;
use crate::source::{open_source, TelemetrySource};

/// Fetch one snapshot from `url` and write it to `path` as indented JSON.
///
/// Returns the number of top-level keys written. An existing file at
/// `path` is overwritten.
pub async fn dump(url: &str, timeout: Duration, path: &Path) -> Result<usize> {
    let source = open_source(url, timeout)?;
    dump_from(source.as_ref(), path).await
}

/// Same as [`dump`], for an already opened source.
pub async fn dump_from(source: &dyn TelemetrySource, path: &Path) -> Result<usize> {
    let snapshot = source.fetch().await?;
    let json = serde_json::to_string_pretty(&snapshot)?;
    tokio::fs::write(path, json).await?;

    info!(
        source = source.description(),
        path = %path.display(),
        keys = snapshot.len(),
        "snapshot dumped"
    );
    Ok(snapshot.len())
}
