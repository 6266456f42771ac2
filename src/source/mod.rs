//! Telemetry source abstraction (the fetcher).
//!
//! A source issues one request per call and hands back the decoded snapshot
//! or a classified [`Error`](crate::Error). Sources never retry; the live loop
//! retries by polling again after its interval.

mod file;
mod http;
mod snapshot;

pub use file::FileSource;
pub use http::HttpSource;
pub use snapshot::{field, parse_snapshot, TelemetrySnapshot};

use std::fmt::Debug;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;

use crate::error::{Error, Result};

/// Trait for fetching telemetry snapshots.
///
/// # Example
///
/// ```no_run
/// use std::time::Duration;
/// use eureka_doctor::{open_source, TelemetrySource};
///
/// # tokio_test::block_on(async {
/// let source = open_source(
///     "http://192.168.1.20:8008/setup/eureka_info?options=detail",
///     Duration::from_secs(3),
/// )?;
/// let snapshot = source.fetch().await?;
/// println!("{} top-level keys", snapshot.len());
/// # Ok::<_, eureka_doctor::Error>(())
/// # }).unwrap();
/// ```
#[async_trait]
pub trait TelemetrySource: Send + Sync + Debug {
    /// Fetch one fresh snapshot.
    async fn fetch(&self) -> Result<TelemetrySnapshot>;

    /// Human-readable description of where snapshots come from.
    fn description(&self) -> &str;
}

/// Open the source matching the URL scheme.
///
/// `file://` URLs read a JSON snapshot from disk on every fetch (handy for
/// replaying a dump); anything else goes over HTTP with the given timeout.
pub fn open_source(url: &str, timeout: Duration) -> Result<Box<dyn TelemetrySource>> {
    let parsed = Url::parse(url).map_err(|e| Error::Config(format!("invalid URL {url:?}: {e}")))?;

    if parsed.scheme() == "file" {
        let path = parsed
            .to_file_path()
            .map_err(|_| Error::Config(format!("invalid file URL {url:?}")))?;
        return Ok(Box::new(FileSource::new(path)));
    }

    Ok(Box::new(HttpSource::new(parsed, timeout)?))
}
