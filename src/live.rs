//! The live dashboard loop.
//!
//! ```text
//! Idle ──▶ Fetching ──ok──▶ Rendering ──▶ Sleeping ──▶ Fetching ──▶ …
//!              │                              ▲
//!              └──err (one error line)────────┘
//!
//! cancellation from any state ──▶ Stopped
//! ```
//!
//! There is no backoff and no retry limit: a failed fetch is reported once
//! and the next attempt happens after the regular interval. Cancellation is
//! checked at the two suspension points (the fetch and the sleep).

use std::future::Future;
use std::io::{self, Write};
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::data::classify;
use crate::source::TelemetrySource;
use crate::ui::Dashboard;

/// Where the loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    Idle,
    Fetching,
    Rendering,
    Sleeping,
    Stopped,
}

/// Counters for one run of the loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoopReport {
    /// Completed fetch attempts.
    pub cycles: u64,
    /// Attempts that ended in an error.
    pub failures: u64,
}

/// Poll → classify → render, on a fixed interval, until cancelled.
#[derive(Debug)]
pub struct LiveLoop<'a> {
    source: Box<dyn TelemetrySource>,
    interval: Duration,
    dashboard: &'a Dashboard,
    state: LoopState,
}

impl<'a> LiveLoop<'a> {
    pub fn new(
        source: Box<dyn TelemetrySource>,
        interval: Duration,
        dashboard: &'a Dashboard,
    ) -> Self {
        Self {
            source,
            interval,
            dashboard,
            state: LoopState::Idle,
        }
    }

    pub fn state(&self) -> LoopState {
        self.state
    }

    /// Run until `cancel` resolves.
    ///
    /// Fetch errors never end the loop; only cancellation or a failure to
    /// write to `out` does. The loop can be run again after it stops.
    pub async fn run<W, F>(&mut self, out: &mut W, cancel: F) -> io::Result<LoopReport>
    where
        W: Write,
        F: Future<Output = ()>,
    {
        tokio::pin!(cancel);
        let mut report = LoopReport::default();

        loop {
            self.transition(LoopState::Fetching);
            let fetched = tokio::select! {
                biased;
                _ = &mut cancel => break,
                result = self.source.fetch() => result,
            };
            report.cycles += 1;

            match fetched {
                Ok(snapshot) => {
                    self.transition(LoopState::Rendering);
                    let rows = classify(&snapshot);
                    self.dashboard.draw(out, &rows)?;
                    info!(
                        source = self.source.description(),
                        keys = snapshot.len(),
                        "snapshot rendered"
                    );
                }
                Err(e) => {
                    report.failures += 1;
                    warn!(source = self.source.description(), error = %e, "fetch failed");
                    writeln!(out, "{}", self.dashboard.error_line(&e.to_string()))?;
                    out.flush()?;
                }
            }

            self.transition(LoopState::Sleeping);
            tokio::select! {
                biased;
                _ = &mut cancel => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        self.transition(LoopState::Stopped);
        Ok(report)
    }

    fn transition(&mut self, next: LoopState) {
        debug!(from = ?self.state, to = ?next, "live loop transition");
        self.state = next;
    }
}
