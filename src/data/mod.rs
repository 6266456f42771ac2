//! Classification of telemetry snapshots into display rows.
//!
//! This module turns a raw snapshot into the ordered, severity-annotated
//! rows the dashboard prints.
//!
//! ## Submodules
//!
//! - [`classify`]: Field mapping and severity banding ([`DisplayRow`], [`Severity`])
//! - [`duration`]: Parsing of duration strings (e.g., "3s", "500ms") and uptime formatting
//!
//! ## Data Flow
//!
//! ```text
//! TelemetrySnapshot (raw JSON object)
//!        │
//!        ▼
//! classify()
//!        │
//!        └──▶ Vec<DisplayRow> grouped by Section (identity, network, locale)
//! ```

pub mod classify;
pub mod duration;

pub use classify::{
    classify, classify_at, coerce_rssi, rssi_severity, DisplayRow, Section, Severity, PLACEHOLDER,
    RSSI_GOOD, RSSI_MISSING, RSSI_WARN,
};
