//! # eureka-doctor
//!
//! A terminal dashboard for the `/setup/eureka_info` status endpoint exposed
//! by networked speakers and streaming devices.
//!
//! The crate polls the endpoint, turns each JSON snapshot into colour-coded
//! rows (network quality, update status, locale and privacy settings, uptime)
//! and redraws them on a fixed interval.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                            menu                              │
//! │          (DashboardConfig: url, interval, timeout)           │
//! │        │                                        │            │
//! │        ▼                                        ▼            │
//! │  ┌──────────┐   ┌──────────┐   ┌──────────┐   ┌──────────┐   │
//! │  │  source  │──▶│   data   │──▶│    ui    │   │   dump   │   │
//! │  │ (fetch)  │   │(classify)│   │ (render) │   │ (file)   │   │
//! │  └──────────┘   └──────────┘   └──────────┘   └──────────┘   │
//! │        ▲              live (poll / sleep loop)               │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`source`]**: [`TelemetrySource`] trait with HTTP and file implementations
//! - **[`data`]**: Field classification into [`DisplayRow`]s with a [`Severity`]
//! - **[`ui`]**: Frame layout and the colour capability ([`Painter`])
//! - **[`live`]**: The poll-render-sleep loop with cooperative cancellation
//! - **[`dump`]**: One-shot snapshot dump to a JSON file
//! - **[`menu`]** / **[`config`]**: Session configuration and menu input handling
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Interactive menu against the default endpoint
//! eureka-doctor
//!
//! # Point at another speaker and refresh every 10 seconds
//! eureka-doctor --url "http://192.168.1.20:8008/setup/eureka_info?options=detail" --interval 10
//!
//! # Write the raw JSON once and exit
//! eureka-doctor --dump eureka.json
//! ```
//!
//! ### As a library
//!
//! ```
//! use eureka_doctor::{classify, Dashboard, PlainPainter, Severity};
//!
//! let snapshot = serde_json::json!({"name": "Kitchen", "signal_level": -50});
//! let rows = classify(snapshot.as_object().unwrap());
//!
//! let wifi = rows.iter().find(|r| r.label == "Wi-Fi RSSI").unwrap();
//! assert_eq!(wifi.severity, Severity::Good);
//!
//! let dashboard = Dashboard::new(Box::new(PlainPainter));
//! print!("{}", dashboard.frame(&rows, 80));
//! ```

pub mod config;
pub mod data;
pub mod dump;
pub mod error;
pub mod live;
pub mod menu;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use config::DashboardConfig;
pub use data::{classify, classify_at, DisplayRow, Section, Severity};
pub use dump::{dump, dump_from};
pub use error::{Error, ErrorKind, Result};
pub use live::{LiveLoop, LoopReport, LoopState};
pub use menu::{InputError, Menu, MenuChoice, Prompter, Reply};
pub use source::{open_source, FileSource, HttpSource, TelemetrySnapshot, TelemetrySource};
pub use ui::{detect_painter, Dashboard, Painter, PlainPainter, StyledPainter, Theme, Tone};
