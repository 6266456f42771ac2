//! Terminal rendering of classified rows.
//!
//! ## Submodules
//!
//! - [`dashboard`]: Frame layout (header bar, sectioned rows, legend) and screen clearing
//! - [`theme`]: Colour capability ([`Painter`]) with styled/plain implementations and
//!   light/dark palette auto-detection
//!
//! ## Frame Layout
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │  Google-Speaker Info                 │  header bar, terminal width
//! ├──────────────────────────────────────┤
//! │ Timestamp / Name / Build / Uptime    │  identity + update
//! │                                      │
//! │ SSID / RSSI / IP / MAC               │  network
//! │                                      │
//! │ Locale / Country / Opt-ins           │  privacy + locale
//! ├──────────────────────────────────────┤
//! │ legend                               │
//! └──────────────────────────────────────┘
//! ```

pub mod dashboard;
pub mod theme;

pub use dashboard::{terminal_width, Dashboard, BANNER, LABEL_WIDTH, LEGEND};
pub use theme::{detect_painter, Painter, PlainPainter, StyledPainter, Theme, Tone};
