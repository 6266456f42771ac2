//! Colour capability for the dashboard.
//!
//! Rendering goes through a [`Painter`]: [`StyledPainter`] wraps text in ANSI
//! styling, [`PlainPainter`] returns it untouched. One is picked at startup
//! and handed to the renderer, so layout code never branches on colour.

use std::fmt::Debug;
use std::io::IsTerminal;

use crossterm::style::{Color, ContentStyle, Stylize};

use crate::data::Severity;

/// Semantic colour role for a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Labels and the legend.
    Accent,
    /// The header bar.
    Banner,
    Good,
    Warn,
    Bad,
    /// No styling.
    Plain,
}

impl From<Severity> for Tone {
    fn from(severity: Severity) -> Self {
        match severity {
            Severity::Good => Tone::Good,
            Severity::Warn => Tone::Warn,
            Severity::Bad => Tone::Bad,
            Severity::Neutral => Tone::Plain,
        }
    }
}

/// Colour palette for styled output.
///
/// Use [`Theme::auto_detect()`] for automatic selection based on the
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Labels and legend.
    pub accent: Color,
    pub good: Color,
    pub warn: Color,
    pub bad: Color,
    /// Header bar foreground.
    pub banner_fg: Color,
    /// Header bar background.
    pub banner_bg: Color,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            accent: Color::Cyan,
            good: Color::Green,
            warn: Color::Yellow,
            bad: Color::Red,
            banner_fg: Color::White,
            banner_bg: Color::Magenta,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            accent: Color::Blue,
            good: Color::DarkGreen,
            warn: Color::DarkYellow,
            bad: Color::DarkRed,
            banner_fg: Color::White,
            banner_bg: Color::DarkMagenta,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get the style for a tone, `None` for [`Tone::Plain`].
    pub fn style(&self, tone: Tone) -> Option<ContentStyle> {
        let style = match tone {
            Tone::Accent => ContentStyle::new().with(self.accent),
            Tone::Banner => ContentStyle::new().with(self.banner_fg).on(self.banner_bg),
            Tone::Good => ContentStyle::new().with(self.good),
            Tone::Warn => ContentStyle::new().with(self.warn),
            Tone::Bad => ContentStyle::new().with(self.bad),
            Tone::Plain => return None,
        };
        Some(style.bold())
    }
}

/// Capability to decorate text for the terminal.
pub trait Painter: Debug + Send + Sync {
    /// Return `text` decorated for `tone`.
    ///
    /// Implementations must not change the visible characters.
    fn paint(&self, text: &str, tone: Tone) -> String;
}

/// Painter for terminals without colour: returns text unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainPainter;

impl Painter for PlainPainter {
    fn paint(&self, text: &str, _tone: Tone) -> String {
        text.to_string()
    }
}

/// Painter that emits ANSI styling from a [`Theme`].
#[derive(Debug, Clone)]
pub struct StyledPainter {
    theme: Theme,
}

impl StyledPainter {
    pub fn new(theme: Theme) -> Self {
        Self { theme }
    }

    pub fn theme(&self) -> &Theme {
        &self.theme
    }
}

impl Painter for StyledPainter {
    fn paint(&self, text: &str, tone: Tone) -> String {
        match self.theme.style(tone) {
            Some(style) => style.apply(text).to_string(),
            None => text.to_string(),
        }
    }
}

/// Pick the painter once at startup: styled on a terminal, plain otherwise.
pub fn detect_painter() -> Box<dyn Painter> {
    if std::io::stdout().is_terminal() {
        Box::new(StyledPainter::new(Theme::auto_detect()))
    } else {
        Box::new(PlainPainter)
    }
}
