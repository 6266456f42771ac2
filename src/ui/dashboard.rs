//! The dashboard frame.
//!
//! Layout, top to bottom: a header bar as wide as the terminal, a blank line,
//! the rows in their sections separated by blank lines, and a legend.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::terminal::{self, Clear, ClearType};

use super::theme::{Painter, Tone};
use crate::data::DisplayRow;

/// Width of the `Label:` column.
pub const LABEL_WIDTH: usize = 18;
/// Header bar text.
pub const BANNER: &str = " Google-Speaker Info ";
/// Colour legend shown under the rows.
pub const LEGEND: &str = "Green = good · Yellow = meh · Red = bad/needs attention";
/// Width used when the terminal size cannot be queried.
pub const FALLBACK_WIDTH: usize = 80;

/// Renders classified rows through a [`Painter`].
#[derive(Debug)]
pub struct Dashboard {
    painter: Box<dyn Painter>,
}

impl Dashboard {
    pub fn new(painter: Box<dyn Painter>) -> Self {
        Self { painter }
    }

    /// Build the full frame text for a terminal `width` columns wide.
    pub fn frame(&self, rows: &[DisplayRow], width: usize) -> String {
        let mut out = String::new();

        let banner = format!("{BANNER:<width$}");
        out.push_str(&self.painter.paint(&banner, Tone::Banner));
        out.push_str("\n\n");

        let mut previous = None;
        for row in rows {
            if previous.is_some_and(|section| section != row.section) {
                out.push('\n');
            }
            previous = Some(row.section);

            out.push_str(&self.row_line(row));
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.painter.paint(LEGEND, Tone::Accent));
        out.push('\n');
        out
    }

    /// Format one row: padded label, a space, the value.
    pub fn row_line(&self, row: &DisplayRow) -> String {
        let label = format!("{:<LABEL_WIDTH$}", format!("{}:", row.label));
        format!(
            "{} {}",
            self.painter.paint(&label, Tone::Accent),
            self.painter.paint(&row.value, row.severity.into())
        )
    }

    /// A single error line, appended below whatever is on screen.
    pub fn error_line(&self, message: &str) -> String {
        self.painter.paint(&format!("Error: {message}"), Tone::Bad)
    }

    /// Paint arbitrary text (menu messages, warnings).
    pub fn paint(&self, text: &str, tone: Tone) -> String {
        self.painter.paint(text, tone)
    }

    /// Clear the screen and draw the frame at the current terminal width.
    pub fn draw<W: Write>(&self, out: &mut W, rows: &[DisplayRow]) -> io::Result<()> {
        let frame = self.frame(rows, terminal_width());
        queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;
        out.write_all(frame.as_bytes())?;
        out.flush()
    }
}

/// Current terminal width in columns.
pub fn terminal_width() -> usize {
    match terminal::size() {
        Ok((cols, _)) if cols > 0 => cols as usize,
        _ => FALLBACK_WIDTH,
    }
}
