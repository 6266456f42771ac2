//! Interactive menu.
//!
//! The menu holds the authoritative [`DashboardConfig`]. Bad input produces
//! an [`InputError`] that is shown as a warning and leaves the configuration
//! untouched. [`Menu::run`] drives the numbered actions; where the replies
//! come from is up to the [`Prompter`] it is given.

use std::fmt::Write as _;
use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Url;
use thiserror::Error;
use tracing::info;

use crate::config::DashboardConfig;
use crate::dump::dump;
use crate::live::LiveLoop;
use crate::source::open_source;
use crate::ui::{Dashboard, Tone};

/// What a prompt produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A line of input, surrounding whitespace removed.
    Line(String),
    /// Input is closed.
    Eof,
    /// The user pressed Ctrl-C while the prompt was waiting.
    Interrupted,
}

/// Source of menu replies and of the user's interrupt.
#[async_trait]
pub trait Prompter: Send + Sync {
    /// Wait for the next reply. The prompt label has already been written.
    async fn next_reply(&mut self) -> io::Result<Reply>;

    /// Resolves when the user interrupts. Used to stop the live dashboard
    /// and to abandon a dump in progress.
    async fn interrupted(&self);
}

/// A numbered menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    StartLive,
    ChangeUrl,
    ChangeInterval,
    Dump,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 5] = [
        MenuChoice::StartLive,
        MenuChoice::ChangeUrl,
        MenuChoice::ChangeInterval,
        MenuChoice::Dump,
        MenuChoice::Exit,
    ];

    /// Number typed to pick this entry.
    pub fn key(&self) -> u8 {
        match self {
            MenuChoice::StartLive => 1,
            MenuChoice::ChangeUrl => 2,
            MenuChoice::ChangeInterval => 3,
            MenuChoice::Dump => 4,
            MenuChoice::Exit => 5,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::StartLive => "Start live dashboard",
            MenuChoice::ChangeUrl => "Change URL",
            MenuChoice::ChangeInterval => "Change interval",
            MenuChoice::Dump => "One-off JSON dump",
            MenuChoice::Exit => "Exit",
        }
    }
}

impl FromStr for MenuChoice {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        MenuChoice::ALL
            .into_iter()
            .find(|choice| s == choice.key().to_string())
            .ok_or(InputError::UnknownChoice)
    }
}

/// Rejected menu input. The display text is the warning shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Unknown selection - try again.")]
    UnknownChoice,
    #[error("Not a number, keeping previous interval.")]
    NotANumber,
    #[error("Interval must be at least 1 second, keeping previous interval.")]
    NotPositive,
    #[error("Invalid URL ({0}), keeping previous URL.")]
    InvalidUrl(String),
}

/// Menu state: the current configuration.
#[derive(Debug, Clone)]
pub struct Menu {
    config: DashboardConfig,
}

impl Menu {
    pub fn new(config: DashboardConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// The menu block printed before each prompt.
    pub fn header(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n── Google Speaker Info ─────────────");
        let _ = writeln!(out, "Current URL             : {}", self.config.url);
        let _ = writeln!(
            out,
            "Current refresh interval: {} s",
            self.config.interval_secs()
        );
        for choice in MenuChoice::ALL {
            let _ = writeln!(out, "{}) {}", choice.key(), choice.label());
        }
        out
    }

    /// Replace the URL. Blank input keeps the current one.
    ///
    /// Returns whether the URL changed.
    pub fn set_url(&mut self, input: &str) -> Result<bool, InputError> {
        let input = input.trim();
        if input.is_empty() {
            return Ok(false);
        }
        Url::parse(input).map_err(|e| InputError::InvalidUrl(e.to_string()))?;
        self.config.url = input.to_string();
        Ok(true)
    }

    /// Replace the refresh interval from user input (whole seconds).
    pub fn set_interval(&mut self, input: &str) -> Result<u64, InputError> {
        let secs: i64 = input.trim().parse().map_err(|_| InputError::NotANumber)?;
        if secs <= 0 {
            return Err(InputError::NotPositive);
        }
        let secs = secs as u64;
        self.config.interval = Duration::from_secs(secs);
        Ok(secs)
    }

    /// Destination for a dump: the input, or the configured default if blank.
    pub fn dump_path(&self, input: &str) -> PathBuf {
        let input = input.trim();
        if input.is_empty() {
            self.config.dump_path.clone()
        } else {
            PathBuf::from(input)
        }
    }

    /// Show the menu and run the chosen actions until Exit, end of input or
    /// an interrupt at a prompt.
    ///
    /// Failed actions are reported on `out` and the menu carries on. Only a
    /// failure to write to `out` or to read input is returned as an error.
    pub async fn run<P, W>(
        &mut self,
        input: &mut P,
        out: &mut W,
        dashboard: &Dashboard,
    ) -> crate::Result<()>
    where
        P: Prompter + ?Sized,
        W: Write,
    {
        loop {
            write!(out, "{}", self.header())?;

            let line = match ask(input, out, "Select > ").await? {
                Reply::Line(line) => line,
                Reply::Eof => {
                    writeln!(out, "\nBye!")?;
                    return Ok(());
                }
                Reply::Interrupted => return interrupted_exit(out),
            };

            let choice = match line.parse::<MenuChoice>() {
                Ok(choice) => choice,
                Err(e) => {
                    warn(out, dashboard, &e)?;
                    continue;
                }
            };

            match choice {
                MenuChoice::StartLive => self.start_live(input, out, dashboard).await?,
                MenuChoice::ChangeUrl => {
                    let line = match ask(input, out, "New URL > ").await? {
                        Reply::Line(line) => line,
                        Reply::Eof => continue,
                        Reply::Interrupted => return interrupted_exit(out),
                    };
                    match self.set_url(&line) {
                        Ok(true) => info!(url = %self.config.url, "url changed"),
                        Ok(false) => {}
                        Err(e) => warn(out, dashboard, &e)?,
                    }
                }
                MenuChoice::ChangeInterval => {
                    let line = match ask(input, out, "Interval (seconds) > ").await? {
                        Reply::Line(line) => line,
                        Reply::Eof => continue,
                        Reply::Interrupted => return interrupted_exit(out),
                    };
                    match self.set_interval(&line) {
                        Ok(secs) => info!(interval_secs = secs, "interval changed"),
                        Err(e) => warn(out, dashboard, &e)?,
                    }
                }
                MenuChoice::Dump => {
                    let label = format!(
                        "File to save (default {}) > ",
                        self.config.dump_path.display()
                    );
                    let line = match ask(input, out, &label).await? {
                        Reply::Line(line) => line,
                        Reply::Eof => continue,
                        Reply::Interrupted => return interrupted_exit(out),
                    };
                    let path = self.dump_path(&line);

                    let config = &self.config;
                    let outcome = tokio::select! {
                        biased;
                        _ = input.interrupted() => None,
                        result = dump(&config.url, config.timeout, &path) => Some(result),
                    };
                    match outcome {
                        None => return interrupted_exit(out),
                        Some(Ok(count)) => {
                            writeln!(out, "Wrote {} top-level keys to {}", count, path.display())?
                        }
                        Some(Err(e)) => {
                            let message = format!("Dump failed: {e}");
                            writeln!(out, "{}", dashboard.paint(&message, Tone::Bad))?
                        }
                    }
                }
                MenuChoice::Exit => {
                    writeln!(out, "Bye!")?;
                    return Ok(());
                }
            }
        }
    }

    /// Run the live dashboard until the user interrupts, then return to the
    /// menu.
    async fn start_live<P, W>(
        &self,
        input: &P,
        out: &mut W,
        dashboard: &Dashboard,
    ) -> crate::Result<()>
    where
        P: Prompter + ?Sized,
        W: Write,
    {
        let source = match open_source(&self.config.url, self.config.timeout) {
            Ok(source) => source,
            Err(e) => {
                writeln!(out, "{}", dashboard.error_line(&e.to_string()))?;
                return Ok(());
            }
        };

        let mut live = LiveLoop::new(source, self.config.interval, dashboard);
        let report = live.run(out, input.interrupted()).await?;

        writeln!(out, "\nInterrupted. Returning to menu...")?;
        info!(
            cycles = report.cycles,
            failures = report.failures,
            "live dashboard stopped"
        );
        Ok(())
    }
}

/// Write `label` and wait for the reply.
async fn ask<P, W>(input: &mut P, out: &mut W, label: &str) -> crate::Result<Reply>
where
    P: Prompter + ?Sized,
    W: Write,
{
    write!(out, "{label}")?;
    out.flush()?;
    Ok(input.next_reply().await?)
}

fn warn<W: Write>(out: &mut W, dashboard: &Dashboard, err: &InputError) -> io::Result<()> {
    writeln!(out, "{}", dashboard.paint(&err.to_string(), Tone::Warn))
}

fn interrupted_exit<W: Write>(out: &mut W) -> crate::Result<()> {
    writeln!(out, "\nInterrupted. Exiting.")?;
    Ok(())
}
