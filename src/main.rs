use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use clap::Parser;
use tracing::Level;

use eureka_doctor::data::duration::parse_duration;
use eureka_doctor::{detect_painter, dump, Dashboard, DashboardConfig, Menu, Prompter, Reply};

#[derive(Parser, Debug)]
#[command(name = "eureka-doctor")]
#[command(about = "Live terminal dashboard for the /setup/eureka_info status endpoint")]
struct Args {
    /// Status endpoint URL (http://, https:// or file://)
    #[arg(short, long)]
    url: Option<String>,

    /// Refresh interval in seconds
    #[arg(short, long, value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Fetch timeout (e.g., "3s", "500ms")
    #[arg(short, long)]
    timeout: Option<String>,

    /// Config file (TOML, YAML or JSON) with url, interval, timeout, dump_path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Fetch once, write the raw JSON to this file and exit
    #[arg(short, long)]
    dump: Option<PathBuf>,

    /// Write logs to this file (nothing is logged otherwise)
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Log level used with --log-file
    #[arg(long, default_value = "info")]
    log_level: Level,
}

/// Reads menu replies from the terminal; Ctrl-C interrupts.
struct StdinPrompter;

#[async_trait]
impl Prompter for StdinPrompter {
    async fn next_reply(&mut self) -> io::Result<Reply> {
        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            let n = io::stdin().read_line(&mut line)?;
            Ok::<_, io::Error>((n, line))
        });

        tokio::select! {
            _ = ctrl_c() => Ok(Reply::Interrupted),
            joined = read => {
                let (n, line) = joined.map_err(io::Error::other)??;
                if n == 0 {
                    Ok(Reply::Eof)
                } else {
                    Ok(Reply::Line(line.trim().to_string()))
                }
            }
        }
    }

    async fn interrupted(&self) {
        ctrl_c().await
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    init_logging(args.log_file.as_deref(), args.log_level)?;

    let mut config = DashboardConfig::load(args.config.as_deref())?;
    if let Some(url) = args.url {
        config.url = url;
    }
    if let Some(secs) = args.interval {
        config.interval = Duration::from_secs(secs);
    }
    if let Some(ref timeout) = args.timeout {
        config.timeout = parse_duration(timeout).context("invalid --timeout")?;
    }
    config.validate()?;

    let dashboard = Dashboard::new(detect_painter());

    // Single control thread: the loop and the menu take turns on it.
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let result = match args.dump {
        Some(ref path) => rt.block_on(dump_once(&config, path)),
        None => {
            let mut menu = Menu::new(config);
            let mut stdout = io::stdout();
            rt.block_on(menu.run(&mut StdinPrompter, &mut stdout, &dashboard))
                .map_err(anyhow::Error::from)
        }
    };

    // A prompt interrupted by Ctrl-C leaves a blocking stdin read behind.
    rt.shutdown_background();
    result
}

fn init_logging(path: Option<&Path>, level: Level) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_max_level(level)
        .init();
    Ok(())
}

/// Non-interactive `--dump`.
async fn dump_once(config: &DashboardConfig, path: &Path) -> Result<()> {
    let count = dump(&config.url, config.timeout, path)
        .await
        .with_context(|| format!("dump from {} failed", config.url))?;
    println!("Wrote {} top-level keys to {}", count, path.display());
    Ok(())
}

/// Resolves on Ctrl-C. If the handler cannot be installed it never resolves,
/// rather than stopping the loop straight away.
async fn ctrl_c() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
