//! Busboard CLI - terminal display for a live bus-stop feed.
//!
//! This is the binary entry point. See the `busboard` library for the
//! core functionality.

use anyhow::Result;
use busboard::{tui, Config, FeedClient};
use mimalloc::MiMalloc;

/// Global allocator configured per M-MIMALLOC-APPS guideline.
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};

// CLI
#[derive(Parser, Debug)]
#[command(name = "busboard")]
#[command(version)]
#[command(about = "Live arrivals board for one bus stop, fed over WebSocket")]
struct Cli {
    /// Feed server base URL (overrides BUSBOARD_SERVER_URL).
    #[arg(long)]
    server: Option<String>,

    /// Run without a TUI, logging applied snapshots instead.
    #[arg(long)]
    headless: bool,
}

/// Runs the feed client without a terminal UI.
///
/// Useful for integration testing and for environments without a
/// terminal; the feed/reconcile loop is identical to TUI mode.
fn run_headless(config: &Config) -> Result<()> {
    println!(
        "Starting busboard v{} in headless mode...",
        env!("CARGO_PKG_VERSION")
    );

    let client = FeedClient::new(&config.server_url);
    log::info!("busboard headless, feed endpoint {}", client.url());

    let runtime = tokio::runtime::Runtime::new()?;
    // The subscription loop never returns; the process ends via signal.
    runtime.block_on(client.run());
    Ok(())
}

/// Runs the TUI: feed client on the tokio runtime, draw loop on the main
/// thread.
fn run_tui(config: &Config) -> Result<()> {
    let client = FeedClient::new(&config.server_url);
    let watch = client.watch();

    // Start the feed BEFORE entering raw mode so early errors are visible
    println!("Connecting to {}...", client.url());
    let runtime = tokio::runtime::Runtime::new()?;
    let feed_task = runtime.spawn(async move { client.run().await });

    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = tui::TerminalGuard::new();

    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;

    log::info!("busboard v{} started", env!("CARGO_PKG_VERSION"));

    let mut runner = tui::TuiRunner::new(terminal, watch, config.server_url.clone());
    let result = runner.run();

    feed_task.abort();
    result
}

fn main() -> Result<()> {
    // Set up file logging so the TUI doesn't interfere with log output
    let log_path = std::env::var("BUSBOARD_LOG_FILE")
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|_| std::path::PathBuf::from("/tmp/busboard.log"));
    let log_file = std::fs::File::create(&log_path)
        .unwrap_or_else(|_| panic!("Failed to create log file at {:?}", log_path));
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .format_timestamp_secs()
        .init();

    // Set up panic hook to log panics and ensure terminal cleanup
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        log::error!("PANIC: {:?}", panic_info);

        let _ = disable_raw_mode();
        let _ = execute!(
            std::io::stdout(),
            LeaveAlternateScreen,
            crossterm::cursor::Show
        );

        default_hook(panic_info);
    }));

    let cli = Cli::parse();
    let config = Config::resolve(cli.server);
    log::info!(
        "config: {}",
        serde_json::to_string(&config).unwrap_or_default()
    );

    if cli.headless {
        run_headless(&config)
    } else {
        run_tui(&config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_server_flag() {
        let cli = Cli::parse_from(["busboard", "--server", "http://example.com:9000"]);
        assert_eq!(cli.server.as_deref(), Some("http://example.com:9000"));
        assert!(!cli.headless);
    }

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["busboard"]);
        assert!(cli.server.is_none());
        assert!(!cli.headless);
    }

    #[test]
    fn test_cli_headless_flag() {
        let cli = Cli::parse_from(["busboard", "--headless"]);
        assert!(cli.headless);
    }
}
