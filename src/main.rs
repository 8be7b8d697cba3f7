//! # termfolio CLI Entry Point
//!
//! Starts the terminal shell for a personal site: a page area with a console
//! tray holding the scrollback log and the command prompt.
//!
//! ## Usage
//!
//! ```bash
//! # Start on the configured page
//! termfolio
//!
//! # Start on a specific page
//! termfolio --page /blog
//!
//! # Menu targets from a JSON payload
//! termfolio --menu-payload '[{"label": "Home", "path": "/"}]'
//!
//! # Print the effective configuration and exit
//! termfolio --print-config
//! ```
//!
//! ## Page Loads
//!
//! Navigation is a full context switch. When the orchestrator queues
//! [`HostEvent::Navigate`], the host disposes it, takes back the session store
//! and builds a fresh orchestrator for the destination page. Scrollback does
//! not survive the switch; the visited flag in the store does.
//!
//! ## Logging
//!
//! The TUI owns stdout, so logs go to a file (`--log-file`, or
//! `termfolio.log` in the platform data directory). `RUST_LOG` overrides the
//! level; `--debug` raises the default to `debug`.

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::fs::{self, OpenOptions};
use std::io;
use std::panic;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;
use termfolio::session::{MemorySessionStore, SessionStore};
use termfolio::ui::{
    self, Config, CrosstermEventSource, EventSource, HostEvent, Orchestrator, SelectableMenu,
    Theme,
};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

const POLL_TIMEOUT: Duration = Duration::from_millis(100);

/// termfolio - a terminal-style shell for browsing a personal site
#[derive(Parser, Debug)]
#[command(name = "termfolio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Browse a personal site from a terminal-style shell", long_about = None)]
struct Args {
    /// Page identifier to start on (overrides the config file)
    #[arg(long, value_name = "PATH")]
    page: Option<String>,

    /// Path to a site configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Menu targets as a JSON list of {"label", "path"} objects
    #[arg(long, value_name = "JSON")]
    menu_payload: Option<String>,

    /// Theme name (overrides the config file)
    #[arg(short, long)]
    theme: Option<String>,

    /// Where to write the log file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,

    /// Log at debug level
    #[arg(long)]
    debug: bool,

    /// Print the effective configuration as JSON and exit
    #[arg(long)]
    print_config: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Set up panic hook to ensure terminal is restored on panic
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let result = run_application(args);

    // Restore panic hook
    let _ = panic::take_hook();

    result
}

fn run_application(args: Args) -> Result<()> {
    let config = effective_config(&args)?;

    if args.print_config {
        let json =
            serde_json::to_string_pretty(&config).context("Failed to serialize config")?;
        println!("{json}");
        return Ok(());
    }

    let log_path = args.log_file.clone().unwrap_or_else(default_log_path);
    init_logging(&log_path, args.debug)?;
    info!(page = %config.page, theme = %config.theme, "starting termfolio");

    let theme = resolve_theme(&config.theme);

    // Setup terminal
    enable_raw_mode().context("Failed to enable raw mode for terminal")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to setup terminal")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut source = CrosstermEventSource;
    let result = run_site(
        &mut terminal,
        &mut source,
        &config,
        args.menu_payload.as_deref(),
        theme,
    );

    cleanup_terminal(&mut terminal)?;

    let last_page = result?;
    info!(page = %last_page, "exiting");
    Ok(())
}

/// Config file plus command-line overrides.
fn effective_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load(),
    };
    if let Some(page) = &args.page {
        config.page.clone_from(page);
    }
    if let Some(theme) = &args.theme {
        config.theme.clone_from(theme);
    }
    Ok(config)
}

fn resolve_theme(name: &str) -> &'static Theme {
    Theme::by_name(name).unwrap_or_else(|| {
        warn!(theme = name, "unknown theme, using default");
        Theme::default_theme()
    })
}

fn default_log_path() -> PathBuf {
    directories::ProjectDirs::from("", "", "termfolio")
        .map(|dirs| dirs.data_dir().join("termfolio.log"))
        .unwrap_or_else(|| PathBuf::from("termfolio.log"))
}

fn init_logging(path: &Path, debug: bool) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    let level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("termfolio={level}")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| anyhow!("Failed to initialize logging: {e}"))
}

/// Build and start the orchestrator for one page load.
fn load_page(
    page: &str,
    config: &Config,
    menu_payload: Option<&str>,
    store: Box<dyn SessionStore>,
    source: &mut dyn EventSource,
) -> Result<Orchestrator> {
    let mut orchestrator = Orchestrator::new(page, config, store)?;
    if let Some(payload) = menu_payload {
        orchestrator = orchestrator.with_menu(SelectableMenu::from_payload(
            payload,
            config.menu_heading.clone(),
        ));
    }
    orchestrator.initialize(source)?;
    Ok(orchestrator)
}

/// Run page loads until the user quits. Returns the last page shown.
fn run_site<B: Backend>(
    terminal: &mut Terminal<B>,
    source: &mut dyn EventSource,
    config: &Config,
    menu_payload: Option<&str>,
    theme: &Theme,
) -> Result<String> {
    let mut store: Box<dyn SessionStore> = Box::new(MemorySessionStore::new());
    let mut page = config.page.clone();

    loop {
        let mut orchestrator = load_page(&page, config, menu_payload, store, source)?;
        let next = run_page(terminal, &mut orchestrator, source, theme);
        store = orchestrator.into_store();

        match next? {
            Some(path) => {
                info!(from = %page, to = %path, "loading page");
                page = path;
            }
            None => return Ok(page),
        }
    }
}

/// Drive one orchestrator. Returns the next page, or `None` on quit.
fn run_page<B: Backend>(
    terminal: &mut Terminal<B>,
    orchestrator: &mut Orchestrator,
    source: &mut dyn EventSource,
    theme: &Theme,
) -> Result<Option<String>> {
    loop {
        terminal
            .draw(|f| ui::render(f, orchestrator, theme))
            .map_err(|e| anyhow!("Failed to draw terminal UI: {e}"))?;

        for event in orchestrator.drain_events() {
            match event {
                HostEvent::Navigate(path) => return Ok(Some(path)),
                HostEvent::ConsoleToggle { hidden } => debug!(hidden, "console visibility changed"),
            }
        }

        let Some(event) = source.read_event(POLL_TIMEOUT)? else {
            continue;
        };
        if is_quit(&event) {
            return Ok(None);
        }
        orchestrator.handle_event(&event);
    }
}

fn is_quit(event: &Event) -> bool {
    matches!(
        event,
        Event::Key(key)
            if key.kind == KeyEventKind::Press
                && key.code == KeyCode::Char('c')
                && key.modifiers.contains(KeyModifiers::CONTROL)
    )
}

/// Clean up terminal state
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode().context("Failed to disable raw mode")?;

    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to restore terminal")?;

    terminal.show_cursor().context("Failed to show cursor")?;

    Ok(())
}
