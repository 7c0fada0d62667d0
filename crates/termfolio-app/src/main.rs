//! termfolio terminal entry point.
//!
//! A portfolio presented as a command-line session. Type `help` for the
//! command list; Tab and the arrow keys drive completion, Ctrl-C discards
//! the current line, Ctrl-D quits.

mod opener;

use std::fs::File;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use opener::SystemOpener;
use termfolio_backend_term::{TermBackend, restore_terminal};
use termfolio_core::TerminalSession;
use termfolio_core::backend::InputBackend;
use termfolio_core::config::TermfolioConfig;
use termfolio_core::skin::{FileThemeStore, MemoryThemeStore, ThemeStore, ThemeTable};
use termfolio_core::terminal::Portfolio;

/// Log file path. Without it only warnings reach stderr.
const LOG_FILE_ENV: &str = "TERMFOLIO_LOG_FILE";

/// Theme forced at start-up when no CLI argument is given.
const THEME_ENV: &str = "TERMFOLIO_THEME";

fn init_logging() -> Result<()> {
    match std::env::var_os(LOG_FILE_ENV) {
        Some(path) => {
            let file = File::create(&path)
                .with_context(|| format!("creating log file {}", path.to_string_lossy()))?;
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
                .target(env_logger::Target::Pipe(Box::new(file)))
                .init();
        },
        None => {
            env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
                .init();
        },
    }
    Ok(())
}

fn theme_store(config: &TermfolioConfig) -> Box<dyn ThemeStore> {
    match config.theme.store.clone().or_else(FileThemeStore::default_path) {
        Some(path) => {
            log::info!("Theme preference file: {}", path.display());
            Box::new(FileThemeStore::new(path))
        },
        None => {
            log::warn!("No config directory -- theme preference will not persist");
            Box::new(MemoryThemeStore::new())
        },
    }
}

fn main() -> Result<()> {
    init_logging()?;

    let config = TermfolioConfig::from_env().context("loading configuration")?;
    let portfolio = match &config.content.path {
        Some(path) => Portfolio::load(path)
            .with_context(|| format!("loading portfolio from {}", path.display()))?,
        None => Portfolio::builtin()?,
    };
    let themes = ThemeTable::builtin()?;
    let store = theme_store(&config);

    // Resolve theme from CLI arg or TERMFOLIO_THEME; the session falls back
    // to the stored preference, then the configured default.
    let explicit = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(THEME_ENV).ok());

    let frame_ms = config.terminal.frame_ms.max(1);
    let mut session = TerminalSession::new(
        config,
        portfolio,
        themes,
        store,
        Box::new(SystemOpener),
        explicit.as_deref(),
    );

    // Release profile aborts on panic, so put the terminal back first.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        restore_terminal();
        default_hook(info);
    }));

    let mut backend = TermBackend::new()?;
    let (width, height) = backend.size()?;
    session.resize(width, height);

    let mut last = Instant::now();
    while !session.should_quit() {
        for event in backend.poll_events(frame_ms)? {
            session.handle_event(event);
        }

        // Carry sub-millisecond remainders into the next frame.
        let dt = u32::try_from(last.elapsed().as_millis()).unwrap_or(u32::MAX);
        last += Duration::from_millis(u64::from(dt));
        session.tick(dt);

        let (width, height) = session.viewport();
        let screen = session.render(width, height);
        backend.draw(&screen, session.theme().tokens())?;
    }

    drop(backend);
    log::info!("termfolio shut down cleanly");
    Ok(())
}
