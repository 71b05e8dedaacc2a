use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use ratatui::Terminal;
use ratatui::crossterm::event;
use ratatui::crossterm::event::{DisableMouseCapture, EnableMouseCapture};
use ratatui::crossterm::execute;
use ratatui::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::prelude::CrosstermBackend;
use tokio::sync::mpsc;

use readable_core::config_file::{self, Settings};
use readable_core::{ColorScheme, HttpPaperSource, PaperId, PaperSource, SelectionProvider};

mod action;
mod app;
mod backend;
mod input;
mod logging;
mod theme;
mod tui_event;
mod view;

use app::App;

/// Readable Research: read academic papers in the terminal.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Paper id to open right away (otherwise the start screen is shown)
    paper_id: Option<String>,

    /// Base URL of the paper service (default: http://localhost:8001)
    #[arg(long)]
    base_url: Option<String>,

    /// Color theme: light, dark or stars
    #[arg(long)]
    theme: Option<ColorScheme>,

    /// Config file to use instead of the platform/CWD cascade
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory for log files
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Log level (overridden by RUST_LOG)
    #[arg(long)]
    log_level: Option<String>,
}

fn resolve_settings(args: &Args) -> anyhow::Result<Settings> {
    let file = match &args.config {
        Some(path) => config_file::load_from_path(path)?,
        None => config_file::load_config(),
    };
    let mut settings = Settings::from_config(&file)?;

    // Precedence: CLI flag > env var > config file
    let env_url = std::env::var("READABLE_BASE_URL").ok();
    let base_url = args.base_url.clone().or(env_url);
    if let Some(url) = base_url.as_deref().filter(|u| !u.trim().is_empty()) {
        settings.base_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(theme) = args.theme {
        settings.color_scheme = theme;
    }
    if let Some(dir) = &args.log_dir {
        settings.log_dir = Some(dir.clone());
    }
    if let Some(level) = &args.log_level {
        settings.log_level = level.clone();
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let args = Args::parse();
    let settings = resolve_settings(&args)?;

    let log_dir = settings
        .log_dir
        .clone()
        .unwrap_or_else(logging::default_log_dir);
    let _log_guard = logging::init_logging(&settings.log_level, &log_dir)?;
    tracing::info!(base_url = %settings.base_url, theme = %settings.color_scheme, "starting");

    let source: Arc<dyn PaperSource> = Arc::new(
        HttpPaperSource::new(&settings.base_url).with_timeout(settings.request_timeout),
    );

    let initial = args.paper_id.as_deref().and_then(PaperId::new);
    let provider = SelectionProvider::with_initial(initial);

    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel();
    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let backend_handle = tokio::spawn(backend::run_backend(source, cmd_rx, event_tx));
    let _ = cmd_tx.send(tui_event::BackendCommand::CheckHealth);

    let mut app = App::new(provider.handle(), &settings).with_backend(cmd_tx);
    app.mount();

    // Initialize terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;

    // Install panic hook that restores terminal before printing panic
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture);
        original_hook(panic_info);
    }));

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    // Drain any stray input events (e.g. Enter keypress from launching the command)
    while event::poll(Duration::from_millis(50)).unwrap_or(false) {
        let _ = event::read();
    }

    let tick_rate = Duration::from_millis(1000 / u64::from(settings.fps.max(1)));
    let mut last_tick = Instant::now();
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        terminal.draw(|f| app.view(f))?;

        let timeout = tick_rate.saturating_sub(last_tick.elapsed());

        tokio::select! {
            Some(backend_event) = event_rx.recv() => {
                app.handle_backend_event(backend_event);
                while let Ok(evt) = event_rx.try_recv() {
                    app.handle_backend_event(evt);
                }
            }
            _ = &mut ctrl_c => {
                app.should_quit = true;
            }
            _ = async {
                if event::poll(timeout).unwrap_or(false)
                    && let Ok(evt) = event::read()
                {
                    let action = input::map_event(&evt, &app.input_mode);
                    app.update(action);
                }
            } => {}
        }

        app.poll_selection();
        if last_tick.elapsed() >= tick_rate {
            app.update(action::Action::Tick);
            last_tick = Instant::now();
        }

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    drop(app);
    drop(provider);
    let _ = backend_handle.await;
    tracing::info!("exiting");

    Ok(())
}
