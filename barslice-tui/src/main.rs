//! barslice TUI: pick a CSV from the data folder, extract a random
//! window of bars and read the close that follows it.

use std::io::{self, stdout};
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tracing::info;

use barslice_core::{ExtractionSeeds, Session, Settings, SETTINGS_FILE};
use barslice_tui::app::{AppState, Overlay};
use barslice_tui::clipboard::SystemClipboard;
use barslice_tui::{input, logging, persistence, ui};

#[derive(Parser)]
#[command(name = "barslice-tui", about = "Extract random bar windows and look up the next close")]
struct Args {
    /// Settings file (TOML).
    #[arg(long, default_value = SETTINGS_FILE)]
    config: PathBuf,

    /// Override the data directory from the settings file.
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Master seed for reproducible extractions.
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = Settings::load_or_default(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(dir) = args.data_dir {
        settings.data_dir = dir;
    }
    if args.seed.is_some() {
        settings.seed = args.seed;
    }

    // Paths
    let state_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("barslice");
    let state_path = state_dir.join("state.json");

    logging::init(&state_dir, &settings.log_level)?;

    // Install a panic hook that restores the terminal before printing the panic.
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        default_hook(info);
    }));

    let seeds = match settings.seed {
        Some(seed) => ExtractionSeeds::new(seed),
        None => ExtractionSeeds::from_entropy(),
    };
    info!(
        data_dir = %settings.data_dir.display(),
        seed = seeds.master_seed(),
        "starting barslice-tui"
    );

    // Build app state
    let session = Session::new(settings.data_dir.clone(), seeds);
    let mut app = AppState::new(session, &settings, Box::new(SystemClipboard::default()));
    app.ensure_data_dir();
    app.refresh_files();

    // Persisted UI state wins over the settings file; none means first run.
    match persistence::load(&state_path) {
        Some(persisted) => persistence::apply(&mut app, persisted),
        None => app.overlay = Overlay::Welcome,
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.clear()?;

    // Run the main event loop
    let result = run_app(&mut terminal, &mut app);

    // Save state before exit
    let persisted = persistence::extract(&app);
    if let Err(e) = persistence::save(&state_path, &persisted) {
        tracing::warn!("failed to save UI state: {e}");
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut AppState,
) -> Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // 50ms poll keeps the loop responsive without spinning.
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                input::handle_key(app, key);
            }
        }

        if !app.running {
            break;
        }
    }
    Ok(())
}
