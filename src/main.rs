use std::io;
use std::time::Duration;

use ancestry_roller::config::AppConfig;
use ancestry_roller::core::ancestry_gen::RollerState;
use ancestry_roller::core::logging;
use ancestry_roller::tui::app::AppState;
use ancestry_roller::tui::services::{build_source, Services};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load();
    let args: Vec<String> = std::env::args().skip(1).collect();

    match args.first().map(String::as_str) {
        Some("roll") => roll_once(&config, args.get(1).map(String::as_str)).await,
        _ => run_tui(&config).await,
    }
}

fn rng_for(config: &AppConfig) -> StdRng {
    match config.generation.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Non-interactive mode: one roll printed to stdout.
async fn roll_once(
    config: &AppConfig,
    location: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    let _log_guard = logging::init(&config.log_dir());
    log::info!("{} v{} rolling once", ancestry_roller::NAME, ancestry_roller::VERSION);

    let source = build_source(config)?;
    let state = RollerState::load(source, config.data.paths.clone())
        .await?
        .with_heritage(config.generation.heritage.clone());

    let location = match location.or_else(|| state.first_location()) {
        Some(location) => location.to_string(),
        None => return Err("location table is empty".into()),
    };

    let Some(result) = state.try_generate(&location, &mut rng_for(config))? else {
        println!("Nothing to roll for '{}'", location);
        return Ok(());
    };
    println!("{}", result.display_name);
    println!(
        "{}, {}, {} skin; they {} and {}",
        result.height, result.build, result.skintone, result.features[0], result.features[1]
    );
    if config.tui.show_debug {
        println!();
        println!("{}", result.trace);
    }
    Ok(())
}

async fn run_tui(config: &AppConfig) -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (file only, the TUI owns stdout)
    let _log_guard = logging::init_tui(&config.log_dir());
    log::info!("{} v{} starting", ancestry_roller::NAME, ancestry_roller::VERSION);

    // Load tables before touching the terminal so errors print normally
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let services = Services::init(config, event_tx).await?;
    let mut app = AppState::new(event_rx, services, rng_for(config), config.tui.show_debug);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run the app
    let result = app
        .run(&mut terminal, Duration::from_millis(config.tui.tick_rate_ms))
        .await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        log::error!("TUI exited with error: {}", e);
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    log::info!("Shutting down");
    Ok(())
}
