use clap::Parser;
use color_eyre::Result;
use crossterm::{
    event::{KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::fs::File;
use std::io::stdout;
use std::path::{Path, PathBuf};

use space_adventure::{App, GameConfig};

/// Arcade space shooter for the terminal
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML file with game settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Number of enemies on the field
    #[arg(long)]
    enemies: Option<usize>,

    /// Disable sound effects
    #[arg(long)]
    mute: bool,

    /// Where to write logs; the terminal is taken by the game
    #[arg(long, default_value = "debug.log")]
    log_file: PathBuf,
}

fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)?;
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn load_config(cli: &Cli) -> GameConfig {
    let mut config = match &cli.config {
        Some(path) => {
            let (config, err) = GameConfig::load_or_default(path);
            if let Some(err) = err {
                warn!("{err}; using default settings");
            }
            config
        }
        None => GameConfig::default(),
    };

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    if let Some(enemies) = cli.enemies {
        config.enemy_count = enemies;
    }
    if cli.mute {
        config.sound.enabled = false;
    }

    for warning in config.validate() {
        warn!("config: {warning}");
    }
    config
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();
    init_logging(&cli.log_file)?;

    let config = load_config(&cli);
    info!("starting with {config:?}");

    let supports_keyboard_enhancement = matches!(
        crossterm::terminal::supports_keyboard_enhancement(),
        Ok(true)
    );
    info!("keyboard enhancement supported: {supports_keyboard_enhancement}");

    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen)?;

    // Release events are only reported with the enhancement flags
    if supports_keyboard_enhancement {
        execute!(
            stdout,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
    }

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = App::new(config).run(&mut terminal);

    // Restore the terminal before any error is reported
    if supports_keyboard_enhancement {
        execute!(terminal.backend_mut(), PopKeyboardEnhancementFlags)?;
    }
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}
