mod app;
use review_session::*;

use app::ReviewApp;
use clap::Parser;
use review_session::config::DEFAULT_CONFIG_PATH;
use review_session::models::DEFAULT_CATEGORY;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about = "Review flashcards with spaced repetition", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
    /// Card store to open, overriding `store_path` from the configuration.
    #[arg(long)]
    store: Option<PathBuf>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = ReviewConfig::load(&cli.config)?;
    if let Some(store) = cli.store {
        config.store_path = store;
    }

    let db = Database::open(&config.store_path)?;
    if db.count_cards()? == 0 {
        db.add_card("Polish Vocabulary", "cześć", "hello", false)?;
        db.add_card("Polish Vocabulary", "dziękuję", "thank you", false)?;
        db.add_card("Polish Vocabulary", "proszę", "please", false)?;
        db.add_card(DEFAULT_CATEGORY, "hello", "cześć", true)?;
        log::info!("Sample data created!");
    }
    log::info!(
        "Loaded {} cards from {} ({} due)",
        db.count_cards()?,
        config.store_path.display(),
        db.due_count()?
    );

    let app = ReviewApp::new(db, config)?;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([500.0, 700.0]),
        ..Default::default()
    };
    eframe::run_native("Flashcards", options, Box::new(|_cc| Ok(Box::new(app))))
        .map_err(|e| ReviewError::Ui(e.to_string()))
}
