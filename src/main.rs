//! Canvas Composer (Headless-Host).
//!
//! Spielt eine JSON-Liste von `AppIntent`s gegen einen frischen Zustand ab
//! und gibt die resultierende Render-Szene als JSON aus.
//!
//! Aufruf: `Canvas-Composer [--options FILE] [intents.json]`

use anyhow::Context;
use canvas_composer::{AppController, AppIntent, AppState, EditorOptions};
use clap::Parser;
use std::path::{Path, PathBuf};

/// Headless-Host der Canvas-Composer-Szenen-Engine.
#[derive(Parser, Debug)]
#[command(
    name = "Canvas-Composer",
    version,
    about = "Spielt eine Intent-Liste ab und gibt die Render-Szene als JSON aus"
)]
struct CliArgs {
    /// JSON-Datei mit einer Liste von Intents (ohne Angabe: leere Szene)
    #[arg(value_name = "INTENTS.json")]
    script: Option<PathBuf>,

    /// Alternative Optionsdatei statt der Standard-TOML neben der Binary
    #[arg(short, long, value_name = "FILE")]
    options: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = CliArgs::parse();

    // Logger initialisieren
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    log::info!("Canvas Composer v{} startet...", env!("CARGO_PKG_VERSION"));

    // Optionen aus TOML laden (oder Standardwerte)
    let config_path = args.options.unwrap_or_else(EditorOptions::config_path);
    let options = EditorOptions::load_from_file(&config_path);

    let mut state = AppState::with_options(options);
    state.options_path = Some(config_path);
    let mut controller = AppController::new();

    let intents = match args.script.as_deref() {
        Some(path) => read_intents(path)?,
        None => {
            log::info!("Keine Intent-Datei angegeben, gebe leere Szene aus");
            Vec::new()
        }
    };

    replay(&mut controller, &mut state, intents);

    let scene = controller.build_render_scene(&state);
    println!(
        "{}",
        serde_json::to_string_pretty(&scene).context("Render-Szene nicht serialisierbar")?
    );
    Ok(())
}

fn read_intents(path: &Path) -> anyhow::Result<Vec<AppIntent>> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Intent-Datei '{}' nicht lesbar", path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Intent-Datei '{}' ungültig", path.display()))
}

fn replay(controller: &mut AppController, state: &mut AppState, intents: Vec<AppIntent>) {
    let total = intents.len();
    for intent in intents {
        if let Err(e) = controller.handle_intent(state, intent) {
            log::error!("Event handling failed: {:#}", e);
        }
    }
    log::info!(
        "{} Intents abgespielt, {} Commands ausgeführt, {} Bilder / {} Gruppen",
        total,
        state.command_log.len(),
        state.image_count(),
        state.group_count()
    );
}
