//! Handler für Laufzeit-Optionen.

use crate::app::AppState;
use crate::shared::EditorOptions;

/// Übernimmt Optionen sofort und speichert sie, falls ein Pfad gesetzt ist.
pub fn apply_options(state: &mut AppState, options: EditorOptions) -> anyhow::Result<()> {
    let options = options.sanitized();

    state.store.set_group_padding(options.group_padding);
    state.history.set_max_depth(options.history_depth);
    state
        .view
        .camera
        .zoom_by_clamped(1.0, options.camera_zoom_min, options.camera_zoom_max);
    state.options = options;
    log::info!("Optionen übernommen");

    match &state.options_path {
        Some(path) => state.options.save_to_file(path),
        None => Ok(()),
    }
}

/// Setzt Optionen auf Standardwerte zurück.
pub fn reset_options(state: &mut AppState) -> anyhow::Result<()> {
    apply_options(state, EditorOptions::default())
}
