//! Handler für Undo/Redo-Operationen.

use crate::app::history::Snapshot;
use crate::app::AppState;

/// Führt einen Undo-Schritt aus, falls vorhanden.
pub fn undo(state: &mut AppState) {
    let current = Snapshot::from_state(state);
    match state.history.pop_undo_with_current(current) {
        Some(prev) => {
            prev.apply_to(state);
            log::info!(
                "Undo ausgeführt (noch {} Schritt(e))",
                state.history.undo_depth()
            );
        }
        None => log::debug!("Undo: nichts zu tun"),
    }
}

/// Führt einen Redo-Schritt aus, falls vorhanden.
pub fn redo(state: &mut AppState) {
    let current = Snapshot::from_state(state);
    match state.history.pop_redo_with_current(current) {
        Some(next) => {
            next.apply_to(state);
            log::info!("Redo ausgeführt");
        }
        None => log::debug!("Redo: nichts zu tun"),
    }
}
