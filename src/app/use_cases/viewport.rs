//! Use-Case-Funktionen für Viewport-Zustand.

use crate::app::AppState;

/// Aktualisiert die gespeicherte Viewport-Größe.
/// Nicht-positive oder ungültige Größen (z.B. minimiertes Fenster) werden ignoriert.
pub fn resize(state: &mut AppState, size: [f32; 2]) {
    if !size.iter().all(|v| v.is_finite() && *v > 0.0) {
        log::debug!("Viewport-Größe {:?} ignoriert", size);
        return;
    }
    state.view.viewport_size = size;
}
