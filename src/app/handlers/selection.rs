//! Handler für Selektion und Drag-Sessions.

use crate::app::history::Snapshot;
use crate::app::interaction::ResizeHandle;
use crate::app::use_cases;
use crate::app::AppState;
use crate::core::ObjectRef;
use glam::Vec2;

/// Zeichnet einen Undo-Snapshot auf, wenn sich Selektion oder Scope geändert haben.
fn record_if_selection_changed(state: &mut AppState, before: Snapshot) {
    if before.store.selection() != state.store.selection()
        || before.store.scope() != state.store.scope()
    {
        state.history.record_snapshot(before);
    }
}

/// Selektiert ein Objekt per Klick.
pub fn select_object(state: &mut AppState, target: ObjectRef, additive: bool) {
    let before = Snapshot::from_state(state);
    use_cases::selection::select_object(state, target, additive);
    record_if_selection_changed(state, before);
}

/// Hebt die aktuelle Selektion auf.
pub fn clear(state: &mut AppState) {
    let before = Snapshot::from_state(state);
    use_cases::selection::clear_selection(state);
    record_if_selection_changed(state, before);
}

/// Selektiert alle Objekte des aktuellen Scopes.
pub fn select_all(state: &mut AppState) {
    let before = Snapshot::from_state(state);
    use_cases::selection::select_all(state);
    record_if_selection_changed(state, before);
    log::info!(
        "{} Bild(er) und {} Gruppe(n) selektiert",
        state.store.selection().selected_image_ids.len(),
        state.store.selection().selected_group_ids.len()
    );
}

/// Startet das Verschieben der Selektion.
pub fn begin_move(state: &mut AppState, world_pos: Vec2) {
    use_cases::drag::begin_move(state, world_pos);
}

/// Startet den Resize eines Bildes.
pub fn begin_resize(state: &mut AppState, image_id: u64, handle: ResizeHandle, world_pos: Vec2) {
    use_cases::drag::begin_resize(state, image_id, handle, world_pos);
}

/// Startet das Skalieren der Selektions-Box.
pub fn begin_scale_selection(state: &mut AppState, handle: ResizeHandle, world_pos: Vec2) {
    use_cases::drag::begin_scale_selection(state, handle, world_pos);
}

/// Startet ein Auswahlrechteck.
pub fn begin_marquee(state: &mut AppState, world_pos: Vec2, additive: bool) {
    use_cases::drag::begin_marquee(state, world_pos, additive);
}

/// Aktualisiert die laufende Drag-Session.
pub fn update_drag(state: &mut AppState, world_pos: Vec2) {
    use_cases::drag::update_drag(state, world_pos);
}

/// Schließt die laufende Drag-Session ab.
pub fn end_drag(state: &mut AppState, world_pos: Vec2) {
    use_cases::drag::end_drag(state, world_pos);
}

/// Bricht die laufende Drag-Session ab (ohne Rücksetzen).
pub fn cancel_drag(state: &mut AppState) {
    use_cases::drag::cancel_drag(state);
}
