//! Handler für Szenen-Bearbeitung, Rollen und externe Bitmaps.

use crate::app::use_cases;
use crate::app::AppState;
use crate::core::{ImageRole, ObjectRef};
use glam::Vec2;

/// Löscht die Selektion.
pub fn delete_selected(state: &mut AppState) {
    use_cases::composition::delete_selection(state);
}

/// Bringt ein Objekt nach vorne.
pub fn bring_to_front(state: &mut AppState, target: ObjectRef) {
    if use_cases::composition::bring_to_front(state, target).is_none() {
        log::debug!("Nach vorne: Objekt {:?} existiert nicht", target);
    }
}

/// Gruppiert die Selektion.
pub fn group_selection(state: &mut AppState) {
    use_cases::composition::group_selection(state);
}

/// Löst die selektierten Gruppen auf.
pub fn ungroup_selection(state: &mut AppState) {
    use_cases::composition::ungroup_selection(state);
}

/// Betritt den Bearbeitungsmodus einer Gruppe.
pub fn enter_group_edit_mode(state: &mut AppState, group_id: u64) {
    if !use_cases::composition::enter_group_edit_mode(state, group_id) {
        log::debug!("Gruppen-Bearbeitung: Gruppe {} existiert nicht", group_id);
    }
}

/// Verlässt den Bearbeitungsmodus.
pub fn exit_group_edit_mode(state: &mut AppState) {
    use_cases::composition::exit_group_edit_mode(state);
}

/// Benennt eine Gruppe um.
pub fn rename_group(state: &mut AppState, group_id: u64, name: &str) {
    use_cases::composition::rename_group(state, group_id, name);
}

/// Richtet die Selektion aus.
pub fn align_selection(state: &mut AppState, spacing: f32) {
    use_cases::composition::align_selection(state, spacing);
}

/// Weist der Selektion eine Rolle zu.
pub fn assign_role(state: &mut AppState, role: ImageRole) {
    use_cases::composition::assign_role(state, role);
}

/// Entfernt die Rolle der Selektion.
pub fn clear_role(state: &mut AppState) {
    use_cases::composition::clear_role_for_selection(state);
}

/// Entfernt die aktive Referenz.
pub fn clear_active_reference(state: &mut AppState) {
    use_cases::composition::clear_active_reference(state);
}

/// Fügt eine Bitmap ein und propagiert Fehler an den Aufrufer.
pub fn insert_image(
    state: &mut AppState,
    bitmap: String,
    size: Vec2,
    world_pos: Option<Vec2>,
) -> anyhow::Result<()> {
    use_cases::insertion::insert_image(state, bitmap, size, world_pos)?;
    Ok(())
}

/// Setzt oder entfernt eine Maske.
pub fn attach_mask(state: &mut AppState, image_id: u64, mask: Option<String>) -> anyhow::Result<()> {
    use_cases::insertion::attach_mask(state, image_id, mask)
}
