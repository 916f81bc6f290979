//! Use-Case: Szenen-Bearbeitung (Löschen, Z-Order, Gruppen, Ausrichten, Rollen).
//!
//! Jede Funktion nimmt einen Undo-Snapshot auf, sofern der Store sich geändert hat.

use crate::app::history::Snapshot;
use crate::app::AppState;
use crate::core::{GroupPatch, ImageRole, ObjectRef};

/// Führt `op` aus und zeichnet den Zustand davor auf, falls `op` etwas geändert hat.
fn with_undo<T>(state: &mut AppState, op: impl FnOnce(&mut AppState) -> T) -> T {
    let before = Snapshot::from_state(state);
    let result = op(state);
    if before.store.revision() != state.store.revision() {
        state.history.record_snapshot(before);
    }
    result
}

/// Löscht die Selektion (im Bearbeitungsmodus: löst Mitglieder aus der Gruppe).
pub fn delete_selection(state: &mut AppState) -> bool {
    with_undo(state, |state| state.store.delete_selection())
}

/// Bringt ein Objekt nach vorne.
pub fn bring_to_front(state: &mut AppState, target: ObjectRef) -> Option<u64> {
    with_undo(state, |state| state.store.bring_to_front(target))
}

/// Gruppiert die selektierten losen Bilder.
pub fn group_selection(state: &mut AppState) -> Option<u64> {
    with_undo(state, |state| state.store.group_selection())
}

/// Löst die selektierten Gruppen auf.
pub fn ungroup_selection(state: &mut AppState) -> Vec<u64> {
    with_undo(state, |state| state.store.ungroup_selection())
}

/// Betritt den Bearbeitungsmodus einer Gruppe.
pub fn enter_group_edit_mode(state: &mut AppState, group_id: u64) -> bool {
    with_undo(state, |state| state.store.enter_group_edit_mode(group_id))
}

/// Verlässt den Bearbeitungsmodus.
pub fn exit_group_edit_mode(state: &mut AppState) -> bool {
    with_undo(state, |state| state.store.exit_group_edit_mode())
}

/// Benennt eine Gruppe um. Leere Namen werden ignoriert.
pub fn rename_group(state: &mut AppState, group_id: u64, name: &str) -> bool {
    let name = name.trim();
    if name.is_empty() {
        log::debug!("Umbenennen: leerer Name für Gruppe {} ignoriert", group_id);
        return false;
    }
    if state.store.group(group_id).is_some_and(|g| g.name == name) {
        return false;
    }
    with_undo(state, |state| {
        state.store.update_group(
            group_id,
            GroupPatch {
                name: Some(name.to_string()),
                ..Default::default()
            },
        )
    })
}

/// Richtet die lose Bild-Selektion als Masonry-Block aus.
pub fn align_selection(state: &mut AppState, spacing: f32) -> bool {
    with_undo(state, |state| state.store.align_selection(spacing))
}

/// Weist der Bild-Selektion eine Rolle zu (Toggle).
pub fn assign_role(state: &mut AppState, role: ImageRole) -> bool {
    with_undo(state, |state| state.store.assign_role(role))
}

/// Entfernt die Rolle der Bild-Selektion.
pub fn clear_role_for_selection(state: &mut AppState) -> bool {
    with_undo(state, |state| state.store.clear_role_for_selection())
}

/// Entfernt die Rolle der aktiven Referenz.
pub fn clear_active_reference(state: &mut AppState) -> bool {
    with_undo(state, |state| state.store.clear_active_reference_role())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitmapHandle;
    use glam::Vec2;

    fn state_with_images(count: usize) -> (AppState, Vec<u64>) {
        let mut state = AppState::new();
        let ids = (0..count)
            .map(|i| {
                state
                    .store
                    .insert_image(
                        BitmapHandle::new(format!("img-{i}")).expect("gültiger Handle"),
                        Vec2::splat(40.0),
                        Some(Vec2::new(i as f32 * 60.0, 0.0)),
                        0.0,
                    )
                    .expect("Einfügen erwartet")
            })
            .collect();
        (state, ids)
    }

    #[test]
    fn group_then_undo_restores_loose_images() {
        let (mut state, ids) = state_with_images(2);
        state.store.set_selected_images(|sel| sel.extend(ids.iter().copied()));

        let group_id = group_selection(&mut state).expect("Gruppe erwartet");
        assert!(state.store.group(group_id).is_some());
        assert!(state.can_undo());

        crate::app::handlers::history::undo(&mut state);
        assert_eq!(state.store.group_count(), 0);
        assert!(ids
            .iter()
            .all(|id| state.store.image(*id).is_some_and(|i| i.group_id.is_none())));
    }

    #[test]
    fn no_op_records_nothing() {
        let (mut state, _) = state_with_images(1);

        assert!(!delete_selection(&mut state));
        assert!(group_selection(&mut state).is_none());
        assert!(!exit_group_edit_mode(&mut state));

        assert!(!state.can_undo());
    }

    #[test]
    fn rename_trims_and_ignores_empty() {
        let (mut state, ids) = state_with_images(2);
        state.store.set_selected_images(|sel| sel.extend(ids.iter().copied()));
        let group_id = group_selection(&mut state).expect("Gruppe erwartet");

        assert!(!rename_group(&mut state, group_id, "   "));
        assert!(rename_group(&mut state, group_id, "  Figuren "));
        assert_eq!(state.store.group(group_id).map(|g| g.name.as_str()), Some("Figuren"));
    }

    #[test]
    fn assign_role_toggle_is_undoable() {
        let (mut state, ids) = state_with_images(1);
        state.store.set_selected_images(|sel| {
            sel.insert(ids[0]);
        });

        assert!(assign_role(&mut state, ImageRole::Reference));
        assert_eq!(state.store.active_reference_index(), Some(0));

        crate::app::handlers::history::undo(&mut state);
        assert_eq!(state.store.image(ids[0]).map(|i| i.role), Some(ImageRole::None));
    }
}
