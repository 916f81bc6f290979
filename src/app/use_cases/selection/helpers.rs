//! Gemeinsame Hilfsfunktionen für Selektionslogik.

use crate::app::AppState;
use crate::core::{CanvasStore, ObjectRef, SelectionScope};

/// Löscht die aktuelle Selektion explizit.
///
/// Im Gruppen-Bearbeitungsmodus bleibt die bearbeitete Gruppe selektiert.
pub fn clear_selection(state: &mut AppState) {
    let selection = state.store.selection();
    let has_images = !selection.selected_image_ids.is_empty();
    let has_groups = !selection.selected_group_ids.is_empty();
    if has_groups {
        state.store.set_selected_groups(|groups| groups.clear());
    }
    if has_images {
        state.store.set_selected_images(|images| images.clear());
    }
}

/// Selektiert alle im aktuellen Scope wählbaren Objekte.
pub fn select_all(state: &mut AppState) {
    let scope = state.store.scope();
    let (images, groups): (Vec<u64>, Vec<u64>) = match scope {
        SelectionScope::Normal => (
            state
                .store
                .images()
                .values()
                .filter(|image| image.group_id.is_none())
                .map(|image| image.id)
                .collect(),
            state.store.groups().keys().copied().collect(),
        ),
        SelectionScope::GroupEditing(group_id) => (
            state
                .store
                .group(group_id)
                .map(|group| group.member_ids.clone())
                .unwrap_or_default(),
            vec![group_id],
        ),
    };
    replace_selection(state, &images, &groups);
}

/// Ersetzt die Selektion vollständig (der Store normalisiert gemäß Scope).
pub(crate) fn replace_selection(state: &mut AppState, images: &[u64], groups: &[u64]) {
    state.store.set_selected_groups(|selected| {
        selected.clear();
        selected.extend(groups.iter().copied());
    });
    state.store.set_selected_images(|selected| {
        selected.clear();
        selected.extend(images.iter().copied());
    });
}

/// Prüft ob ein Objekt im Scope per Klick oder Rechteck wählbar ist.
///
/// `Normal`: lose Bilder und Gruppen. `GroupEditing(g)`: nur Mitglieder von `g`.
pub(crate) fn is_candidate(store: &CanvasStore, scope: SelectionScope, object: ObjectRef) -> bool {
    match (scope, object) {
        (SelectionScope::Normal, ObjectRef::Image(id)) => store
            .image(id)
            .is_some_and(|image| image.group_id.is_none()),
        (SelectionScope::Normal, ObjectRef::Group(id)) => store.group(id).is_some(),
        (SelectionScope::GroupEditing(group_id), ObjectRef::Image(id)) => store
            .image(id)
            .is_some_and(|image| image.group_id == Some(group_id)),
        (SelectionScope::GroupEditing(_), ObjectRef::Group(_)) => false,
    }
}
