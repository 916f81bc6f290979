//! Use-Case: Rechteck-Selektion (Auswahlrechteck per Drag).

use super::helpers::{is_candidate, replace_selection};
use crate::app::AppState;
use crate::core::{ObjectRef, Rect, SelectionScope};
use indexmap::IndexSet;

/// Alle im Scope wählbaren Objekte, die `rect` schneiden (Sammlungs-Reihenfolge).
pub fn objects_in_rect(state: &AppState, rect: &Rect, scope: SelectionScope) -> Vec<ObjectRef> {
    let store = &state.store;
    store
        .groups()
        .values()
        .filter(|group| group.geometry.intersects(rect))
        .map(|group| ObjectRef::Group(group.id))
        .chain(
            store
                .images()
                .values()
                .filter(|image| image.geometry.intersects(rect))
                .map(|image| ObjectRef::Image(image.id)),
        )
        .filter(|object| is_candidate(store, scope, *object))
        .collect()
}

/// Selektiert alle Treffer im Rechteck zusätzlich zur Basis-Selektion.
///
/// Ohne Shift ist die Basis leer, die Treffer ersetzen dann die Selektion.
pub fn select_in_rect(
    state: &mut AppState,
    rect: &Rect,
    base_images: &IndexSet<u64>,
    base_groups: &IndexSet<u64>,
) {
    let scope = state.store.scope();
    let mut images = base_images.clone();
    let mut groups = base_groups.clone();
    for object in objects_in_rect(state, rect, scope) {
        match object {
            ObjectRef::Image(id) => {
                images.insert(id);
            }
            ObjectRef::Group(id) => {
                groups.insert(id);
            }
        }
    }

    let images: Vec<u64> = images.into_iter().collect();
    let groups: Vec<u64> = groups.into_iter().collect();
    replace_selection(state, &images, &groups);
    log::debug!(
        "Rechteck-Selektion: {} Bild(er), {} Gruppe(n)",
        images.len(),
        groups.len()
    );
}
