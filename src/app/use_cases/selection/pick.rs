//! Use-Case: Klick-Selektion (oberstes Objekt unter dem Pointer).

use super::helpers::{is_candidate, replace_selection};
use crate::app::AppState;
use crate::core::{ObjectRef, SelectionScope};
use glam::Vec2;

/// Oberstes sichtbares Objekt unter `world_pos`, das im `scope` wählbar ist.
///
/// Große Szenen fragen den Spatial-Index des Culling-Caches ab, sonst wird
/// die sichtbare Menge linear geprüft. Bei gleicher Position gewinnt die
/// höchste Z-Order.
pub fn topmost_at(state: &AppState, world_pos: Vec2, scope: SelectionScope) -> Option<ObjectRef> {
    let store = &state.store;
    let visible = state.visible();

    let hits: Vec<ObjectRef> = match state.view.culling.spatial_index(store) {
        Some(index) => index
            .containing(world_pos)
            .into_iter()
            .map(|entry| entry.object)
            .collect(),
        None => visible
            .images
            .iter()
            .map(|&id| ObjectRef::Image(id))
            .chain(visible.groups.iter().map(|&id| ObjectRef::Group(id)))
            .filter(|object| {
                store
                    .geometry_of(*object)
                    .is_some_and(|rect| rect.contains_point(world_pos))
            })
            .collect(),
    };

    hits.into_iter()
        .filter(|object| visible.contains(*object) && is_candidate(store, scope, *object))
        .max_by_key(|object| store.z_order_of(*object).unwrap_or(0))
}

/// Selektiert ein Objekt per Klick.
///
/// Additiv: schaltet das Objekt um. Sonst wird die Selektion ersetzt, außer
/// das Objekt ist bereits selektiert (damit eine Mehrfach-Selektion gezogen
/// werden kann).
pub fn select_object(state: &mut AppState, target: ObjectRef, additive: bool) {
    if state.store.geometry_of(target).is_none() {
        log::debug!("Selektion: Objekt {:?} existiert nicht", target);
        return;
    }

    if additive {
        let selected = state.store.selection().contains(target);
        match target {
            ObjectRef::Image(id) => state.store.set_selected_images(|images| {
                if selected {
                    images.shift_remove(&id);
                } else {
                    images.insert(id);
                }
            }),
            ObjectRef::Group(id) => state.store.set_selected_groups(|groups| {
                if selected {
                    groups.shift_remove(&id);
                } else {
                    groups.insert(id);
                }
            }),
        }
        return;
    }

    if state.store.selection().contains(target) {
        return;
    }
    match target {
        ObjectRef::Image(id) => replace_selection(state, &[id], &[]),
        ObjectRef::Group(id) => replace_selection(state, &[], &[id]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitmapHandle;

    fn insert(state: &mut AppState, x: f32, y: f32, size: f32) -> u64 {
        state
            .store
            .insert_image(
                BitmapHandle::new(format!("img-{x}-{y}")).expect("gültiger Handle"),
                Vec2::splat(size),
                Some(Vec2::new(x, y)),
                0.0,
            )
            .expect("Einfügen erwartet")
    }

    #[test]
    fn topmost_prefers_highest_z_order() {
        let mut state = AppState::new();
        let lower = insert(&mut state, 0.0, 0.0, 100.0);
        let upper = insert(&mut state, 50.0, 50.0, 100.0);
        state.refresh_visibility();

        let hit = topmost_at(&state, Vec2::new(75.0, 75.0), SelectionScope::Normal);
        assert_eq!(hit, Some(ObjectRef::Image(upper)));

        state.store.bring_to_front(ObjectRef::Image(lower));
        state.refresh_visibility();
        let hit = topmost_at(&state, Vec2::new(75.0, 75.0), SelectionScope::Normal);
        assert_eq!(hit, Some(ObjectRef::Image(lower)));
    }

    #[test]
    fn topmost_ignores_culled_objects() {
        let mut state = AppState::new();
        insert(&mut state, 5000.0, 5000.0, 10.0);
        state.refresh_visibility();

        assert_eq!(
            topmost_at(&state, Vec2::new(5005.0, 5005.0), SelectionScope::Normal),
            None
        );
    }

    #[test]
    fn click_on_member_targets_group_in_normal_scope() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0);
        state.store.set_selected_images(|sel| {
            sel.insert(a);
            sel.insert(b);
        });
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        state.refresh_visibility();

        let hit = topmost_at(&state, Vec2::new(25.0, 25.0), SelectionScope::Normal);
        assert_eq!(hit, Some(ObjectRef::Group(group_id)));

        let hit = topmost_at(&state, Vec2::new(25.0, 25.0), SelectionScope::GroupEditing(group_id));
        assert_eq!(hit, Some(ObjectRef::Image(a)));
    }

    #[test]
    fn plain_click_on_selected_keeps_multi_selection() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0);
        select_object(&mut state, ObjectRef::Image(a), false);
        select_object(&mut state, ObjectRef::Image(b), true);

        select_object(&mut state, ObjectRef::Image(a), false);

        assert_eq!(state.store.selection().selected_image_ids.len(), 2);
    }

    #[test]
    fn additive_click_toggles() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0);
        select_object(&mut state, ObjectRef::Image(a), true);
        assert!(state.store.selection().contains(ObjectRef::Image(a)));

        select_object(&mut state, ObjectRef::Image(a), true);
        assert!(state.store.selection().is_empty());
    }

    #[test]
    fn plain_click_replaces_selection() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0);
        select_object(&mut state, ObjectRef::Image(a), false);

        select_object(&mut state, ObjectRef::Image(b), false);

        let selected: Vec<u64> = state.store.selection().selected_image_ids.iter().copied().collect();
        assert_eq!(selected, vec![b]);
    }
}
