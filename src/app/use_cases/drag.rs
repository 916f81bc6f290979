//! Use-Case: Drag-Sessions (Verschieben, Resize, Selektion skalieren, Auswahlrechteck).
//!
//! Jedes Update rechnet aus der Start-Geometrie der Session; nichts wird
//! inkrementell vom vorherigen Frame fortgeschrieben.

use super::selection::select_in_rect;
use crate::app::history::Snapshot;
use crate::app::interaction::{handle_scale, DragSession, ResizeHandle, MIN_SELECTION_SCALE};
use crate::app::AppState;
use crate::core::{CanvasStore, ImagePatch, ObjectRef, Rect, SelectionScope};
use glam::Vec2;
use indexmap::IndexSet;

/// Startet das Verschieben der aktuellen Selektion.
pub fn begin_move(state: &mut AppState, world_pos: Vec2) {
    let (originals, refit_group) = moved_objects(&state.store);
    if originals.is_empty() {
        log::debug!("Verschieben: leere Selektion");
        return;
    }
    start(
        state,
        DragSession::Move {
            start_world: world_pos,
            originals,
            refit_group,
        },
    );
}

/// Startet den Resize eines einzelnen Bildes über ein Eck-Handle.
///
/// Im Normal-Scope nur für lose Bilder, im Bearbeitungsmodus nur für
/// Mitglieder der bearbeiteten Gruppe.
pub fn begin_resize(state: &mut AppState, image_id: u64, handle: ResizeHandle, world_pos: Vec2) {
    let Some(image) = state.store.image(image_id) else {
        log::debug!("Resize: Bild {} existiert nicht", image_id);
        return;
    };
    let editing = state.store.scope().editing_group();
    if image.group_id != editing {
        log::debug!("Resize: Bild {} ist im aktuellen Scope nicht wählbar", image_id);
        return;
    }

    let session = DragSession::Resize {
        image_id,
        handle,
        original: image.geometry,
        refit_group: editing,
    };
    start(state, session);
    log::debug!(
        "Resize von Bild {} an {:?} bei ({:.1}, {:.1})",
        image_id,
        handle,
        world_pos.x,
        world_pos.y
    );
}

/// Startet das Skalieren der Selektions-Box (nur Normal-Scope).
pub fn begin_scale_selection(state: &mut AppState, handle: ResizeHandle, world_pos: Vec2) {
    if state.store.scope() != SelectionScope::Normal {
        log::debug!("Selektion skalieren: nur außerhalb der Gruppen-Bearbeitung");
        return;
    }
    let Some(start_bounds) = state.store.selection_bounds() else {
        log::debug!("Selektion skalieren: leere Selektion");
        return;
    };
    let (originals, _) = moved_objects(&state.store);

    start(
        state,
        DragSession::ScaleSelection {
            handle,
            start_bounds,
            originals,
        },
    );
    log::debug!(
        "Skalieren der Selektion an {:?} bei ({:.1}, {:.1})",
        handle,
        world_pos.x,
        world_pos.y
    );
}

/// Startet ein Auswahlrechteck. Additiv bleibt die aktuelle Selektion als Basis erhalten.
pub fn begin_marquee(state: &mut AppState, world_pos: Vec2, additive: bool) {
    let (base_images, base_groups) = if additive {
        let selection = state.store.selection();
        (
            (*selection.selected_image_ids).clone(),
            (*selection.selected_group_ids).clone(),
        )
    } else {
        (IndexSet::new(), IndexSet::new())
    };

    start(
        state,
        DragSession::Marquee {
            start_world: world_pos,
            current_world: world_pos,
            additive,
            base_images,
            base_groups,
        },
    );
}

/// Aktualisiert die laufende Session auf die neue Pointer-Position.
pub fn update_drag(state: &mut AppState, world_pos: Vec2) {
    if !world_pos.is_finite() {
        return;
    }
    let min_image_size = state.options.min_image_size;
    let store = &mut state.store;

    match &mut state.interaction.drag {
        None => {}
        Some(DragSession::Move {
            start_world,
            originals,
            ..
        }) => {
            let delta = world_pos - *start_world;
            let updates: Vec<(ObjectRef, Rect)> = originals
                .iter()
                .map(|(object, rect)| (*object, rect.translated(delta)))
                .collect();
            apply_geometries(store, &updates);
        }
        Some(DragSession::Resize {
            image_id,
            handle,
            original,
            ..
        }) => {
            let anchor = handle.anchor(original);
            let corner = handle.corner(original);
            let min_scale = if original.width > 0.0 {
                min_image_size / original.width
            } else {
                1.0
            };
            let scale = handle_scale(anchor, corner, world_pos).max(min_scale);
            let resized = original.scaled_about(anchor, scale);
            apply_geometries(store, &[(ObjectRef::Image(*image_id), resized)]);
        }
        Some(DragSession::ScaleSelection {
            handle,
            start_bounds,
            originals,
        }) => {
            let anchor = handle.anchor(start_bounds);
            let corner = handle.corner(start_bounds);
            let scale = handle_scale(anchor, corner, world_pos).max(MIN_SELECTION_SCALE);
            let updates: Vec<(ObjectRef, Rect)> = originals
                .iter()
                .map(|(object, rect)| (*object, rect.scaled_about(anchor, scale)))
                .collect();
            apply_geometries(store, &updates);
        }
        Some(DragSession::Marquee { current_world, .. }) => {
            *current_world = world_pos;
        }
    }
}

/// Schließt die Session an der letzten Pointer-Position ab.
pub fn end_drag(state: &mut AppState, world_pos: Vec2) {
    update_drag(state, world_pos);
    finish(state, true);
}

/// Beendet die Session ohne Rücksetzen: die Geometrie des letzten Updates bleibt bestehen.
pub fn cancel_drag(state: &mut AppState) {
    if finish(state, false) {
        log::info!("Drag abgebrochen, letzte Geometrie bleibt erhalten");
    }
}

fn start(state: &mut AppState, session: DragSession) {
    if state.interaction.is_dragging() {
        finish(state, false);
    }
    log::debug!("Drag '{}' gestartet", session.kind());
    let before = Snapshot::from_state(state);
    state.interaction.begin(session, before);
}

/// Beendet die aktive Session; `apply_marquee` übernimmt das Auswahlrechteck.
fn finish(state: &mut AppState, apply_marquee: bool) -> bool {
    let Some((session, before)) = state.interaction.finish() else {
        log::debug!("Kein aktiver Drag");
        return false;
    };
    let moved = before
        .as_ref()
        .is_some_and(|snap| snap.store.revision() != state.store.revision());

    match &session {
        DragSession::Move {
            refit_group: Some(group_id),
            ..
        }
        | DragSession::Resize {
            refit_group: Some(group_id),
            ..
        } if moved => {
            state.store.refit_group_bounds(*group_id);
        }
        DragSession::Marquee {
            base_images,
            base_groups,
            ..
        } if apply_marquee => {
            if let Some(rect) = session.marquee_rect() {
                select_in_rect(state, &rect, base_images, base_groups);
            }
        }
        _ => {}
    }

    if let Some(snap) = before {
        if snap.store.revision() != state.store.revision() {
            state.history.record_snapshot(snap);
        }
    }
    log::debug!("Drag '{}' beendet", session.kind());
    true
}

/// Start-Geometrie aller Objekte, die ein Verschieben der Selektion mitnimmt.
///
/// Normal: selektierte Gruppen samt Mitgliedern und lose Bilder.
/// Bearbeitungsmodus: nur die selektierten Mitglieder, die Gruppe wird danach angepasst.
fn moved_objects(store: &CanvasStore) -> (Vec<(ObjectRef, Rect)>, Option<u64>) {
    let selection = store.selection();
    let images = selection
        .selected_image_ids
        .iter()
        .filter_map(|&id| store.image(id))
        .map(|image| (ObjectRef::Image(image.id), image.geometry));

    match store.scope() {
        SelectionScope::GroupEditing(group_id) => (images.collect(), Some(group_id)),
        SelectionScope::Normal => {
            let mut originals: Vec<(ObjectRef, Rect)> = Vec::new();
            for group in selection
                .selected_group_ids
                .iter()
                .filter_map(|&id| store.group(id))
            {
                originals.push((ObjectRef::Group(group.id), group.geometry));
                originals.extend(
                    group
                        .member_ids
                        .iter()
                        .filter_map(|&id| store.image(id))
                        .map(|image| (ObjectRef::Image(image.id), image.geometry)),
                );
            }
            originals.extend(images);
            (originals, None)
        }
    }
}

/// Schreibt nur tatsächlich geänderte Geometrien (kein Commit bei Stillstand).
fn apply_geometries(store: &mut CanvasStore, updates: &[(ObjectRef, Rect)]) {
    let changed: Vec<(ObjectRef, Rect)> = updates
        .iter()
        .copied()
        .filter(|(object, rect)| store.geometry_of(*object) != Some(*rect))
        .collect();
    match changed.as_slice() {
        [] => {}
        [(ObjectRef::Image(id), rect)] => {
            store.update_image(*id, ImagePatch::geometry(*rect));
        }
        _ => store.set_geometries(&changed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitmapHandle;
    use approx::assert_relative_eq;

    fn insert(state: &mut AppState, x: f32, y: f32, w: f32, h: f32) -> u64 {
        state
            .store
            .insert_image(
                BitmapHandle::new(format!("img-{x}-{y}")).expect("gültiger Handle"),
                Vec2::new(w, h),
                Some(Vec2::new(x, y)),
                0.0,
            )
            .expect("Einfügen erwartet")
    }

    fn select(state: &mut AppState, ids: &[u64]) {
        state.store.set_selected_images(|sel| {
            sel.clear();
            sel.extend(ids.iter().copied());
        });
    }

    fn geometry(state: &AppState, id: u64) -> Rect {
        state.store.image(id).map(|i| i.geometry).unwrap_or_default()
    }

    #[test]
    fn move_is_computed_from_start_geometry() {
        let mut state = AppState::new();
        let id = insert(&mut state, 10.0, 10.0, 50.0, 50.0);
        select(&mut state, &[id]);

        begin_move(&mut state, Vec2::new(20.0, 20.0));
        update_drag(&mut state, Vec2::new(70.0, 20.0));
        update_drag(&mut state, Vec2::new(30.0, 40.0));
        end_drag(&mut state, Vec2::new(30.0, 40.0));

        assert_eq!(geometry(&state, id), Rect::new(20.0, 30.0, 50.0, 50.0));
        assert!(!state.interaction.is_dragging());
        assert!(state.can_undo());
    }

    #[test]
    fn click_without_motion_records_no_undo() {
        let mut state = AppState::new();
        let id = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        select(&mut state, &[id]);

        begin_move(&mut state, Vec2::new(5.0, 5.0));
        end_drag(&mut state, Vec2::new(5.0, 5.0));

        assert!(!state.can_undo());
    }

    #[test]
    fn moving_group_moves_members() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0, 50.0);
        select(&mut state, &[a, b]);
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        let group_before = state.store.group(group_id).map(|g| g.geometry).unwrap_or_default();

        begin_move(&mut state, Vec2::ZERO);
        end_drag(&mut state, Vec2::new(10.0, -5.0));

        let delta = Vec2::new(10.0, -5.0);
        assert_eq!(geometry(&state, a), Rect::new(0.0, 0.0, 50.0, 50.0).translated(delta));
        assert_eq!(geometry(&state, b), Rect::new(100.0, 0.0, 50.0, 50.0).translated(delta));
        assert_eq!(
            state.store.group(group_id).map(|g| g.geometry),
            Some(group_before.translated(delta))
        );
    }

    #[test]
    fn move_in_edit_mode_refits_group() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0, 50.0);
        select(&mut state, &[a, b]);
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        state.store.enter_group_edit_mode(group_id);
        select(&mut state, &[b]);

        begin_move(&mut state, Vec2::ZERO);
        end_drag(&mut state, Vec2::new(100.0, 0.0));

        let padding = state.store.group_padding();
        let group = state.store.group(group_id).map(|g| g.geometry).unwrap_or_default();
        assert_relative_eq!(group.right(), 250.0 + padding);
        assert_relative_eq!(group.x, -padding);
        assert_eq!(state.store.scope(), SelectionScope::GroupEditing(group_id));
    }

    #[test]
    fn resize_keeps_anchor_and_aspect() {
        let mut state = AppState::new();
        let id = insert(&mut state, 100.0, 100.0, 200.0, 100.0);

        begin_resize(&mut state, id, ResizeHandle::BottomRight, Vec2::new(300.0, 200.0));
        end_drag(&mut state, Vec2::new(500.0, 210.0));

        assert_eq!(geometry(&state, id), Rect::new(100.0, 100.0, 400.0, 200.0));

        begin_resize(&mut state, id, ResizeHandle::TopLeft, Vec2::new(100.0, 100.0));
        end_drag(&mut state, Vec2::new(300.0, 200.0));

        let rect = geometry(&state, id);
        assert_relative_eq!(rect.right(), 500.0);
        assert_relative_eq!(rect.bottom(), 300.0);
        assert_relative_eq!(rect.width / rect.height, 2.0);
    }

    #[test]
    fn resize_clamps_to_min_width() {
        let mut state = AppState::new();
        let id = insert(&mut state, 0.0, 0.0, 100.0, 50.0);
        let min = state.options.min_image_size;

        begin_resize(&mut state, id, ResizeHandle::BottomRight, Vec2::new(100.0, 50.0));
        end_drag(&mut state, Vec2::new(-300.0, -300.0));

        let rect = geometry(&state, id);
        assert_relative_eq!(rect.width, min);
        assert_relative_eq!(rect.height, min * 0.5);
        assert_eq!(rect.min(), Vec2::ZERO);
    }

    #[test]
    fn resize_of_grouped_image_requires_edit_mode() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        let b = insert(&mut state, 100.0, 0.0, 50.0, 50.0);
        select(&mut state, &[a, b]);
        state.store.group_selection().expect("Gruppe erwartet");

        begin_resize(&mut state, a, ResizeHandle::BottomRight, Vec2::new(50.0, 50.0));

        assert!(!state.interaction.is_dragging());
    }

    #[test]
    fn scale_selection_scales_images_and_groups_uniformly() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 100.0, 100.0);
        let b = insert(&mut state, 200.0, 0.0, 100.0, 100.0);
        let loose = insert(&mut state, 0.0, 200.0, 100.0, 100.0);
        select(&mut state, &[a, b]);
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        state.store.set_selected_images(|sel| {
            sel.insert(loose);
        });
        let bounds = state.store.selection_bounds().expect("Selektion erwartet");
        let group_before = state.store.group(group_id).map(|g| g.geometry).unwrap_or_default();

        begin_scale_selection(&mut state, ResizeHandle::BottomRight, bounds.max());
        let anchor = bounds.min();
        let target = anchor + (bounds.max() - anchor) * 2.0;
        end_drag(&mut state, target);

        assert_eq!(geometry(&state, a), Rect::new(0.0, 0.0, 100.0, 100.0).scaled_about(anchor, 2.0));
        assert_eq!(geometry(&state, loose), Rect::new(0.0, 200.0, 100.0, 100.0).scaled_about(anchor, 2.0));
        assert_eq!(
            state.store.group(group_id).map(|g| g.geometry),
            Some(group_before.scaled_about(anchor, 2.0))
        );
    }

    #[test]
    fn scale_selection_respects_min_scale() {
        let mut state = AppState::new();
        let id = insert(&mut state, 0.0, 0.0, 100.0, 100.0);
        select(&mut state, &[id]);

        begin_scale_selection(&mut state, ResizeHandle::BottomRight, Vec2::new(100.0, 100.0));
        end_drag(&mut state, Vec2::new(-50.0, -50.0));

        assert_relative_eq!(geometry(&state, id).width, 100.0 * MIN_SELECTION_SCALE);
    }

    #[test]
    fn marquee_applies_on_release() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        let b = insert(&mut state, 200.0, 0.0, 50.0, 50.0);

        begin_marquee(&mut state, Vec2::new(-10.0, -10.0), false);
        update_drag(&mut state, Vec2::new(300.0, 100.0));
        assert!(state.store.selection().is_empty());

        end_drag(&mut state, Vec2::new(300.0, 100.0));
        let selected: Vec<u64> = state.store.selection().selected_image_ids.iter().copied().collect();
        assert_eq!(selected, vec![a, b]);
        assert!(state.can_undo());
    }

    #[test]
    fn cancel_keeps_last_geometry_and_drops_marquee() {
        let mut state = AppState::new();
        let id = insert(&mut state, 0.0, 0.0, 50.0, 50.0);
        select(&mut state, &[id]);

        begin_move(&mut state, Vec2::ZERO);
        update_drag(&mut state, Vec2::new(40.0, 0.0));
        cancel_drag(&mut state);
        assert_eq!(geometry(&state, id).x, 40.0);
        assert!(state.can_undo());

        begin_marquee(&mut state, Vec2::new(500.0, 500.0), false);
        update_drag(&mut state, Vec2::new(-100.0, -100.0));
        cancel_drag(&mut state);
        let selected: Vec<u64> = state.store.selection().selected_image_ids.iter().copied().collect();
        assert_eq!(selected, vec![id]);
    }
}
