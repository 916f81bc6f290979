//! Builder für Render-Szenen aus dem AppState.

use crate::app::AppState;
use crate::core::{ImageObject, ObjectRef, Rect, SelectionScope};
use crate::shared::{RenderImage, RenderItem, RenderScene};

/// Baut eine RenderScene aus dem aktuellen AppState.
///
/// Grundlage ist die zuletzt berechnete sichtbare Menge (der Controller
/// aktualisiert sie nach jedem Command). Sichtbare Mitglieder einer nicht
/// sichtbaren Gruppe werden als lose Bilder gezeichnet.
pub fn build(state: &AppState) -> RenderScene {
    let store = &state.store;
    let visible = state.visible();
    let selection = store.selection();
    let editing = store.scope().editing_group();

    let render_image = |image: &ImageObject| RenderImage {
        id: image.id,
        bitmap: image.bitmap.clone(),
        geometry: image.geometry,
        z_order: image.z_order,
        role: image.role,
        reference_index: image.reference_index,
        mask: image.mask.clone(),
        selected: selection.contains(ObjectRef::Image(image.id)),
    };

    let mut items: Vec<RenderItem> = Vec::with_capacity(visible.len());

    for group in visible.groups.iter().filter_map(|id| store.group(*id)) {
        let mut members: Vec<RenderImage> = group
            .member_ids
            .iter()
            .filter(|id| visible.images.contains(*id))
            .filter_map(|id| store.image(*id))
            .map(render_image)
            .collect();
        members.sort_by_key(|member| member.z_order);

        items.push(RenderItem::Group {
            id: group.id,
            name: group.name.clone(),
            geometry: group.geometry,
            z_order: group.z_order,
            selected: selection.contains(ObjectRef::Group(group.id)),
            editing: editing == Some(group.id),
            members,
        });
    }

    for image in visible.images.iter().filter_map(|id| store.image(*id)) {
        let drawn_in_group = image
            .group_id
            .is_some_and(|group_id| visible.groups.contains(&group_id));
        if !drawn_in_group {
            items.push(RenderItem::Image(render_image(image)));
        }
    }

    items.sort_by_key(RenderItem::z_order);

    let marquee = state
        .interaction
        .drag
        .as_ref()
        .and_then(|drag| drag.marquee_rect());

    RenderScene {
        camera: state.view.camera,
        viewport_size: state.view.viewport_size,
        items,
        selection_bounds: match store.scope() {
            SelectionScope::Normal => store.selection_bounds(),
            // Im Bearbeitungsmodus nur die Mitglieder-Selektion
            SelectionScope::GroupEditing(_) => Rect::union_all(
                selection
                    .selected_image_ids
                    .iter()
                    .filter_map(|id| store.image(*id))
                    .map(|image| &image.geometry),
            ),
        },
        marquee,
        scope: store.scope(),
        active_reference_index: store.active_reference_index(),
        visible_count: visible.len(),
        total_count: store.image_count() + store.group_count(),
    }
}

#[cfg(test)]
mod tests {
    use super::build;
    use crate::app::AppState;
    use crate::core::BitmapHandle;
    use crate::shared::RenderItem;
    use glam::Vec2;

    fn insert(state: &mut AppState, x: f32, y: f32) -> u64 {
        state
            .store
            .insert_image(
                BitmapHandle::new(format!("img-{x}-{y}")).expect("gültiger Handle"),
                Vec2::splat(100.0),
                Some(Vec2::new(x, y)),
                0.0,
            )
            .expect("Einfügen erwartet")
    }

    #[test]
    fn items_are_sorted_by_z_order_and_nest_members() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0);
        let b = insert(&mut state, 200.0, 0.0);
        let c = insert(&mut state, 400.0, 0.0);
        state.store.set_selected_images(|sel| {
            sel.insert(a);
            sel.insert(b);
        });
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        state.store.bring_to_front(crate::core::ObjectRef::Image(c));
        state.refresh_visibility();

        let scene = build(&state);

        assert_eq!(scene.items.len(), 2);
        assert!(matches!(&scene.items[0], RenderItem::Group { id, members, selected: true, .. }
            if *id == group_id && members.len() == 2));
        assert!(matches!(&scene.items[1], RenderItem::Image(image) if image.id == c));
        assert_eq!(scene.image_ids(), vec![a, b, c]);
        assert_eq!(scene.total_count, 4);
    }

    #[test]
    fn culled_objects_are_not_drawn() {
        let mut state = AppState::new();
        insert(&mut state, 0.0, 0.0);
        insert(&mut state, 50_000.0, 0.0);
        state.refresh_visibility();

        let scene = build(&state);

        assert_eq!(scene.items.len(), 1);
        assert_eq!(scene.visible_count, 1);
        assert_eq!(scene.total_count, 2);
    }

    #[test]
    fn group_carries_only_visible_members() {
        let mut state = AppState::new();
        let a = insert(&mut state, 0.0, 0.0);
        let b = insert(&mut state, 3000.0, 0.0);
        state.store.set_selected_images(|sel| {
            sel.insert(a);
            sel.insert(b);
        });
        let group_id = state.store.group_selection().expect("Gruppe erwartet");
        // Viewport zeigt nur den rechten Teil der Gruppen-Box
        state.view.camera.pan = Vec2::new(-2900.0, 0.0);
        state.refresh_visibility();

        let scene = build(&state);

        assert_eq!(scene.items.len(), 1);
        assert!(matches!(&scene.items[0], RenderItem::Group { id, .. } if *id == group_id));
        assert_eq!(scene.image_ids(), vec![b]);
        assert_eq!(scene.visible_count, 2);
    }
}
