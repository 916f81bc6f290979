use crate::app::interaction::ResizeHandle;
use crate::app::{AppCommand, AppIntent, AppState};
use crate::core::{BitmapHandle, ObjectRef, SelectionScope};
use glam::Vec2;

use super::map_intent_to_commands;

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

fn press(state: &AppState, x: f32, y: f32, shift: bool) -> Vec<AppCommand> {
    map_intent_to_commands(
        state,
        AppIntent::PointerPressed {
            screen_pos: Vec2::new(x, y),
            shift,
        },
    )
}

/// Zwei gruppierte Bilder (0,0) und (200,0) plus ein loses bei (0,300), je 100².
fn grouped_scene() -> (AppState, [u64; 3], u64) {
    let mut state = AppState::new();
    let a = insert(&mut state, 0.0, 0.0, 100.0);
    let b = insert(&mut state, 200.0, 0.0, 100.0);
    let loose = insert(&mut state, 0.0, 300.0, 100.0);
    state.store.set_selected_images(|sel| {
        sel.insert(a);
        sel.insert(b);
    });
    let group_id = state.store.group_selection().expect("Gruppe erwartet");
    state.store.set_selected_groups(|sel| sel.clear());
    state.refresh_visibility();
    (state, [a, b, loose], group_id)
}

#[test]
fn undo_redo_map_one_to_one() {
    let state = AppState::new();

    assert_eq!(
        map_intent_to_commands(&state, AppIntent::UndoRequested),
        vec![AppCommand::Undo]
    );
    assert_eq!(
        map_intent_to_commands(&state, AppIntent::RedoRequested),
        vec![AppCommand::Redo]
    );
}

#[test]
fn scroll_zoom_maps_to_zoom_around_pointer() {
    let state = AppState::new();
    let step = state.options.camera_scroll_zoom_step;

    let commands = map_intent_to_commands(
        &state,
        AppIntent::ScrollZoom {
            steps: 1.0,
            screen_pos: Vec2::new(40.0, 50.0),
        },
    );

    assert_eq!(
        commands,
        vec![AppCommand::ZoomCamera {
            factor: step,
            focus_screen: Some(Vec2::new(40.0, 50.0)),
        }]
    );
}

#[test]
fn press_on_loose_image_selects_and_begins_move() {
    let (state, [_, _, loose], _) = grouped_scene();

    let commands = press(&state, 50.0, 350.0, false);

    assert_eq!(
        commands,
        vec![
            AppCommand::SelectObject {
                target: ObjectRef::Image(loose),
                additive: false,
            },
            AppCommand::BeginMove {
                world_pos: Vec2::new(50.0, 350.0),
            },
        ]
    );
}

#[test]
fn press_uses_camera_transform() {
    let (mut state, [_, _, loose], _) = grouped_scene();
    state.view.camera.pan = Vec2::new(100.0, 0.0);
    state.view.camera.zoom = 2.0;
    state.refresh_visibility();

    // Screen (200, 700) → Welt (50, 350)
    let commands = press(&state, 200.0, 700.0, false);

    assert!(matches!(
        commands.first(),
        Some(AppCommand::SelectObject { target, .. }) if *target == ObjectRef::Image(loose)
    ));
}

#[test]
fn press_on_member_targets_group_in_normal_scope() {
    let (state, _, group_id) = grouped_scene();

    let commands = press(&state, 250.0, 50.0, false);

    assert!(matches!(
        commands.first(),
        Some(AppCommand::SelectObject { target: ObjectRef::Group(id), additive: false }) if *id == group_id
    ));
}

#[test]
fn shift_press_on_selected_object_only_toggles() {
    let (mut state, [_, _, loose], _) = grouped_scene();
    state.store.set_selected_images(|sel| {
        sel.insert(loose);
    });

    let commands = press(&state, 50.0, 350.0, true);

    assert_eq!(
        commands,
        vec![AppCommand::SelectObject {
            target: ObjectRef::Image(loose),
            additive: true,
        }]
    );
}

#[test]
fn press_on_empty_space_clears_and_starts_marquee() {
    let (mut state, [_, _, loose], _) = grouped_scene();
    state.store.set_selected_images(|sel| {
        sel.insert(loose);
    });

    let commands = press(&state, 800.0, 600.0, false);

    assert_eq!(
        commands,
        vec![
            AppCommand::ClearSelection,
            AppCommand::BeginMarquee {
                world_pos: Vec2::new(800.0, 600.0),
                additive: false,
            },
        ]
    );
}

#[test]
fn shift_press_on_empty_space_keeps_selection() {
    let (state, _, _) = grouped_scene();

    let commands = press(&state, 800.0, 600.0, true);

    assert_eq!(
        commands,
        vec![AppCommand::BeginMarquee {
            world_pos: Vec2::new(800.0, 600.0),
            additive: true,
        }]
    );
}

#[test]
fn press_in_edit_mode_selects_member() {
    let (mut state, [a, _, _], group_id) = grouped_scene();
    state.store.enter_group_edit_mode(group_id);

    let commands = press(&state, 50.0, 50.0, false);

    assert_eq!(
        commands.first(),
        Some(&AppCommand::SelectObject {
            target: ObjectRef::Image(a),
            additive: false,
        })
    );
}

#[test]
fn press_outside_edited_group_exits_then_picks() {
    let (mut state, [_, _, loose], group_id) = grouped_scene();
    state.store.enter_group_edit_mode(group_id);

    let commands = press(&state, 50.0, 350.0, false);

    assert_eq!(commands[0], AppCommand::ExitGroupEditMode);
    assert_eq!(
        commands[1],
        AppCommand::SelectObject {
            target: ObjectRef::Image(loose),
            additive: false,
        }
    );
}

#[test]
fn press_on_corner_of_single_selected_image_begins_resize() {
    let (mut state, [_, _, loose], _) = grouped_scene();
    state.store.set_selected_images(|sel| {
        sel.insert(loose);
    });

    let commands = press(&state, 103.0, 398.0, false);

    assert_eq!(
        commands,
        vec![AppCommand::BeginResize {
            image_id: loose,
            handle: ResizeHandle::BottomRight,
            world_pos: Vec2::new(103.0, 398.0),
        }]
    );
}

#[test]
fn press_on_selection_box_corner_begins_scale() {
    let (mut state, [_, _, loose], group_id) = grouped_scene();
    state.store.set_selected_groups(|sel| {
        sel.insert(group_id);
    });
    state.store.set_selected_images(|sel| {
        sel.insert(loose);
    });
    let bounds = state.store.selection_bounds().expect("Selektion erwartet");

    let corner = bounds.max();
    let commands = press(&state, corner.x, corner.y, false);

    assert_eq!(
        commands,
        vec![AppCommand::BeginScaleSelection {
            handle: ResizeHandle::BottomRight,
            world_pos: corner,
        }]
    );
}

#[test]
fn drag_and_release_only_map_during_session() {
    let state = AppState::new();

    assert!(map_intent_to_commands(
        &state,
        AppIntent::PointerDragged {
            screen_pos: Vec2::ZERO
        }
    )
    .is_empty());
    assert!(map_intent_to_commands(
        &state,
        AppIntent::PointerReleased {
            screen_pos: Vec2::ZERO
        }
    )
    .is_empty());
}

#[test]
fn double_click_on_group_enters_edit_mode() {
    let (state, _, group_id) = grouped_scene();

    let commands = map_intent_to_commands(
        &state,
        AppIntent::PointerDoubleClicked {
            screen_pos: Vec2::new(250.0, 50.0),
        },
    );

    assert_eq!(commands, vec![AppCommand::EnterGroupEditMode { group_id }]);
}

#[test]
fn escape_exits_edit_mode_when_idle() {
    let (mut state, _, group_id) = grouped_scene();
    assert!(map_intent_to_commands(&state, AppIntent::EscapePressed).is_empty());

    state.store.enter_group_edit_mode(group_id);
    assert_eq!(state.store.scope(), SelectionScope::GroupEditing(group_id));

    assert_eq!(
        map_intent_to_commands(&state, AppIntent::EscapePressed),
        vec![AppCommand::ExitGroupEditMode]
    );
}

#[test]
fn bring_to_front_keeps_relative_order() {
    let (mut state, [_, _, loose], group_id) = grouped_scene();
    state.store.set_selected_images(|sel| {
        sel.insert(loose);
    });
    state.store.set_selected_groups(|sel| {
        sel.insert(group_id);
    });

    let commands = map_intent_to_commands(&state, AppIntent::BringToFrontRequested);

    // Das lose Bild wurde vor der Gruppe angelegt und liegt daher darunter
    assert_eq!(
        commands,
        vec![
            AppCommand::BringToFront {
                target: ObjectRef::Image(loose),
            },
            AppCommand::BringToFront {
                target: ObjectRef::Group(group_id),
            },
        ]
    );
}

#[test]
fn align_uses_configured_spacing() {
    let mut state = AppState::new();
    state.options.align_spacing = 9.0;

    assert_eq!(
        map_intent_to_commands(&state, AppIntent::AlignSelectionRequested),
        vec![AppCommand::AlignSelection { spacing: 9.0 }]
    );
}
