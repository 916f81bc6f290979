//! Mapping von UI-Intents auf mutierende App-Commands.
//!
//! Pointer-Intents kommen in Screen-Koordinaten an und werden hier über die
//! Kamera in Welt-Koordinaten umgerechnet. Hit-Tests laufen gegen die zuletzt
//! berechnete sichtbare Menge.

use super::interaction::ResizeHandle;
use super::use_cases::selection::topmost_at;
use super::{AppCommand, AppIntent, AppState};
use crate::core::{ObjectRef, SelectionScope};
use glam::Vec2;

/// Übersetzt einen `AppIntent` in eine Sequenz ausführbarer `AppCommand`s.
pub fn map_intent_to_commands(state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
    let to_world = |screen: Vec2| state.view.camera.screen_to_world(screen);

    match intent {
        AppIntent::ViewportResized { size } => vec![AppCommand::SetViewportSize { size }],
        AppIntent::CameraPan { delta } => vec![AppCommand::PanCamera { delta }],
        AppIntent::CameraZoom {
            factor,
            focus_screen,
        } => vec![AppCommand::ZoomCamera {
            factor,
            focus_screen,
        }],
        AppIntent::ScrollZoom { steps, screen_pos } => {
            if steps == 0.0 || !steps.is_finite() {
                return Vec::new();
            }
            vec![AppCommand::ZoomCamera {
                factor: state.options.camera_scroll_zoom_step.powf(steps),
                focus_screen: Some(screen_pos),
            }]
        }
        AppIntent::ZoomInRequested => vec![AppCommand::ZoomIn],
        AppIntent::ZoomOutRequested => vec![AppCommand::ZoomOut],
        AppIntent::ResetCameraRequested => vec![AppCommand::ResetCamera],
        AppIntent::ZoomToFitRequested => vec![AppCommand::ZoomToFit],

        AppIntent::PointerPressed { screen_pos, shift } => {
            map_pointer_pressed(state, to_world(screen_pos), shift)
        }
        AppIntent::PointerDragged { screen_pos } => {
            if state.interaction.is_dragging() {
                vec![AppCommand::UpdateDrag {
                    world_pos: to_world(screen_pos),
                }]
            } else {
                Vec::new()
            }
        }
        AppIntent::PointerReleased { screen_pos } => {
            if state.interaction.is_dragging() {
                vec![AppCommand::EndDrag {
                    world_pos: to_world(screen_pos),
                }]
            } else {
                Vec::new()
            }
        }
        AppIntent::PointerDoubleClicked { screen_pos } => {
            match topmost_at(state, to_world(screen_pos), SelectionScope::Normal) {
                Some(ObjectRef::Group(group_id))
                    if state.store.scope() != SelectionScope::GroupEditing(group_id) =>
                {
                    vec![AppCommand::EnterGroupEditMode { group_id }]
                }
                _ => Vec::new(),
            }
        }
        AppIntent::EscapePressed => {
            if state.interaction.is_dragging() {
                vec![AppCommand::CancelDrag]
            } else if state.store.scope().editing_group().is_some() {
                vec![AppCommand::ExitGroupEditMode]
            } else {
                Vec::new()
            }
        }

        AppIntent::SelectAllRequested => vec![AppCommand::SelectAll],
        AppIntent::ClearSelectionRequested => vec![AppCommand::ClearSelection],
        AppIntent::DeleteSelectedRequested => vec![AppCommand::DeleteSelection],
        AppIntent::BringToFrontRequested => {
            // Aufsteigend nach Z-Order, damit die relative Reihenfolge erhalten bleibt
            let mut targets = state.store.selection().objects();
            targets.sort_by_key(|object| state.store.z_order_of(*object).unwrap_or(0));
            targets
                .into_iter()
                .map(|target| AppCommand::BringToFront { target })
                .collect()
        }

        AppIntent::GroupSelectionRequested => vec![AppCommand::GroupSelection],
        AppIntent::UngroupSelectionRequested => vec![AppCommand::UngroupSelection],
        AppIntent::EnterGroupEditRequested { group_id } => {
            vec![AppCommand::EnterGroupEditMode { group_id }]
        }
        AppIntent::ExitGroupEditRequested => vec![AppCommand::ExitGroupEditMode],
        AppIntent::RenameGroupRequested { group_id, name } => {
            vec![AppCommand::RenameGroup { group_id, name }]
        }

        AppIntent::AlignSelectionRequested => vec![AppCommand::AlignSelection {
            spacing: state.options.align_spacing,
        }],
        AppIntent::AssignRoleRequested { role } => vec![AppCommand::AssignRole { role }],
        AppIntent::ClearRoleRequested => vec![AppCommand::ClearRoleForSelection],
        AppIntent::ClearActiveReferenceRequested => vec![AppCommand::ClearActiveReference],

        AppIntent::InsertImageRequested {
            bitmap,
            size,
            world_pos,
        } => vec![AppCommand::InsertImage {
            bitmap,
            size,
            world_pos,
        }],
        AppIntent::AttachMaskRequested { image_id, mask } => {
            vec![AppCommand::AttachMask { image_id, mask }]
        }

        AppIntent::UndoRequested => vec![AppCommand::Undo],
        AppIntent::RedoRequested => vec![AppCommand::Redo],
        AppIntent::OptionsChanged { options } => vec![AppCommand::ApplyOptions { options }],
        AppIntent::ResetOptionsRequested => vec![AppCommand::ResetOptions],
    }
}

/// Primärtaste gedrückt: Handle, dann Objekt, sonst Auswahlrechteck.
fn map_pointer_pressed(state: &AppState, world_pos: Vec2, shift: bool) -> Vec<AppCommand> {
    let scope = state.store.scope();

    if !shift {
        let radius = state.options.handle_pick_radius_px / state.view.camera.zoom;
        if let Some(command) = handle_under_pointer(state, world_pos, radius) {
            return vec![command];
        }
    }

    let mut commands = Vec::new();
    if let SelectionScope::GroupEditing(group_id) = scope {
        if let Some(target) = topmost_at(state, world_pos, scope) {
            let selected = state.store.selection().contains(target);
            return select_and_move(target, selected, shift, world_pos);
        }
        // Klick außerhalb der Mitglieder: Modus verlassen, danach normal auswerten.
        // Nach dem Verlassen ist nur die Gruppe selektiert.
        commands.push(AppCommand::ExitGroupEditMode);
        if let Some(target) = topmost_at(state, world_pos, SelectionScope::Normal) {
            let selected = target == ObjectRef::Group(group_id);
            commands.extend(select_and_move(target, selected, shift, world_pos));
            return commands;
        }
        if !shift {
            commands.push(AppCommand::ClearSelection);
        }
    } else if let Some(target) = topmost_at(state, world_pos, scope) {
        let selected = state.store.selection().contains(target);
        return select_and_move(target, selected, shift, world_pos);
    } else if !shift && !state.store.selection().is_empty() {
        commands.push(AppCommand::ClearSelection);
    }

    commands.push(AppCommand::BeginMarquee {
        world_pos,
        additive: shift,
    });
    commands
}

/// Klick auf ein Objekt: selektieren und Verschieben beginnen.
/// Shift-Klick auf ein selektiertes Objekt entfernt es nur aus der Selektion.
fn select_and_move(target: ObjectRef, selected: bool, shift: bool, world_pos: Vec2) -> Vec<AppCommand> {
    let select = AppCommand::SelectObject {
        target,
        additive: shift,
    };
    if shift && selected {
        vec![select]
    } else {
        vec![select, AppCommand::BeginMove { world_pos }]
    }
}

/// Eck-Handle unter dem Pointer: Resize eines einzelnen Bildes oder Skalieren der Selektion.
fn handle_under_pointer(state: &AppState, world_pos: Vec2, radius: f32) -> Option<AppCommand> {
    let store = &state.store;
    let selection = store.selection();

    let single_image = match store.scope() {
        SelectionScope::Normal if selection.selected_group_ids.is_empty() => {
            single(selection.selected_image_ids.iter())
        }
        SelectionScope::GroupEditing(_) => single(selection.selected_image_ids.iter()),
        SelectionScope::Normal => None,
    };

    if let Some(image_id) = single_image {
        let image = store.image(image_id)?;
        let handle = ResizeHandle::hit(&image.geometry, world_pos, radius)?;
        return Some(AppCommand::BeginResize {
            image_id,
            handle,
            world_pos,
        });
    }

    if store.scope() != SelectionScope::Normal {
        return None;
    }
    let bounds = store.selection_bounds()?;
    let handle = ResizeHandle::hit(&bounds, world_pos, radius)?;
    Some(AppCommand::BeginScaleSelection { handle, world_pos })
}

fn single<'a>(mut ids: impl Iterator<Item = &'a u64>) -> Option<u64> {
    let first = *ids.next()?;
    ids.next().is_none().then_some(first)
}

#[cfg(test)]
mod tests;
