//! Application Controller für zentrale Event-Verarbeitung.

use super::render_scene;
use super::{AppCommand, AppIntent, AppState};
use crate::shared::RenderScene;

/// Orchestriert UI-Events und Use-Cases auf den AppState.
#[derive(Default)]
pub struct AppController;

impl AppController {
    /// Erstellt einen neuen Controller.
    pub fn new() -> Self {
        Self
    }

    /// Verarbeitet einen Intent über Intent->Command Mapping.
    pub fn handle_intent(&mut self, state: &mut AppState, intent: AppIntent) -> anyhow::Result<()> {
        // Hit-Tests brauchen eine aktuelle sichtbare Menge
        state.refresh_visibility();
        let commands = self.map_intent_to_commands(state, intent);
        for command in commands {
            self.handle_command(state, command)?;
        }

        Ok(())
    }

    fn map_intent_to_commands(&self, state: &AppState, intent: AppIntent) -> Vec<AppCommand> {
        super::intent_mapping::map_intent_to_commands(state, intent)
    }

    /// Führt mutierende Commands auf dem AppState aus.
    /// Dispatcht an Feature-Handler in `handlers/`.
    pub fn handle_command(
        &mut self,
        state: &mut AppState,
        command: AppCommand,
    ) -> anyhow::Result<()> {
        state.command_log.record(&command);
        use super::handlers;

        match command {
            // === Kamera & Viewport ===
            AppCommand::SetViewportSize { size } => handlers::view::set_viewport_size(state, size),
            AppCommand::PanCamera { delta } => handlers::view::pan(state, delta),
            AppCommand::ZoomCamera {
                factor,
                focus_screen,
            } => handlers::view::zoom_towards(state, factor, focus_screen),
            AppCommand::ZoomIn => handlers::view::zoom_in(state),
            AppCommand::ZoomOut => handlers::view::zoom_out(state),
            AppCommand::ResetCamera => handlers::view::reset_camera(state),
            AppCommand::ZoomToFit => handlers::view::zoom_to_fit(state),

            // === Selektion ===
            AppCommand::SelectObject { target, additive } => {
                handlers::selection::select_object(state, target, additive)
            }
            AppCommand::SelectAll => handlers::selection::select_all(state),
            AppCommand::ClearSelection => handlers::selection::clear(state),

            // === Drag-Sessions ===
            AppCommand::BeginMove { world_pos } => handlers::selection::begin_move(state, world_pos),
            AppCommand::BeginResize {
                image_id,
                handle,
                world_pos,
            } => handlers::selection::begin_resize(state, image_id, handle, world_pos),
            AppCommand::BeginScaleSelection { handle, world_pos } => {
                handlers::selection::begin_scale_selection(state, handle, world_pos)
            }
            AppCommand::BeginMarquee {
                world_pos,
                additive,
            } => handlers::selection::begin_marquee(state, world_pos, additive),
            AppCommand::UpdateDrag { world_pos } => {
                handlers::selection::update_drag(state, world_pos)
            }
            AppCommand::EndDrag { world_pos } => handlers::selection::end_drag(state, world_pos),
            AppCommand::CancelDrag => handlers::selection::cancel_drag(state),

            // === Editing ===
            AppCommand::DeleteSelection => handlers::editing::delete_selected(state),
            AppCommand::BringToFront { target } => {
                handlers::editing::bring_to_front(state, target)
            }
            AppCommand::GroupSelection => handlers::editing::group_selection(state),
            AppCommand::UngroupSelection => handlers::editing::ungroup_selection(state),
            AppCommand::EnterGroupEditMode { group_id } => {
                handlers::editing::enter_group_edit_mode(state, group_id)
            }
            AppCommand::ExitGroupEditMode => handlers::editing::exit_group_edit_mode(state),
            AppCommand::RenameGroup { group_id, name } => {
                handlers::editing::rename_group(state, group_id, &name)
            }
            AppCommand::AlignSelection { spacing } => {
                handlers::editing::align_selection(state, spacing)
            }
            AppCommand::AssignRole { role } => handlers::editing::assign_role(state, role),
            AppCommand::ClearRoleForSelection => handlers::editing::clear_role(state),
            AppCommand::ClearActiveReference => handlers::editing::clear_active_reference(state),
            AppCommand::InsertImage {
                bitmap,
                size,
                world_pos,
            } => handlers::editing::insert_image(state, bitmap, size, world_pos)?,
            AppCommand::AttachMask { image_id, mask } => {
                handlers::editing::attach_mask(state, image_id, mask)?
            }

            // === History & Optionen ===
            AppCommand::Undo => handlers::history::undo(state),
            AppCommand::Redo => handlers::history::redo(state),
            AppCommand::ApplyOptions { options } => {
                handlers::options::apply_options(state, options)?
            }
            AppCommand::ResetOptions => handlers::options::reset_options(state)?,
        }

        state.refresh_visibility();
        Ok(())
    }

    /// Baut die Render-Szene für den aktuellen Frame.
    pub fn build_render_scene(&self, state: &AppState) -> RenderScene {
        render_scene::build(state)
    }
}
