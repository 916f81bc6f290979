//! Application-Layer: Controller, State, Events und Use-Cases.

pub mod command_log;
pub mod controller;
pub mod events;
pub mod handlers;
pub mod history;
pub mod interaction;
mod intent_mapping;
pub mod render_scene;
/// Application State
///
/// Hält Objekt-Speicher, View, Drag-Session, History und Optionen.
pub mod state;
pub mod use_cases;

pub use crate::core::Camera2D;
pub use command_log::CommandLog;
pub use controller::AppController;
pub use events::{AppCommand, AppIntent};
pub use history::{EditHistory, Snapshot};
pub use interaction::{DragSession, InteractionState, ResizeHandle};
pub use render_scene::build as build_render_scene;
pub use state::{AppState, ViewState, DEFAULT_VIEWPORT_SIZE};
