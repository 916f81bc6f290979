//! Canvas Composer Library.
//! Szenen-Engine als Library exportiert für Tests, Hosts und Wiederverwendung.

pub mod app;
pub mod core;
pub mod shared;

pub use app::{AppCommand, AppController, AppIntent, AppState, CommandLog, ViewState};
pub use core::{
    BitmapHandle, CanvasStore, GenerationInputs, GroupObject, ImageObject, ImageRole, ObjectRef,
    SceneSnapshot, SelectionScope, SelectionState,
};
pub use core::{Camera2D, Rect, SpatialIndex, VisibleSet};
pub use shared::{EditorOptions, RenderItem, RenderScene};
