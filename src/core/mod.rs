//! Core-Domänentypen: Bilder, Gruppen, Selektion, Objekt-Speicher, Kamera, Culling.

pub mod camera;
pub mod culling;
pub mod geometry;
pub mod group;
/// Core-Datenmodelle der Kompositionsfläche
///
/// - ImageObject: platziertes Bild mit Rolle und optionaler Gruppe
/// - BitmapHandle: opaker Verweis auf Quell-Pixel
/// - ImageRole: semantische Rolle für die Generierungs-Pipeline
pub mod image;
pub mod layout;
pub mod selection;
pub mod spatial;
pub mod store;

pub use camera::Camera2D;
pub use culling::{visible_set, CullingCache, VisibleSet, SPATIAL_INDEX_THRESHOLD};
pub use geometry::Rect;
pub use group::{GroupObject, GroupPatch, MIN_GROUP_MEMBERS};
pub use image::{BitmapHandle, ImageObject, ImagePatch, ImageRole};
pub use selection::{ObjectRef, SelectionScope, SelectionState};
pub use spatial::{SpatialEntry, SpatialIndex};
pub use store::{
    CanvasStore, GenerationInputs, SceneSnapshot, TaggedImage, DEFAULT_GROUP_PADDING,
};
