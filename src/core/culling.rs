//! Viewport-Culling: filtert die Render-Menge auf sichtbare Objekte.

use super::{Camera2D, CanvasStore, ObjectRef, Rect, SpatialIndex};
use indexmap::IndexSet;

/// Ab dieser Objektanzahl wird der KD-Tree statt eines linearen Scans genutzt.
pub const SPATIAL_INDEX_THRESHOLD: usize = 512;

/// Sichtbare Objekte in Sammlungs-Reihenfolge
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VisibleSet {
    /// Sichtbare Bild-IDs
    pub images: IndexSet<u64>,
    /// Sichtbare Gruppen-IDs
    pub groups: IndexSet<u64>,
    /// Für die Berechnung verwendetes Welt-Rechteck
    pub world_rect: Rect,
}

impl VisibleSet {
    /// Prüft ob ein Objekt sichtbar ist.
    pub fn contains(&self, object: ObjectRef) -> bool {
        match object {
            ObjectRef::Image(id) => self.images.contains(&id),
            ObjectRef::Group(id) => self.groups.contains(&id),
        }
    }

    /// Anzahl sichtbarer Objekte.
    pub fn len(&self) -> usize {
        self.images.len() + self.groups.len()
    }

    /// Gibt `true` zurück, wenn nichts sichtbar ist.
    pub fn is_empty(&self) -> bool {
        self.images.is_empty() && self.groups.is_empty()
    }
}

/// Berechnet die sichtbare Menge per linearem AABB-Scan.
pub fn visible_set(
    store: &CanvasStore,
    camera: &Camera2D,
    viewport_size: [f32; 2],
    padding_px: f32,
) -> VisibleSet {
    let world_rect = camera.visible_world_rect(viewport_size, padding_px);
    VisibleSet {
        images: store
            .images()
            .values()
            .filter(|image| image.geometry.intersects(&world_rect))
            .map(|image| image.id)
            .collect(),
        groups: store
            .groups()
            .values()
            .filter(|group| group.geometry.intersects(&world_rect))
            .map(|group| group.id)
            .collect(),
        world_rect,
    }
}

/// Berechnet die sichtbare Menge über einen Spatial-Index (gleiches Ergebnis wie [`visible_set`]).
pub fn visible_set_indexed(
    store: &CanvasStore,
    index: &SpatialIndex,
    camera: &Camera2D,
    viewport_size: [f32; 2],
    padding_px: f32,
) -> VisibleSet {
    let world_rect = camera.visible_world_rect(viewport_size, padding_px);
    let mut images = Vec::new();
    let mut groups = Vec::new();
    for entry in index.intersecting(&world_rect) {
        match entry.object {
            ObjectRef::Image(id) => {
                if let Some(position) = store.images().get_index_of(&id) {
                    images.push((position, id));
                }
            }
            ObjectRef::Group(id) => {
                if let Some(position) = store.groups().get_index_of(&id) {
                    groups.push((position, id));
                }
            }
        }
    }
    images.sort_unstable();
    groups.sort_unstable();

    VisibleSet {
        images: images.into_iter().map(|(_, id)| id).collect(),
        groups: groups.into_iter().map(|(_, id)| id).collect(),
        world_rect,
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct CullKey {
    revision: u64,
    camera: Camera2D,
    viewport_size: [f32; 2],
    padding_px: f32,
}

/// Cache für die sichtbare Menge, neu berechnet bei Pan, Zoom, Viewport- oder Inhaltsänderung.
#[derive(Debug, Clone, Default)]
pub struct CullingCache {
    key: Option<CullKey>,
    visible: VisibleSet,
    index: Option<(u64, SpatialIndex)>,
}

impl CullingCache {
    /// Erstellt einen leeren Cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Zuletzt berechnete sichtbare Menge.
    pub fn current(&self) -> &VisibleSet {
        &self.visible
    }

    /// Spatial-Index, falls er für genau diese Store-Revision gebaut wurde.
    pub fn spatial_index(&self, store: &CanvasStore) -> Option<&SpatialIndex> {
        match &self.index {
            Some((revision, index)) if *revision == store.revision() => Some(index),
            _ => None,
        }
    }

    /// Verwirft den Cache.
    pub fn invalidate(&mut self) {
        self.key = None;
        self.index = None;
    }

    /// Liefert die sichtbare Menge und berechnet sie nur bei geändertem Schlüssel neu.
    pub fn refresh(
        &mut self,
        store: &CanvasStore,
        camera: &Camera2D,
        viewport_size: [f32; 2],
        padding_px: f32,
    ) -> &VisibleSet {
        let key = CullKey {
            revision: store.revision(),
            camera: *camera,
            viewport_size,
            padding_px,
        };
        if self.key == Some(key) {
            return &self.visible;
        }

        let object_count = store.image_count() + store.group_count();
        self.visible = if object_count >= SPATIAL_INDEX_THRESHOLD {
            let fresh = matches!(&self.index, Some((revision, _)) if *revision == store.revision());
            if !fresh {
                self.index = Some((store.revision(), SpatialIndex::from_store(store)));
            }
            match &self.index {
                Some((_, index)) => {
                    visible_set_indexed(store, index, camera, viewport_size, padding_px)
                }
                None => visible_set(store, camera, viewport_size, padding_px),
            }
        } else {
            self.index = None;
            visible_set(store, camera, viewport_size, padding_px)
        };
        self.key = Some(key);

        log::debug!(
            "Culling: {} von {} Objekten sichtbar",
            self.visible.len(),
            object_count
        );
        &self.visible
    }
}
