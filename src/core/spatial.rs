//! Spatial-Index (KD-Tree) über Objekt-Mittelpunkte für Culling und Hit-Tests.

use glam::Vec2;
use kiddo::{KdTree, SquaredEuclidean};

use super::{CanvasStore, ObjectRef, Rect};

/// Ein indexiertes Objekt samt Bounding-Box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialEntry {
    /// Referenziertes Objekt
    pub object: ObjectRef,
    /// Achsen-alignierte Bounding-Box
    pub bounds: Rect,
}

/// Read-only Spatial-Index über allen Bildern und Gruppen eines `CanvasStore`.
///
/// Objekte sind Rechtecke, indexiert werden ihre Mittelpunkte. Rechteck-Abfragen
/// erweitern den Suchradius deshalb um die größte halbe Objekt-Diagonale und
/// prüfen danach exakt per AABB-Test.
#[derive(Debug, Clone)]
pub struct SpatialIndex {
    tree: KdTree<f64, 2>,
    entries: Vec<SpatialEntry>,
    max_half_diagonal: f32,
}

impl SpatialIndex {
    /// Erstellt einen leeren Spatial-Index.
    pub fn empty() -> Self {
        Self {
            tree: (&Vec::<[f64; 2]>::new()).into(),
            entries: Vec::new(),
            max_half_diagonal: 0.0,
        }
    }

    /// Baut einen neuen Index aus Bildern und Gruppen des Speichers.
    pub fn from_store(store: &CanvasStore) -> Self {
        let entries: Vec<SpatialEntry> = store
            .images()
            .values()
            .map(|image| SpatialEntry {
                object: ObjectRef::Image(image.id),
                bounds: image.geometry,
            })
            .chain(store.groups().values().map(|group| SpatialEntry {
                object: ObjectRef::Group(group.id),
                bounds: group.geometry,
            }))
            .collect();

        let points: Vec<[f64; 2]> = entries
            .iter()
            .map(|entry| {
                let center = entry.bounds.center();
                [center.x as f64, center.y as f64]
            })
            .collect();

        let tree: KdTree<f64, 2> = (&points).into();
        let max_half_diagonal = entries
            .iter()
            .map(|entry| entry.bounds.half_diagonal())
            .fold(0.0f32, f32::max);

        Self {
            tree,
            entries,
            max_half_diagonal,
        }
    }

    /// Gibt die Anzahl indexierter Objekte zurück.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Gibt `true` zurück, wenn keine Objekte im Index liegen.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Findet alle Objekte, deren Bounding-Box `rect` schneidet.
    pub fn intersecting(&self, rect: &Rect) -> Vec<SpatialEntry> {
        if self.is_empty() {
            return Vec::new();
        }

        let center = rect.center();
        // Kleiner Zuschlag, damit Kantenberührungen den Vorfilter sicher passieren
        let radius = (rect.half_diagonal() + self.max_half_diagonal) as f64 + 1e-3;

        self.tree
            .within::<SquaredEuclidean>(&[center.x as f64, center.y as f64], radius * radius)
            .into_iter()
            .filter_map(|found| {
                let entry = self.entries.get(found.item as usize)?;
                // Exakter AABB-Test nach dem KD-Tree-Vorfilter
                entry.bounds.intersects(rect).then_some(*entry)
            })
            .collect()
    }

    /// Findet alle Objekte, die den Weltpunkt enthalten.
    pub fn containing(&self, point: Vec2) -> Vec<SpatialEntry> {
        self.intersecting(&Rect::new(point.x, point.y, 0.0, 0.0))
            .into_iter()
            .filter(|entry| entry.bounds.contains_point(point))
            .collect()
    }
}
