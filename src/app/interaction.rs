//! Drag-Sessions (Verschieben, Resize, Skalieren, Auswahlrechteck).
//!
//! Eine Session hält die Start-Geometrie der betroffenen Objekte; jedes
//! Update berechnet die neue Geometrie aus `(aktueller − Startpunkt)` und
//! diesem Schnappschuss. Abbrechen beendet nur die Session.

use super::history::Snapshot;
use crate::core::{ObjectRef, Rect};
use glam::Vec2;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

/// Untergrenze für den Skalierfaktor beim Skalieren einer Mehrfach-Selektion.
pub const MIN_SELECTION_SCALE: f32 = 0.05;

/// Eck-Handle eines Rechtecks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    /// Oben links
    TopLeft,
    /// Oben rechts
    TopRight,
    /// Unten links
    BottomLeft,
    /// Unten rechts
    BottomRight,
}

impl ResizeHandle {
    /// Alle Handles in Prüf-Reihenfolge.
    pub const ALL: [ResizeHandle; 4] = [
        ResizeHandle::TopLeft,
        ResizeHandle::TopRight,
        ResizeHandle::BottomLeft,
        ResizeHandle::BottomRight,
    ];

    /// Position des Handles am Rechteck.
    pub fn corner(self, rect: &Rect) -> Vec2 {
        match self {
            ResizeHandle::TopLeft => rect.min(),
            ResizeHandle::TopRight => Vec2::new(rect.right(), rect.y),
            ResizeHandle::BottomLeft => Vec2::new(rect.x, rect.bottom()),
            ResizeHandle::BottomRight => rect.max(),
        }
    }

    /// Gegenüberliegende Ecke (bleibt beim Ziehen fix).
    pub fn anchor(self, rect: &Rect) -> Vec2 {
        self.opposite().corner(rect)
    }

    /// Diagonal gegenüberliegendes Handle.
    pub fn opposite(self) -> Self {
        match self {
            ResizeHandle::TopLeft => ResizeHandle::BottomRight,
            ResizeHandle::TopRight => ResizeHandle::BottomLeft,
            ResizeHandle::BottomLeft => ResizeHandle::TopRight,
            ResizeHandle::BottomRight => ResizeHandle::TopLeft,
        }
    }

    /// Sucht das Handle innerhalb von `radius` um `point`.
    pub fn hit(rect: &Rect, point: Vec2, radius: f32) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|handle| handle.corner(rect).distance(point) <= radius)
    }
}

/// Einheitlicher Skalierfaktor aus der Handle-Verschiebung.
///
/// Pro Achse `(pointer − anchor) / (corner − anchor)`, davon das Maximum;
/// entartete Achsen (Ausdehnung 0) werden ignoriert.
pub fn handle_scale(anchor: Vec2, corner: Vec2, pointer: Vec2) -> f32 {
    let extent = corner - anchor;
    let reach = pointer - anchor;
    let mut scale = f32::NEG_INFINITY;
    if extent.x.abs() > f32::EPSILON {
        scale = scale.max(reach.x / extent.x);
    }
    if extent.y.abs() > f32::EPSILON {
        scale = scale.max(reach.y / extent.y);
    }
    if scale.is_finite() {
        scale
    } else {
        1.0
    }
}

/// Aktive Drag-Session
#[derive(Debug, Clone, PartialEq)]
pub enum DragSession {
    /// Verschiebt Objekte um das Pointer-Delta
    Move {
        /// Startpunkt in Welt-Koordinaten
        start_world: Vec2,
        /// Start-Geometrie aller bewegten Objekte
        originals: Vec<(ObjectRef, Rect)>,
        /// Gruppe, deren Box am Ende an die Mitglieder angepasst wird
        refit_group: Option<u64>,
    },
    /// Ändert die Größe eines einzelnen Bildes (Seitenverhältnis bleibt)
    Resize {
        /// Bild-ID
        image_id: u64,
        /// Gezogenes Handle
        handle: ResizeHandle,
        /// Start-Geometrie
        original: Rect,
        /// Gruppe, deren Box am Ende angepasst wird
        refit_group: Option<u64>,
    },
    /// Skaliert eine heterogene Selektion um die gegenüberliegende Ecke
    ScaleSelection {
        /// Gezogenes Handle der Selektions-Box
        handle: ResizeHandle,
        /// Selektions-Box beim Start
        start_bounds: Rect,
        /// Start-Geometrie aller skalierten Objekte
        originals: Vec<(ObjectRef, Rect)>,
    },
    /// Auswahlrechteck
    Marquee {
        /// Startpunkt in Welt-Koordinaten
        start_world: Vec2,
        /// Aktueller Pointer in Welt-Koordinaten
        current_world: Vec2,
        /// Zur bestehenden Selektion hinzufügen
        additive: bool,
        /// Bild-Selektion beim Start
        base_images: IndexSet<u64>,
        /// Gruppen-Selektion beim Start
        base_groups: IndexSet<u64>,
    },
}

impl DragSession {
    /// Kurzer Name für Logs.
    pub fn kind(&self) -> &'static str {
        match self {
            DragSession::Move { .. } => "move",
            DragSession::Resize { .. } => "resize",
            DragSession::ScaleSelection { .. } => "scale",
            DragSession::Marquee { .. } => "marquee",
        }
    }

    /// Aktuelles Auswahlrechteck, falls eine Marquee-Session läuft.
    pub fn marquee_rect(&self) -> Option<Rect> {
        match self {
            DragSession::Marquee {
                start_world,
                current_world,
                ..
            } => Some(Rect::from_corners(*start_world, *current_world)),
            _ => None,
        }
    }
}

/// Interaktionszustand (laufende Drag-Session)
#[derive(Debug, Clone, Default)]
pub struct InteractionState {
    /// Aktive Session, falls ein Drag läuft
    pub drag: Option<DragSession>,
    /// Zustand vor Drag-Beginn; landet nur in der History, wenn der Drag etwas verändert hat
    pub pending_undo: Option<Snapshot>,
}

impl InteractionState {
    /// Erstellt einen Zustand ohne aktive Session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Gibt `true` zurück, wenn gerade gezogen wird.
    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    /// Startet eine Session und merkt sich den Zustand davor.
    pub fn begin(&mut self, session: DragSession, before: Snapshot) {
        self.drag = Some(session);
        self.pending_undo = Some(before);
    }

    /// Beendet die Session und gibt sie samt gemerktem Zustand zurück.
    pub fn finish(&mut self) -> Option<(DragSession, Option<Snapshot>)> {
        let session = self.drag.take()?;
        Some((session, self.pending_undo.take()))
    }

    /// Verwirft Session und gemerkten Zustand.
    pub fn reset(&mut self) {
        self.drag = None;
        self.pending_undo = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn handle_anchor_is_opposite_corner() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(ResizeHandle::BottomRight.anchor(&rect), Vec2::new(10.0, 20.0));
        assert_eq!(ResizeHandle::TopLeft.anchor(&rect), Vec2::new(110.0, 70.0));
        assert_eq!(ResizeHandle::TopRight.anchor(&rect), Vec2::new(10.0, 70.0));
    }

    #[test]
    fn hit_finds_corner_within_radius() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        assert_eq!(
            ResizeHandle::hit(&rect, Vec2::new(98.0, 103.0), 5.0),
            Some(ResizeHandle::BottomRight)
        );
        assert_eq!(ResizeHandle::hit(&rect, Vec2::new(50.0, 50.0), 5.0), None);
    }

    #[test]
    fn handle_scale_uses_dominant_axis() {
        let anchor = Vec2::ZERO;
        let corner = Vec2::new(100.0, 50.0);
        assert_relative_eq!(handle_scale(anchor, corner, Vec2::new(200.0, 60.0)), 2.0);
        assert_relative_eq!(handle_scale(anchor, corner, Vec2::new(110.0, 150.0)), 3.0);
    }

    #[test]
    fn handle_scale_respects_handle_direction() {
        // Handle oben links, Anker unten rechts
        let anchor = Vec2::new(100.0, 100.0);
        let corner = Vec2::ZERO;
        assert_relative_eq!(handle_scale(anchor, corner, Vec2::new(50.0, 50.0)), 0.5);
    }
}
