//! Achsen-alignierte Rechtecke in Welt-Koordinaten.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Achsen-aligniertes Rechteck (x/y = obere linke Ecke, Y wächst nach unten).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Linke Kante
    pub x: f32,
    /// Obere Kante
    pub y: f32,
    /// Breite (>= 0)
    pub width: f32,
    /// Höhe (>= 0)
    pub height: f32,
}

impl Rect {
    /// Erstellt ein Rechteck aus Position und Größe.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Erstellt ein Rechteck aus zwei beliebigen Eckpunkten.
    pub fn from_corners(a: Vec2, b: Vec2) -> Self {
        let min = a.min(b);
        let max = a.max(b);
        Self::new(min.x, min.y, max.x - min.x, max.y - min.y)
    }

    /// Obere linke Ecke.
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Untere rechte Ecke.
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.right(), self.bottom())
    }

    /// Größe als Vektor.
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Mittelpunkt.
    pub fn center(&self) -> Vec2 {
        self.min() + self.size() * 0.5
    }

    /// Rechte Kante.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Untere Kante.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Halbe Diagonale (Radius des umschließenden Kreises).
    pub fn half_diagonal(&self) -> f32 {
        self.size().length() * 0.5
    }

    /// Verschiebt das Rechteck um `delta`.
    pub fn translated(&self, delta: Vec2) -> Self {
        Self::new(self.x + delta.x, self.y + delta.y, self.width, self.height)
    }

    /// Vergrößert das Rechteck an allen Seiten um `amount`.
    pub fn expanded(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + 2.0 * amount,
            self.height + 2.0 * amount,
        )
    }

    /// Kleinstes Rechteck, das beide Rechtecke umschließt.
    pub fn union(&self, other: &Rect) -> Self {
        Self::from_corners(self.min().min(other.min()), self.max().max(other.max()))
    }

    /// Vereinigung beliebig vieler Rechtecke (`None` bei leerer Eingabe).
    pub fn union_all<'a>(rects: impl IntoIterator<Item = &'a Rect>) -> Option<Rect> {
        rects
            .into_iter()
            .fold(None, |acc: Option<Rect>, r| match acc {
                Some(a) => Some(a.union(r)),
                None => Some(*r),
            })
    }

    /// Separating-Axis-Test auf beiden Achsen (Berührung zählt als Überlappung).
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x <= other.right()
            && other.x <= self.right()
            && self.y <= other.bottom()
            && other.y <= self.bottom()
    }

    /// Prüft ob ein Punkt im Rechteck liegt (inklusive Rand).
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x <= self.right() && point.y >= self.y && point.y <= self.bottom()
    }

    /// Prüft ob `other` vollständig in diesem Rechteck liegt.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }

    /// Skaliert Position und Größe um einen Anker.
    ///
    /// `newPos = anchor + (oldPos - anchor) * scale`, `newSize = oldSize * scale`.
    pub fn scaled_about(&self, anchor: Vec2, scale: f32) -> Self {
        let pos = anchor + (self.min() - anchor) * scale;
        Self::new(pos.x, pos.y, self.width * scale, self.height * scale)
    }
}
