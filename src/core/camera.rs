//! 2D-Kamera (Viewport) für Pan und Zoom.
//!
//! Abbildung: `screen = world * zoom + pan`.

use super::Rect;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// 2D-Kamera mit Pan-Offset (Screen-Pixel) und Zoom-Faktor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Camera2D {
    /// Verschiebung des Welt-Ursprungs in Screen-Pixeln
    pub pan: Vec2,
    /// Zoom-Level (1.0 = eine Welteinheit pro Pixel)
    pub zoom: f32,
}

impl Camera2D {
    /// Minimaler Zoom-Faktor.
    pub const ZOOM_MIN: f32 = 0.05;
    /// Maximaler Zoom-Faktor.
    pub const ZOOM_MAX: f32 = 20.0;

    /// Erstellt eine neue Kamera
    pub fn new() -> Self {
        Self {
            pan: Vec2::ZERO,
            zoom: 1.0,
        }
    }

    /// Verschiebt die Kamera um ein Screen-Delta
    pub fn pan_by(&mut self, delta_screen: Vec2) {
        self.pan += delta_screen;
    }

    /// Ändert den Zoom-Level
    pub fn zoom_by(&mut self, factor: f32) {
        self.zoom_by_clamped(factor, Self::ZOOM_MIN, Self::ZOOM_MAX);
    }

    /// Ändert den Zoom-Level mit expliziten Grenzen.
    pub fn zoom_by_clamped(&mut self, factor: f32, min: f32, max: f32) {
        if !(factor.is_finite() && factor > 0.0) {
            return;
        }
        self.zoom = (self.zoom * factor).clamp(min, max);
    }

    /// Zoomt so, dass der Weltpunkt unter `focus_screen` an derselben Screen-Position bleibt.
    pub fn zoom_towards(&mut self, factor: f32, focus_screen: Vec2, min: f32, max: f32) {
        let focus_world = self.screen_to_world(focus_screen);
        self.zoom_by_clamped(factor, min, max);
        self.pan = focus_screen - focus_world * self.zoom;
    }

    /// Konvertiert Welt-Koordinaten zu Screen-Koordinaten.
    pub fn world_to_screen(&self, world: Vec2) -> Vec2 {
        world * self.zoom + self.pan
    }

    /// Konvertiert Screen-Koordinaten zu Welt-Koordinaten.
    pub fn screen_to_world(&self, screen: Vec2) -> Vec2 {
        (screen - self.pan) / self.zoom
    }

    /// Konvertiert ein Screen-Delta (z.B. Drag-Strecke) in Welteinheiten.
    pub fn screen_delta_to_world(&self, delta_screen: Vec2) -> Vec2 {
        delta_screen / self.zoom
    }

    /// Sichtbares Welt-Rechteck für einen Viewport inklusive Render-Rand in Pixeln.
    pub fn visible_world_rect(&self, viewport_size: [f32; 2], padding_px: f32) -> Rect {
        let left = (-self.pan.x - padding_px) / self.zoom;
        let top = (-self.pan.y - padding_px) / self.zoom;
        let right = (-self.pan.x + viewport_size[0] + padding_px) / self.zoom;
        let bottom = (-self.pan.y + viewport_size[1] + padding_px) / self.zoom;
        Rect::new(left, top, right - left, bottom - top)
    }

    /// Richtet die Kamera so aus, dass `bounds` mit Rand `margin_px` in den Viewport passt.
    pub fn fit_to(&mut self, bounds: &Rect, viewport_size: [f32; 2], margin_px: f32, min: f32, max: f32) {
        let avail_w = (viewport_size[0] - 2.0 * margin_px).max(1.0);
        let avail_h = (viewport_size[1] - 2.0 * margin_px).max(1.0);
        let zoom_x = avail_w / bounds.width.max(1.0);
        let zoom_y = avail_h / bounds.height.max(1.0);
        self.zoom = zoom_x.min(zoom_y).clamp(min, max);
        let viewport_center = Vec2::new(viewport_size[0], viewport_size[1]) * 0.5;
        self.pan = viewport_center - bounds.center() * self.zoom;
    }
}

impl Default for Camera2D {
    fn default() -> Self {
        Self::new()
    }
}
