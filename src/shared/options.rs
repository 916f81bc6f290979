//! Zentrale Konfiguration für den Canvas Composer.
//!
//! `EditorOptions` enthält alle zur Laufzeit änderbaren Werte.
//! Die `const`-Werte bleiben als Fallback/Default erhalten.

use serde::{Deserialize, Serialize};

// ── Kamera ──────────────────────────────────────────────────────────

/// Minimaler Zoom-Faktor.
pub const CAMERA_ZOOM_MIN: f32 = 0.05;
/// Maximaler Zoom-Faktor.
pub const CAMERA_ZOOM_MAX: f32 = 20.0;
/// Zoom-Schritt bei stufenweisem Zoom (Menü-Buttons / Shortcuts).
pub const CAMERA_ZOOM_STEP: f32 = 1.2;
/// Zoom-Schritt bei Mausrad-Scroll.
pub const CAMERA_SCROLL_ZOOM_STEP: f32 = 1.1;
/// Rand in Screen-Pixeln beim Zoom-auf-Inhalt.
pub const CAMERA_FIT_MARGIN_PX: f32 = 40.0;

// ── Culling ─────────────────────────────────────────────────────────

/// Zusätzlicher Rand (Screen-Pixel) um den Viewport beim Culling.
pub const CULL_PADDING_PX: f32 = 200.0;

// ── Gruppen & Layout ────────────────────────────────────────────────

/// Innenabstand der Gruppen-Boxen und Abstand beim Repack (Welteinheiten).
pub const GROUP_PADDING: f32 = 20.0;
/// Abstand zwischen Spalten und Zeilen beim Ausrichten.
pub const ALIGN_SPACING: f32 = 16.0;
/// Abstand neu eingefügter Bilder zum bestehenden Inhalt.
pub const INSERT_SPACING: f32 = 24.0;

// ── Interaktion ─────────────────────────────────────────────────────

/// Minimale Bildbreite beim Resize (Welteinheiten).
pub const MIN_IMAGE_SIZE: f32 = 16.0;
/// Greif-Radius der Resize-Handles in Screen-Pixeln.
pub const HANDLE_PICK_RADIUS_PX: f32 = 8.0;

// ── History ─────────────────────────────────────────────────────────

/// Maximale Anzahl Undo-Schritte.
pub const HISTORY_DEPTH: usize = 200;

// ── Laufzeit-Optionen (serialisierbar) ─────────────────────────────

/// Alle zur Laufzeit änderbaren Editor-Optionen.
/// Wird als `canvas_composer.toml` neben der Binary gespeichert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorOptions {
    // ── Gruppen & Layout ────────────────────────────────────────
    /// Innenabstand der Gruppen-Boxen
    pub group_padding: f32,
    /// Abstand beim Ausrichten
    pub align_spacing: f32,
    /// Abstand beim automatischen Einfügen
    #[serde(default = "default_insert_spacing")]
    pub insert_spacing: f32,

    // ── Culling ─────────────────────────────────────────────────
    /// Render-Rand um den Viewport in Screen-Pixeln
    pub cull_padding_px: f32,

    // ── Kamera ──────────────────────────────────────────────────
    /// Minimaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_min: f32,
    /// Maximaler Zoom-Faktor (konfigurierbar)
    pub camera_zoom_max: f32,
    /// Zoom-Schritt bei Menü-Buttons / Shortcuts
    pub camera_zoom_step: f32,
    /// Zoom-Schritt bei Mausrad-Scroll
    pub camera_scroll_zoom_step: f32,
    /// Rand beim Zoom-auf-Inhalt
    #[serde(default = "default_camera_fit_margin_px")]
    pub camera_fit_margin_px: f32,

    // ── Interaktion ─────────────────────────────────────────────
    /// Minimale Bildbreite beim Resize
    #[serde(default = "default_min_image_size")]
    pub min_image_size: f32,
    /// Greif-Radius der Resize-Handles in Screen-Pixeln
    #[serde(default = "default_handle_pick_radius_px")]
    pub handle_pick_radius_px: f32,

    // ── History ─────────────────────────────────────────────────
    /// Maximale Undo-Tiefe
    #[serde(default = "default_history_depth")]
    pub history_depth: usize,
}

impl Default for EditorOptions {
    fn default() -> Self {
        Self {
            group_padding: GROUP_PADDING,
            align_spacing: ALIGN_SPACING,
            insert_spacing: INSERT_SPACING,

            cull_padding_px: CULL_PADDING_PX,

            camera_zoom_min: CAMERA_ZOOM_MIN,
            camera_zoom_max: CAMERA_ZOOM_MAX,
            camera_zoom_step: CAMERA_ZOOM_STEP,
            camera_scroll_zoom_step: CAMERA_SCROLL_ZOOM_STEP,
            camera_fit_margin_px: CAMERA_FIT_MARGIN_PX,

            min_image_size: MIN_IMAGE_SIZE,
            handle_pick_radius_px: HANDLE_PICK_RADIUS_PX,

            history_depth: HISTORY_DEPTH,
        }
    }
}

/// Serde-Default für `insert_spacing` (Abwärtskompatibilität bestehender TOML-Dateien).
fn default_insert_spacing() -> f32 {
    INSERT_SPACING
}

fn default_camera_fit_margin_px() -> f32 {
    CAMERA_FIT_MARGIN_PX
}

fn default_min_image_size() -> f32 {
    MIN_IMAGE_SIZE
}

fn default_handle_pick_radius_px() -> f32 {
    HANDLE_PICK_RADIUS_PX
}

fn default_history_depth() -> usize {
    HISTORY_DEPTH
}

impl EditorOptions {
    /// Lädt Optionen aus einer TOML-Datei. Bei Fehler: Standardwerte.
    pub fn load_from_file(path: &std::path::Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str::<Self>(&content) {
                Ok(opts) => {
                    log::info!("Optionen geladen aus: {}", path.display());
                    opts.sanitized()
                }
                Err(e) => {
                    log::warn!("Optionen-Datei fehlerhaft, verwende Standardwerte: {}", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Keine Optionen-Datei gefunden, verwende Standardwerte");
                Self::default()
            }
        }
    }

    /// Speichert Optionen als TOML-Datei.
    pub fn save_to_file(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        log::info!("Optionen gespeichert nach: {}", path.display());
        Ok(())
    }

    /// Ermittelt den Pfad zur Optionen-Datei neben der Binary.
    pub fn config_path() -> std::path::PathBuf {
        std::env::current_exe()
            .unwrap_or_else(|_| std::path::PathBuf::from("canvas_composer"))
            .parent()
            .unwrap_or_else(|| std::path::Path::new("."))
            .join("canvas_composer.toml")
    }

    /// Korrigiert unbrauchbare Werte (negative Abstände, vertauschte Zoom-Grenzen).
    pub fn sanitized(mut self) -> Self {
        let defaults = Self::default();
        self.group_padding = self.group_padding.max(0.0);
        self.align_spacing = self.align_spacing.max(0.0);
        self.insert_spacing = self.insert_spacing.max(0.0);
        self.cull_padding_px = self.cull_padding_px.max(0.0);
        if !(self.camera_zoom_min > 0.0 && self.camera_zoom_min < self.camera_zoom_max) {
            self.camera_zoom_min = defaults.camera_zoom_min;
            self.camera_zoom_max = defaults.camera_zoom_max;
        }
        if self.camera_zoom_step <= 1.0 {
            self.camera_zoom_step = defaults.camera_zoom_step;
        }
        if self.camera_scroll_zoom_step <= 1.0 {
            self.camera_scroll_zoom_step = defaults.camera_scroll_zoom_step;
        }
        if self.min_image_size <= 0.0 {
            self.min_image_size = defaults.min_image_size;
        }
        self.history_depth = self.history_depth.max(1);
        self
    }
}
