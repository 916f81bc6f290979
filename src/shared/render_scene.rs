//! Render-Szene als expliziter Übergabevertrag zwischen App und Presenter.
//!
//! Lebt im shared-Modul, da `app` sie baut und jede Darstellungsschicht
//! (oder der Headless-Host) sie nur liest.

use crate::core::{BitmapHandle, Camera2D, ImageRole, Rect, SelectionScope};
use serde::{Deserialize, Serialize};

/// Darstellungsdaten eines Bildes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderImage {
    /// Bild-ID
    pub id: u64,
    /// Quell-Pixel
    pub bitmap: BitmapHandle,
    /// Welt-Geometrie
    pub geometry: Rect,
    /// Zeichenreihenfolge
    pub z_order: u64,
    /// Rolle (für Badges)
    pub role: ImageRole,
    /// Referenz-Index (für Badges)
    pub reference_index: Option<usize>,
    /// Optionale Maske
    pub mask: Option<BitmapHandle>,
    /// Bild ist selektiert
    pub selected: bool,
}

/// Ein Top-Level-Element der Zeichenliste
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RenderItem {
    /// Loses Bild (oder sichtbares Mitglied einer nicht sichtbaren Gruppe)
    Image(RenderImage),
    /// Gruppe samt sichtbarer Mitglieder
    Group {
        /// Gruppen-ID
        id: u64,
        /// Anzeigename
        name: String,
        /// Gruppen-Box
        geometry: Rect,
        /// Zeichenreihenfolge
        z_order: u64,
        /// Gruppe ist selektiert
        selected: bool,
        /// Gruppe wird gerade bearbeitet
        editing: bool,
        /// Sichtbare Mitglieder, nach Z-Order sortiert
        members: Vec<RenderImage>,
    },
}

impl RenderItem {
    /// Z-Order des Elements.
    pub fn z_order(&self) -> u64 {
        match self {
            RenderItem::Image(image) => image.z_order,
            RenderItem::Group { z_order, .. } => *z_order,
        }
    }
}

/// Read-only Daten für einen Render-Frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderScene {
    /// Kamera-Zustand für diesen Frame
    pub camera: Camera2D,
    /// Viewport-Größe in Pixeln [Breite, Höhe]
    pub viewport_size: [f32; 2],
    /// Zeichenliste, aufsteigend nach Z-Order
    pub items: Vec<RenderItem>,
    /// Bounding-Box der Selektion (für Skalier-Handles)
    pub selection_bounds: Option<Rect>,
    /// Aktives Auswahlrechteck (Marquee) in Welt-Koordinaten
    pub marquee: Option<Rect>,
    /// Auswahl-Scope
    pub scope: SelectionScope,
    /// Abgeleiteter aktiver Referenz-Index
    pub active_reference_index: Option<usize>,
    /// Anzahl sichtbarer Objekte
    pub visible_count: usize,
    /// Anzahl aller Objekte im Speicher
    pub total_count: usize,
}

impl RenderScene {
    /// Gibt zurück, ob etwas zu zeichnen ist.
    pub fn has_content(&self) -> bool {
        !self.items.is_empty()
    }

    /// IDs aller gezeichneten Bilder (inklusive Gruppenmitglieder).
    pub fn image_ids(&self) -> Vec<u64> {
        self.items
            .iter()
            .flat_map(|item| match item {
                RenderItem::Image(image) => vec![image.id],
                RenderItem::Group { members, .. } => members.iter().map(|m| m.id).collect(),
            })
            .collect()
    }
}
