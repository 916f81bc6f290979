//! Bild-Objekte auf der Kompositionsfläche.

use super::Rect;
use serde::{Deserialize, Serialize};

/// Opaker Verweis auf Quell-Pixel (wird beim Verschieben nie dupliziert).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BitmapHandle(String);

impl BitmapHandle {
    /// Erstellt einen Handle. Leere Handles werden abgelehnt.
    pub fn new(handle: impl Into<String>) -> anyhow::Result<Self> {
        let handle = handle.into();
        if handle.trim().is_empty() {
            anyhow::bail!("Bitmap-Handle darf nicht leer sein");
        }
        Ok(Self(handle))
    }

    /// Rohwert des Handles.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Semantische Rolle eines Bildes für die externe Generierungs-Pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageRole {
    /// Keine Rolle
    #[default]
    None,
    /// Ausgangsbild (exklusiv)
    Original,
    /// Referenzbild (mehrfach, mit dichtem Index)
    Reference,
    /// Posen-Vorlage (exklusiv)
    Pose,
    /// Hintergrund (exklusiv)
    Background,
}

impl ImageRole {
    /// Exklusive Rollen dürfen höchstens ein Bild gleichzeitig tragen.
    pub const EXCLUSIVE: [ImageRole; 3] =
        [ImageRole::Original, ImageRole::Pose, ImageRole::Background];

    /// Gibt `true` zurück für Original, Pose und Background.
    pub fn is_exclusive(self) -> bool {
        Self::EXCLUSIVE.contains(&self)
    }

    /// Rang für die Sortierung beim Ausrichten (kleiner = weiter vorne).
    pub fn precedence(self) -> u8 {
        match self {
            ImageRole::Original => 0,
            ImageRole::Reference => 1,
            ImageRole::Pose => 2,
            ImageRole::Background => 3,
            ImageRole::None => 4,
        }
    }
}

/// Ein platziertes Bild
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageObject {
    /// Stabile, eindeutige ID
    pub id: u64,
    /// Quell-Pixel
    pub bitmap: BitmapHandle,
    /// Position und Größe in Welteinheiten
    pub geometry: Rect,
    /// Zeichenreihenfolge (streng monoton vergeben)
    pub z_order: u64,
    /// Zugewiesene Rolle
    #[serde(default)]
    pub role: ImageRole,
    /// Referenz-Index (nur bei `ImageRole::Reference`)
    #[serde(default)]
    pub reference_index: Option<usize>,
    /// Gruppe, in der das Bild Mitglied ist
    #[serde(default)]
    pub group_id: Option<u64>,
    /// Optionale Maske
    #[serde(default)]
    pub mask: Option<BitmapHandle>,
}

impl ImageObject {
    /// Erstellt ein neues, ungruppiertes Bild ohne Rolle.
    pub fn new(id: u64, bitmap: BitmapHandle, geometry: Rect, z_order: u64) -> Self {
        Self {
            id,
            bitmap,
            geometry,
            z_order,
            role: ImageRole::None,
            reference_index: None,
            group_id: None,
            mask: None,
        }
    }

    /// Setzt die Rolle und verwirft einen veralteten Referenz-Index.
    pub(crate) fn set_role(&mut self, role: ImageRole) {
        self.role = role;
        if role != ImageRole::Reference {
            self.reference_index = None;
        }
    }
}

/// Teil-Update für ein Bild (`None` = Feld unverändert)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImagePatch {
    /// Neue Geometrie
    pub geometry: Option<Rect>,
    /// Neue Rolle (exklusive Rollen werden anderen Bildern entzogen)
    pub role: Option<ImageRole>,
    /// Neue Maske (`Some(None)` entfernt die Maske)
    pub mask: Option<Option<BitmapHandle>>,
}

impl ImagePatch {
    /// Patch, der nur die Geometrie setzt.
    pub fn geometry(geometry: Rect) -> Self {
        Self {
            geometry: Some(geometry),
            ..Default::default()
        }
    }
}
