//! Gruppen-Objekte (benannte Cluster aus mindestens zwei Bildern).

use super::Rect;
use serde::{Deserialize, Serialize};

/// Minimale Mitgliederzahl einer Gruppe; darunter wird sie aufgelöst.
pub const MIN_GROUP_MEMBERS: usize = 2;

/// Gruppe von Bildern, die gemeinsam selektiert und bewegt werden
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupObject {
    /// Stabile, eindeutige ID (gemeinsamer ID-Raum mit Bildern)
    pub id: u64,
    /// Vom Benutzer änderbarer Name
    pub name: String,
    /// Bounding-Box inklusive Innenabstand
    pub geometry: Rect,
    /// Zeichenreihenfolge
    pub z_order: u64,
    /// Mitglieder in stabiler Reihenfolge (eindeutig, mindestens zwei)
    pub member_ids: Vec<u64>,
}

impl GroupObject {
    /// Erstellt eine neue Gruppe.
    pub fn new(id: u64, name: impl Into<String>, geometry: Rect, z_order: u64, member_ids: Vec<u64>) -> Self {
        Self {
            id,
            name: name.into(),
            geometry,
            z_order,
            member_ids,
        }
    }

    /// Prüft ob ein Bild Mitglied ist.
    pub fn contains(&self, image_id: u64) -> bool {
        self.member_ids.contains(&image_id)
    }
}

/// Teil-Update für eine Gruppe.
///
/// Eine neue Geometrie verändert nur die Gruppen-Box, nicht die Mitglieder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GroupPatch {
    /// Neuer Name
    pub name: Option<String>,
    /// Neue Bounding-Box
    pub geometry: Option<Rect>,
}
