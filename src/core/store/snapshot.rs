//! Serialisierbare Lese-Momentaufnahme der Szene.

use super::CanvasStore;
use crate::core::{Camera2D, GroupObject, ImageObject, SelectionScope, SelectionState};
use anyhow::Context;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Export von Bildern, Gruppen, Selektion und Viewport
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSnapshot {
    /// Bilder in Sammlungs-Reihenfolge
    pub images: Vec<ImageObject>,
    /// Gruppen in Erstellungs-Reihenfolge
    pub groups: Vec<GroupObject>,
    /// Selektion
    #[serde(default)]
    pub selection: SelectionState,
    /// Auswahl-Scope
    #[serde(default)]
    pub scope: SelectionScope,
    /// Abgeleiteter aktiver Referenz-Index (beim Import ignoriert)
    #[serde(default)]
    pub active_reference_index: Option<usize>,
    /// Viewport
    #[serde(default)]
    pub camera: Camera2D,
}

impl SceneSnapshot {
    /// Serialisiert die Momentaufnahme als formatiertes JSON.
    pub fn to_json(&self) -> anyhow::Result<String> {
        serde_json::to_string_pretty(self).context("Szene konnte nicht serialisiert werden")
    }

    /// Liest eine Momentaufnahme aus JSON.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("Ungültiges Szenen-JSON")
    }
}

impl CanvasStore {
    /// Erstellt eine Momentaufnahme inklusive Kamera.
    pub fn snapshot(&self, camera: &Camera2D) -> SceneSnapshot {
        SceneSnapshot {
            images: self.images.values().cloned().collect(),
            groups: self.groups.values().cloned().collect(),
            selection: self.selection.clone(),
            scope: self.scope,
            active_reference_index: self.active_reference_index,
            camera: *camera,
        }
    }

    /// Baut einen Speicher aus einer Momentaufnahme und repariert dabei alle Invarianten.
    ///
    /// Doppelte IDs werden abgelehnt; alles andere (verwaiste Mitglieder,
    /// lückenhafte Referenz-Indizes, doppelte exklusive Rollen) wird korrigiert.
    pub fn from_snapshot(snapshot: SceneSnapshot, group_padding: f32) -> anyhow::Result<Self> {
        let mut images = IndexMap::with_capacity(snapshot.images.len());
        for image in snapshot.images {
            let id = image.id;
            if images.insert(id, image).is_some() {
                anyhow::bail!("Doppelte Bild-ID {} in Momentaufnahme", id);
            }
        }

        let mut groups = IndexMap::with_capacity(snapshot.groups.len());
        for group in snapshot.groups {
            let id = group.id;
            if images.contains_key(&id) || groups.insert(id, group).is_some() {
                anyhow::bail!("Doppelte Objekt-ID {} in Momentaufnahme", id);
            }
        }

        let mut store = Self::with_group_padding(group_padding);
        store.images = Arc::new(images);
        store.groups = Arc::new(groups);
        store.selection = snapshot.selection;
        store.scope = snapshot.scope;
        store.commit();

        log::info!(
            "Szene geladen: {} Bild(er), {} Gruppe(n)",
            store.image_count(),
            store.group_count()
        );
        Ok(store)
    }
}
