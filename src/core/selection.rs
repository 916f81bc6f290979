//! Selektionszustand und Auswahl-Scope (Normal / Gruppen-Bearbeitung).

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Verweis auf ein Szenen-Objekt samt Art
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "snake_case")]
pub enum ObjectRef {
    /// Bild-Objekt
    Image(u64),
    /// Gruppen-Objekt
    Group(u64),
}

impl ObjectRef {
    /// ID des referenzierten Objekts.
    pub fn id(self) -> u64 {
        match self {
            ObjectRef::Image(id) | ObjectRef::Group(id) => id,
        }
    }
}

/// Zustandsautomat für das Klick-Targeting.
///
/// `Normal → GroupEditing(g)` beim Betreten, zurück bei Escape oder Klick außerhalb von `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", content = "group_id", rename_all = "snake_case")]
pub enum SelectionScope {
    /// Top-Level: Klick auf ein Gruppenmitglied selektiert die Gruppe
    #[default]
    Normal,
    /// Verschachtelt: Mitglieder dieser Gruppe sind einzeln selektierbar
    GroupEditing(u64),
}

impl SelectionScope {
    /// ID der bearbeiteten Gruppe, falls aktiv.
    pub fn editing_group(self) -> Option<u64> {
        match self {
            SelectionScope::Normal => None,
            SelectionScope::GroupEditing(id) => Some(id),
        }
    }
}

/// Auswahlbezogener Szenenzustand
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    /// Selektierte Bild-IDs in Klick-Reihenfolge (Arc für O(1)-Clone in RenderScene/Snapshot)
    pub selected_image_ids: Arc<IndexSet<u64>>,
    /// Selektierte Gruppen-IDs in Klick-Reihenfolge
    pub selected_group_ids: Arc<IndexSet<u64>>,
}

impl SelectionState {
    /// Erstellt einen leeren Selektionszustand.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mutable Referenz auf die Bild-Selektion (CoW: klont nur wenn nötig).
    #[inline]
    pub fn images_mut(&mut self) -> &mut IndexSet<u64> {
        Arc::make_mut(&mut self.selected_image_ids)
    }

    /// Mutable Referenz auf die Gruppen-Selektion (CoW: klont nur wenn nötig).
    #[inline]
    pub fn groups_mut(&mut self) -> &mut IndexSet<u64> {
        Arc::make_mut(&mut self.selected_group_ids)
    }

    /// Gibt `true` zurück, wenn weder Bilder noch Gruppen selektiert sind.
    pub fn is_empty(&self) -> bool {
        self.selected_image_ids.is_empty() && self.selected_group_ids.is_empty()
    }

    /// Prüft ob ein Objekt selektiert ist.
    pub fn contains(&self, object: ObjectRef) -> bool {
        match object {
            ObjectRef::Image(id) => self.selected_image_ids.contains(&id),
            ObjectRef::Group(id) => self.selected_group_ids.contains(&id),
        }
    }

    /// Alle selektierten Objekte (erst Gruppen, dann Bilder).
    pub fn objects(&self) -> Vec<ObjectRef> {
        self.selected_group_ids
            .iter()
            .map(|&id| ObjectRef::Group(id))
            .chain(self.selected_image_ids.iter().map(|&id| ObjectRef::Image(id)))
            .collect()
    }

    /// Hebt die Selektion auf.
    pub fn clear(&mut self) {
        if !self.selected_image_ids.is_empty() {
            self.images_mut().clear();
        }
        if !self.selected_group_ids.is_empty() {
            self.groups_mut().clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clone_shares_sets_until_mutation() {
        let mut selection = SelectionState::new();
        selection.images_mut().insert(1);
        let snapshot = selection.clone();
        assert!(Arc::ptr_eq(
            &snapshot.selected_image_ids,
            &selection.selected_image_ids
        ));

        selection.images_mut().insert(2);
        assert_eq!(snapshot.selected_image_ids.len(), 1);
        assert_eq!(selection.selected_image_ids.len(), 2);
    }

    #[test]
    fn objects_lists_groups_before_images() {
        let mut selection = SelectionState::new();
        selection.images_mut().insert(3);
        selection.groups_mut().insert(9);
        assert_eq!(
            selection.objects(),
            vec![ObjectRef::Group(9), ObjectRef::Image(3)]
        );
        assert!(selection.contains(ObjectRef::Group(9)));
        assert!(!selection.contains(ObjectRef::Image(9)));
    }
}
