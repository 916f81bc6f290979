//! Rollen-Vergabe und dichte Referenz-Nummerierung.

use super::CanvasStore;
use crate::core::{BitmapHandle, ImageObject, ImageRole, SelectionState};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Rollen-getaggte Eingaben für die externe Generierungs-Pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerationInputs {
    /// Ausgangsbild
    pub original: Option<TaggedImage>,
    /// Referenzbilder, sortiert nach Referenz-Index
    pub references: Vec<TaggedImage>,
    /// Posen-Vorlage
    pub pose: Option<TaggedImage>,
    /// Hintergrund
    pub background: Option<TaggedImage>,
}

/// Ein getaggtes Bild mit den Daten, die der Auftragsbauer braucht
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaggedImage {
    /// Bild-ID
    pub id: u64,
    /// Quell-Pixel
    pub bitmap: BitmapHandle,
    /// Optionale Maske
    pub mask: Option<BitmapHandle>,
}

impl TaggedImage {
    fn from_image(image: &ImageObject) -> Self {
        Self {
            id: image.id,
            bitmap: image.bitmap.clone(),
            mask: image.mask.clone(),
        }
    }
}

impl CanvasStore {
    /// Weist der Bild-Selektion eine Rolle zu.
    ///
    /// Tragen bereits alle selektierten Bilder `role`, wird stattdessen
    /// `ImageRole::None` gesetzt. Eine exklusive Rolle erhält nur das zuerst
    /// selektierte Bild; alle anderen Träger verlieren sie.
    pub fn assign_role(&mut self, role: ImageRole) -> bool {
        let selected: Vec<u64> = self
            .selection
            .selected_image_ids
            .iter()
            .copied()
            .filter(|id| self.images.contains_key(id))
            .collect();
        if selected.is_empty() {
            log::debug!("Rollenvergabe: keine Bilder selektiert");
            return false;
        }

        let all_hold = selected
            .iter()
            .all(|id| self.images.get(id).is_some_and(|image| image.role == role));
        let target = if all_hold { ImageRole::None } else { role };

        let receivers: &[u64] = if target.is_exclusive() {
            &selected[..1]
        } else {
            &selected
        };

        let images = self.images_mut();
        if target.is_exclusive() {
            for image in images.values_mut() {
                if image.role == target && !receivers.contains(&image.id) {
                    image.set_role(ImageRole::None);
                }
            }
        }
        for id in receivers {
            if let Some(image) = images.get_mut(id) {
                image.set_role(target);
            }
        }

        self.commit();
        log::info!("Rolle {:?} für {} Bild(er) gesetzt", target, receivers.len());
        true
    }

    /// Entfernt die Rolle aller selektierten Bilder.
    pub fn clear_role_for_selection(&mut self) -> bool {
        let selected: Vec<u64> = self.selection.selected_image_ids.iter().copied().collect();
        let affected = selected
            .iter()
            .any(|id| self.images.get(id).is_some_and(|image| image.role != ImageRole::None));
        if !affected {
            return false;
        }

        let images = self.images_mut();
        for id in &selected {
            if let Some(image) = images.get_mut(id) {
                image.set_role(ImageRole::None);
            }
        }
        self.commit();
        true
    }

    /// Entfernt die Referenz-Rolle vom aktiven Referenzbild und setzt den aktiven Index zurück.
    pub fn clear_active_reference_role(&mut self) -> bool {
        let Some(active) = self.active_reference_index else {
            return false;
        };

        let images = self.images_mut();
        for image in images.values_mut() {
            if image.reference_index == Some(active) {
                image.set_role(ImageRole::None);
            }
        }
        self.commit();
        self.active_reference_index = None;
        log::info!("Referenz {} entfernt", active);
        true
    }

    /// Liefert die getaggten Bilder für einen Generierungsauftrag.
    pub fn generation_inputs(&self) -> GenerationInputs {
        let mut inputs = GenerationInputs::default();
        let mut references: Vec<(usize, TaggedImage)> = Vec::new();

        for image in self.images.values() {
            match image.role {
                ImageRole::Original => inputs.original = Some(TaggedImage::from_image(image)),
                ImageRole::Pose => inputs.pose = Some(TaggedImage::from_image(image)),
                ImageRole::Background => inputs.background = Some(TaggedImage::from_image(image)),
                ImageRole::Reference => references.push((
                    image.reference_index.unwrap_or(usize::MAX),
                    TaggedImage::from_image(image),
                )),
                ImageRole::None => {}
            }
        }

        references.sort_by_key(|(index, _)| *index);
        inputs.references = references.into_iter().map(|(_, tagged)| tagged).collect();
        inputs
    }

    /// Vergibt Referenz-Indizes `0..k-1` in Sammlungs-Reihenfolge neu.
    pub(super) fn renumber_references(&mut self) {
        let mut counter = 0;
        let mut fixes: Vec<(u64, Option<usize>)> = Vec::new();

        for image in self.images.values() {
            let wanted = if image.role == ImageRole::Reference {
                counter += 1;
                Some(counter - 1)
            } else {
                None
            };
            if image.reference_index != wanted {
                fixes.push((image.id, wanted));
            }
        }

        if fixes.is_empty() {
            return;
        }
        let images = self.images_mut();
        for (id, wanted) in fixes {
            if let Some(image) = images.get_mut(&id) {
                image.reference_index = wanted;
            }
        }
    }
}

/// Leitet den aktiven Referenz-Index aus Bildern und Selektion ab.
///
/// Genau ein selektiertes Referenzbild → dessen Index; sonst `0`, falls
/// irgendein Referenzbild existiert; sonst `None`.
pub(super) fn derive_active_reference_index(
    images: &IndexMap<u64, ImageObject>,
    selection: &SelectionState,
) -> Option<usize> {
    if selection.selected_image_ids.len() == 1 {
        let selected = selection
            .selected_image_ids
            .first()
            .and_then(|id| images.get(id));
        if let Some(image) = selected.filter(|image| image.role == ImageRole::Reference) {
            return image.reference_index;
        }
    }

    images
        .values()
        .any(|image| image.role == ImageRole::Reference)
        .then_some(0)
}
