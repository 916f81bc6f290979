//! Zentraler Objekt-Speicher der Szene (Bilder, Gruppen, Selektion, Z-Order).
//!
//! Alle Mutationen laufen über die Methoden dieses Containers. Jede Mutation
//! endet in [`CanvasStore::commit`], das die Invarianten repariert und den
//! abgeleiteten aktiven Referenz-Index neu berechnet.

mod alignment;
mod grouping;
mod roles;
mod snapshot;

pub use roles::{GenerationInputs, TaggedImage};
pub use snapshot::SceneSnapshot;

use super::{
    BitmapHandle, GroupObject, GroupPatch, ImageObject, ImagePatch, ImageRole, ObjectRef, Rect,
    SelectionScope, SelectionState, MIN_GROUP_MEMBERS,
};
use glam::Vec2;
use indexmap::{IndexMap, IndexSet};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;

/// Standard-Innenabstand von Gruppen (Welteinheiten).
pub const DEFAULT_GROUP_PADDING: f32 = 20.0;

const DEFAULT_GROUP_NAME_PREFIX: &str = "Group ";

/// Kanonischer Zustand aller Szenen-Objekte
#[derive(Debug, Clone)]
pub struct CanvasStore {
    /// Bilder in Sammlungs-Reihenfolge (Arc für O(1)-Snapshots)
    images: Arc<IndexMap<u64, ImageObject>>,
    /// Gruppen in Erstellungs-Reihenfolge
    groups: Arc<IndexMap<u64, GroupObject>>,
    selection: SelectionState,
    scope: SelectionScope,
    active_reference_index: Option<usize>,
    next_object_id: u64,
    next_z_order: u64,
    /// Laufende Nummer für Standard-Gruppennamen (`Group {n}`)
    next_group_number: u64,
    group_padding: f32,
    /// Wird bei jeder Mutation erhöht (Cache-Schlüssel für Culling)
    revision: u64,
}

impl Default for CanvasStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CanvasStore {
    /// Erstellt einen leeren Speicher mit Standard-Gruppenabstand.
    pub fn new() -> Self {
        Self::with_group_padding(DEFAULT_GROUP_PADDING)
    }

    /// Erstellt einen leeren Speicher mit explizitem Gruppenabstand.
    pub fn with_group_padding(group_padding: f32) -> Self {
        Self {
            images: Arc::new(IndexMap::new()),
            groups: Arc::new(IndexMap::new()),
            selection: SelectionState::new(),
            scope: SelectionScope::Normal,
            active_reference_index: None,
            next_object_id: 1,
            next_z_order: 1,
            next_group_number: 1,
            group_padding: group_padding.max(0.0),
            revision: 0,
        }
    }

    // ── Lesezugriff ────────────────────────────────────────────────

    /// Alle Bilder in Sammlungs-Reihenfolge.
    pub fn images(&self) -> &IndexMap<u64, ImageObject> {
        &self.images
    }

    /// Einzelnes Bild.
    pub fn image(&self, id: u64) -> Option<&ImageObject> {
        self.images.get(&id)
    }

    /// Alle Gruppen.
    pub fn groups(&self) -> &IndexMap<u64, GroupObject> {
        &self.groups
    }

    /// Einzelne Gruppe.
    pub fn group(&self, id: u64) -> Option<&GroupObject> {
        self.groups.get(&id)
    }

    /// Aktuelle Selektion.
    pub fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Aktueller Auswahl-Scope.
    pub fn scope(&self) -> SelectionScope {
        self.scope
    }

    /// Abgeleiteter aktiver Referenz-Index (read-only).
    pub fn active_reference_index(&self) -> Option<usize> {
        self.active_reference_index
    }

    /// Mutations-Zähler.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Innenabstand für Gruppen-Boxen und Repack.
    pub fn group_padding(&self) -> f32 {
        self.group_padding
    }

    /// Setzt den Gruppenabstand für künftige Gruppierungen und Repacks.
    pub fn set_group_padding(&mut self, padding: f32) {
        self.group_padding = padding.max(0.0);
    }

    /// Anzahl Bilder.
    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Anzahl Gruppen.
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Geometrie eines beliebigen Objekts.
    pub fn geometry_of(&self, object: ObjectRef) -> Option<Rect> {
        match object {
            ObjectRef::Image(id) => self.images.get(&id).map(|i| i.geometry),
            ObjectRef::Group(id) => self.groups.get(&id).map(|g| g.geometry),
        }
    }

    /// Z-Order eines beliebigen Objekts.
    pub fn z_order_of(&self, object: ObjectRef) -> Option<u64> {
        match object {
            ObjectRef::Image(id) => self.images.get(&id).map(|i| i.z_order),
            ObjectRef::Group(id) => self.groups.get(&id).map(|g| g.z_order),
        }
    }

    /// Höchste bisher vergebene Z-Order (0 wenn noch keine vergeben wurde).
    pub fn max_allocated_z_order(&self) -> u64 {
        self.next_z_order - 1
    }

    /// Umschließendes Rechteck aller Bilder und Gruppen.
    pub fn content_bounds(&self) -> Option<Rect> {
        Rect::union_all(
            self.images
                .values()
                .map(|i| &i.geometry)
                .chain(self.groups.values().map(|g| &g.geometry)),
        )
    }

    /// Umschließendes Rechteck der aktuellen Selektion.
    pub fn selection_bounds(&self) -> Option<Rect> {
        let rects: Vec<Rect> = self
            .selection
            .objects()
            .into_iter()
            .filter_map(|obj| self.geometry_of(obj))
            .collect();
        Rect::union_all(rects.iter())
    }

    // ── Mutationen (Object-Store-Vertrag) ──────────────────────────

    /// Wendet eine beliebige Änderung auf die Bild-Sammlung an.
    ///
    /// Gruppenmitgliedschaft wird über `GroupObject::member_ids` geführt;
    /// `group_id` der Bilder wird danach synchronisiert.
    pub fn set_images(&mut self, updater: impl FnOnce(&mut IndexMap<u64, ImageObject>)) {
        updater(self.images_mut());
        self.commit();
    }

    /// Wendet eine beliebige Änderung auf die Bild-Selektion an.
    pub fn set_selected_images(&mut self, updater: impl FnOnce(&mut IndexSet<u64>)) {
        updater(self.selection.images_mut());
        self.commit();
    }

    /// Wendet eine beliebige Änderung auf die Gruppen-Sammlung an.
    ///
    /// Gruppen, deren Mitgliederliste dabei kürzer wird, werden neu gepackt;
    /// Gruppen mit weniger als zwei gültigen Mitgliedern aufgelöst.
    pub fn set_groups(&mut self, updater: impl FnOnce(&mut IndexMap<u64, GroupObject>)) {
        let sizes_before: HashMap<u64, usize> = self
            .groups
            .values()
            .map(|group| (group.id, group.member_ids.len()))
            .collect();
        updater(self.groups_mut());
        let shrunk: HashSet<u64> = self
            .groups
            .values()
            .filter(|group| {
                sizes_before
                    .get(&group.id)
                    .is_some_and(|&before| group.member_ids.len() < before)
            })
            .map(|group| group.id)
            .collect();
        self.commit_with_repack(&shrunk);
    }

    /// Wendet eine beliebige Änderung auf die Gruppen-Selektion an.
    pub fn set_selected_groups(&mut self, updater: impl FnOnce(&mut IndexSet<u64>)) {
        updater(self.selection.groups_mut());
        self.commit();
    }

    /// Teil-Update eines Bildes. Gibt `false` zurück, wenn das Bild nicht existiert.
    pub fn update_image(&mut self, id: u64, patch: ImagePatch) -> bool {
        if !self.images.contains_key(&id) {
            return false;
        }

        let images = self.images_mut();
        if let Some(role) = patch.role.filter(|r| r.is_exclusive()) {
            for other in images.values_mut() {
                if other.id != id && other.role == role {
                    other.set_role(ImageRole::None);
                }
            }
        }
        if let Some(image) = images.get_mut(&id) {
            if let Some(geometry) = patch.geometry {
                image.geometry = geometry;
            }
            if let Some(role) = patch.role {
                image.set_role(role);
            }
            if let Some(mask) = patch.mask {
                image.mask = mask;
            }
        }

        self.commit();
        true
    }

    /// Teil-Update einer Gruppe. Gibt `false` zurück, wenn die Gruppe nicht existiert.
    pub fn update_group(&mut self, id: u64, patch: GroupPatch) -> bool {
        let Some(group) = self.groups_mut().get_mut(&id) else {
            return false;
        };
        if let Some(name) = patch.name {
            group.name = name;
        }
        if let Some(geometry) = patch.geometry {
            group.geometry = geometry;
        }
        self.commit();
        true
    }

    /// Setzt die Geometrie mehrerer Objekte in einem Schritt.
    pub fn set_geometries(&mut self, updates: &[(ObjectRef, Rect)]) {
        if updates.is_empty() {
            return;
        }

        if updates.iter().any(|(obj, _)| matches!(obj, ObjectRef::Image(_))) {
            let images = self.images_mut();
            for (obj, rect) in updates {
                if let ObjectRef::Image(id) = obj {
                    if let Some(image) = images.get_mut(id) {
                        image.geometry = *rect;
                    }
                }
            }
        }
        if updates.iter().any(|(obj, _)| matches!(obj, ObjectRef::Group(_))) {
            let groups = self.groups_mut();
            for (obj, rect) in updates {
                if let ObjectRef::Group(id) = obj {
                    if let Some(group) = groups.get_mut(id) {
                        group.geometry = *rect;
                    }
                }
            }
        }

        self.commit();
    }

    /// Löscht die Selektion.
    ///
    /// Im Gruppen-Bearbeitungsmodus mit selektierten Bildern werden diese nur
    /// aus der Gruppe gelöst. Sonst werden selektierte Bilder und alle
    /// Mitglieder selektierter Gruppen entfernt, der Modus verlassen und der
    /// aktive Referenz-Index auf `None` gesetzt.
    pub fn delete_selection(&mut self) -> bool {
        if self.selection.is_empty() {
            log::debug!("Löschen: leere Selektion, nichts zu tun");
            return false;
        }

        if let Some(group_id) = self.scope.editing_group() {
            if !self.selection.selected_image_ids.is_empty() {
                let released: Vec<u64> = self.selection.selected_image_ids.iter().copied().collect();
                self.release_members(group_id, &released);
                self.selection.images_mut().clear();
                self.commit();
                log::info!(
                    "{} Bild(er) aus Gruppe {} gelöst",
                    released.len(),
                    group_id
                );
                return true;
            }
        }

        let group_ids: HashSet<u64> = self.selection.selected_group_ids.iter().copied().collect();
        let mut doomed: HashSet<u64> = self.selection.selected_image_ids.iter().copied().collect();
        for group_id in &group_ids {
            if let Some(group) = self.groups.get(group_id) {
                doomed.extend(group.member_ids.iter().copied());
            }
        }

        if !doomed.is_empty() {
            self.images_mut().retain(|id, _| !doomed.contains(id));
        }
        if !group_ids.is_empty() {
            self.groups_mut().retain(|id, _| !group_ids.contains(id));
        }
        self.selection.clear();
        self.scope = SelectionScope::Normal;
        self.commit();
        self.active_reference_index = None;

        log::info!(
            "{} Bild(er) und {} Gruppe(n) gelöscht",
            doomed.len(),
            group_ids.len()
        );
        true
    }

    /// Bringt ein Objekt nach vorne und gibt die neu vergebene Z-Order zurück.
    pub fn bring_to_front(&mut self, target: ObjectRef) -> Option<u64> {
        self.geometry_of(target)?;
        let z_order = self.allocate_z_order();
        match target {
            ObjectRef::Image(id) => {
                if let Some(image) = self.images_mut().get_mut(&id) {
                    image.z_order = z_order;
                }
            }
            ObjectRef::Group(id) => {
                if let Some(group) = self.groups_mut().get_mut(&id) {
                    group.z_order = z_order;
                }
            }
        }
        self.commit();
        Some(z_order)
    }

    // ── Schnittstellen für externe Kollaborateure ─────────────────

    /// Fügt eine fertige Bitmap als neues Bild ein.
    ///
    /// Ohne Position wird das Bild rechts neben dem bestehenden Inhalt
    /// (oben bündig, Abstand `spacing`) bzw. im Ursprung platziert.
    pub fn insert_image(
        &mut self,
        bitmap: BitmapHandle,
        size: Vec2,
        position: Option<Vec2>,
        spacing: f32,
    ) -> anyhow::Result<u64> {
        if !(size.x.is_finite() && size.y.is_finite() && size.x > 0.0 && size.y > 0.0) {
            anyhow::bail!("Ungültige Bildgröße {} x {}", size.x, size.y);
        }
        if let Some(pos) = position {
            if !(pos.x.is_finite() && pos.y.is_finite()) {
                anyhow::bail!("Ungültige Einfügeposition ({}, {})", pos.x, pos.y);
            }
        }

        let origin = position.unwrap_or_else(|| self.next_insert_position(spacing));
        let id = self.allocate_object_id();
        let z_order = self.allocate_z_order();
        let image = ImageObject::new(id, bitmap, Rect::new(origin.x, origin.y, size.x, size.y), z_order);
        self.images_mut().insert(id, image);
        self.commit();

        log::info!(
            "Bild {} eingefügt bei ({:.1}, {:.1}), Größe {:.1} x {:.1}",
            id,
            origin.x,
            origin.y,
            size.x,
            size.y
        );
        Ok(id)
    }

    /// Setzt oder entfernt die Maske eines Bildes.
    pub fn attach_mask(&mut self, image_id: u64, mask: Option<BitmapHandle>) -> bool {
        self.update_image(
            image_id,
            ImagePatch {
                mask: Some(mask),
                ..Default::default()
            },
        )
    }

    /// Übernimmt einen früheren Zustand (Undo/Redo), ohne IDs oder Z-Orders erneut zu vergeben.
    ///
    /// Der Gruppenabstand ist eine Option und bleibt unverändert.
    pub fn restore_from(&mut self, other: CanvasStore) {
        let group_padding = self.group_padding;
        let next_object_id = self.next_object_id.max(other.next_object_id);
        let next_z_order = self.next_z_order.max(other.next_z_order);
        let next_group_number = self.next_group_number.max(other.next_group_number);
        let revision = self.revision.max(other.revision) + 1;
        *self = other;
        self.next_object_id = next_object_id;
        self.next_z_order = next_z_order;
        self.next_group_number = next_group_number;
        self.group_padding = group_padding;
        self.revision = revision;
    }

    // ── Interne Helfer ─────────────────────────────────────────────

    /// Mutable Bild-Sammlung (CoW: klont nur wenn ein Snapshot sie teilt).
    #[inline]
    fn images_mut(&mut self) -> &mut IndexMap<u64, ImageObject> {
        Arc::make_mut(&mut self.images)
    }

    /// Mutable Gruppen-Sammlung (CoW).
    #[inline]
    fn groups_mut(&mut self) -> &mut IndexMap<u64, GroupObject> {
        Arc::make_mut(&mut self.groups)
    }

    fn allocate_object_id(&mut self) -> u64 {
        let id = self.next_object_id;
        self.next_object_id += 1;
        id
    }

    fn allocate_z_order(&mut self) -> u64 {
        let z_order = self.next_z_order;
        self.next_z_order += 1;
        z_order
    }

    /// Vergibt den nächsten Standard-Gruppennamen; Nummern werden nie wiederverwendet.
    fn allocate_group_name(&mut self) -> String {
        let number = self.next_group_number;
        self.next_group_number += 1;
        format!("{}{}", DEFAULT_GROUP_NAME_PREFIX, number)
    }

    fn next_insert_position(&self, spacing: f32) -> Vec2 {
        match self.content_bounds() {
            Some(bounds) => Vec2::new(bounds.right() + spacing, bounds.y),
            None => Vec2::ZERO,
        }
    }

    /// Repariert alle Invarianten und berechnet abgeleitete Werte neu.
    fn commit(&mut self) {
        self.commit_with_repack(&HashSet::new());
    }

    /// Wie [`Self::commit`], packt zusätzlich die Gruppen in `shrunk` neu.
    fn commit_with_repack(&mut self, shrunk: &HashSet<u64>) {
        self.repair_groups(shrunk);
        self.sync_group_membership();
        self.repair_exclusive_roles();
        self.renumber_references();
        self.repair_selection();
        self.sync_allocators();
        self.active_reference_index =
            roles::derive_active_reference_index(&self.images, &self.selection);
        self.revision += 1;
    }

    /// Entfernt verwaiste/doppelte Mitglieder; löst Gruppen mit weniger als
    /// zwei gültigen Mitgliedern auf und packt geschrumpfte neu.
    fn repair_groups(&mut self, shrunk: &HashSet<u64>) {
        let mut claimed = HashSet::new();
        let mut dissolved: Vec<u64> = Vec::new();
        let mut repacked: Vec<(u64, Vec<u64>)> = Vec::new();

        for group in self.groups.values() {
            let kept: Vec<u64> = group
                .member_ids
                .iter()
                .copied()
                .filter(|id| self.images.contains_key(id) && claimed.insert(*id))
                .collect();
            if kept.len() < MIN_GROUP_MEMBERS {
                // Bilder einer aufgelösten Gruppe bleiben für spätere Gruppen frei
                for id in &kept {
                    claimed.remove(id);
                }
                dissolved.push(group.id);
            } else if kept.len() != group.member_ids.len() || shrunk.contains(&group.id) {
                repacked.push((group.id, kept));
            }
        }

        if !dissolved.is_empty() {
            let groups = self.groups_mut();
            for group_id in &dissolved {
                groups.shift_remove(group_id);
                log::info!(
                    "Gruppe {} aufgelöst (weniger als {} Mitglieder)",
                    group_id,
                    MIN_GROUP_MEMBERS
                );
            }
        }

        for (group_id, kept) in repacked {
            if let Some(group) = self.groups_mut().get_mut(&group_id) {
                group.member_ids = kept;
            }
            self.repack_group(group_id);
        }
    }

    /// Leitet `group_id` jedes Bildes aus den Mitgliederlisten ab.
    fn sync_group_membership(&mut self) {
        let owner: HashMap<u64, u64> = self
            .groups
            .values()
            .flat_map(|g| g.member_ids.iter().map(move |&m| (m, g.id)))
            .collect();

        let fixes: Vec<(u64, Option<u64>)> = self
            .images
            .values()
            .filter_map(|image| {
                let wanted = owner.get(&image.id).copied();
                (image.group_id != wanted).then_some((image.id, wanted))
            })
            .collect();

        if fixes.is_empty() {
            return;
        }
        let images = self.images_mut();
        for (id, wanted) in fixes {
            if let Some(image) = images.get_mut(&id) {
                image.group_id = wanted;
            }
        }
    }

    /// Exklusive Rollen: der erste Träger in Sammlungs-Reihenfolge behält sie.
    fn repair_exclusive_roles(&mut self) {
        let mut seen = HashSet::new();
        let duplicates: Vec<u64> = self
            .images
            .values()
            .filter(|image| image.role.is_exclusive() && !seen.insert(image.role))
            .map(|image| image.id)
            .collect();

        if duplicates.is_empty() {
            return;
        }
        log::warn!(
            "Exklusive Rolle mehrfach vergeben, entferne sie bei {:?}",
            duplicates
        );
        let images = self.images_mut();
        for id in duplicates {
            if let Some(image) = images.get_mut(&id) {
                image.set_role(ImageRole::None);
            }
        }
    }

    /// Normalisiert die Selektion gemäß Scope (Umleitung auf Gruppen bzw. Beschränkung auf Mitglieder).
    fn repair_selection(&mut self) {
        if let SelectionScope::GroupEditing(group_id) = self.scope {
            if !self.groups.contains_key(&group_id) {
                self.scope = SelectionScope::Normal;
            }
        }

        let mut images = IndexSet::new();
        let mut groups = IndexSet::new();

        match self.scope {
            SelectionScope::Normal => {
                for &group_id in self.selection.selected_group_ids.iter() {
                    if self.groups.contains_key(&group_id) {
                        groups.insert(group_id);
                    }
                }
                for &id in self.selection.selected_image_ids.iter() {
                    match self.images.get(&id).map(|image| image.group_id) {
                        Some(None) => {
                            images.insert(id);
                        }
                        Some(Some(group_id)) => {
                            groups.insert(group_id);
                        }
                        None => {}
                    }
                }
            }
            SelectionScope::GroupEditing(edit_id) => {
                groups.insert(edit_id);
                for &id in self.selection.selected_image_ids.iter() {
                    if self.images.get(&id).and_then(|image| image.group_id) == Some(edit_id) {
                        images.insert(id);
                    }
                }
            }
        }

        if !same_order(&self.selection.selected_image_ids, &images) {
            self.selection.selected_image_ids = Arc::new(images);
        }
        if !same_order(&self.selection.selected_group_ids, &groups) {
            self.selection.selected_group_ids = Arc::new(groups);
        }
    }

    /// Hält die Zähler oberhalb aller vorhandenen IDs, Z-Orders und Gruppennummern (z.B. nach `set_images`).
    fn sync_allocators(&mut self) {
        let max_id = self
            .images
            .keys()
            .chain(self.groups.keys())
            .copied()
            .max()
            .unwrap_or(0);
        let max_z = self
            .images
            .values()
            .map(|i| i.z_order)
            .chain(self.groups.values().map(|g| g.z_order))
            .max()
            .unwrap_or(0);
        let max_group_number = self
            .groups
            .values()
            .filter_map(|g| g.name.strip_prefix(DEFAULT_GROUP_NAME_PREFIX)?.parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        self.next_object_id = self.next_object_id.max(max_id + 1);
        self.next_z_order = self.next_z_order.max(max_z + 1);
        self.next_group_number = self.next_group_number.max(max_group_number + 1);
    }
}

fn same_order(a: &IndexSet<u64>, b: &IndexSet<u64>) -> bool {
    a.len() == b.len() && a.iter().eq(b.iter())
}
