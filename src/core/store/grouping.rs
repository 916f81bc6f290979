//! Gruppieren, Auflösen, Gruppen-Bearbeitungsmodus und Repack.

use super::CanvasStore;
use crate::core::layout::shelf_pack;
use crate::core::{GroupObject, Rect, SelectionScope, MIN_GROUP_MEMBERS};
use std::collections::HashSet;

impl CanvasStore {
    /// Gruppiert alle selektierten, ungruppierten Bilder.
    ///
    /// Benötigt mindestens zwei solche Bilder; die neue Gruppe ersetzt die Selektion.
    pub fn group_selection(&mut self) -> Option<u64> {
        let selected: HashSet<u64> = self.selection.selected_image_ids.iter().copied().collect();
        let member_ids: Vec<u64> = self
            .images
            .values()
            .filter(|image| selected.contains(&image.id) && image.group_id.is_none())
            .map(|image| image.id)
            .collect();

        if member_ids.len() < MIN_GROUP_MEMBERS {
            log::debug!(
                "Gruppieren: nur {} ungruppierte Bild(er) selektiert",
                member_ids.len()
            );
            return None;
        }

        let bounds = Rect::union_all(
            member_ids
                .iter()
                .filter_map(|id| self.images.get(id))
                .map(|image| &image.geometry),
        )?
        .expanded(self.group_padding);

        let id = self.allocate_object_id();
        let z_order = self.allocate_z_order();
        let name = self.allocate_group_name();
        let member_count = member_ids.len();
        self.groups_mut()
            .insert(id, GroupObject::new(id, name, bounds, z_order, member_ids));

        self.selection.clear();
        self.selection.groups_mut().insert(id);
        self.scope = SelectionScope::Normal;
        self.commit();

        log::info!("Gruppe {} mit {} Mitgliedern erstellt", id, member_count);
        Some(id)
    }

    /// Löst alle selektierten Gruppen auf und selektiert die freigegebenen Bilder.
    pub fn ungroup_selection(&mut self) -> Vec<u64> {
        let group_ids: Vec<u64> = self.selection.selected_group_ids.iter().copied().collect();
        if group_ids.is_empty() {
            return Vec::new();
        }

        let mut freed = Vec::new();
        for group_id in &group_ids {
            if let Some(group) = self.groups_mut().shift_remove(group_id) {
                freed.extend(group.member_ids);
            }
        }

        self.selection.clear();
        self.selection.images_mut().extend(freed.iter().copied());
        self.scope = SelectionScope::Normal;
        self.commit();

        log::info!(
            "{} Gruppe(n) aufgelöst, {} Bild(er) freigegeben",
            group_ids.len(),
            freed.len()
        );
        freed
    }

    /// Betritt den Bearbeitungsmodus einer Gruppe.
    pub fn enter_group_edit_mode(&mut self, group_id: u64) -> bool {
        if !self.groups.contains_key(&group_id) {
            return false;
        }
        self.scope = SelectionScope::GroupEditing(group_id);
        self.selection.clear();
        self.selection.groups_mut().insert(group_id);
        self.commit();
        log::info!("Gruppen-Bearbeitung für Gruppe {} aktiv", group_id);
        true
    }

    /// Verlässt den Bearbeitungsmodus; die bearbeitete Gruppe bleibt selektiert.
    pub fn exit_group_edit_mode(&mut self) -> bool {
        let Some(group_id) = self.scope.editing_group() else {
            return false;
        };
        self.scope = SelectionScope::Normal;
        self.selection.clear();
        self.selection.groups_mut().insert(group_id);
        self.commit();
        log::info!("Gruppen-Bearbeitung für Gruppe {} beendet", group_id);
        true
    }

    /// Passt die Gruppen-Box an die aktuellen Mitglieder an (ohne Neu-Packen).
    pub fn refit_group_bounds(&mut self, group_id: u64) -> bool {
        let Some(group) = self.groups.get(&group_id) else {
            return false;
        };
        let Some(bounds) = Rect::union_all(
            group
                .member_ids
                .iter()
                .filter_map(|id| self.images.get(id))
                .map(|image| &image.geometry),
        ) else {
            return false;
        };

        let padded = bounds.expanded(self.group_padding);
        if let Some(group) = self.groups_mut().get_mut(&group_id) {
            group.geometry = padded;
        }
        self.commit();
        true
    }

    /// Entfernt Mitglieder aus einer Gruppe: Auflösen unter zwei, sonst Repack.
    ///
    /// `group_id` der freigegebenen Bilder wird im nachfolgenden `commit` gelöscht.
    pub(super) fn release_members(&mut self, group_id: u64, released: &[u64]) {
        let Some(group) = self.groups.get(&group_id) else {
            return;
        };
        let remaining: Vec<u64> = group
            .member_ids
            .iter()
            .copied()
            .filter(|id| !released.contains(id))
            .collect();
        if remaining.len() == group.member_ids.len() {
            return;
        }

        if remaining.len() < MIN_GROUP_MEMBERS {
            self.groups_mut().shift_remove(&group_id);
            log::info!("Gruppe {} aufgelöst (letztes Mitglied freigegeben)", group_id);
            return;
        }

        if let Some(group) = self.groups_mut().get_mut(&group_id) {
            group.member_ids = remaining;
        }
        self.repack_group(group_id);
    }

    /// Packt die Mitglieder einer Gruppe neu (Ursprung der Gruppe bleibt fix).
    pub(super) fn repack_group(&mut self, group_id: u64) {
        let Some(group) = self.groups.get(&group_id) else {
            return;
        };
        let members: Vec<(u64, Rect)> = group
            .member_ids
            .iter()
            .filter_map(|id| self.images.get(id).map(|image| (*id, image.geometry)))
            .collect();
        if members.len() < MIN_GROUP_MEMBERS {
            return;
        }

        let packing = shelf_pack(
            group.geometry.min(),
            group.geometry.width,
            self.group_padding,
            &members,
        );

        let images = self.images_mut();
        for (id, position) in &packing.positions {
            if let Some(image) = images.get_mut(id) {
                image.geometry.x = position.x;
                image.geometry.y = position.y;
            }
        }
        if let Some(group) = self.groups_mut().get_mut(&group_id) {
            group.geometry = packing.bounds;
        }

        log::debug!(
            "Gruppe {} neu gepackt: {:.1} x {:.1}",
            group_id,
            packing.bounds.width,
            packing.bounds.height
        );
    }
}
