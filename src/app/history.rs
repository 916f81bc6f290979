//! Snapshot-basiertes Undo/Redo.

use super::AppState;
use crate::core::CanvasStore;
use std::collections::VecDeque;

/// Snapshot des Objekt-Speichers (Bilder, Gruppen, Selektion, Scope).
///
/// Bilder, Gruppen und Selektionsmengen liegen im Store hinter `Arc`;
/// ein Snapshot ist daher O(1), kopiert wird erst bei der nächsten Mutation.
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Zustand des Speichers zum Zeitpunkt des Snapshots
    pub store: CanvasStore,
}

impl Snapshot {
    /// Erstellt einen O(1)-Snapshot durch Arc-Clone statt Deep-Clone.
    pub fn from_state(state: &AppState) -> Self {
        Self {
            store: state.store.clone(),
        }
    }

    /// Stellt den Snapshot wieder her.
    ///
    /// ID- und Z-Order-Zähler laufen dabei nie zurück; eine laufende
    /// Drag-Session wird verworfen.
    pub fn apply_to(self, state: &mut AppState) {
        state.store.restore_from(self.store);
        state.interaction.reset();
    }
}

/// Undo/Redo-Manager mit begrenzter Tiefe.
#[derive(Debug, Default)]
pub struct EditHistory {
    undo_stack: VecDeque<Snapshot>,
    redo_stack: VecDeque<Snapshot>,
    max_depth: usize,
}

impl EditHistory {
    /// Erstellt einen neuen History-Manager mit maximaler Tiefe.
    pub fn new_with_capacity(max_depth: usize) -> Self {
        let max_depth = max_depth.max(1);
        Self {
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: VecDeque::with_capacity(max_depth),
            max_depth,
        }
    }

    /// Nimmt einen fertigen Snapshot auf und verwirft den Redo-Stack.
    pub fn record_snapshot(&mut self, snap: Snapshot) {
        push_bounded(&mut self.undo_stack, snap, self.max_depth);
        self.redo_stack.clear();
    }

    /// Ändert die maximale Tiefe; überzählige älteste Einträge werden verworfen.
    pub fn set_max_depth(&mut self, max_depth: usize) {
        self.max_depth = max_depth.max(1);
        while self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        while self.redo_stack.len() > self.max_depth {
            self.redo_stack.pop_front();
        }
    }

    /// Prüft ob Undo möglich ist.
    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    /// Prüft ob Redo möglich ist.
    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    /// Anzahl möglicher Undo-Schritte.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Holt den letzten Undo-Eintrag und legt `current` auf den Redo-Stack.
    pub fn pop_undo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let prev = self.undo_stack.pop_back()?;
        push_bounded(&mut self.redo_stack, current, self.max_depth);
        Some(prev)
    }

    /// Holt den letzten Redo-Eintrag und legt `current` auf den Undo-Stack.
    pub fn pop_redo_with_current(&mut self, current: Snapshot) -> Option<Snapshot> {
        let next = self.redo_stack.pop_back()?;
        push_bounded(&mut self.undo_stack, current, self.max_depth);
        Some(next)
    }
}

fn push_bounded(stack: &mut VecDeque<Snapshot>, snap: Snapshot, max_depth: usize) {
    if stack.len() >= max_depth {
        stack.pop_front();
    }
    stack.push_back(snap);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BitmapHandle, ObjectRef};
    use glam::Vec2;

    fn snapshot_with_images(count: usize) -> Snapshot {
        let mut store = CanvasStore::new();
        for i in 0..count {
            store
                .insert_image(
                    BitmapHandle::new(format!("img-{i}")).expect("gültiger Handle"),
                    Vec2::splat(10.0),
                    None,
                    5.0,
                )
                .expect("Einfügen erwartet");
        }
        Snapshot { store }
    }

    #[test]
    fn empty_history_cannot_undo_or_redo() {
        let history = EditHistory::new_with_capacity(10);
        assert!(!history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn undo_then_redo_swaps_snapshots() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_images(2));

        let restored = history
            .pop_undo_with_current(snapshot_with_images(5))
            .expect("undo vorhanden");
        assert_eq!(restored.store.image_count(), 2);
        assert!(history.can_redo());

        let redone = history
            .pop_redo_with_current(snapshot_with_images(2))
            .expect("redo vorhanden");
        assert_eq!(redone.store.image_count(), 5);
        assert!(history.can_undo());
        assert!(!history.can_redo());
    }

    #[test]
    fn new_record_clears_redo_stack() {
        let mut history = EditHistory::new_with_capacity(10);
        history.record_snapshot(snapshot_with_images(1));
        let _restored = history.pop_undo_with_current(snapshot_with_images(3));
        assert!(history.can_redo());

        history.record_snapshot(snapshot_with_images(7));
        assert!(!history.can_redo());
    }

    #[test]
    fn respects_max_depth() {
        let mut history = EditHistory::new_with_capacity(3);
        for i in 1..=5 {
            history.record_snapshot(snapshot_with_images(i));
        }
        assert_eq!(history.undo_depth(), 3);

        // Der älteste verbleibende Eintrag ist der mit drei Bildern
        let mut last = None;
        while let Some(snap) = history.pop_undo_with_current(snapshot_with_images(0)) {
            last = Some(snap);
        }
        assert_eq!(last.map(|s| s.store.image_count()), Some(3));
    }

    #[test]
    fn shrinking_depth_drops_oldest_entries() {
        let mut history = EditHistory::new_with_capacity(10);
        for i in 1..=6 {
            history.record_snapshot(snapshot_with_images(i));
        }

        history.set_max_depth(2);

        assert_eq!(history.undo_depth(), 2);
        let newest = history.pop_undo_with_current(snapshot_with_images(0));
        assert_eq!(newest.map(|s| s.store.image_count()), Some(6));
    }

    #[test]
    fn apply_to_keeps_z_order_counter() {
        let mut state = AppState::new();
        let snap = Snapshot::from_state(&state);

        let id = state
            .store
            .insert_image(
                BitmapHandle::new("temp").expect("gültiger Handle"),
                Vec2::splat(10.0),
                None,
                0.0,
            )
            .expect("Einfügen erwartet");
        let used_z = state.store.z_order_of(ObjectRef::Image(id)).unwrap_or(0);

        snap.apply_to(&mut state);
        assert_eq!(state.store.image_count(), 0);
        assert!(state.store.max_allocated_z_order() >= used_z);
    }
}
