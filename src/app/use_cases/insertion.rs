//! Use-Case: Bitmaps externer Kollaborateure einfügen und Masken setzen.

use crate::app::history::Snapshot;
use crate::app::AppState;
use crate::core::BitmapHandle;
use anyhow::Context;
use glam::Vec2;

/// Fügt eine fertige Bitmap als neues Bild ein und gibt dessen ID zurück.
///
/// Ungültige Handles oder Größen werden als Fehler gemeldet; es entsteht dann
/// kein Bild und kein Undo-Eintrag.
pub fn insert_image(
    state: &mut AppState,
    bitmap: String,
    size: Vec2,
    world_pos: Option<Vec2>,
) -> anyhow::Result<u64> {
    let handle = BitmapHandle::new(bitmap).context("Bild kann nicht eingefügt werden")?;
    let before = Snapshot::from_state(state);
    let spacing = state.options.insert_spacing;
    let id = state
        .store
        .insert_image(handle, size, world_pos, spacing)
        .context("Bild kann nicht eingefügt werden")?;
    state.history.record_snapshot(before);
    Ok(id)
}

/// Setzt oder entfernt die Maske eines Bildes.
pub fn attach_mask(state: &mut AppState, image_id: u64, mask: Option<String>) -> anyhow::Result<()> {
    if state.store.image(image_id).is_none() {
        anyhow::bail!("Maske: Bild {} existiert nicht", image_id);
    }
    let mask = mask
        .map(BitmapHandle::new)
        .transpose()
        .context("Ungültiger Masken-Handle")?;
    let has_mask = mask.is_some();

    state.record_undo_snapshot();
    state.store.attach_mask(image_id, mask);
    log::info!(
        "Maske für Bild {} {}",
        image_id,
        if has_mask { "gesetzt" } else { "entfernt" }
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_places_image_right_of_content() {
        let mut state = AppState::new();
        let spacing = state.options.insert_spacing;
        insert_image(&mut state, "a".into(), Vec2::new(100.0, 80.0), Some(Vec2::new(10.0, 20.0)))
            .expect("Einfügen erwartet");

        let id = insert_image(&mut state, "b".into(), Vec2::splat(50.0), None).expect("Einfügen erwartet");

        let rect = state.store.image(id).map(|i| i.geometry).unwrap_or_default();
        assert_eq!(rect.min(), Vec2::new(110.0 + spacing, 20.0));
        assert_eq!(state.history.undo_depth(), 2);
    }

    #[test]
    fn insert_rejects_empty_handle_without_side_effects() {
        let mut state = AppState::new();

        let result = insert_image(&mut state, "   ".into(), Vec2::splat(10.0), None);

        assert!(result.is_err());
        assert_eq!(state.store.image_count(), 0);
        assert!(!state.can_undo());
    }

    #[test]
    fn insert_rejects_non_positive_size() {
        let mut state = AppState::new();

        let result = insert_image(&mut state, "a".into(), Vec2::new(0.0, 10.0), None);

        assert!(result.is_err());
        assert!(!state.can_undo());
    }

    #[test]
    fn attach_and_clear_mask() {
        let mut state = AppState::new();
        let id = insert_image(&mut state, "a".into(), Vec2::splat(10.0), None).expect("Einfügen erwartet");

        attach_mask(&mut state, id, Some("mask-1".into())).expect("Maske erwartet");
        assert_eq!(
            state.store.image(id).and_then(|i| i.mask.as_ref()).map(|m| m.as_str()),
            Some("mask-1")
        );

        attach_mask(&mut state, id, None).expect("Entfernen erwartet");
        assert!(state.store.image(id).is_some_and(|i| i.mask.is_none()));
    }

    #[test]
    fn attach_mask_to_unknown_image_fails() {
        let mut state = AppState::new();
        assert!(attach_mask(&mut state, 42, Some("m".into())).is_err());
    }
}
