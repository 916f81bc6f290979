//! Ausrichten einer Mehrfach-Selektion als Masonry-Block.

use super::CanvasStore;
use crate::core::layout::masonry_layout;
use crate::core::{ImageRole, Rect};
use glam::Vec2;
use std::cmp::Ordering;

impl CanvasStore {
    /// Richtet die selektierten, ungruppierten Bilder als Masonry-Block aus.
    ///
    /// Ein selektiertes Original bleibt an seiner Position; der Block wird
    /// direkt rechts davon, oben bündig, angesetzt. Ohne Original behält die
    /// obere linke Ecke des Blocks die bisherige Ecke der Auswahl.
    pub fn align_selection(&mut self, spacing: f32) -> bool {
        let spacing = spacing.max(0.0);
        let loose: Vec<(u64, Rect, ImageRole, Option<usize>)> = self
            .selection
            .selected_image_ids
            .iter()
            .filter_map(|id| self.images.get(id))
            .filter(|image| image.group_id.is_none())
            .map(|image| (image.id, image.geometry, image.role, image.reference_index))
            .collect();

        if loose.len() < 2 {
            log::debug!("Ausrichten: weniger als zwei ungruppierte Bilder selektiert");
            return false;
        }

        let original = loose
            .iter()
            .find(|(_, _, role, _)| *role == ImageRole::Original)
            .map(|(_, rect, _, _)| *rect);

        let mut rest: Vec<_> = loose
            .iter()
            .filter(|(_, _, role, _)| *role != ImageRole::Original)
            .collect();
        if rest.is_empty() {
            return false;
        }
        rest.sort_by(|a, b| alignment_order(a.2, a.3, &a.1, b.2, b.3, &b.1));

        let origin = match original {
            Some(pinned) => Vec2::new(pinned.right() + spacing, pinned.y),
            None => Rect::union_all(rest.iter().map(|(_, rect, _, _)| rect))
                .map(|bounds| bounds.min())
                .unwrap_or(Vec2::ZERO),
        };

        let items: Vec<(u64, Vec2)> = rest
            .iter()
            .map(|(id, rect, _, _)| (*id, rect.size()))
            .collect();
        let layout = masonry_layout(&items, spacing);

        let images = self.images_mut();
        for (id, local) in &layout.positions {
            if let Some(image) = images.get_mut(id) {
                let target = origin + *local;
                image.geometry.x = target.x;
                image.geometry.y = target.y;
            }
        }
        self.commit();

        log::info!(
            "{} Bild(er) in {} Spalte(n) ausgerichtet{}",
            layout.positions.len(),
            layout.columns,
            if original.is_some() { " (Original fixiert)" } else { "" }
        );
        true
    }
}

/// Rollen-Vorrang, dann Referenz-Index, dann `(y, x)`.
fn alignment_order(
    role_a: ImageRole,
    index_a: Option<usize>,
    rect_a: &Rect,
    role_b: ImageRole,
    index_b: Option<usize>,
    rect_b: &Rect,
) -> Ordering {
    role_a
        .precedence()
        .cmp(&role_b.precedence())
        .then(index_a.cmp(&index_b))
        .then(rect_a.y.total_cmp(&rect_b.y))
        .then(rect_a.x.total_cmp(&rect_b.x))
}
