//! Mauerwerk-Layout (Masonry) mit Greedy-Kürzeste-Spalte.

use glam::Vec2;

/// Ergebnis eines Masonry-Layouts (Positionen relativ zur oberen linken Blockecke)
#[derive(Debug, Clone, PartialEq)]
pub struct MasonryLayout {
    /// Lokale Position je Element, in Eingabe-Reihenfolge
    pub positions: Vec<(u64, Vec2)>,
    /// Ausdehnung des gesamten Blocks
    pub size: Vec2,
    /// Anzahl Spalten
    pub columns: usize,
}

/// Ordnet Elemente in `round(sqrt(n))` Spalten an.
///
/// Spaltenbreiten stammen aus einer Round-Robin-Vorverteilung; platziert wird
/// jeweils in der aktuell niedrigsten Spalte, horizontal zentriert.
pub fn masonry_layout(items: &[(u64, Vec2)], spacing: f32) -> MasonryLayout {
    if items.is_empty() {
        return MasonryLayout {
            positions: Vec::new(),
            size: Vec2::ZERO,
            columns: 0,
        };
    }

    let columns = ((items.len() as f32).sqrt().round() as usize).max(1);

    let mut widths = vec![0.0f32; columns];
    for (index, (_, size)) in items.iter().enumerate() {
        let column = index % columns;
        widths[column] = widths[column].max(size.x);
    }

    let mut offsets = Vec::with_capacity(columns);
    let mut x = 0.0;
    for width in &widths {
        offsets.push(x);
        x += width + spacing;
    }
    let block_width = x - spacing;

    let mut heights = vec![0.0f32; columns];
    let mut positions = Vec::with_capacity(items.len());
    for (id, size) in items {
        let column = shortest_column(&heights);
        let left = offsets[column] + (widths[column] - size.x) * 0.5;
        positions.push((*id, Vec2::new(left, heights[column])));
        heights[column] += size.y + spacing;
    }

    let block_height = heights.iter().copied().fold(0.0f32, f32::max) - spacing;

    MasonryLayout {
        positions,
        size: Vec2::new(block_width, block_height.max(0.0)),
        columns,
    }
}

/// Index der niedrigsten Spalte (bei Gleichstand die linke).
fn shortest_column(heights: &[f32]) -> usize {
    heights
        .iter()
        .enumerate()
        .fold((0, f32::INFINITY), |best, (index, &height)| {
            if height < best.1 {
                (index, height)
            } else {
                best
            }
        })
        .0
}
