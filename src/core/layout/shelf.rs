//! Regal-Packing (Shelf Packing) für Gruppenmitglieder.

use crate::core::Rect;
use glam::Vec2;

/// Ergebnis eines Shelf-Packs
#[derive(Debug, Clone, PartialEq)]
pub struct ShelfPacking {
    /// Neue Welt-Positionen (obere linke Ecke) je Mitglied, in Pack-Reihenfolge
    pub positions: Vec<(u64, Vec2)>,
    /// Neue Gruppen-Box (Ursprung unverändert, Ausdehnung eng um den Inhalt + Abstand)
    pub bounds: Rect,
}

/// Packt Mitglieder zeilenweise in die verfügbare Gruppenbreite.
///
/// Sortierung nach `(y, x)`, Zeilenumbruch sobald das nächste Element
/// `group_width - 2 * padding` überschreiten würde, Zeilenhöhe = höchstes
/// Element der Zeile. Die Box behält `origin` und wird an den Inhalt angepasst.
pub fn shelf_pack(origin: Vec2, group_width: f32, padding: f32, members: &[(u64, Rect)]) -> ShelfPacking {
    let mut sorted: Vec<&(u64, Rect)> = members.iter().collect();
    sorted.sort_by(|(_, a), (_, b)| a.y.total_cmp(&b.y).then(a.x.total_cmp(&b.x)));

    let available = (group_width - 2.0 * padding).max(0.0);
    let mut cursor = Vec2::ZERO;
    let mut row_height: f32 = 0.0;
    let mut content_width: f32 = 0.0;
    let mut positions = Vec::with_capacity(sorted.len());

    for (id, rect) in sorted {
        if cursor.x > 0.0 && cursor.x + rect.width > available {
            cursor.x = 0.0;
            cursor.y += row_height + padding;
            row_height = 0.0;
        }

        positions.push((*id, origin + Vec2::splat(padding) + cursor));
        content_width = content_width.max(cursor.x + rect.width);
        row_height = row_height.max(rect.height);
        cursor.x += rect.width + padding;
    }

    let content_height = cursor.y + row_height;
    ShelfPacking {
        positions,
        bounds: Rect::new(
            origin.x,
            origin.y,
            content_width + 2.0 * padding,
            content_height + 2.0 * padding,
        ),
    }
}
