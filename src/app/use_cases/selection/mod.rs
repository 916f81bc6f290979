//! Use-Case-Funktionen für Objekt-Selektion.
//!
//! Aufgeteilt nach Selektionsmodus:
//! - `pick` — Einzelklick (oberstes Objekt im Scope)
//! - `rect` — Auswahlrechteck
//! - `helpers` — Alles/Nichts selektieren, Scope-Filter

mod helpers;
mod pick;
mod rect;

pub(crate) use helpers::replace_selection;
pub use helpers::{clear_selection, select_all};
pub use pick::{select_object, topmost_at};
pub use rect::{objects_in_rect, select_in_rect};
