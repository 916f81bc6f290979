//! Reine Layout-Algorithmen (ohne Zugriff auf den Objekt-Speicher).
//!
//! - `shelf` — Regal-Packing für das Neu-Packen von Gruppen
//! - `masonry` — Spalten-Mauerwerk für das Ausrichten einer Mehrfachauswahl

mod masonry;
mod shelf;

pub use masonry::{masonry_layout, MasonryLayout};
pub use shelf::{shelf_pack, ShelfPacking};
