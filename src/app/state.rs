//! Application State — zentrale Datenhaltung.

use super::history::{EditHistory, Snapshot};
use super::interaction::InteractionState;
use super::CommandLog;
use crate::core::{Camera2D, CanvasStore, CullingCache, VisibleSet};
use crate::shared::EditorOptions;

/// Viewport-Größe, bis der Host die tatsächliche Größe meldet.
pub const DEFAULT_VIEWPORT_SIZE: [f32; 2] = [1280.0, 720.0];

/// View-bezogener Anwendungszustand
#[derive(Debug, Clone)]
pub struct ViewState {
    /// 2D-Kamera für die Ansicht
    pub camera: Camera2D,
    /// Aktuelle Viewport-Größe in Pixel
    pub viewport_size: [f32; 2],
    /// Sichtbare Objekte (neu berechnet nach jedem Command)
    pub culling: CullingCache,
}

impl Default for ViewState {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewState {
    /// Erstellt den Standard-View-Zustand.
    pub fn new() -> Self {
        Self {
            camera: Camera2D::new(),
            viewport_size: DEFAULT_VIEWPORT_SIZE,
            culling: CullingCache::new(),
        }
    }
}

/// Hauptzustand der Anwendung
pub struct AppState {
    /// Szenen-Objekte, Selektion und Scope
    pub store: CanvasStore,
    /// View-State
    pub view: ViewState,
    /// Laufende Drag-Session
    pub interaction: InteractionState,
    /// Verlauf ausgeführter Commands
    pub command_log: CommandLog,
    /// Undo/Redo-History (Snapshot-basiert)
    pub history: EditHistory,
    /// Laufzeit-Optionen
    pub options: EditorOptions,
    /// Ziel für geänderte Optionen (`None`: nicht persistieren)
    pub options_path: Option<std::path::PathBuf>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    /// Erstellt einen neuen, leeren App-State mit Standard-Optionen.
    pub fn new() -> Self {
        Self::with_options(EditorOptions::default())
    }

    /// Erstellt einen leeren App-State mit den übergebenen Optionen.
    pub fn with_options(options: EditorOptions) -> Self {
        let mut state = Self {
            store: CanvasStore::with_group_padding(options.group_padding),
            view: ViewState::new(),
            interaction: InteractionState::new(),
            command_log: CommandLog::new(),
            history: EditHistory::new_with_capacity(options.history_depth),
            options,
            options_path: None,
        };
        state.refresh_visibility();
        state
    }

    /// Gibt die Anzahl der Bilder zurück (für UI-Anzeige)
    pub fn image_count(&self) -> usize {
        self.store.image_count()
    }

    /// Gibt die Anzahl der Gruppen zurück (für UI-Anzeige)
    pub fn group_count(&self) -> usize {
        self.store.group_count()
    }

    /// Undo/Redo helpers
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Gibt zurück, ob ein Redo-Schritt verfügbar ist.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    /// Erstellt einen Undo-Snapshot des aktuellen Zustands.
    /// Reduziert Boilerplate in mutierenden Use-Cases.
    pub fn record_undo_snapshot(&mut self) {
        let snap = Snapshot::from_state(self);
        self.history.record_snapshot(snap);
    }

    /// Zuletzt berechnete sichtbare Menge (Basis für Hit-Tests).
    pub fn visible(&self) -> &VisibleSet {
        self.view.culling.current()
    }

    /// Berechnet die sichtbare Menge neu, falls Kamera, Viewport oder Inhalt sich geändert haben.
    pub fn refresh_visibility(&mut self) {
        self.view.culling.refresh(
            &self.store,
            &self.view.camera,
            self.view.viewport_size,
            self.options.cull_padding_px,
        );
    }
}
