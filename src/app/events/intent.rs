use crate::core::ImageRole;
use crate::shared::EditorOptions;
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// App-Intent Events.
/// Intents sind Eingaben aus UI/System ohne direkte Mutationslogik.
/// Pointer-Positionen sind Screen-Koordinaten.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AppIntent {
    // ── Kamera & Viewport ───────────────────────────────────────
    /// Viewport-Größe hat sich geändert
    ViewportResized { size: [f32; 2] },
    /// Kamera um ein Screen-Delta verschieben
    CameraPan { delta: Vec2 },
    /// Kamera zoomen (optional auf einen Screen-Fokuspunkt)
    CameraZoom {
        factor: f32,
        #[serde(default)]
        focus_screen: Option<Vec2>,
    },
    /// Mausrad-Scroll (positive Werte = hineinzoomen)
    ScrollZoom { steps: f32, screen_pos: Vec2 },
    /// Stufenweise hineinzoomen
    ZoomInRequested,
    /// Stufenweise herauszoomen
    ZoomOutRequested,
    /// Kamera auf Standard zurücksetzen
    ResetCameraRequested,
    /// Gesamten Inhalt einpassen
    ZoomToFitRequested,

    // ── Pointer ─────────────────────────────────────────────────
    /// Primärtaste gedrückt
    PointerPressed {
        screen_pos: Vec2,
        #[serde(default)]
        shift: bool,
    },
    /// Pointer bei gedrückter Taste bewegt
    PointerDragged { screen_pos: Vec2 },
    /// Primärtaste losgelassen
    PointerReleased { screen_pos: Vec2 },
    /// Doppelklick (betritt den Bearbeitungsmodus einer Gruppe)
    PointerDoubleClicked { screen_pos: Vec2 },
    /// Escape gedrückt
    EscapePressed,

    // ── Selektion ───────────────────────────────────────────────
    /// Alle Objekte selektieren
    SelectAllRequested,
    /// Selektion aufheben
    ClearSelectionRequested,
    /// Selektion löschen
    DeleteSelectedRequested,
    /// Selektion nach vorne bringen
    BringToFrontRequested,

    // ── Gruppen ─────────────────────────────────────────────────
    /// Selektierte Bilder gruppieren
    GroupSelectionRequested,
    /// Selektierte Gruppen auflösen
    UngroupSelectionRequested,
    /// Gruppen-Bearbeitung betreten
    EnterGroupEditRequested { group_id: u64 },
    /// Gruppen-Bearbeitung verlassen
    ExitGroupEditRequested,
    /// Gruppe umbenennen
    RenameGroupRequested { group_id: u64, name: String },

    // ── Layout & Rollen ─────────────────────────────────────────
    /// Selektion als Masonry-Block ausrichten
    AlignSelectionRequested,
    /// Rolle für die Bild-Selektion setzen (Toggle)
    AssignRoleRequested { role: ImageRole },
    /// Rolle der Bild-Selektion entfernen
    ClearRoleRequested,
    /// Aktive Referenz entfernen
    ClearActiveReferenceRequested,

    // ── Externe Kollaborateure ──────────────────────────────────
    /// Bitmap als neues Bild einfügen (ohne Position: rechts neben dem Inhalt)
    InsertImageRequested {
        bitmap: String,
        size: Vec2,
        #[serde(default)]
        world_pos: Option<Vec2>,
    },
    /// Maske setzen oder entfernen
    AttachMaskRequested {
        image_id: u64,
        #[serde(default)]
        mask: Option<String>,
    },

    // ── History & Optionen ──────────────────────────────────────
    /// Undo: Letzte Aktion rückgängig machen
    UndoRequested,
    /// Redo: Rückgängig gemachte Aktion wiederherstellen
    RedoRequested,
    /// Optionen wurden geändert (sofortige Anwendung)
    OptionsChanged { options: EditorOptions },
    /// Optionen auf Standardwerte zurücksetzen
    ResetOptionsRequested,
}
