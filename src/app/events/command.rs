use crate::app::interaction::ResizeHandle;
use crate::core::{ImageRole, ObjectRef};
use crate::shared::EditorOptions;
use glam::Vec2;

/// Mutierende App-Commands (Ergebnis des Intent-Mappings).
/// Positionen sind Welt-Koordinaten, Kamera-Deltas Screen-Pixel.
#[derive(Debug, Clone, PartialEq)]
pub enum AppCommand {
    // === Kamera & Viewport ===
    /// Viewport-Größe setzen
    SetViewportSize { size: [f32; 2] },
    /// Kamera um ein Screen-Delta verschieben
    PanCamera { delta: Vec2 },
    /// Kamera zoomen (Screen-Fokuspunkt bleibt stabil)
    ZoomCamera {
        factor: f32,
        focus_screen: Option<Vec2>,
    },
    /// Stufenweise hineinzoomen
    ZoomIn,
    /// Stufenweise herauszoomen
    ZoomOut,
    /// Kamera zurücksetzen
    ResetCamera,
    /// Inhalt einpassen
    ZoomToFit,

    // === Selektion ===
    /// Objekt per Klick selektieren (additiv = umschalten)
    SelectObject { target: ObjectRef, additive: bool },
    /// Alle Objekte des aktuellen Scopes selektieren
    SelectAll,
    /// Selektion aufheben
    ClearSelection,

    // === Drag-Sessions ===
    /// Verschieben der Selektion beginnen
    BeginMove { world_pos: Vec2 },
    /// Resize eines Bildes beginnen
    BeginResize {
        image_id: u64,
        handle: ResizeHandle,
        world_pos: Vec2,
    },
    /// Skalieren der Selektions-Box beginnen
    BeginScaleSelection { handle: ResizeHandle, world_pos: Vec2 },
    /// Auswahlrechteck beginnen
    BeginMarquee { world_pos: Vec2, additive: bool },
    /// Aktive Session aktualisieren
    UpdateDrag { world_pos: Vec2 },
    /// Aktive Session abschließen
    EndDrag { world_pos: Vec2 },
    /// Aktive Session ohne Rücksetzen beenden
    CancelDrag,

    // === Editing ===
    /// Selektion löschen
    DeleteSelection,
    /// Objekt nach vorne bringen
    BringToFront { target: ObjectRef },
    /// Selektierte Bilder gruppieren
    GroupSelection,
    /// Selektierte Gruppen auflösen
    UngroupSelection,
    /// Gruppen-Bearbeitung betreten
    EnterGroupEditMode { group_id: u64 },
    /// Gruppen-Bearbeitung verlassen
    ExitGroupEditMode,
    /// Gruppe umbenennen
    RenameGroup { group_id: u64, name: String },
    /// Selektion ausrichten
    AlignSelection { spacing: f32 },
    /// Rolle zuweisen (Toggle)
    AssignRole { role: ImageRole },
    /// Rolle der Selektion entfernen
    ClearRoleForSelection,
    /// Aktive Referenz entfernen
    ClearActiveReference,
    /// Bitmap als Bild einfügen
    InsertImage {
        bitmap: String,
        size: Vec2,
        world_pos: Option<Vec2>,
    },
    /// Maske setzen oder entfernen
    AttachMask {
        image_id: u64,
        mask: Option<String>,
    },

    // === History & Optionen ===
    /// Undo
    Undo,
    /// Redo
    Redo,
    /// Optionen übernehmen
    ApplyOptions { options: EditorOptions },
    /// Optionen zurücksetzen
    ResetOptions,
}
