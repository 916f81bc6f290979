//! Use-Case-Funktionen für Kamera-Steuerung.

use crate::app::AppState;
use glam::Vec2;

/// Setzt die Kamera auf Default zurück.
pub fn reset_camera(state: &mut AppState) {
    state.view.camera = Default::default();
}

/// Zoomt die Kamera stufenweise hinein (Fokus: Viewport-Mitte).
pub fn zoom_in(state: &mut AppState) {
    let step = state.options.camera_zoom_step;
    zoom_towards(state, step, None);
}

/// Zoomt die Kamera stufenweise heraus (Fokus: Viewport-Mitte).
pub fn zoom_out(state: &mut AppState) {
    let step = state.options.camera_zoom_step;
    zoom_towards(state, 1.0 / step, None);
}

/// Verschiebt die Kamera um ein Screen-Delta.
pub fn pan(state: &mut AppState, delta: Vec2) {
    if !delta.is_finite() {
        log::debug!("Pan mit ungültigem Delta ignoriert");
        return;
    }
    state.view.camera.pan_by(delta);
}

/// Zoomt auf einen optionalen Screen-Fokuspunkt hin.
///
/// Der Weltpunkt unter `focus_screen` bleibt an derselben Bildschirmposition;
/// ohne Fokus wird die Viewport-Mitte verwendet.
pub fn zoom_towards(state: &mut AppState, factor: f32, focus_screen: Option<Vec2>) {
    let [width, height] = state.view.viewport_size;
    let focus = focus_screen.unwrap_or(Vec2::new(width, height) * 0.5);
    state.view.camera.zoom_towards(
        factor,
        focus,
        state.options.camera_zoom_min,
        state.options.camera_zoom_max,
    );
}

/// Passt die Kamera an den gesamten Inhalt an. Leere Szene: Reset.
pub fn zoom_to_fit(state: &mut AppState) {
    let Some(bounds) = state.store.content_bounds() else {
        reset_camera(state);
        return;
    };

    state.view.camera.fit_to(
        &bounds,
        state.view.viewport_size,
        state.options.camera_fit_margin_px,
        state.options.camera_zoom_min,
        state.options.camera_zoom_max,
    );

    log::info!(
        "Inhalt eingepasst: ({:.1}, {:.1}) bis ({:.1}, {:.1}), Zoom {:.2}",
        bounds.x,
        bounds.y,
        bounds.right(),
        bounds.bottom(),
        state.view.camera.zoom
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::BitmapHandle;
    use approx::assert_relative_eq;

    #[test]
    fn reset_camera_sets_default_pan_and_zoom() {
        let mut state = AppState::new();
        state.view.camera.pan_by(Vec2::new(100.0, 200.0));
        state.view.camera.zoom_by(5.0);

        reset_camera(&mut state);

        assert_eq!(state.view.camera.pan, Vec2::ZERO);
        assert_eq!(state.view.camera.zoom, 1.0);
    }

    #[test]
    fn zoom_in_then_out_returns_to_original() {
        let mut state = AppState::new();
        let original = state.view.camera;

        zoom_in(&mut state);
        assert!(state.view.camera.zoom > original.zoom);
        zoom_out(&mut state);

        assert_relative_eq!(state.view.camera.zoom, original.zoom, epsilon = 1e-5);
        assert_relative_eq!(state.view.camera.pan.x, original.pan.x, epsilon = 1e-3);
        assert_relative_eq!(state.view.camera.pan.y, original.pan.y, epsilon = 1e-3);
    }

    #[test]
    fn zoom_is_clamped_to_options() {
        let mut state = AppState::new();
        state.options.camera_zoom_max = 2.0;

        zoom_towards(&mut state, 100.0, None);

        assert_relative_eq!(state.view.camera.zoom, 2.0);
    }

    #[test]
    fn zoom_towards_keeps_focus_world_point_stable() {
        let mut state = AppState::new();
        state.view.camera.pan_by(Vec2::new(37.0, -12.0));
        let focus = Vec2::new(300.0, 150.0);
        let world_before = state.view.camera.screen_to_world(focus);

        zoom_towards(&mut state, 2.5, Some(focus));

        let world_after = state.view.camera.screen_to_world(focus);
        assert_relative_eq!(world_before.x, world_after.x, epsilon = 1e-3);
        assert_relative_eq!(world_before.y, world_after.y, epsilon = 1e-3);
    }

    #[test]
    fn zoom_to_fit_centers_content() {
        let mut state = AppState::new();
        state
            .store
            .insert_image(
                BitmapHandle::new("a").expect("gültiger Handle"),
                Vec2::new(4000.0, 1000.0),
                Some(Vec2::new(1000.0, 1000.0)),
                0.0,
            )
            .expect("Einfügen erwartet");

        zoom_to_fit(&mut state);

        let center = state.view.camera.world_to_screen(Vec2::new(3000.0, 1500.0));
        assert_relative_eq!(center.x, state.view.viewport_size[0] * 0.5, epsilon = 1e-2);
        assert_relative_eq!(center.y, state.view.viewport_size[1] * 0.5, epsilon = 1e-2);
        assert!(state.view.camera.zoom < 1.0);
    }

    #[test]
    fn zoom_to_fit_on_empty_scene_resets() {
        let mut state = AppState::new();
        state.view.camera.pan_by(Vec2::new(5.0, 5.0));

        zoom_to_fit(&mut state);

        assert_eq!(state.view.camera.pan, Vec2::ZERO);
    }
}
