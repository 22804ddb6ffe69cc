//! Map controller: an explicit handle over the live surface
//!
//! Returned from map initialization instead of hanging reset/info functions
//! off a process-wide namespace; it keeps the initial view and exposes the
//! named operations, so several map instances can coexist.

use crate::{
    core::{
        config::InitialView,
        geo::{LatLng, LatLngBounds},
    },
    location::MarkerFactory,
    surface::MapView,
    Result,
};

/// Zoom direction for the surface's zoom buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomDirection {
    In,
    Out,
}

/// Snapshot of the surface view state
#[derive(Debug, Clone, PartialEq)]
pub struct MapInfo {
    pub zoom: f64,
    pub center: LatLng,
    pub bounds: LatLngBounds,
    /// The view as x (longitude), y (latitude), z (zoom)
    pub xyz: InitialView,
}

/// Zoom used when jumping to user-entered coordinates
const JUMP_ZOOM: f64 = 15.0;

/// Controller handle for one map instance
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapController {
    initial_center: LatLng,
    initial_zoom: f64,
}

impl MapController {
    pub fn new(initial_center: LatLng, initial_zoom: f64) -> Self {
        Self {
            initial_center,
            initial_zoom,
        }
    }

    /// Builds a controller from a configured initial view
    pub fn from_view(view: &InitialView) -> Self {
        Self::new(view.center(), view.zoom())
    }

    pub fn initial_center(&self) -> LatLng {
        self.initial_center
    }

    pub fn initial_zoom(&self) -> f64 {
        self.initial_zoom
    }

    /// Returns the surface to the configured initial view
    pub fn reset_view(&self, view: &mut dyn MapView) {
        view.set_view(self.initial_center, self.initial_zoom);
        log::debug!(
            "view reset to {:.5} {:.5} at zoom {}",
            self.initial_center.lat,
            self.initial_center.lng,
            self.initial_zoom
        );
    }

    /// Snapshot of the current view state
    pub fn info(&self, view: &dyn MapView) -> MapInfo {
        let center = view.center();
        let zoom = view.zoom();
        MapInfo {
            zoom,
            center,
            bounds: view.bounds(),
            xyz: InitialView {
                x: center.lng,
                y: center.lat,
                z: zoom,
            },
        }
    }

    /// Adjusts the zoom level one step in the given direction
    pub fn zoom(&self, view: &mut dyn MapView, direction: ZoomDirection) {
        match direction {
            ZoomDirection::In => view.zoom_in(),
            ZoomDirection::Out => view.zoom_out(),
        }
    }

    /// Jumps to user-entered `"latitude longitude"` coordinates
    ///
    /// Parses the input, drops a marker at the position, re-centers the
    /// view, and returns the resulting view snapshot. Malformed input is a
    /// parse error and leaves the view untouched.
    pub fn jump_to(
        &self,
        view: &mut dyn MapView,
        markers: &mut dyn MarkerFactory,
        input: &str,
    ) -> Result<MapInfo> {
        let target: LatLng = input.parse()?;
        markers.place_marker(target, input.trim());
        view.set_view(target, JUMP_ZOOM);
        Ok(self.info(view))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::MapOptions, surface::headless::HeadlessSurface, MapError};

    #[derive(Default)]
    struct RecordingMarkers(Vec<LatLng>);

    impl MarkerFactory for RecordingMarkers {
        fn place_marker(&mut self, at: LatLng, _popup_text: &str) {
            self.0.push(at);
        }

        fn place_circle(&mut self, _center: LatLng, _radius: f64) {}
    }

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(MapOptions::default()).with_view(LatLng::new(-23.55, -46.63), 12.0)
    }

    #[test]
    fn test_reset_view_restores_initial_state() {
        let mut surface = surface();
        let controller = MapController::new(LatLng::new(-23.55, -46.63), 12.0);

        surface.set_view(LatLng::new(40.7, -74.0), 8.0);
        controller.reset_view(&mut surface);

        assert_eq!(surface.center(), LatLng::new(-23.55, -46.63));
        assert_eq!(surface.zoom(), 12.0);
    }

    #[test]
    fn test_info_snapshot() {
        let surface = surface();
        let controller = MapController::new(LatLng::new(-23.55, -46.63), 12.0);

        let info = controller.info(&surface);
        assert_eq!(info.zoom, 12.0);
        assert_eq!(info.center, LatLng::new(-23.55, -46.63));
        assert_eq!(info.xyz.x, -46.63);
        assert_eq!(info.xyz.y, -23.55);
        assert_eq!(info.xyz.z, 12.0);
    }

    #[test]
    fn test_zoom_dispatch() {
        let mut surface = surface();
        let controller = MapController::new(LatLng::new(-23.55, -46.63), 12.0);

        controller.zoom(&mut surface, ZoomDirection::In);
        assert_eq!(surface.zoom(), 13.0);
        controller.zoom(&mut surface, ZoomDirection::Out);
        assert_eq!(surface.zoom(), 12.0);
    }

    #[test]
    fn test_jump_to_parses_and_recenters() {
        let mut surface = surface();
        let mut markers = RecordingMarkers::default();
        let controller = MapController::from_view(&InitialView {
            x: -46.63,
            y: -23.55,
            z: 12.0,
        });
        assert_eq!(controller.initial_center(), LatLng::new(-23.55, -46.63));
        assert_eq!(controller.initial_zoom(), 12.0);

        let info = controller
            .jump_to(&mut surface, &mut markers, "-23.123456 -46.123456")
            .unwrap();

        assert_eq!(info.center, LatLng::new(-23.123456, -46.123456));
        assert_eq!(info.zoom, 15.0);
        assert_eq!(markers.0, vec![LatLng::new(-23.123456, -46.123456)]);
    }

    #[test]
    fn test_jump_to_rejects_malformed_input() {
        let mut surface = surface();
        let mut markers = RecordingMarkers::default();
        let controller = MapController::new(LatLng::new(-23.55, -46.63), 12.0);
        let before = surface.center();

        let err = controller
            .jump_to(&mut surface, &mut markers, "not coordinates")
            .unwrap_err();

        assert!(matches!(err, MapError::Parse(_)));
        assert!(markers.0.is_empty());
        assert_eq!(surface.center(), before);
    }
}
