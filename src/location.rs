//! User geolocation wiring
//!
//! The device location comes from a [`Geolocator`] the host supplies;
//! markers and accuracy circles are created through a [`MarkerFactory`] so
//! the concrete shapes stay with the mapping widget. A failed locate is
//! reported to the embedder, never fatal.

use crate::{core::geo::LatLng, surface::MapView, Result};

/// A device location fix
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocationFix {
    pub lat_lng: LatLng,
    /// Accuracy radius in meters
    pub accuracy: f64,
}

/// Options for a locate request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateOptions {
    /// Re-center the view on the fix
    pub set_view: bool,
    /// Zoom level the view moves to at most
    pub max_zoom: f64,
}

impl Default for LocateOptions {
    fn default() -> Self {
        Self {
            set_view: true,
            max_zoom: 16.0,
        }
    }
}

/// Capability for obtaining the device location
pub trait Geolocator: Send + Sync {
    fn locate(&mut self) -> Result<LocationFix>;
}

/// Marker and shape creation stays with the mapping widget
pub trait MarkerFactory {
    /// Place a marker with a popup at a position
    fn place_marker(&mut self, at: LatLng, popup_text: &str);

    /// Place a circle of `radius` meters around a center
    fn place_circle(&mut self, center: LatLng, radius: f64);
}

/// Text shown in the marker popup on a successful locate
pub const LOCATION_POPUP_TEXT: &str = "You are here!";

/// Locates the user and shows the fix on the surface
///
/// On success a marker and an accuracy circle (half the reported accuracy,
/// in meters) are placed and the view optionally re-centers on the fix. On
/// failure the error is returned for the embedder to present.
pub fn show_user_location(
    geolocator: &mut dyn Geolocator,
    view: &mut dyn MapView,
    markers: &mut dyn MarkerFactory,
    options: &LocateOptions,
) -> Result<LocationFix> {
    let fix = geolocator.locate().map_err(|err| {
        log::warn!("geolocation failed: {err}");
        err
    })?;

    let radius = fix.accuracy / 2.0;
    markers.place_marker(fix.lat_lng, LOCATION_POPUP_TEXT);
    markers.place_circle(fix.lat_lng, radius);

    if options.set_view {
        view.set_view(fix.lat_lng, options.max_zoom);
    }

    log::debug!(
        "user located at {:.5} {:.5} (accuracy {} m)",
        fix.lat_lng.lat,
        fix.lat_lng.lng,
        fix.accuracy
    );
    Ok(fix)
}
