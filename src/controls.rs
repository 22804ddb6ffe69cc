//! Surface control configuration and coordinate readouts
//!
//! Controls are configuration the embedder hands to its widget: a scale
//! bar, an attribution prefix, a mouse-position readout, and a context-menu
//! coordinate popup. The readouts format through a [`CoordinateProjector`]
//! so the projection implementation stays with the host (no projection math
//! lives in this crate).

use crate::{
    core::{
        config::CoordinateDisplay,
        geo::{LatLng, Point},
    },
    events::{EventManager, MapEvent},
};

/// Where a control sits on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Scale bar configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaleControl {
    pub position: ControlPosition,
    /// Maximum width of the bar in pixels
    pub max_width: u32,
    pub metric: bool,
    pub imperial: bool,
}

impl Default for ScaleControl {
    fn default() -> Self {
        Self {
            position: ControlPosition::BottomLeft,
            max_width: 150,
            metric: true,
            imperial: false,
        }
    }
}

impl ScaleControl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_width(mut self, max_width: u32) -> Self {
        self.max_width = max_width;
        self
    }

    pub fn with_position(mut self, position: ControlPosition) -> Self {
        self.position = position;
        self
    }
}

/// Attribution prefix shown at the bottom corner of the surface
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AttributionControl {
    pub prefix: String,
}

impl AttributionControl {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

/// Projects geographic coordinates into the configured display system
///
/// The host supplies the real projector; this crate only formats whatever
/// comes back.
pub trait CoordinateProjector: Send + Sync {
    /// Project to display coordinates: `x` is easting/longitude, `y` is
    /// northing/latitude
    fn project(&self, lat_lng: LatLng) -> Point;
}

/// Passes geographic coordinates through unchanged
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityProjector;

impl CoordinateProjector for IdentityProjector {
    fn project(&self, lat_lng: LatLng) -> Point {
        Point::new(lat_lng.lng, lat_lng.lat)
    }
}

/// Formats a projected coordinate for a one-line readout
pub fn format_coordinates(display: CoordinateDisplay, point: Point) -> String {
    match display {
        CoordinateDisplay::Utm => format!("{:.0} N : {:.0} E", point.y, point.x),
        CoordinateDisplay::LatLng => format!("Lat.:{:.5} | Lon.:{:.5}", point.y, point.x),
    }
}

/// Mouse position readout configuration
pub struct MousePositionControl {
    pub position: ControlPosition,
    /// Text shown while no coordinate is available
    pub empty_text: String,
    display: CoordinateDisplay,
    projector: Box<dyn CoordinateProjector>,
}

impl MousePositionControl {
    pub fn new(display: CoordinateDisplay, projector: Box<dyn CoordinateProjector>) -> Self {
        Self {
            position: ControlPosition::BottomLeft,
            empty_text: "Coordinates unavailable".to_string(),
            display,
            projector,
        }
    }

    pub fn with_empty_text(mut self, empty_text: impl Into<String>) -> Self {
        self.empty_text = empty_text.into();
        self
    }

    /// Formats the readout for the pointer position, or the empty text when
    /// the pointer is off the surface
    pub fn format(&self, lat_lng: Option<LatLng>) -> String {
        match lat_lng {
            Some(lat_lng) => format_coordinates(self.display, self.projector.project(lat_lng)),
            None => self.empty_text.clone(),
        }
    }
}

impl std::fmt::Debug for MousePositionControl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MousePositionControl")
            .field("position", &self.position)
            .field("display", &self.display)
            .finish()
    }
}

/// Context-menu coordinate popup
///
/// Formats the clicked position; presenting the popup is the host's job.
pub struct ContextMenuPopup {
    display: CoordinateDisplay,
    projector: Box<dyn CoordinateProjector>,
}

impl ContextMenuPopup {
    pub fn new(display: CoordinateDisplay, projector: Box<dyn CoordinateProjector>) -> Self {
        Self { display, projector }
    }

    /// Popup body for a clicked position
    pub fn content(&self, lat_lng: LatLng) -> String {
        let point = self.projector.project(lat_lng);
        match self.display {
            CoordinateDisplay::Utm => format!("N: {:.0}\nE: {:.0}", point.y, point.x),
            CoordinateDisplay::LatLng => {
                format!("Lat.: {:.5}\nLon.: {:.5}", point.y, point.x)
            }
        }
    }

    /// Wires the popup onto a surface's `contextmenu` event; `present`
    /// receives the clicked position and the formatted body
    pub fn install<F>(self, events: &mut EventManager, present: F)
    where
        F: Fn(LatLng, String) + Send + Sync + 'static,
    {
        events.on("contextmenu", move |event| {
            if let MapEvent::ContextMenu { lat_lng, .. } = event {
                present(*lat_lng, self.content(*lat_lng));
            }
        });
        log::debug!("context menu popup wired to the surface");
    }
}

impl std::fmt::Debug for ContextMenuPopup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextMenuPopup")
            .field("display", &self.display)
            .finish()
    }
}
