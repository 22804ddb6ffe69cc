//! # tilekit
//!
//! Configuration and event-wiring glue for raster tile layers on an
//! embeddable map surface.
//!
//! The mapping widget itself (rendering, tile fetching, input) lives behind
//! the [`MapSurface`] and [`MapView`] capability traits; this crate parses
//! raster descriptors and map options from configuration data, attaches
//! basemap/overlay/WMS layers, toggles layer visibility, wires loading
//! indicators, and formats coordinate readouts. An in-memory
//! [`HeadlessSurface`] is included so embeddings and tests can run without a
//! renderer.

pub mod controller;
pub mod controls;
pub mod core;
pub mod events;
pub mod layers;
pub mod location;
pub mod prelude;
pub mod surface;

// Re-export public API
pub use crate::core::{
    config::{CoordinateDisplay, InitialView, MapConfig, MapOptions, SurfaceSettings, ZoomRange},
    geo::{LatLng, LatLngBounds, Point},
};

pub use crate::layers::{
    indicator::{IndicatorRegistry, LoadingIndicator},
    layer::{LayerHandle, LayerId, TileLayer, TileSource},
    manager::{TileLayerManager, ToggleOutcome},
    raster::{RasterDescriptor, RasterKind, TileOptions, WmsParams},
};

pub use crate::events::{EventManager, LayerEvent, MapEvent};

pub use crate::surface::{headless::HeadlessSurface, MapSurface, MapView};

pub use crate::controller::{MapController, MapInfo, ZoomDirection};

pub use crate::controls::{
    AttributionControl, ContextMenuPopup, ControlPosition, CoordinateProjector, IdentityProjector,
    MousePositionControl, ScaleControl,
};

pub use crate::location::{Geolocator, LocateOptions, LocationFix, MarkerFactory};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("invalid raster kind `{kind}` for layer `{name}`: toggle accepts overlay or wms")]
    InvalidKind { name: String, kind: RasterKind },

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("geolocation error: {0}")]
    Location(String),
}

/// Error type alias for convenience
pub type Error = MapError;
