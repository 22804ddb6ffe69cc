//! Prelude module for common tilekit types and traits
//!
//! Re-exports the most commonly used types, traits, and functions for easy
//! importing with `use tilekit::prelude::*;`

pub use crate::core::{
    config::{CoordinateDisplay, InitialView, MapConfig, MapOptions, SurfaceSettings, ZoomRange},
    geo::{LatLng, LatLngBounds, Point},
};

pub use crate::layers::{
    indicator::{spinner_id, IndicatorRegistry, LoadingIndicator},
    layer::{LayerHandle, LayerId, TileLayer, TileSource},
    manager::{TileLayerManager, ToggleOutcome},
    raster::{RasterDescriptor, RasterKind, TileOptions, WmsParams},
};

pub use crate::events::{EventManager, LayerEvent, MapEvent};

pub use crate::surface::{headless::HeadlessSurface, MapSurface, MapView};

pub use crate::controller::{MapController, MapInfo, ZoomDirection};

pub use crate::controls::{
    format_coordinates, AttributionControl, ContextMenuPopup, ControlPosition,
    CoordinateProjector, IdentityProjector, MousePositionControl, ScaleControl,
};

pub use crate::location::{Geolocator, LocateOptions, LocationFix, MarkerFactory};

pub use crate::{Error as MapError, Result};

pub use std::sync::Arc;

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
