//! Raster layer model and lifecycle management
//!
//! This module provides the tile layer machinery:
//! - Raster descriptors parsed from configuration data
//! - Tile layers (XYZ template and WMS request) with lifecycle hooks
//! - The layer manager: attach-if-absent, detach-if-present, toggle
//! - Loading indicator wiring with instance-identity guarding

pub mod indicator;
pub mod layer;
pub mod manager;
pub mod raster;

pub use indicator::{spinner_id, IndicatorRegistry, LoadingIndicator};
pub use layer::{LayerHandle, LayerId, TileLayer, TileSource};
pub use manager::{TileLayerManager, ToggleOutcome};
pub use raster::{RasterDescriptor, RasterKind, TileOptions, WmsParams};
