//! Core primitives: geographic types and configuration parsing

pub mod config;
pub mod geo;

pub use config::{CoordinateDisplay, InitialView, MapConfig, MapOptions, SurfaceSettings, ZoomRange};
pub use geo::{LatLng, LatLngBounds, Point};
