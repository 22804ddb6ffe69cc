//! Capability traits for the embedding map widget
//!
//! The real mapping widget (rendering, tile fetching, input) is an external
//! collaborator. These traits are the seam: [`MapSurface`] covers the
//! attached-layer set and [`MapView`] the view state. The in-crate
//! [`headless::HeadlessSurface`] implements both without a renderer.

pub mod headless;

use crate::{
    core::geo::{LatLng, LatLngBounds},
    layers::layer::{LayerHandle, TileLayer},
    Result,
};

pub use headless::HeadlessSurface;

/// The attached-layer set of a map widget
///
/// A pane exists exactly while a layer occupies it: attaching creates the
/// layer's pane, detaching removes it, so a name freed by a detach can be
/// reused by a later attach. The surface owns attached layers and fires
/// their lifecycle hooks as tile requests start and settle.
pub trait MapSurface {
    /// Attach a layer; the surface takes ownership and begins tile requests
    fn add_layer(&mut self, layer: TileLayer) -> Result<LayerHandle>;

    /// Detach a layer; `Ok(false)` when the handle no longer names one
    fn remove_layer(&mut self, handle: &LayerHandle) -> Result<bool>;

    /// Whether the handle still names an attached layer
    fn has_layer(&self, handle: &LayerHandle) -> bool;

    /// Whether a pane exists under `name`
    fn has_pane(&self, name: &str) -> bool;

    /// Visit every attached layer; the handle's source URL is recoverable
    fn for_each_layer(&self, visit: &mut dyn FnMut(&LayerHandle));
}

/// View state of a map widget
pub trait MapView {
    fn center(&self) -> LatLng;

    fn zoom(&self) -> f64;

    fn bounds(&self) -> LatLngBounds;

    fn set_view(&mut self, center: LatLng, zoom: f64);

    /// Zoom in by the widget's configured zoom delta
    fn zoom_in(&mut self);

    /// Zoom out by the widget's configured zoom delta
    fn zoom_out(&mut self);
}
