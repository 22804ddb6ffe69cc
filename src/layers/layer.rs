//! Tile layer objects and attach handles

use std::sync::atomic::{AtomicU64, Ordering};

use crate::{
    events::{LayerEvent, LayerHooks},
    layers::raster::{TileOptions, WmsParams},
};

/// Identity of one layer instance; distinguishes successive attaches of the
/// same layer name
pub type LayerId = u64;

static NEXT_LAYER_ID: AtomicU64 = AtomicU64::new(1);

/// Where a layer pulls tiles from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TileSource {
    /// Fixed tile URL template, e.g. `http://tile.example/{z}/{x}/{y}.png`
    Xyz { template: String },
    /// WMS endpoint plus request parameters
    Wms { endpoint: String, params: WmsParams },
}

impl TileSource {
    /// The source URL layers are keyed by on a surface
    pub fn url(&self) -> &str {
        match self {
            TileSource::Xyz { template } => template,
            TileSource::Wms { endpoint, .. } => endpoint,
        }
    }

    pub fn is_wms(&self) -> bool {
        matches!(self, TileSource::Wms { .. })
    }
}

/// A tile layer ready to attach to a map surface
///
/// The surface takes ownership on attach and owns the layer's lifecycle;
/// callers keep only the returned [`LayerHandle`]. Lifecycle hooks travel
/// with the layer and are fired by the surface as tile requests start and
/// settle.
pub struct TileLayer {
    id: LayerId,
    pane: String,
    source: TileSource,
    options: TileOptions,
    hooks: LayerHooks,
}

impl TileLayer {
    pub fn new(pane: impl Into<String>, source: TileSource, options: TileOptions) -> Self {
        Self {
            id: NEXT_LAYER_ID.fetch_add(1, Ordering::Relaxed),
            pane: pane.into(),
            source,
            options,
            hooks: LayerHooks::new(),
        }
    }

    /// Register a lifecycle listener, chainable at construction
    pub fn on<F>(mut self, event: LayerEvent, callback: F) -> Self
    where
        F: Fn(LayerEvent) + Send + Sync + 'static,
    {
        self.hooks.on(event, callback);
        self
    }

    /// Deliver a lifecycle event to the layer's listeners; called by the
    /// surface owning the layer
    pub fn fire(&self, event: LayerEvent) {
        self.hooks.fire(event);
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    /// The pane name this layer occupies while attached
    pub fn pane(&self) -> &str {
        &self.pane
    }

    pub fn source(&self) -> &TileSource {
        &self.source
    }

    pub fn url(&self) -> &str {
        self.source.url()
    }

    pub fn options(&self) -> &TileOptions {
        &self.options
    }

    pub fn is_wms(&self) -> bool {
        self.source.is_wms()
    }

    /// The handle a surface returns for this layer on attach
    pub fn handle(&self) -> LayerHandle {
        LayerHandle {
            id: self.id,
            pane: self.pane.clone(),
            url: self.url().to_string(),
        }
    }
}

impl std::fmt::Debug for TileLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TileLayer")
            .field("id", &self.id)
            .field("pane", &self.pane)
            .field("source", &self.source)
            .finish()
    }
}

/// Live handle to a layer attached to a surface
///
/// Keyed by source URL for lookup; the `id` is the instance identity used to
/// guard indicator updates across successive attaches of the same name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerHandle {
    id: LayerId,
    pane: String,
    url: String,
}

impl LayerHandle {
    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn pane(&self) -> &str {
        &self.pane
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}
