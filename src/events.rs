//! Event plumbing: per-attach layer notifications and map-level events
//!
//! Layer hooks implement the two-state notification contract for one attach:
//! `Loading` fires when the surface starts fetching tiles for the layer and
//! `Load` fires when the fetch settles. `Load` always eventually follows
//! `Loading` for a given attach, or both are skipped if the attach fails
//! before any request is issued.

use crate::{
    core::geo::{LatLng, Point},
    layers::layer::LayerId,
    prelude::HashMap,
};

/// Lifecycle notifications a surface delivers for one attached layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerEvent {
    /// Tile requests for the layer have started
    Loading,
    /// All outstanding tile requests for the layer have settled
    Load,
}

/// Callback invoked with layer lifecycle notifications
pub type LayerCallback = Box<dyn Fn(LayerEvent) + Send + Sync>;

/// Per-layer listener registry; travels with the layer onto the surface
#[derive(Default)]
pub struct LayerHooks {
    listeners: HashMap<LayerEvent, Vec<LayerCallback>>,
}

impl LayerHooks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener for one lifecycle event
    pub fn on<F>(&mut self, event: LayerEvent, callback: F)
    where
        F: Fn(LayerEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event)
            .or_default()
            .push(Box::new(callback));
    }

    /// Deliver an event to every listener registered for it
    pub fn fire(&self, event: LayerEvent) {
        if let Some(callbacks) = self.listeners.get(&event) {
            for callback in callbacks {
                callback(event);
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.values().all(|callbacks| callbacks.is_empty())
    }
}

impl std::fmt::Debug for LayerHooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LayerHooks")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Map event types that can be emitted by the surface
#[derive(Debug, Clone, PartialEq)]
pub enum MapEvent {
    /// Map view has changed (center or zoom)
    ViewChanged { center: LatLng, zoom: f64 },
    /// Right click / long press on the map
    ContextMenu { lat_lng: LatLng, pixel: Point },
    /// Layer was added to the map
    LayerAdd { layer_id: LayerId, url: String },
    /// Layer was removed from the map
    LayerRemove { layer_id: LayerId, url: String },
    /// Device location was found
    LocationFound { lat_lng: LatLng, accuracy: f64 },
    /// Device location could not be obtained
    LocationError { message: String },
}

impl MapEvent {
    /// The event name used for listener registration
    pub fn name(&self) -> &'static str {
        match self {
            MapEvent::ViewChanged { .. } => "viewchanged",
            MapEvent::ContextMenu { .. } => "contextmenu",
            MapEvent::LayerAdd { .. } => "layeradd",
            MapEvent::LayerRemove { .. } => "layerremove",
            MapEvent::LocationFound { .. } => "locationfound",
            MapEvent::LocationError { .. } => "locationerror",
        }
    }
}

/// Event listener callback type
pub type EventCallback = Box<dyn Fn(&MapEvent) + Send + Sync>;

/// Event management system for the map surface
#[derive(Default)]
pub struct EventManager {
    /// Event listeners by event name
    listeners: HashMap<String, Vec<EventCallback>>,
}

impl EventManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an event listener
    pub fn on<F>(&mut self, event_name: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.listeners
            .entry(event_name.to_string())
            .or_default()
            .push(Box::new(callback));
    }

    /// Deliver an event to every listener registered under its name
    pub fn emit(&self, event: &MapEvent) {
        if let Some(callbacks) = self.listeners.get(event.name()) {
            for callback in callbacks {
                callback(event);
            }
        }
    }

    /// Number of listeners registered under an event name
    pub fn listener_count(&self, event_name: &str) -> usize {
        self.listeners
            .get(event_name)
            .map(|callbacks| callbacks.len())
            .unwrap_or(0)
    }
}

impl std::fmt::Debug for EventManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventManager")
            .field("events", &self.listeners.len())
            .finish()
    }
}
