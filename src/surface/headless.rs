//! In-memory map surface
//!
//! Tracks panes, attached layers, and view state without rendering
//! anything. Embeddings use it for server-side state tracking and tests;
//! tile loading notifications are driven manually through
//! [`HeadlessSurface::begin_loading`] and [`HeadlessSurface::finish_loading`],
//! standing in for the fetch machinery a real widget runs internally.

use crate::{
    core::{
        config::MapOptions,
        geo::{LatLng, LatLngBounds, Point},
    },
    events::{EventManager, LayerEvent, MapEvent},
    layers::layer::{LayerHandle, LayerId, TileLayer},
    location::{show_user_location, Geolocator, LocateOptions, LocationFix, MarkerFactory},
    prelude::{HashMap, HashSet},
    surface::{MapSurface, MapView},
    MapError, Result,
};

/// A map surface with no renderer behind it
pub struct HeadlessSurface {
    options: MapOptions,
    center: LatLng,
    zoom: f64,
    attribution_prefix: Option<String>,
    /// All attached layers indexed by instance id
    layers: HashMap<LayerId, TileLayer>,
    /// Attach order, used for iteration
    order: Vec<LayerId>,
    panes: HashSet<String>,
    events: EventManager,
}

impl HeadlessSurface {
    pub fn new(options: MapOptions) -> Self {
        let zoom = options.min_zoom;
        Self {
            options,
            center: LatLng::default(),
            zoom,
            attribution_prefix: None,
            layers: HashMap::default(),
            order: Vec::new(),
            panes: HashSet::default(),
            events: EventManager::new(),
        }
    }

    /// Set the initial view, chainable at construction
    pub fn with_view(mut self, center: LatLng, zoom: f64) -> Self {
        self.center = center;
        self.zoom = self.snapped_zoom(zoom);
        self
    }

    pub fn options(&self) -> &MapOptions {
        &self.options
    }

    /// Register a map event listener
    pub fn on<F>(&mut self, event_name: &str, callback: F)
    where
        F: Fn(&MapEvent) + Send + Sync + 'static,
    {
        self.events.on(event_name, callback);
    }

    pub fn events_mut(&mut self) -> &mut EventManager {
        &mut self.events
    }

    /// Deliver a map event to registered listeners
    pub fn emit(&self, event: &MapEvent) {
        self.events.emit(event);
    }

    /// Simulate a right click / long press at a map position
    pub fn trigger_context_menu(&self, lat_lng: LatLng, pixel: Point) {
        self.emit(&MapEvent::ContextMenu { lat_lng, pixel });
    }

    /// Locates the user and shows the fix, emitting `locationfound` or
    /// `locationerror` to registered listeners
    pub fn locate(
        &mut self,
        geolocator: &mut dyn Geolocator,
        markers: &mut dyn MarkerFactory,
        options: &LocateOptions,
    ) -> Result<LocationFix> {
        match show_user_location(geolocator, self, markers, options) {
            Ok(fix) => {
                self.emit(&MapEvent::LocationFound {
                    lat_lng: fix.lat_lng,
                    accuracy: fix.accuracy,
                });
                Ok(fix)
            }
            Err(err) => {
                self.emit(&MapEvent::LocationError {
                    message: err.to_string(),
                });
                Err(err)
            }
        }
    }

    /// Fire the `loading` hook of an attached layer, as a real widget does
    /// when tile requests start; `false` when the handle is stale
    pub fn begin_loading(&self, handle: &LayerHandle) -> bool {
        match self.layers.get(&handle.id()) {
            Some(layer) => {
                layer.fire(LayerEvent::Loading);
                true
            }
            None => false,
        }
    }

    /// Fire the `load` hook of an attached layer; `false` when stale
    pub fn finish_loading(&self, handle: &LayerHandle) -> bool {
        match self.layers.get(&handle.id()) {
            Some(layer) => {
                layer.fire(LayerEvent::Load);
                true
            }
            None => false,
        }
    }

    pub fn set_attribution_prefix(&mut self, prefix: impl Into<String>) {
        self.attribution_prefix = Some(prefix.into());
    }

    pub fn attribution_prefix(&self) -> Option<&str> {
        self.attribution_prefix.as_deref()
    }

    /// Gets an attached layer by instance id
    pub fn layer(&self, id: LayerId) -> Option<&TileLayer> {
        self.layers.get(&id)
    }

    /// Gets the number of attached layers
    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Source URLs of all attached layers, in attach order
    pub fn attached_urls(&self) -> Vec<String> {
        self.order
            .iter()
            .filter_map(|id| self.layers.get(id).map(|layer| layer.url().to_string()))
            .collect()
    }

    fn snapped_zoom(&self, zoom: f64) -> f64 {
        let snap = self.options.zoom_snap;
        let zoom = if snap > 0.0 {
            (zoom / snap).round() * snap
        } else {
            zoom
        };
        zoom.clamp(self.options.min_zoom, self.options.max_zoom)
    }
}

impl MapSurface for HeadlessSurface {
    fn add_layer(&mut self, layer: TileLayer) -> Result<LayerHandle> {
        if self.panes.contains(layer.pane()) {
            return Err(MapError::Surface(format!(
                "pane {:?} is already occupied",
                layer.pane()
            )));
        }

        let handle = layer.handle();
        self.panes.insert(layer.pane().to_string());
        self.order.push(layer.id());
        self.layers.insert(layer.id(), layer);
        self.events.emit(&MapEvent::LayerAdd {
            layer_id: handle.id(),
            url: handle.url().to_string(),
        });
        Ok(handle)
    }

    fn remove_layer(&mut self, handle: &LayerHandle) -> Result<bool> {
        let Some(layer) = self.layers.remove(&handle.id()) else {
            return Ok(false);
        };

        self.order.retain(|id| *id != handle.id());
        self.panes.remove(layer.pane());
        self.events.emit(&MapEvent::LayerRemove {
            layer_id: handle.id(),
            url: handle.url().to_string(),
        });
        Ok(true)
    }

    fn has_layer(&self, handle: &LayerHandle) -> bool {
        self.layers.contains_key(&handle.id())
    }

    fn has_pane(&self, name: &str) -> bool {
        self.panes.contains(name)
    }

    fn for_each_layer(&self, visit: &mut dyn FnMut(&LayerHandle)) {
        for id in &self.order {
            if let Some(layer) = self.layers.get(id) {
                visit(&layer.handle());
            }
        }
    }
}

impl MapView for HeadlessSurface {
    fn center(&self) -> LatLng {
        self.center
    }

    fn zoom(&self) -> f64 {
        self.zoom
    }

    /// A headless surface tracks no viewport extent; the bounds collapse to
    /// the current center.
    fn bounds(&self) -> LatLngBounds {
        LatLngBounds::new(self.center, self.center)
    }

    fn set_view(&mut self, center: LatLng, zoom: f64) {
        self.center = center;
        self.zoom = self.snapped_zoom(zoom);
        self.events.emit(&MapEvent::ViewChanged {
            center: self.center,
            zoom: self.zoom,
        });
    }

    fn zoom_in(&mut self) {
        self.set_view(self.center, self.zoom + self.options.zoom_delta);
    }

    fn zoom_out(&mut self) {
        self.set_view(self.center, self.zoom - self.options.zoom_delta);
    }
}

impl std::fmt::Debug for HeadlessSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessSurface")
            .field("center", &self.center)
            .field("zoom", &self.zoom)
            .field("layers", &self.layers.len())
            .finish()
    }
}
