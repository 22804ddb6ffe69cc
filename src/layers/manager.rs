//! Tile layer lifecycle management
//!
//! The manager mediates between raster descriptors and the live set of
//! layers on a [`MapSurface`]. It owns no layers itself: the surface does.
//! At most one attached layer exists per distinct source URL on a given
//! surface; the loader's pane check enforces this before every attach.

use std::sync::Arc;

use crate::{
    events::LayerEvent,
    layers::{
        indicator::{spinner_id, IndicatorRegistry},
        layer::{LayerHandle, TileLayer, TileSource},
        raster::{RasterDescriptor, RasterKind, TileOptions},
    },
    surface::MapSurface,
    MapError, Result,
};

/// What a toggle call did to the layer's attach state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The layer was absent and is now attached
    Attached(LayerHandle),
    /// The layer was attached and is now removed
    Removed,
    /// Nothing changed: the pane name was already taken by another source
    Unchanged,
}

/// Manages tile layer lifecycle on a map surface
pub struct TileLayerManager {
    indicators: Arc<IndicatorRegistry>,
}

impl TileLayerManager {
    pub fn new() -> Self {
        Self {
            indicators: Arc::new(IndicatorRegistry::new()),
        }
    }

    /// Use a shared indicator registry, e.g. one the host page populated
    pub fn with_indicators(indicators: Arc<IndicatorRegistry>) -> Self {
        Self { indicators }
    }

    pub fn indicators(&self) -> &Arc<IndicatorRegistry> {
        &self.indicators
    }

    /// Finds the attached layer whose source URL matches the descriptor's
    ///
    /// Absence is not an error. Linear in the number of attached layers,
    /// which stays small in practice.
    pub fn find_by_url(
        &self,
        surface: &dyn MapSurface,
        raster: &RasterDescriptor,
    ) -> Option<LayerHandle> {
        let mut found = None;
        surface.for_each_layer(&mut |handle| {
            if found.is_none() && handle.url() == raster.source_url() {
                found = Some(handle.clone());
            }
        });
        found
    }

    /// Attaches an XYZ tile layer unless its pane name is already taken
    ///
    /// Returns `Ok(None)` when a pane already exists under `name`, even if
    /// the URL differs; the duplicate is logged and never surfaced as an
    /// error.
    pub fn load(
        &self,
        surface: &mut dyn MapSurface,
        name: &str,
        url: &str,
        options: &TileOptions,
    ) -> Result<Option<LayerHandle>> {
        let source = TileSource::Xyz {
            template: url.to_string(),
        };
        self.attach(surface, name, source, options)
    }

    /// Attaches a WMS layer unless its pane name is already taken
    pub fn load_wms(
        &self,
        surface: &mut dyn MapSurface,
        name: &str,
        url: &str,
        options: &TileOptions,
    ) -> Result<Option<LayerHandle>> {
        let source = TileSource::Wms {
            endpoint: url.to_string(),
            params: options.wms.clone(),
        };
        self.attach(surface, name, source, options)
    }

    fn attach(
        &self,
        surface: &mut dyn MapSurface,
        name: &str,
        source: TileSource,
        options: &TileOptions,
    ) -> Result<Option<LayerHandle>> {
        if surface.has_pane(name) {
            log::debug!("layer {name:?} already exists on the map, not attaching");
            return Ok(None);
        }

        let layer = TileLayer::new(name, source, options.clone());
        let id = layer.id();
        let spinner = spinner_id(name);

        let show_registry = Arc::clone(&self.indicators);
        let show_spinner = spinner.clone();
        let hide_registry = Arc::clone(&self.indicators);
        let hide_spinner = spinner.clone();
        let layer = layer
            .on(LayerEvent::Loading, move |_| {
                show_registry.show(&show_spinner, id);
            })
            .on(LayerEvent::Load, move |_| {
                hide_registry.hide(&hide_spinner, id);
            });

        let url = layer.url().to_string();
        let handle = surface.add_layer(layer)?;
        self.indicators.bind(&spinner, id);
        log::debug!("attached tile layer {name:?} ({url})");
        Ok(Some(handle))
    }

    /// Detaches the layer matching the descriptor's URL, if present
    ///
    /// Returns `Ok(false)` when no such layer is attached; calling again
    /// with the same descriptor is a no-op.
    pub fn remove(&self, surface: &mut dyn MapSurface, raster: &RasterDescriptor) -> Result<bool> {
        let Some(handle) = self.find_by_url(surface, raster) else {
            log::debug!(
                "no layer for {} on the map, nothing to remove",
                raster.source_url()
            );
            return Ok(false);
        };

        surface.remove_layer(&handle)?;
        self.indicators
            .release(&spinner_id(handle.pane()), handle.id());
        log::debug!("removed tile layer {:?} ({})", handle.pane(), handle.url());
        Ok(true)
    }

    /// Toggles a raster's visibility: attach when absent, remove when present
    ///
    /// Attaching dispatches on the descriptor's kind: `Overlay` loads an XYZ
    /// layer, `Wms` a WMS layer. Any other kind is a configuration error.
    /// Two successive toggles with the same descriptor always alternate the
    /// attach state.
    pub fn toggle(
        &self,
        surface: &mut dyn MapSurface,
        raster: &RasterDescriptor,
    ) -> Result<ToggleOutcome> {
        if self.find_by_url(surface, raster).is_some() {
            self.remove(surface, raster)?;
            return Ok(ToggleOutcome::Removed);
        }

        let handle = match raster.kind {
            RasterKind::Overlay => {
                self.load(surface, &raster.name, raster.source_url(), &raster.options)?
            }
            RasterKind::Wms => {
                self.load_wms(surface, &raster.name, raster.source_url(), &raster.options)?
            }
            kind => {
                return Err(MapError::InvalidKind {
                    name: raster.name.clone(),
                    kind,
                })
            }
        };

        Ok(match handle {
            Some(handle) => ToggleOutcome::Attached(handle),
            None => ToggleOutcome::Unchanged,
        })
    }

    /// Attaches every basemap descriptor in sequence order
    ///
    /// Individual duplicate-pane failures are skipped rather than aborting
    /// the batch. Returns the number of layers actually attached.
    pub fn apply_basemaps(
        &self,
        surface: &mut dyn MapSurface,
        rasters: &[RasterDescriptor],
    ) -> Result<usize> {
        let mut attached = 0;
        for raster in rasters.iter().filter(|r| r.kind == RasterKind::Basemap) {
            if self
                .load(surface, &raster.name, raster.source_url(), &raster.options)?
                .is_some()
            {
                log::info!("loaded default basemap {:?}", raster.name);
                attached += 1;
            }
        }
        Ok(attached)
    }

    /// Attaches every enabled overlay descriptor in sequence order
    ///
    /// Same skip-on-duplicate behavior and return contract as
    /// [`apply_basemaps`](Self::apply_basemaps).
    pub fn apply_overlays(
        &self,
        surface: &mut dyn MapSurface,
        rasters: &[RasterDescriptor],
    ) -> Result<usize> {
        let mut attached = 0;
        for raster in rasters
            .iter()
            .filter(|r| r.kind == RasterKind::Overlay && r.options.enabled)
        {
            if self
                .load(surface, &raster.name, raster.source_url(), &raster.options)?
                .is_some()
            {
                log::info!("loaded default overlay {:?}", raster.name);
                attached += 1;
            }
        }
        Ok(attached)
    }
}

impl Default for TileLayerManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{core::config::MapOptions, surface::headless::HeadlessSurface};

    fn surface() -> HeadlessSurface {
        HeadlessSurface::new(MapOptions::default())
    }

    #[test]
    fn test_find_by_url_misses_on_fresh_surface() {
        let surface = surface();
        let manager = TileLayerManager::new();
        let raster = RasterDescriptor::overlay("OSM", "http://tile.example/{z}/{x}/{y}.png");
        assert!(manager.find_by_url(&surface, &raster).is_none());
    }

    #[test]
    fn test_load_then_find_by_url() {
        let mut surface = surface();
        let manager = TileLayerManager::new();
        let raster = RasterDescriptor::overlay("OSM", "http://tile.example/{z}/{x}/{y}.png");

        let handle = manager
            .load(
                &mut surface,
                &raster.name,
                raster.source_url(),
                &raster.options,
            )
            .unwrap()
            .expect("fresh pane should attach");

        let found = manager.find_by_url(&surface, &raster).unwrap();
        assert_eq!(found, handle);
    }

    #[test]
    fn test_duplicate_pane_is_refused() {
        let mut surface = surface();
        let manager = TileLayerManager::new();
        let options_a = TileOptions::new("http://a.example/{z}/{x}/{y}.png");
        let options_b = TileOptions::new("http://b.example/{z}/{x}/{y}.png");

        let first = manager
            .load(&mut surface, "Base", &options_a.url, &options_a)
            .unwrap();
        assert!(first.is_some());

        // Same pane name, different URL: refused, first layer untouched.
        let second = manager
            .load(&mut surface, "Base", &options_b.url, &options_b)
            .unwrap();
        assert!(second.is_none());
        assert_eq!(surface.layer_count(), 1);

        let urls = surface.attached_urls();
        assert_eq!(urls, vec!["http://a.example/{z}/{x}/{y}.png".to_string()]);
    }

    #[test]
    fn test_remove_absent_layer_is_soft() {
        let mut surface = surface();
        let manager = TileLayerManager::new();
        let raster = RasterDescriptor::overlay("OSM", "http://tile.example/{z}/{x}/{y}.png");

        assert!(!manager.remove(&mut surface, &raster).unwrap());
        assert_eq!(surface.layer_count(), 0);
    }

    #[test]
    fn test_toggle_rejects_basemap_kind() {
        let mut surface = surface();
        let manager = TileLayerManager::new();
        let raster = RasterDescriptor::basemap("Base", "http://tile.example/{z}/{x}/{y}.png");

        let err = manager.toggle(&mut surface, &raster).unwrap_err();
        assert!(matches!(err, MapError::InvalidKind { .. }));
        assert_eq!(surface.layer_count(), 0);
    }
}
