//! Raster descriptors: the configuration-side view of a tile layer
//!
//! A descriptor is immutable once supplied; the manager reads it at call
//! time and never stores it. The wire shape is
//! `{ nome, tipo, xyz_options: { url, enabled?, ... } }`; serde aliases map
//! the wire names onto the Rust-native fields.

use serde::{Deserialize, Serialize};

/// Kind of raster source a descriptor refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RasterKind {
    /// Background layer, mutually foundational
    Basemap,
    /// Optional layer drawn above the basemap, independently toggleable
    Overlay,
    /// Web Map Service: request-parameterized raster source
    Wms,
}

impl std::fmt::Display for RasterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RasterKind::Basemap => write!(f, "basemap"),
            RasterKind::Overlay => write!(f, "overlay"),
            RasterKind::Wms => write!(f, "wms"),
        }
    }
}

/// WMS request parameters carried inside the tile options bag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WmsParams {
    #[serde(default)]
    pub layers: String,
    #[serde(default = "WmsParams::default_format")]
    pub format: String,
    #[serde(default = "WmsParams::default_version")]
    pub version: String,
    #[serde(default)]
    pub transparent: bool,
}

impl WmsParams {
    fn default_format() -> String {
        "image/png".to_string()
    }

    fn default_version() -> String {
        "1.3.0".to_string()
    }
}

impl Default for WmsParams {
    fn default() -> Self {
        Self {
            layers: String::new(),
            format: Self::default_format(),
            version: Self::default_version(),
            transparent: false,
        }
    }
}

/// Display and source options for one tile layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TileOptions {
    /// Tile URL template (XYZ) or WMS endpoint
    pub url: String,
    /// Whether an overlay participates in the default batch load
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub attribution: Option<String>,
    #[serde(default = "TileOptions::default_opacity")]
    pub opacity: f32,
    #[serde(default = "TileOptions::default_z_index", rename = "zIndex")]
    pub z_index: i32,
    #[serde(default, rename = "minZoom")]
    pub min_zoom: u8,
    #[serde(default = "TileOptions::default_max_zoom", rename = "maxZoom")]
    pub max_zoom: u8,
    #[serde(flatten)]
    pub wms: WmsParams,
    /// Options the surface understands but this crate does not interpret
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl TileOptions {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            enabled: false,
            attribution: None,
            opacity: Self::default_opacity(),
            z_index: Self::default_z_index(),
            min_zoom: 0,
            max_zoom: Self::default_max_zoom(),
            wms: WmsParams::default(),
            extra: serde_json::Map::new(),
        }
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_attribution(mut self, attribution: impl Into<String>) -> Self {
        self.attribution = Some(attribution.into());
        self
    }

    pub fn with_z_index(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    pub fn with_wms(mut self, wms: WmsParams) -> Self {
        self.wms = wms;
        self
    }

    fn default_opacity() -> f32 {
        1.0
    }

    fn default_z_index() -> i32 {
        1
    }

    fn default_max_zoom() -> u8 {
        18
    }
}

/// One configured raster layer: name, kind, and tile options
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RasterDescriptor {
    /// Unique per logical layer; doubles as the pane identifier
    #[serde(alias = "nome")]
    pub name: String,
    #[serde(alias = "tipo")]
    pub kind: RasterKind,
    #[serde(alias = "xyz_options")]
    pub options: TileOptions,
}

impl RasterDescriptor {
    pub fn new(name: impl Into<String>, kind: RasterKind, options: TileOptions) -> Self {
        Self {
            name: name.into(),
            kind,
            options,
        }
    }

    /// Convenience constructor for a basemap descriptor
    pub fn basemap(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, RasterKind::Basemap, TileOptions::new(url))
    }

    /// Convenience constructor for an overlay descriptor
    pub fn overlay(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(name, RasterKind::Overlay, TileOptions::new(url))
    }

    /// Convenience constructor for a WMS descriptor
    pub fn wms(name: impl Into<String>, url: impl Into<String>, params: WmsParams) -> Self {
        Self::new(name, RasterKind::Wms, TileOptions::new(url).with_wms(params))
    }

    /// The source URL this descriptor's layer is keyed by
    pub fn source_url(&self) -> &str {
        &self.options.url
    }
}
