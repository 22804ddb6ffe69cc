//! Configuration parsing for map options and raster descriptors
//!
//! The configuration data arrives from a server-rendered page; the wire
//! field names (`configuracoesLeaflet`, `nome`, `tipo`, `xyz_options`, ...)
//! are accepted through serde aliases while the Rust API keeps native names.

use serde::{Deserialize, Serialize};

use crate::{core::geo::LatLng, layers::raster::RasterDescriptor, Result};

/// Coordinate system used for on-screen coordinate readouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CoordinateDisplay {
    /// Projected meters, displayed as northing/easting
    Utm,
    /// Geographic degrees, displayed as latitude/longitude
    #[default]
    LatLng,
}

impl<'de> serde::Deserialize<'de> for CoordinateDisplay {
    // Any display system other than "utm" renders as latitude/longitude.
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(if value.eq_ignore_ascii_case("utm") {
            Self::Utm
        } else {
            Self::LatLng
        })
    }
}

/// Surface-level widget settings supplied by the host page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SurfaceSettings {
    #[serde(alias = "zoomControl")]
    pub zoom_control: bool,
    #[serde(alias = "zoomSnap")]
    pub zoom_snap: f64,
    #[serde(alias = "zoomDelta")]
    pub zoom_delta: f64,
    /// Coordinate reference system identifier, e.g. "EPSG:31982"
    #[serde(default)]
    pub crs: Option<String>,
    #[serde(alias = "sistema", default)]
    pub coordinate_display: CoordinateDisplay,
    /// Projection definition string consumed by the host's projector
    #[serde(alias = "proj4text", default)]
    pub projection_definition: Option<String>,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            zoom_control: true,
            zoom_snap: 1.0,
            zoom_delta: 1.0,
            crs: None,
            coordinate_display: CoordinateDisplay::default(),
            projection_definition: None,
        }
    }
}

/// Zoom limits for the surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomRange {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomRange {
    fn default() -> Self {
        Self { min: 0.0, max: 18.0 }
    }
}

/// Initial view of the map: center longitude/latitude and zoom.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InitialView {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl InitialView {
    pub fn center(&self) -> LatLng {
        LatLng::new(self.y, self.x)
    }

    pub fn zoom(&self) -> f64 {
        self.z
    }
}

/// Full map configuration as delivered by the host page.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapConfig {
    #[serde(alias = "configuracoesLeaflet", default)]
    pub surface: SurfaceSettings,
    #[serde(default)]
    pub zoom: ZoomRange,
    #[serde(default)]
    pub view: Option<InitialView>,
    #[serde(default)]
    pub attribution: Option<String>,
    #[serde(default)]
    pub rasters: Vec<RasterDescriptor>,
}

impl MapConfig {
    /// Parses a configuration document from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Resolves the widget options this configuration asks for.
    pub fn options(&self) -> MapOptions {
        MapOptions {
            zoom_control: self.surface.zoom_control,
            zoom_snap: self.surface.zoom_snap,
            zoom_delta: self.surface.zoom_delta,
            min_zoom: self.zoom.min,
            max_zoom: self.zoom.max,
        }
    }
}

/// Options handed to the map surface at initialization.
#[derive(Debug, Clone, PartialEq)]
pub struct MapOptions {
    pub zoom_control: bool,
    pub zoom_snap: f64,
    pub zoom_delta: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
}

impl Default for MapOptions {
    fn default() -> Self {
        Self {
            zoom_control: true,
            zoom_snap: 1.0,
            zoom_delta: 1.0,
            min_zoom: 0.0,
            max_zoom: 18.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layers::raster::RasterKind;

    #[test]
    fn test_wire_shape_parses() {
        let json = r#"{
            "configuracoesLeaflet": {
                "zoomControl": false,
                "zoomSnap": 0.5,
                "zoomDelta": 0.5,
                "crs": "EPSG:31982",
                "sistema": "utm",
                "proj4text": "+proj=utm +zone=22 +south"
            },
            "zoom": { "min": 4, "max": 19 },
            "view": { "x": -46.63, "y": -23.55, "z": 12 },
            "rasters": [
                {
                    "nome": "OSM",
                    "tipo": "overlay",
                    "xyz_options": { "url": "http://tile.example/{z}/{x}/{y}.png", "enabled": true }
                }
            ]
        }"#;

        let config = MapConfig::from_json(json).unwrap();
        assert!(!config.surface.zoom_control);
        assert_eq!(config.surface.coordinate_display, CoordinateDisplay::Utm);
        assert_eq!(config.zoom.max, 19.0);
        assert_eq!(config.rasters.len(), 1);
        assert_eq!(config.rasters[0].kind, RasterKind::Overlay);

        let view = config.view.unwrap();
        assert_eq!(view.center(), LatLng::new(-23.55, -46.63));
        assert_eq!(view.zoom(), 12.0);
    }

    #[test]
    fn test_unknown_display_system_falls_back_to_lat_lng() {
        let settings: SurfaceSettings = serde_json::from_str(
            r#"{ "zoomControl": true, "zoomSnap": 1, "zoomDelta": 1, "sistema": "geographic" }"#,
        )
        .unwrap();
        assert_eq!(settings.coordinate_display, CoordinateDisplay::LatLng);
    }

    #[test]
    fn test_options_resolution() {
        let config = MapConfig {
            zoom: ZoomRange { min: 2.0, max: 16.0 },
            ..Default::default()
        };
        let options = config.options();
        assert_eq!(options.min_zoom, 2.0);
        assert_eq!(options.max_zoom, 16.0);
        assert!(options.zoom_control);
    }
}
