//! Integration tests for the tile layer lifecycle
//!
//! These exercise the manager end-to-end against the headless surface the
//! way an embedding drives it: batch loads at startup, toggles from menu
//! clicks, and loading notifications from the tile fetch machinery.

use std::sync::{
    atomic::{AtomicI32, Ordering},
    Arc,
};

use tilekit::prelude::*;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn surface() -> HeadlessSurface {
    HeadlessSurface::new(MapOptions::default()).with_view(LatLng::new(-23.55, -46.63), 12.0)
}

fn osm_descriptor() -> RasterDescriptor {
    serde_json::from_str(
        r#"{
            "nome": "OSM",
            "tipo": "overlay",
            "xyz_options": { "url": "http://tile.example/{z}/{x}/{y}.png", "enabled": true }
        }"#,
    )
    .unwrap()
}

struct TrackingIndicator {
    visible: Arc<AtomicI32>,
}

impl LoadingIndicator for TrackingIndicator {
    fn show(&self) {
        self.visible.store(1, Ordering::SeqCst);
    }

    fn hide(&self) {
        self.visible.store(0, Ordering::SeqCst);
    }
}

#[test]
fn toggle_attaches_exactly_one_layer_with_descriptor_url() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    let handle = match manager.toggle(&mut surface, &raster).unwrap() {
        ToggleOutcome::Attached(handle) => handle,
        other => panic!("expected attach on a fresh surface, got {other:?}"),
    };

    assert_eq!(surface.layer_count(), 1);
    assert_eq!(handle.url(), "http://tile.example/{z}/{x}/{y}.png");
    assert_eq!(
        surface.attached_urls(),
        vec!["http://tile.example/{z}/{x}/{y}.png".to_string()]
    );
}

#[test]
fn toggle_twice_restores_original_state() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    assert!(matches!(
        manager.toggle(&mut surface, &raster).unwrap(),
        ToggleOutcome::Attached(_)
    ));
    assert_eq!(
        manager.toggle(&mut surface, &raster).unwrap(),
        ToggleOutcome::Removed
    );
    assert_eq!(surface.layer_count(), 0);
    assert!(!surface.has_pane("OSM"));

    // A third toggle attaches again: the states strictly alternate.
    assert!(matches!(
        manager.toggle(&mut surface, &raster).unwrap(),
        ToggleOutcome::Attached(_)
    ));
    assert_eq!(surface.layer_count(), 1);
}

#[test]
fn remove_is_idempotent_on_absent_layers() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    assert!(!manager.remove(&mut surface, &raster).unwrap());
    assert_eq!(surface.layer_count(), 0);

    manager.toggle(&mut surface, &raster).unwrap();
    assert!(manager.remove(&mut surface, &raster).unwrap());
    // Second removal finds nothing and reports it.
    assert!(!manager.remove(&mut surface, &raster).unwrap());
    assert_eq!(surface.layer_count(), 0);
}

#[test]
fn loader_refuses_duplicate_panes() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let first = TileOptions::new("http://one.example/{z}/{x}/{y}.png");
    let second = TileOptions::new("http://two.example/{z}/{x}/{y}.png");

    assert!(manager
        .load(&mut surface, "Base", &first.url, &first)
        .unwrap()
        .is_some());
    assert!(manager
        .load(&mut surface, "Base", &second.url, &second)
        .unwrap()
        .is_none());

    assert_eq!(
        surface.attached_urls(),
        vec!["http://one.example/{z}/{x}/{y}.png".to_string()]
    );
}

#[test]
fn overlay_batch_attaches_only_enabled_overlays() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();

    let rasters = vec![
        RasterDescriptor::basemap("Streets", "http://streets.example/{z}/{x}/{y}.png"),
        RasterDescriptor::basemap("Terrain", "http://terrain.example/{z}/{x}/{y}.png"),
        RasterDescriptor::basemap("Satellite", "http://sat.example/{z}/{x}/{y}.jpg"),
        RasterDescriptor::new(
            "Hydrology",
            RasterKind::Overlay,
            TileOptions::new("http://hydro.example/{z}/{x}/{y}.png").enabled(true),
        ),
        RasterDescriptor::new(
            "Parcels",
            RasterKind::Overlay,
            TileOptions::new("http://parcels.example/{z}/{x}/{y}.png").enabled(true),
        ),
        RasterDescriptor::new(
            "Contours",
            RasterKind::Overlay,
            TileOptions::new("http://contours.example/{z}/{x}/{y}.png"),
        ),
    ];

    let attached = manager.apply_overlays(&mut surface, &rasters).unwrap();
    assert_eq!(attached, 2);
    assert_eq!(
        surface.attached_urls(),
        vec![
            "http://hydro.example/{z}/{x}/{y}.png".to_string(),
            "http://parcels.example/{z}/{x}/{y}.png".to_string(),
        ]
    );
}

#[test]
fn basemap_batch_reports_attach_count_and_skips_duplicates() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();

    let rasters = vec![
        RasterDescriptor::basemap("Streets", "http://streets.example/{z}/{x}/{y}.png"),
        // Same pane name again: skipped, the rest of the batch continues.
        RasterDescriptor::basemap("Streets", "http://streets-2.example/{z}/{x}/{y}.png"),
        RasterDescriptor::basemap("Satellite", "http://sat.example/{z}/{x}/{y}.jpg"),
    ];

    let attached = manager.apply_basemaps(&mut surface, &rasters).unwrap();
    assert_eq!(attached, 2);
    assert!(attached > 0, "at least one basemap should land");
    assert_eq!(surface.layer_count(), 2);
}

#[test]
fn wms_toggle_builds_a_wms_layer() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();

    let raster: RasterDescriptor = serde_json::from_str(
        r#"{
            "nome": "Radar",
            "tipo": "wms",
            "xyz_options": {
                "url": "http://wms.example/service",
                "layers": "radar",
                "transparent": true
            }
        }"#,
    )
    .unwrap();

    let ToggleOutcome::Attached(handle) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected WMS attach");
    };

    let layer = surface.layer(handle.id()).unwrap();
    assert!(layer.is_wms());
    match layer.source() {
        TileSource::Wms { endpoint, params } => {
            assert_eq!(endpoint, "http://wms.example/service");
            assert_eq!(params.layers, "radar");
            assert!(params.transparent);
        }
        other => panic!("expected a WMS source, got {other:?}"),
    }
}

#[test]
fn loading_hooks_drive_registered_indicator() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    let visible = Arc::new(AtomicI32::new(0));
    manager.indicators().register(
        spinner_id("OSM"),
        Box::new(TrackingIndicator {
            visible: Arc::clone(&visible),
        }),
    );

    let ToggleOutcome::Attached(handle) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected attach");
    };

    surface.begin_loading(&handle);
    assert_eq!(visible.load(Ordering::SeqCst), 1, "spinner shown on loading");
    surface.finish_loading(&handle);
    assert_eq!(visible.load(Ordering::SeqCst), 0, "spinner hidden on load");
}

#[test]
fn absent_indicator_never_fails_the_loader() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    // No indicator registered for "Spinner OSM": hooks must no-op.
    let ToggleOutcome::Attached(handle) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected attach");
    };

    assert!(surface.begin_loading(&handle));
    assert!(surface.finish_loading(&handle));
    assert_eq!(surface.layer_count(), 1);
}

#[test]
fn stale_loading_hooks_do_not_touch_a_reattached_layer() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    let visible = Arc::new(AtomicI32::new(0));
    manager.indicators().register(
        spinner_id("OSM"),
        Box::new(TrackingIndicator {
            visible: Arc::clone(&visible),
        }),
    );

    let ToggleOutcome::Attached(first) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected attach");
    };
    manager.toggle(&mut surface, &raster).unwrap();
    let ToggleOutcome::Attached(second) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected reattach");
    };
    assert_ne!(first.id(), second.id());

    // A notification from the first attach cycle arrives late; the spinner
    // belongs to the second instance now and must not react.
    surface.begin_loading(&first);
    assert_eq!(visible.load(Ordering::SeqCst), 0);

    surface.begin_loading(&second);
    assert_eq!(visible.load(Ordering::SeqCst), 1);
    surface.finish_loading(&second);
    assert_eq!(visible.load(Ordering::SeqCst), 0);
}

#[test]
fn detach_mid_load_leaves_no_spinner_behind() {
    init_logging();
    let mut surface = surface();
    let manager = TileLayerManager::new();
    let raster = osm_descriptor();

    let visible = Arc::new(AtomicI32::new(0));
    manager.indicators().register(
        spinner_id("OSM"),
        Box::new(TrackingIndicator {
            visible: Arc::clone(&visible),
        }),
    );

    let ToggleOutcome::Attached(handle) = manager.toggle(&mut surface, &raster).unwrap() else {
        panic!("expected attach");
    };
    surface.begin_loading(&handle);
    assert_eq!(visible.load(Ordering::SeqCst), 1);

    // Removing the layer before its load settles hides the spinner.
    manager.remove(&mut surface, &raster).unwrap();
    assert_eq!(visible.load(Ordering::SeqCst), 0);
}

struct FixedGeolocator(std::result::Result<LocationFix, String>);

impl Geolocator for FixedGeolocator {
    fn locate(&mut self) -> tilekit::Result<LocationFix> {
        self.0.clone().map_err(tilekit::MapError::Location)
    }
}

#[derive(Default)]
struct RecordingMarkers {
    markers: Vec<LatLng>,
    circles: Vec<(LatLng, f64)>,
}

impl MarkerFactory for RecordingMarkers {
    fn place_marker(&mut self, at: LatLng, _popup_text: &str) {
        self.markers.push(at);
    }

    fn place_circle(&mut self, center: LatLng, radius: f64) {
        self.circles.push((center, radius));
    }
}

#[test]
fn locate_emits_events_and_recenters() {
    init_logging();
    let mut surface = surface();
    let found = Arc::new(AtomicI32::new(0));
    let failed = Arc::new(AtomicI32::new(0));

    let found_counter = Arc::clone(&found);
    surface.on("locationfound", move |_| {
        found_counter.fetch_add(1, Ordering::SeqCst);
    });
    let failed_counter = Arc::clone(&failed);
    surface.on("locationerror", move |_| {
        failed_counter.fetch_add(1, Ordering::SeqCst);
    });

    let fix = LocationFix {
        lat_lng: LatLng::new(-23.5, -46.6),
        accuracy: 40.0,
    };
    let mut markers = RecordingMarkers::default();
    let mut geolocator = FixedGeolocator(Ok(fix));
    surface
        .locate(&mut geolocator, &mut markers, &LocateOptions::default())
        .unwrap();

    assert_eq!(found.load(Ordering::SeqCst), 1);
    assert_eq!(surface.center(), fix.lat_lng);
    assert_eq!(surface.zoom(), 16.0);
    assert_eq!(markers.markers, vec![fix.lat_lng]);
    assert_eq!(markers.circles, vec![(fix.lat_lng, 20.0)]);

    let mut geolocator = FixedGeolocator(Err("permission denied".to_string()));
    let err = surface
        .locate(&mut geolocator, &mut markers, &LocateOptions::default())
        .unwrap_err();
    assert!(matches!(err, tilekit::MapError::Location(_)));
    assert_eq!(failed.load(Ordering::SeqCst), 1);
}

#[test]
fn context_menu_popup_formats_clicked_position() {
    init_logging();
    let mut surface = surface();
    let shown: Arc<std::sync::Mutex<Vec<String>>> = Arc::new(std::sync::Mutex::new(Vec::new()));

    let popup = ContextMenuPopup::new(CoordinateDisplay::LatLng, Box::new(IdentityProjector));
    let sink = Arc::clone(&shown);
    popup.install(surface.events_mut(), move |_, content| {
        sink.lock().unwrap().push(content);
    });

    surface.trigger_context_menu(LatLng::new(-23.55, -46.63), Point::new(200.0, 140.0));

    let shown = shown.lock().unwrap();
    assert_eq!(shown.as_slice(), ["Lat.: -23.55000\nLon.: -46.63000"]);
}

#[test]
fn configured_map_boots_from_wire_json() {
    init_logging();
    let config = MapConfig::from_json(
        r#"{
            "configuracoesLeaflet": {
                "zoomControl": true,
                "zoomSnap": 1,
                "zoomDelta": 1,
                "sistema": "latlng"
            },
            "zoom": { "min": 4, "max": 19 },
            "view": { "x": -46.63, "y": -23.55, "z": 12 },
            "rasters": [
                {
                    "nome": "Streets",
                    "tipo": "basemap",
                    "xyz_options": { "url": "http://streets.example/{z}/{x}/{y}.png" }
                },
                {
                    "nome": "Hydrology",
                    "tipo": "overlay",
                    "xyz_options": { "url": "http://hydro.example/{z}/{x}/{y}.png", "enabled": true }
                },
                {
                    "nome": "Contours",
                    "tipo": "overlay",
                    "xyz_options": { "url": "http://contours.example/{z}/{x}/{y}.png" }
                }
            ]
        }"#,
    )
    .unwrap();

    let view = config.view.unwrap();
    let mut surface =
        HeadlessSurface::new(config.options()).with_view(view.center(), view.zoom());
    let manager = TileLayerManager::new();

    let basemaps = manager.apply_basemaps(&mut surface, &config.rasters).unwrap();
    let overlays = manager.apply_overlays(&mut surface, &config.rasters).unwrap();

    assert_eq!(basemaps, 1);
    assert_eq!(overlays, 1);
    assert_eq!(surface.layer_count(), 2);

    let controller = MapController::from_view(&view);
    surface.set_view(LatLng::new(0.0, 0.0), 19.0);
    controller.reset_view(&mut surface);
    assert_eq!(surface.center(), LatLng::new(-23.55, -46.63));
    assert_eq!(surface.zoom(), 12.0);
}
