use tilekit::prelude::*;

/// Example of driving the layer manager against the headless surface,
/// from configuration parsing to toggling and loading notifications.
fn main() -> tilekit::Result<()> {
    env_logger::init();

    let config = MapConfig::from_json(
        r#"{
            "configuracoesLeaflet": {
                "zoomControl": true,
                "zoomSnap": 0.5,
                "zoomDelta": 0.5,
                "sistema": "latlng"
            },
            "zoom": { "min": 4, "max": 19 },
            "view": { "x": -46.633, "y": -23.55, "z": 12 },
            "attribution": "Demo basemaps",
            "rasters": [
                {
                    "nome": "Streets",
                    "tipo": "basemap",
                    "xyz_options": { "url": "https://streets.example/{z}/{x}/{y}.png" }
                },
                {
                    "nome": "Hydrology",
                    "tipo": "overlay",
                    "xyz_options": { "url": "https://hydro.example/{z}/{x}/{y}.png", "enabled": true }
                },
                {
                    "nome": "Radar",
                    "tipo": "wms",
                    "xyz_options": {
                        "url": "https://wms.example/service",
                        "layers": "radar",
                        "transparent": true
                    }
                }
            ]
        }"#,
    )?;

    let view = config.view.expect("demo config carries an initial view");
    let mut surface = HeadlessSurface::new(config.options()).with_view(view.center(), view.zoom());
    if let Some(attribution) = &config.attribution {
        surface.set_attribution_prefix(attribution.clone());
    }

    let manager = TileLayerManager::new();
    let basemaps = manager.apply_basemaps(&mut surface, &config.rasters)?;
    let overlays = manager.apply_overlays(&mut surface, &config.rasters)?;
    println!("attached {basemaps} basemap(s) and {overlays} overlay(s) at startup");

    // Toggle the WMS layer on and off, as a layer menu would.
    let radar = config
        .rasters
        .iter()
        .find(|raster| raster.kind == RasterKind::Wms)
        .expect("demo config carries a WMS raster");

    if let ToggleOutcome::Attached(handle) = manager.toggle(&mut surface, radar)? {
        println!("radar attached as {:?}", handle.pane());
        surface.begin_loading(&handle);
        surface.finish_loading(&handle);
    }
    manager.toggle(&mut surface, radar)?;
    println!("radar toggled off, {} layer(s) remain", surface.layer_count());

    // Controls the embedding widget would render.
    let scale = ScaleControl::new().with_max_width(150);
    println!(
        "scale bar: up to {}px, metric={}",
        scale.max_width, scale.metric
    );
    if let Some(prefix) = surface.attribution_prefix() {
        println!("attribution: {prefix}");
    }

    // Coordinate readouts the way the surface's controls would render them.
    let mouse = MousePositionControl::new(CoordinateDisplay::LatLng, Box::new(IdentityProjector));
    println!("{}", mouse.format(Some(surface.center())));

    let popup = ContextMenuPopup::new(CoordinateDisplay::LatLng, Box::new(IdentityProjector));
    popup.install(surface.events_mut(), |_, content| {
        println!("context menu:\n{content}");
    });
    surface.trigger_context_menu(LatLng::new(-23.55, -46.633), Point::new(320.0, 240.0));

    let controller = MapController::from_view(&view);
    controller.zoom(&mut surface, ZoomDirection::In);
    controller.reset_view(&mut surface);
    let info = controller.info(&surface);
    println!("view: {:.5} {:.5} @ {}", info.center.lat, info.center.lng, info.zoom);

    Ok(())
}
