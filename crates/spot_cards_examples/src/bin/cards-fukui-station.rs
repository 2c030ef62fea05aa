use spot_cards::prelude::*;
use spot_cards_examples::{init_tracing, AreaFile, PngCardLayer, RenderConfig, FUKUI_STATION_JSON};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let file = AreaFile::from_json(FUKUI_STATION_JSON)?;
    tracing::info!(
        "Area '{}' ({}) with {} spot(s).",
        file.area.name,
        file.area.id,
        file.spots.len()
    );

    // Cards sized from their label text, like rendered HTML would be.
    let mut engine = LayoutEngine::try_new(file.spots.clone(), LayoutConfig::default())?
        .with_measurer(TextCardMeasurer::default());
    let mut layer = PngCardLayer::new();

    let size = (800, 600);
    let view = file.view(size);
    let summary = engine.layout(Some(&view), &mut layer, &mut ())?;
    tracing::info!(?summary, "Initial layout.");
    let rc = RenderConfig::new(size).with_area(&file.area, &view);
    layer.render_to_png(&rc, "cards-fukui-station.png")?;

    // Clicking the first card opens its detail.
    if let Some(first) = engine.registry().all().first() {
        let mut detail = |spot: &Spot| {
            tracing::info!(
                "Detail: {} [{}] {} item(s) on the menu.",
                spot.name,
                spot.category_label(),
                spot.menu.len()
            );
        };
        engine.activate(first.id, &mut detail, &mut ())?;
    }

    // A smaller window rebuilds every card from scratch.
    let size = (640, 480);
    let view = view.with_size([f64::from(size.0), f64::from(size.1)]);
    let summary = engine.on_resize(Some(&view), &mut layer, &mut ())?;
    tracing::info!(?summary, "Resized layout.");
    let rc = RenderConfig::new(size).with_area(&file.area, &view);
    layer.render_to_png(&rc, "cards-fukui-station-resized.png")?;

    Ok(())
}
