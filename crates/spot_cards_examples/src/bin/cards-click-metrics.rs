use std::collections::HashMap;

use spot_cards::prelude::*;
use spot_cards_examples::{init_tracing, AreaFile, FUKUI_STATION_JSON};

fn main() -> anyhow::Result<()> {
    init_tracing();
    let file = AreaFile::from_json(FUKUI_STATION_JSON)?;
    let mut engine = LayoutEngine::try_new(file.spots.clone(), LayoutConfig::default())?;

    // Clicks are counted per spot; everything else is logged.
    let mut clicks: HashMap<SpotId, usize> = HashMap::new();
    let mut sinks = MultiSink::new();
    sinks.push(VecSink::only([LayoutEventKind::CardActivated]));
    sinks.push(VecSink::only([
        LayoutEventKind::PassFinished,
        LayoutEventKind::PassAborted,
        LayoutEventKind::SpotDegraded,
    ]));

    let mut view = file.view((800, 600));
    engine.layout(Some(&view), &mut (), &mut sinks)?;

    // A window drag fires many resize events; only one pass runs per flush.
    for step in 1..=20 {
        let w = 800.0 - f64::from(step) * 8.0;
        view.resize([w, 600.0]);
        engine.request_resize();
    }
    let rebuilt = engine.flush_resize(Some(&view), &mut (), &mut sinks)?;
    tracing::info!(
        "Coalesced resize ran {} pass(es).",
        usize::from(rebuilt.is_some())
    );

    let ids: Vec<CardId> = engine.registry().all().iter().map(|c| c.id).collect();
    for (i, &card) in ids.iter().enumerate() {
        for _ in 0..=i % 3 {
            let mut detail = |_: &Spot| {};
            engine.activate(card, &mut detail, &mut sinks)?;
        }
    }

    // A card id from before the resize no longer resolves.
    let stale = CardId::new(1, 0);
    let mut detail = |_: &Spot| {};
    if let Err(e) = engine.activate(stale, &mut detail, &mut sinks) {
        tracing::warn!("{e}");
    }

    let mut sinks = sinks.into_inner().into_iter();
    let (activations, passes) = (sinks.next(), sinks.next());
    for event in activations.into_iter().flat_map(VecSink::into_inner) {
        if let LayoutEvent::CardActivated { spot_id, .. } = event {
            *clicks.entry(spot_id).or_default() += 1;
        }
    }
    for event in passes.into_iter().flat_map(VecSink::into_inner) {
        tracing::debug!(?event);
    }

    let mut clicks: Vec<_> = clicks.into_iter().collect();
    clicks.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (spot_id, n) in clicks {
        let name = engine.spots().get(&spot_id).map_or("", |s| s.name.as_str());
        tracing::info!("{spot_id} {name}: {n} click(s)");
    }
    Ok(())
}
