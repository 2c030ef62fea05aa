#![forbid(unsafe_code)]

mod rendering;

pub use rendering::{init_tracing, Area, AreaFile, PngCardLayer, RenderConfig};

/// Sample page data around Fukui station.
pub const FUKUI_STATION_JSON: &str = include_str!("../data/fukui_station.json");
