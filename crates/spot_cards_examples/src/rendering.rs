use std::path::Path;

use anyhow::Context;
use glam::Vec2;
use image::{Rgb, RgbImage};
use serde::Deserialize;
use spot_cards::prelude::*;

/// Installs a `fmt` subscriber honoring `RUST_LOG`, defaulting to `info`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .try_init();
}

/// Map area the demo page is centered on. The center is the destination.
#[derive(Debug, Clone, Deserialize)]
pub struct Area {
    pub id: String,
    pub name: String,
    pub center: LatLng,
    pub zoom: f64,
    /// Corners of the illustrated area overlay, if the page has one.
    #[serde(default)]
    pub bounds: Option<[LatLng; 2]>,
}

/// Page data: one area and its spots.
#[derive(Debug, Clone, Deserialize)]
pub struct AreaFile {
    pub area: Area,
    pub spots: Vec<Spot>,
}

impl AreaFile {
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        serde_json::from_str(json).context("parsing area file")
    }

    /// Fixed map view of the area in a viewport of `size_px`.
    pub fn view(&self, size_px: (u32, u32)) -> MapView {
        MapView::new(
            self.area.center,
            self.area.zoom,
            [f64::from(size_px.0), f64::from(size_px.1)],
        )
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderConfig {
    pub image_size: (u32, u32),
    pub background: [u8; 3],
    pub card_fill: [u8; 3],
    /// Fill for cards of spots with a missing name or coordinate.
    pub degraded_fill: [u8; 3],
    pub card_border: [u8; 3],
    /// Border for cards left in the fallback direction.
    pub overlap_border: [u8; 3],
    pub anchor_color: [u8; 3],
    /// Anchor color for spots whose `status` is `now`.
    pub live_anchor_color: [u8; 3],
    pub anchor_radius: i32,
    /// Destination marker position in pixels, drawn above everything else.
    pub destination: Option<Vec2>,
    pub destination_radius: i32,
    /// Outline of the area overlay, as pixel corners.
    pub overlay: Option<CardRect>,
}

impl RenderConfig {
    pub fn new(image_size: (u32, u32)) -> Self {
        Self {
            image_size,
            background: [240, 240, 236],
            card_fill: [255, 255, 255],
            degraded_fill: [200, 200, 200],
            card_border: [40, 40, 40],
            overlap_border: [220, 50, 50],
            anchor_color: [76, 175, 80],
            live_anchor_color: [229, 57, 53],
            anchor_radius: 4,
            destination: None,
            destination_radius: 8,
            overlay: None,
        }
    }

    /// Marks the area's center and overlay bounds as seen through `view`.
    pub fn with_area(mut self, area: &Area, view: &dyn ViewState) -> Self {
        self.destination = Some(view.latlng_to_container_point(area.center).as_vec2());
        self.overlay = area.bounds.map(|[a, b]| {
            let a = view.latlng_to_container_point(a).as_vec2();
            let b = view.latlng_to_container_point(b).as_vec2();
            CardRect::from_min_max(a.min(b), a.max(b))
        });
        self
    }

    pub fn with_background(mut self, background: [u8; 3]) -> Self {
        self.background = background;
        self
    }
}

/// How an attached card's spot is drawn.
#[derive(Debug, Clone, Copy)]
struct CardLook {
    complete: bool,
    live: bool,
}

/// Card layer that keeps what it was given so it can be drawn afterwards.
#[derive(Default)]
pub struct PngCardLayer {
    cards: Vec<(PlacedCard, CardLook)>,
}

impl PngCardLayer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn render_to_png(&self, rc: &RenderConfig, out_path: impl AsRef<Path>) -> anyhow::Result<()> {
        let (w, h) = rc.image_size;
        let mut img = RgbImage::from_pixel(w, h, Rgb(rc.background));

        if let Some(overlay) = rc.overlay {
            stroke_rect(&mut img, overlay, rc.card_border);
        }

        let overlapping = overlapping_flags(&self.cards);
        for ((card, look), overlaps) in self.cards.iter().zip(overlapping) {
            let bounds = card.bounds();
            draw_leader(&mut img, card, rc.card_border);
            let fill = if look.complete {
                rc.card_fill
            } else {
                rc.degraded_fill
            };
            fill_rect(&mut img, bounds, fill);
            let border = if overlaps {
                rc.overlap_border
            } else {
                rc.card_border
            };
            stroke_rect(&mut img, bounds, border);
        }
        for (card, look) in &self.cards {
            let color = if look.live {
                rc.live_anchor_color
            } else {
                rc.anchor_color
            };
            fill_disk(&mut img, card.anchor_px, rc.anchor_radius, color);
        }
        if let Some(destination) = rc.destination {
            fill_disk(&mut img, destination, rc.destination_radius, rc.card_border);
        }

        let path = out_path.as_ref();
        img.save(path)
            .with_context(|| format!("writing {}", path.display()))?;
        tracing::info!("Wrote {} card(s) to {}.", self.cards.len(), path.display());
        Ok(())
    }
}

impl CardHost for PngCardLayer {
    fn clear_cards(&mut self) {
        self.cards.clear();
    }

    fn attach_card(&mut self, card: &PlacedCard, spot: &Spot) {
        let look = CardLook {
            complete: spot.is_complete(),
            live: spot.extra_str("status") == Some("now"),
        };
        self.cards.push((card.clone(), look));
    }
}

/// Marks every card overlapping any other card, in either order.
fn overlapping_flags(cards: &[(PlacedCard, CardLook)]) -> Vec<bool> {
    let rects: Vec<CardRect> = cards.iter().map(|(c, _)| c.bounds()).collect();
    (0..rects.len())
        .map(|i| {
            rects
                .iter()
                .enumerate()
                .any(|(j, r)| i != j && rects[i].overlaps(r))
        })
        .collect()
}

fn put(img: &mut RgbImage, x: i32, y: i32, color: [u8; 3]) {
    if x >= 0 && y >= 0 && (x as u32) < img.width() && (y as u32) < img.height() {
        img.put_pixel(x as u32, y as u32, Rgb(color));
    }
}

fn fill_rect(img: &mut RgbImage, rect: CardRect, color: [u8; 3]) {
    let (x0, y0) = (rect.min.x.round() as i32, rect.min.y.round() as i32);
    let (x1, y1) = (rect.max.x.round() as i32, rect.max.y.round() as i32);
    for y in y0..y1 {
        for x in x0..x1 {
            put(img, x, y, color);
        }
    }
}

fn stroke_rect(img: &mut RgbImage, rect: CardRect, color: [u8; 3]) {
    let (x0, y0) = (rect.min.x.round() as i32, rect.min.y.round() as i32);
    let (x1, y1) = (rect.max.x.round() as i32 - 1, rect.max.y.round() as i32 - 1);
    for x in x0..=x1 {
        put(img, x, y0, color);
        put(img, x, y1, color);
    }
    for y in y0..=y1 {
        put(img, x0, y, color);
        put(img, x1, y, color);
    }
}

fn fill_disk(img: &mut RgbImage, center: Vec2, radius: i32, color: [u8; 3]) {
    let (cx, cy) = (center.x.round() as i32, center.y.round() as i32);
    let r2 = radius * radius;
    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy <= r2 {
                put(img, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Straight line from the anchor to the middle of the card's near edge.
fn draw_leader(img: &mut RgbImage, card: &PlacedCard, color: [u8; 3]) {
    let a = card.anchor_px;
    let b = card.bounds();
    let end = match card.direction {
        Direction::Up => Vec2::new(a.x, b.max.y),
        Direction::Down => Vec2::new(a.x, b.min.y),
        Direction::Right => Vec2::new(b.min.x, a.y),
        Direction::Left => Vec2::new(b.max.x, a.y),
    };
    let steps = a.distance(end).ceil().max(1.0) as i32;
    for i in 0..=steps {
        let p = a.lerp(end, i as f32 / steps as f32);
        put(img, p.x.round() as i32, p.y.round() as i32, color);
    }
}
