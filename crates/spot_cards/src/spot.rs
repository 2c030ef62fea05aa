//! Spot records supplied by the host page.
//!
//! A [`Spot`] is a point of interest with a geographic coordinate and a display
//! label. Everything beyond `id`, `lat`, `lng`, `name` and `category` is payload
//! for the detail view and is never read by the layout engine. With the `serde`
//! feature, fields the model does not name are kept in [`Spot::extra`].
use std::collections::HashMap;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize};

use crate::geo::LatLng;

/// Opaque unique identifier of a [`Spot`].
///
/// Deserializes from a string or an integer; integers are kept in their
/// decimal form and serialize back as strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize), serde(transparent))]
pub struct SpotId(String);

#[cfg(feature = "serde")]
impl<'de> Deserialize<'de> for SpotId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Unsigned(u64),
            Signed(i64),
        }

        Ok(match Raw::deserialize(deserializer)? {
            Raw::Text(text) => Self(text),
            Raw::Unsigned(n) => Self(n.to_string()),
            Raw::Signed(n) => Self(n.to_string()),
        })
    }
}

impl SpotId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SpotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SpotId {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl From<String> for SpotId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<u64> for SpotId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

/// A single priced line on a spot's menu.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MenuItem {
    pub name: String,
    pub price: u32,
}

impl MenuItem {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// A point of interest shown as a card on the map.
///
/// Missing coordinates deserialize to NaN and a missing name to an empty
/// string, so [`Spot::is_complete`] can report them to the layout engine.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Spot {
    pub id: SpotId,
    #[cfg_attr(feature = "serde", serde(default = "missing_coordinate"))]
    pub lat: f64,
    #[cfg_attr(feature = "serde", serde(default = "missing_coordinate"))]
    pub lng: f64,
    #[cfg_attr(feature = "serde", serde(default))]
    pub name: String,
    /// Secondary label; read from `type` or `category`, written as `type`.
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            rename = "type",
            alias = "category",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub category: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub image: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub address: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub menu: Vec<MenuItem>,
    /// Fields not named above (`status`, ...), passed through untouched.
    #[cfg(feature = "serde")]
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(feature = "serde")]
fn missing_coordinate() -> f64 {
    f64::NAN
}

impl Spot {
    pub fn new(id: impl Into<SpotId>, lat: f64, lng: f64, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            lat,
            lng,
            name: name.into(),
            category: None,
            image: None,
            address: None,
            menu: Vec::new(),
            #[cfg(feature = "serde")]
            extra: serde_json::Map::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_menu(mut self, menu: Vec<MenuItem>) -> Self {
        self.menu = menu;
        self
    }

    pub fn coordinate(&self) -> LatLng {
        LatLng::new(self.lat, self.lng)
    }

    pub fn has_coordinate(&self) -> bool {
        self.lat.is_finite() && self.lng.is_finite()
    }

    /// Whether every field the card needs (`lat`, `lng`, `name`) is usable.
    pub fn is_complete(&self) -> bool {
        self.has_coordinate() && !self.name.is_empty()
    }

    /// Payload field `key` as a string, if present and a string.
    #[cfg(feature = "serde")]
    pub fn extra_str(&self, key: &str) -> Option<&str> {
        self.extra.get(key).and_then(serde_json::Value::as_str)
    }

    /// Secondary card line; empty when the spot has no category.
    pub fn category_label(&self) -> &str {
        self.category.as_deref().unwrap_or("")
    }
}

/// The page's spots in input order, indexed by id.
///
/// Ids are expected to be unique; on duplicates lookups return the first spot.
#[derive(Debug, Clone, Default)]
pub struct SpotCatalog {
    spots: Vec<Spot>,
    index: HashMap<SpotId, usize>,
}

impl SpotCatalog {
    pub fn new(spots: Vec<Spot>) -> Self {
        let mut index = HashMap::with_capacity(spots.len());
        for (i, spot) in spots.iter().enumerate() {
            index.entry(spot.id.clone()).or_insert(i);
        }
        Self { spots, index }
    }

    pub fn get(&self, id: &SpotId) -> Option<&Spot> {
        self.index.get(id).map(|&i| &self.spots[i])
    }

    pub fn as_slice(&self) -> &[Spot] {
        &self.spots
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Spot> {
        self.spots.iter()
    }

    pub fn len(&self) -> usize {
        self.spots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spots.is_empty()
    }

    /// Number of spots whose id repeats an earlier one.
    pub fn duplicate_count(&self) -> usize {
        self.spots.len() - self.index.len()
    }
}

impl FromIterator<Spot> for SpotCatalog {
    fn from_iter<I: IntoIterator<Item = Spot>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
