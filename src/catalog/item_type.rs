//! The closed set of sellable item kinds.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every item kind that can go into a cart.
///
/// Each variant owns its catalog table, its HTTP route segment and the tag
/// stored in `order_details.item_type`. Adding a kind means adding a variant
/// here; every `match` below is exhaustive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "Drink")]
    Drink,
    #[serde(rename = "Food")]
    Food,
    #[serde(rename = "Top_up")]
    TopUp,
    #[serde(rename = "Games_Top_up")]
    GameTopUp,
}

impl ItemType {
    pub const ALL: [ItemType; 4] = [
        ItemType::Drink,
        ItemType::Food,
        ItemType::TopUp,
        ItemType::GameTopUp,
    ];

    /// Tag written to and read from `order_details.item_type`.
    pub fn tag(self) -> &'static str {
        match self {
            ItemType::Drink => "Drink",
            ItemType::Food => "Food",
            ItemType::TopUp => "Top_up",
            ItemType::GameTopUp => "Games_Top_up",
        }
    }

    /// Catalog table holding this kind's prices.
    pub fn table(self) -> &'static str {
        match self {
            ItemType::Drink => "drinks",
            ItemType::Food => "foods",
            ItemType::TopUp => "top_up",
            ItemType::GameTopUp => "games_top_up",
        }
    }

    /// Table name as shown to API clients in not-found messages.
    pub fn display_table(self) -> &'static str {
        match self {
            ItemType::Drink => "Drinks",
            ItemType::Food => "Foods",
            ItemType::TopUp => "Top_up",
            ItemType::GameTopUp => "Games_Top_up",
        }
    }

    /// Path segment for the catalog CRUD routes.
    pub fn route_segment(self) -> &'static str {
        match self {
            ItemType::Drink => "drinks",
            ItemType::Food => "foods",
            ItemType::TopUp => "top_ups",
            ItemType::GameTopUp => "games_top_ups",
        }
    }

    /// Human label used in CRUD response messages ("Drink added successfully.").
    pub fn label(self) -> &'static str {
        match self {
            ItemType::Drink => "Drink",
            ItemType::Food => "Food",
            ItemType::TopUp => "Top-up",
            ItemType::GameTopUp => "Game top-up",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string names no known item kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unsupported item_type currently. Only {} is supported.", supported_tags())]
pub struct UnsupportedItemType(pub String);

fn supported_tags() -> String {
    ItemType::ALL
        .iter()
        .map(|t| format!("\"{}\"", t.tag()))
        .collect::<Vec<_>>()
        .join(", ")
}

impl FromStr for ItemType {
    type Err = UnsupportedItemType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ItemType::ALL
            .into_iter()
            .find(|t| t.tag() == s)
            .ok_or_else(|| UnsupportedItemType(s.to_string()))
    }
}
