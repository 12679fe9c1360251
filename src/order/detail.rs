use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::order::{CustomerId, OrderId};
use crate::catalog::{ItemId, ItemType};

pub type DetailId = i64;

/// Status of a single line item.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum DetailStatus {
    /// Still in the cart; the only state from which a line may be removed.
    #[serde(rename = "In-cart")]
    InCart,
    #[serde(rename = "Ordered")]
    Ordered,
}

impl DetailStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DetailStatus::InCart => "In-cart",
            DetailStatus::Ordered => "Ordered",
        }
    }
}

impl fmt::Display for DetailStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when stored text names no known detail status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown detail status: {0}")]
pub struct UnknownDetailStatus(pub String);

impl FromStr for DetailStatus {
    type Err = UnknownDetailStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "In-cart" => Ok(DetailStatus::InCart),
            "Ordered" => Ok(DetailStatus::Ordered),
            other => Err(UnknownDetailStatus(other.to_string())),
        }
    }
}

/// One line item. `price_per_item` is copied from the catalog at insert time.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct OrderDetail {
    pub detail_id: DetailId,
    pub order_id: OrderId,
    pub item_type: ItemType,
    pub item_id: ItemId,
    pub quantity: i32,
    pub price_per_item: Decimal,
    pub status: DetailStatus,
}

impl OrderDetail {
    pub fn line_total(&self) -> Decimal {
        self.price_per_item * Decimal::from(self.quantity)
    }
}

/// A validated add-to-cart request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NewLine {
    pub customer_id: CustomerId,
    pub item_type: ItemType,
    pub item_id: ItemId,
    pub quantity: i32,
}

/// Outcome of a successful add-to-cart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AddedLine {
    pub order_id: OrderId,
    pub detail_id: DetailId,
    pub price_per_item: Decimal,
}
