use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub type OrderId = i64;
pub type CustomerId = i64;

/// Lifecycle of an order.
///
/// `Open` is the customer's cart. Checkout moves it to `CheckedOut`, and a
/// checked-out order may later be archived. There are no other edges.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum OrderStatus {
    #[serde(rename = "Open")]
    Open,
    #[serde(rename = "Checked-out")]
    CheckedOut,
    #[serde(rename = "Archived")]
    Archived,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Open => "Open",
            OrderStatus::CheckedOut => "Checked-out",
            OrderStatus::Archived => "Archived",
        }
    }

    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Open, OrderStatus::CheckedOut)
                | (OrderStatus::CheckedOut, OrderStatus::Archived)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when stored text names no known order status.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown order status: {0}")]
pub struct UnknownOrderStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownOrderStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(OrderStatus::Open),
            "Checked-out" => Ok(OrderStatus::CheckedOut),
            "Archived" => Ok(OrderStatus::Archived),
            other => Err(UnknownOrderStatus(other.to_string())),
        }
    }
}

/// An order row.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Order {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
}
