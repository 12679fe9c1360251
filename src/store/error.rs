use thiserror::Error;

use crate::catalog::{ItemId, ItemType};
use crate::order::{CustomerId, OrderId, OrderStatus};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Item not found in {} table", .item_type.display_table())]
    ItemNotFound { item_type: ItemType, item_id: ItemId },
    #[error("Order {0} not found")]
    OrderNotFound(OrderId),
    #[error("No open cart for customer {0}")]
    NoOpenOrder(CustomerId),
    #[error("Cart is empty")]
    EmptyCart(OrderId),
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: OrderId,
        from: OrderStatus,
        to: OrderStatus,
    },
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("corrupt row: {0}")]
    Corrupt(String),
    #[cfg(feature = "postgres")]
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}
