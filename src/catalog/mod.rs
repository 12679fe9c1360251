//! Priced catalog: item kinds and their rows.

mod item;
mod item_type;

pub use item::{to_currency, ItemFields, ItemId, PricedItem, MAX_PRICE};
pub use item_type::{ItemType, UnsupportedItemType};
