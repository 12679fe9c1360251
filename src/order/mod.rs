//! Orders, their line items, and the cart view over them.

mod cart;
mod detail;
#[allow(clippy::module_inception)]
mod order;

pub use cart::Cart;
pub use detail::{AddedLine, DetailId, DetailStatus, NewLine, OrderDetail, UnknownDetailStatus};
pub use order::{CustomerId, Order, OrderId, OrderStatus, UnknownOrderStatus};
