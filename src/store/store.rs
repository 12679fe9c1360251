use std::future::Future;

use rust_decimal::Decimal;

use super::error::StoreError;
use crate::catalog::{ItemFields, ItemId, ItemType, PricedItem};
use crate::order::{AddedLine, Cart, CustomerId, DetailId, NewLine, Order, OrderId};

/// Persistence for the catalog, orders and their line items.
///
/// Every method is one unit of work: implementations either apply all of
/// its writes or none of them.
pub trait Store: Send + Sync + 'static {
    /// Returns the customer's open order, creating one if there is none.
    fn resolve_or_create_order(
        &self,
        customer_id: CustomerId,
    ) -> impl Future<Output = Result<OrderId, StoreError>> + Send;

    /// Current catalog price of an item, or `ItemNotFound`.
    fn resolve_price(
        &self,
        item_type: ItemType,
        item_id: ItemId,
    ) -> impl Future<Output = Result<Decimal, StoreError>> + Send;

    /// Find-or-create the open order, snapshot the price, insert an
    /// `In-cart` line. Atomic.
    fn add_to_cart(
        &self,
        line: NewLine,
    ) -> impl Future<Output = Result<AddedLine, StoreError>> + Send;

    /// Deletes the line if it is still `In-cart`. Returns rows affected.
    fn remove_from_cart(
        &self,
        detail_id: DetailId,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// The customer's open order and its `In-cart` lines.
    fn cart(
        &self,
        customer_id: CustomerId,
    ) -> impl Future<Output = Result<Option<Cart>, StoreError>> + Send;

    /// Moves the open order to `Checked-out` and its lines to `Ordered`.
    fn checkout(
        &self,
        customer_id: CustomerId,
    ) -> impl Future<Output = Result<Cart, StoreError>> + Send;

    /// Moves a checked-out order to `Archived`.
    fn archive_order(
        &self,
        order_id: OrderId,
    ) -> impl Future<Output = Result<Order, StoreError>> + Send;

    fn list_items(
        &self,
        item_type: ItemType,
    ) -> impl Future<Output = Result<Vec<PricedItem>, StoreError>> + Send;

    fn get_item(
        &self,
        item_type: ItemType,
        id: ItemId,
    ) -> impl Future<Output = Result<Option<PricedItem>, StoreError>> + Send;

    fn create_item(
        &self,
        item_type: ItemType,
        fields: ItemFields,
    ) -> impl Future<Output = Result<PricedItem, StoreError>> + Send;

    /// Replaces a catalog row. Returns rows affected.
    fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        fields: ItemFields,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;

    /// Returns rows affected.
    fn delete_item(
        &self,
        item_type: ItemType,
        id: ItemId,
    ) -> impl Future<Output = Result<u64, StoreError>> + Send;
}
