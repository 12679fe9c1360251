//! `PosService` - validated cart, order and catalog operations over a `Store`.

use tracing::{debug, info, instrument};

use super::error::ApiError;
use crate::catalog::{ItemFields, ItemId, ItemType, PricedItem};
use crate::order::{AddedLine, Cart, CustomerId, DetailId, NewLine, Order, OrderId};
use crate::store::Store;

/// Request-independent operations shared by every HTTP handler.
///
/// Holds no state besides the store; each call is its own unit of work.
pub struct PosService<S> {
    store: S,
}

impl<S: Store> PosService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Append a line to the customer's open order, creating the order if needed.
    #[instrument(skip(self))]
    pub async fn add_to_cart(&self, line: NewLine) -> Result<AddedLine, ApiError> {
        let added = self.store.add_to_cart(line).await?;
        info!(
            order_id = added.order_id,
            detail_id = added.detail_id,
            price_per_item = %added.price_per_item,
            "item added to cart"
        );
        Ok(added)
    }

    /// Remove an `In-cart` line. A line that is missing or already ordered
    /// is left alone and still counts as success.
    #[instrument(skip(self))]
    pub async fn remove_from_cart(&self, detail_id: DetailId) -> Result<(), ApiError> {
        let removed = self.store.remove_from_cart(detail_id).await?;
        if removed == 0 {
            debug!("no in-cart line matched; nothing removed");
        }
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn cart(&self, customer_id: CustomerId) -> Result<Cart, ApiError> {
        self.store
            .cart(customer_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("No open cart for customer {}", customer_id)))
    }

    #[instrument(skip(self))]
    pub async fn checkout(&self, customer_id: CustomerId) -> Result<Cart, ApiError> {
        let cart = self.store.checkout(customer_id).await?;
        info!(order_id = cart.order_id, total = %cart.total, "order checked out");
        Ok(cart)
    }

    #[instrument(skip(self))]
    pub async fn archive_order(&self, order_id: OrderId) -> Result<Order, ApiError> {
        let order = self.store.archive_order(order_id).await?;
        info!("order archived");
        Ok(order)
    }

    #[instrument(skip(self))]
    pub async fn list_items(&self, item_type: ItemType) -> Result<Vec<PricedItem>, ApiError> {
        Ok(self.store.list_items(item_type).await?)
    }

    #[instrument(skip(self))]
    pub async fn get_item(&self, item_type: ItemType, id: ItemId) -> Result<PricedItem, ApiError> {
        self.store
            .get_item(item_type, id)
            .await?
            .ok_or_else(|| not_found(item_type))
    }

    #[instrument(skip(self))]
    pub async fn create_item(
        &self,
        item_type: ItemType,
        fields: ItemFields,
    ) -> Result<PricedItem, ApiError> {
        let item = self.store.create_item(item_type, fields).await?;
        info!(id = item.id, "catalog item created");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub async fn update_item(
        &self,
        item_type: ItemType,
        id: ItemId,
        fields: ItemFields,
    ) -> Result<(), ApiError> {
        match self.store.update_item(item_type, id, fields).await? {
            0 => Err(not_found(item_type)),
            _ => Ok(()),
        }
    }

    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_type: ItemType, id: ItemId) -> Result<(), ApiError> {
        match self.store.delete_item(item_type, id).await? {
            0 => Err(not_found(item_type)),
            _ => Ok(()),
        }
    }
}

fn not_found(item_type: ItemType) -> ApiError {
    ApiError::NotFound(format!("{} not found.", item_type.label()))
}
