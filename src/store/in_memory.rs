use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use rust_decimal::Decimal;

use super::error::StoreError;
use super::store::Store;
use crate::catalog::{ItemFields, ItemId, ItemType, PricedItem};
use crate::order::{
    AddedLine, Cart, CustomerId, DetailId, DetailStatus, NewLine, Order, OrderDetail, OrderId,
    OrderStatus,
};

#[derive(Default)]
struct Tables {
    orders: BTreeMap<OrderId, Order>,
    details: BTreeMap<DetailId, OrderDetail>,
    catalog: HashMap<ItemType, BTreeMap<ItemId, PricedItem>>,
    next_order_id: OrderId,
    next_detail_id: DetailId,
    next_item_id: HashMap<ItemType, ItemId>,
}

impl Tables {
    fn open_order(&self, customer_id: CustomerId) -> Option<&Order> {
        self.orders
            .values()
            .rev()
            .find(|o| o.customer_id == customer_id && o.status == OrderStatus::Open)
    }

    fn resolve_or_create_order(&mut self, customer_id: CustomerId) -> OrderId {
        if let Some(order) = self.open_order(customer_id) {
            return order.order_id;
        }
        self.next_order_id += 1;
        let order_id = self.next_order_id;
        self.orders.insert(
            order_id,
            Order {
                order_id,
                customer_id,
                status: OrderStatus::Open,
            },
        );
        order_id
    }

    fn price(&self, item_type: ItemType, item_id: ItemId) -> Result<Decimal, StoreError> {
        self.catalog
            .get(&item_type)
            .and_then(|items| items.get(&item_id))
            .map(|item| item.price)
            .ok_or(StoreError::ItemNotFound { item_type, item_id })
    }

    fn in_cart_lines(&self, order_id: OrderId) -> Vec<OrderDetail> {
        self.details
            .values()
            .filter(|d| d.order_id == order_id && d.status == DetailStatus::InCart)
            .cloned()
            .collect()
    }
}

/// Store kept entirely in process memory.
///
/// Each operation runs under one write (or read) lock, so multi-step
/// operations such as `add_to_cart` are atomic. Cloning shares the tables.
#[derive(Clone, Default)]
pub struct InMemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self, operation: &'static str) -> Result<RwLockReadGuard<'_, Tables>, StoreError> {
        self.tables
            .read()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    fn write(&self, operation: &'static str) -> Result<RwLockWriteGuard<'_, Tables>, StoreError> {
        self.tables
            .write()
            .map_err(|_| StoreError::LockPoisoned(operation))
    }

    /// Every order row, oldest first.
    pub fn orders(&self) -> Result<Vec<Order>, StoreError> {
        Ok(self.read("orders")?.orders.values().cloned().collect())
    }

    /// Every order-detail row regardless of status, oldest first.
    pub fn details(&self) -> Result<Vec<OrderDetail>, StoreError> {
        Ok(self.read("details")?.details.values().cloned().collect())
    }
}

impl Store for InMemoryStore {
    async fn resolve_or_create_order(&self, customer_id: CustomerId) -> Result<OrderId, StoreError> {
        let mut tables = self.write("resolve order")?;
        Ok(tables.resolve_or_create_order(customer_id))
    }

    async fn resolve_price(&self, item_type: ItemType, item_id: ItemId) -> Result<Decimal, StoreError> {
        self.read("resolve price")?.price(item_type, item_id)
    }

    async fn add_to_cart(&self, line: NewLine) -> Result<AddedLine, StoreError> {
        let mut tables = self.write("add to cart")?;
        // Price first so a missing item leaves no order behind.
        let price_per_item = tables.price(line.item_type, line.item_id)?;
        let order_id = tables.resolve_or_create_order(line.customer_id);

        tables.next_detail_id += 1;
        let detail_id = tables.next_detail_id;
        tables.details.insert(
            detail_id,
            OrderDetail {
                detail_id,
                order_id,
                item_type: line.item_type,
                item_id: line.item_id,
                quantity: line.quantity,
                price_per_item,
                status: DetailStatus::InCart,
            },
        );

        Ok(AddedLine {
            order_id,
            detail_id,
            price_per_item,
        })
    }

    async fn remove_from_cart(&self, detail_id: DetailId) -> Result<u64, StoreError> {
        let mut tables = self.write("remove from cart")?;
        let removable = tables
            .details
            .get(&detail_id)
            .is_some_and(|d| d.status == DetailStatus::InCart);
        if removable {
            tables.details.remove(&detail_id);
            Ok(1)
        } else {
            Ok(0)
        }
    }

    async fn cart(&self, customer_id: CustomerId) -> Result<Option<Cart>, StoreError> {
        let tables = self.read("cart")?;
        Ok(tables.open_order(customer_id).map(|order| {
            Cart::new(
                order.order_id,
                order.customer_id,
                order.status,
                tables.in_cart_lines(order.order_id),
            )
        }))
    }

    async fn checkout(&self, customer_id: CustomerId) -> Result<Cart, StoreError> {
        let mut tables = self.write("checkout")?;
        let order_id = tables
            .open_order(customer_id)
            .map(|o| o.order_id)
            .ok_or(StoreError::NoOpenOrder(customer_id))?;

        let lines = tables.in_cart_lines(order_id);
        if lines.is_empty() {
            return Err(StoreError::EmptyCart(order_id));
        }

        for detail in tables.details.values_mut() {
            if detail.order_id == order_id && detail.status == DetailStatus::InCart {
                detail.status = DetailStatus::Ordered;
            }
        }
        if let Some(order) = tables.orders.get_mut(&order_id) {
            order.status = OrderStatus::CheckedOut;
        }

        let ordered = lines
            .into_iter()
            .map(|mut d| {
                d.status = DetailStatus::Ordered;
                d
            })
            .collect();
        Ok(Cart::new(order_id, customer_id, OrderStatus::CheckedOut, ordered))
    }

    async fn archive_order(&self, order_id: OrderId) -> Result<Order, StoreError> {
        let mut tables = self.write("archive order")?;
        let order = tables
            .orders
            .get_mut(&order_id)
            .ok_or(StoreError::OrderNotFound(order_id))?;
        if !order.status.can_transition_to(OrderStatus::Archived) {
            return Err(StoreError::InvalidTransition {
                order_id,
                from: order.status,
                to: OrderStatus::Archived,
            });
        }
        order.status = OrderStatus::Archived;
        Ok(order.clone())
    }

    async fn list_items(&self, item_type: ItemType) -> Result<Vec<PricedItem>, StoreError> {
        let tables = self.read("list items")?;
        Ok(tables
            .catalog
            .get(&item_type)
            .map(|items| items.values().cloned().collect())
            .unwrap_or_default())
    }

    async fn get_item(&self, item_type: ItemType, id: ItemId) -> Result<Option<PricedItem>, StoreError> {
        let tables = self.read("get item")?;
        Ok(tables
            .catalog
            .get(&item_type)
            .and_then(|items| items.get(&id))
            .cloned())
    }

    async fn create_item(&self, item_type: ItemType, fields: ItemFields) -> Result<PricedItem, StoreError> {
        let mut tables = self.write("create item")?;
        let next = tables.next_item_id.entry(item_type).or_insert(0);
        *next += 1;
        let item = fields.into_item(*next);
        tables
            .catalog
            .entry(item_type)
            .or_default()
            .insert(item.id, item.clone());
        Ok(item)
    }

    async fn update_item(&self, item_type: ItemType, id: ItemId, fields: ItemFields) -> Result<u64, StoreError> {
        let mut tables = self.write("update item")?;
        match tables.catalog.get_mut(&item_type).and_then(|items| items.get_mut(&id)) {
            Some(item) => {
                *item = fields.into_item(id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete_item(&self, item_type: ItemType, id: ItemId) -> Result<u64, StoreError> {
        let mut tables = self.write("delete item")?;
        let removed = tables
            .catalog
            .get_mut(&item_type)
            .and_then(|items| items.remove(&id));
        Ok(u64::from(removed.is_some()))
    }
}
