//! PostgreSQL-backed store.
//!
//! Every call borrows a pooled connection for its duration. Multi-statement
//! operations run inside a transaction, which rolls back if it is dropped
//! before `commit`.

use std::time::Duration;

use rust_decimal::Decimal;
use sqlx::postgres::{PgConnection, PgPool, PgPoolOptions};
use tracing::{debug, info};

use super::error::StoreError;
use super::store::Store;
use crate::catalog::{ItemFields, ItemId, ItemType, PricedItem};
use crate::order::{
    AddedLine, Cart, CustomerId, DetailId, DetailStatus, NewLine, Order, OrderDetail, OrderId,
    OrderStatus,
};

const SCHEMA: &str = include_str!("../../schema/postgres.sql");

type ItemRow = (i64, String, Decimal, String);
type DetailRow = (i64, i64, String, i64, i32, Decimal, String);

#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Open a pool against `url`.
    pub async fn connect(
        url: &str,
        max_connections: u32,
        acquire_timeout: Duration,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .connect(url)
            .await?;
        info!(max_connections, "connected to postgres");
        Ok(Self::new(pool))
    }

    /// Create any missing tables.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&self.pool).await?;
        debug!("schema applied");
        Ok(())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn item_from_row((id, name, price, image_link): ItemRow) -> PricedItem {
    PricedItem {
        id,
        name,
        price,
        image_link,
    }
}

fn corrupt(err: impl std::error::Error) -> StoreError {
    StoreError::Corrupt(err.to_string())
}

fn detail_from_row(row: DetailRow) -> Result<OrderDetail, StoreError> {
    let (detail_id, order_id, item_type, item_id, quantity, price_per_item, status) = row;
    Ok(OrderDetail {
        detail_id,
        order_id,
        item_type: item_type.parse().map_err(corrupt)?,
        item_id,
        quantity,
        price_per_item,
        status: status.parse().map_err(corrupt)?,
    })
}

async fn open_order_id(
    conn: &mut PgConnection,
    customer_id: CustomerId,
    lock: bool,
) -> Result<Option<OrderId>, StoreError> {
    let sql = format!(
        "SELECT order_id FROM orders WHERE customer_id = $1 AND status = $2 \
         ORDER BY order_id DESC LIMIT 1{}",
        if lock { " FOR UPDATE" } else { "" }
    );
    let order_id = sqlx::query_scalar::<_, i64>(&sql)
        .bind(customer_id)
        .bind(OrderStatus::Open.as_str())
        .fetch_optional(&mut *conn)
        .await?;
    Ok(order_id)
}

async fn find_or_create_order(
    conn: &mut PgConnection,
    customer_id: CustomerId,
) -> Result<OrderId, StoreError> {
    if let Some(order_id) = open_order_id(conn, customer_id, false).await? {
        return Ok(order_id);
    }
    let order_id = sqlx::query_scalar::<_, i64>(
        "INSERT INTO orders (customer_id, status) VALUES ($1, $2) RETURNING order_id",
    )
    .bind(customer_id)
    .bind(OrderStatus::Open.as_str())
    .fetch_one(&mut *conn)
    .await?;
    debug!(customer_id, order_id, "created order");
    Ok(order_id)
}

async fn price_of(
    conn: &mut PgConnection,
    item_type: ItemType,
    item_id: ItemId,
) -> Result<Decimal, StoreError> {
    // Table names come from the closed ItemType enum, never from input.
    let sql = format!("SELECT price FROM {} WHERE id = $1", item_type.table());
    sqlx::query_scalar::<_, Decimal>(&sql)
        .bind(item_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or(StoreError::ItemNotFound { item_type, item_id })
}

async fn in_cart_lines(
    conn: &mut PgConnection,
    order_id: OrderId,
) -> Result<Vec<OrderDetail>, StoreError> {
    let rows = sqlx::query_as::<_, DetailRow>(
        "SELECT detail_id, order_id, item_type, item_id, quantity, price_per_item, status \
         FROM order_details WHERE order_id = $1 AND status = $2 ORDER BY detail_id",
    )
    .bind(order_id)
    .bind(DetailStatus::InCart.as_str())
    .fetch_all(&mut *conn)
    .await?;
    rows.into_iter().map(detail_from_row).collect()
}

impl Store for PgStore {
    async fn resolve_or_create_order(&self, customer_id: CustomerId) -> Result<OrderId, StoreError> {
        let mut conn = self.pool.acquire().await?;
        find_or_create_order(&mut conn, customer_id).await
    }

    async fn resolve_price(&self, item_type: ItemType, item_id: ItemId) -> Result<Decimal, StoreError> {
        let mut conn = self.pool.acquire().await?;
        price_of(&mut conn, item_type, item_id).await
    }

    async fn add_to_cart(&self, line: NewLine) -> Result<AddedLine, StoreError> {
        let mut tx = self.pool.begin().await?;
        let order_id = find_or_create_order(&mut tx, line.customer_id).await?;
        let price_per_item = price_of(&mut tx, line.item_type, line.item_id).await?;

        let detail_id = sqlx::query_scalar::<_, i64>(
            "INSERT INTO order_details \
             (order_id, item_type, item_id, quantity, price_per_item, status) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING detail_id",
        )
        .bind(order_id)
        .bind(line.item_type.tag())
        .bind(line.item_id)
        .bind(line.quantity)
        .bind(price_per_item)
        .bind(DetailStatus::InCart.as_str())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(AddedLine {
            order_id,
            detail_id,
            price_per_item,
        })
    }

    async fn remove_from_cart(&self, detail_id: DetailId) -> Result<u64, StoreError> {
        let result = sqlx::query("DELETE FROM order_details WHERE detail_id = $1 AND status = $2")
            .bind(detail_id)
            .bind(DetailStatus::InCart.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn cart(&self, customer_id: CustomerId) -> Result<Option<Cart>, StoreError> {
        let mut conn = self.pool.acquire().await?;
        let Some(order_id) = open_order_id(&mut conn, customer_id, false).await? else {
            return Ok(None);
        };
        let lines = in_cart_lines(&mut conn, order_id).await?;
        Ok(Some(Cart::new(order_id, customer_id, OrderStatus::Open, lines)))
    }

    async fn checkout(&self, customer_id: CustomerId) -> Result<Cart, StoreError> {
        let mut tx = self.pool.begin().await?;
        let order_id = open_order_id(&mut tx, customer_id, true)
            .await?
            .ok_or(StoreError::NoOpenOrder(customer_id))?;

        let lines = in_cart_lines(&mut tx, order_id).await?;
        if lines.is_empty() {
            return Err(StoreError::EmptyCart(order_id));
        }

        sqlx::query("UPDATE order_details SET status = $1 WHERE order_id = $2 AND status = $3")
            .bind(DetailStatus::Ordered.as_str())
            .bind(order_id)
            .bind(DetailStatus::InCart.as_str())
            .execute(&mut *tx)
            .await?;
        sqlx::query("UPDATE orders SET status = $1 WHERE order_id = $2")
            .bind(OrderStatus::CheckedOut.as_str())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

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
        let mut tx = self.pool.begin().await?;
        let (customer_id, status) = sqlx::query_as::<_, (i64, String)>(
            "SELECT customer_id, status FROM orders WHERE order_id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or(StoreError::OrderNotFound(order_id))?;

        let from: OrderStatus = status.parse().map_err(corrupt)?;
        if !from.can_transition_to(OrderStatus::Archived) {
            return Err(StoreError::InvalidTransition {
                order_id,
                from,
                to: OrderStatus::Archived,
            });
        }

        sqlx::query("UPDATE orders SET status = $1 WHERE order_id = $2")
            .bind(OrderStatus::Archived.as_str())
            .bind(order_id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        Ok(Order {
            order_id,
            customer_id,
            status: OrderStatus::Archived,
        })
    }

    async fn list_items(&self, item_type: ItemType) -> Result<Vec<PricedItem>, StoreError> {
        let sql = format!(
            "SELECT id, name, price, image_link FROM {} ORDER BY id",
            item_type.table()
        );
        let rows = sqlx::query_as::<_, ItemRow>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(item_from_row).collect())
    }

    async fn get_item(&self, item_type: ItemType, id: ItemId) -> Result<Option<PricedItem>, StoreError> {
        let sql = format!(
            "SELECT id, name, price, image_link FROM {} WHERE id = $1",
            item_type.table()
        );
        let row = sqlx::query_as::<_, ItemRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(item_from_row))
    }

    async fn create_item(&self, item_type: ItemType, fields: ItemFields) -> Result<PricedItem, StoreError> {
        let sql = format!(
            "INSERT INTO {} (name, price, image_link) VALUES ($1, $2, $3) RETURNING id",
            item_type.table()
        );
        let id = sqlx::query_scalar::<_, i64>(&sql)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(&fields.image_link)
            .fetch_one(&self.pool)
            .await?;
        Ok(fields.into_item(id))
    }

    async fn update_item(&self, item_type: ItemType, id: ItemId, fields: ItemFields) -> Result<u64, StoreError> {
        let sql = format!(
            "UPDATE {} SET name = $1, price = $2, image_link = $3 WHERE id = $4",
            item_type.table()
        );
        let result = sqlx::query(&sql)
            .bind(&fields.name)
            .bind(fields.price)
            .bind(&fields.image_link)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn delete_item(&self, item_type: ItemType, id: ItemId) -> Result<u64, StoreError> {
        let sql = format!("DELETE FROM {} WHERE id = $1", item_type.table());
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
