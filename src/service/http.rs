//! HTTP transport - maps REST routes onto `PosService` calls.
//!
//! ## Routes
//!
//! - `POST /cart` - add a line item. Body: `{customer_id, item_id, item_type, quantity}`.
//! - `DELETE /cart/:detail_id` - remove an `In-cart` line.
//! - `GET /customers/:customer_id/cart` - current cart with total.
//! - `POST /customers/:customer_id/checkout` - close the open order.
//! - `POST /orders/:order_id/archive` - archive a checked-out order.
//! - `GET|POST /<items>` and `GET|PUT|DELETE /<items>/:id` for each of
//!   `drinks`, `foods`, `top_ups`, `games_top_ups`.
//! - `GET /health` - `{ "ok": true, "item_types": [...] }`.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use lounge_pos::{service, InMemoryStore, PosService};
//!
//! let service = Arc::new(PosService::new(InMemoryStore::new()));
//! let app = service::router(service.clone());
//! ```

use std::future::Future;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use tracing::info;

use super::error::ApiError;
use super::input::{decode, parse_id, AddToCartInput, ItemInput};
use super::service::PosService;
use crate::catalog::{ItemType, PricedItem};
use crate::order::Cart;
use crate::store::Store;

type Shared<S> = State<Arc<PosService<S>>>;
type Body = Result<Json<Value>, JsonRejection>;

/// Build an axum `Router` serving every route over the given service.
pub fn router<S: Store>(service: Arc<PosService<S>>) -> Router {
    let router = Router::new()
        .route("/health", get(health))
        .route("/cart", post(add_to_cart::<S>))
        .route("/cart/:detail_id", delete(remove_from_cart::<S>))
        .route("/customers/:customer_id/cart", get(view_cart::<S>))
        .route("/customers/:customer_id/checkout", post(checkout::<S>))
        .route("/orders/:order_id/archive", post(archive_order::<S>));

    ItemType::ALL
        .into_iter()
        .fold(router, catalog_routes::<S>)
        .with_state(service)
}

/// Serve over HTTP at `addr` until `shutdown` resolves.
pub async fn serve<S, F>(
    service: Arc<PosService<S>>,
    addr: &str,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    S: Store,
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(service);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %listener.local_addr()?, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
}

fn catalog_routes<S: Store>(
    router: Router<Arc<PosService<S>>>,
    item_type: ItemType,
) -> Router<Arc<PosService<S>>> {
    let collection = format!("/{}", item_type.route_segment());
    let member = format!("{}/:id", collection);

    router
        .route(
            &collection,
            get(move |state: Shared<S>| list_items(state, item_type)).post(
                move |state: Shared<S>, body: Body| create_item(state, item_type, body),
            ),
        )
        .route(
            &member,
            get(move |state: Shared<S>, Path(id): Path<String>| get_item(state, item_type, id))
                .put(move |state: Shared<S>, Path(id): Path<String>, body: Body| {
                    update_item(state, item_type, id, body)
                })
                .delete(move |state: Shared<S>, Path(id): Path<String>| {
                    delete_item(state, item_type, id)
                }),
        )
}

/// `GET /health`
async fn health() -> Json<Value> {
    let item_types: Vec<&str> = ItemType::ALL.iter().map(|t| t.tag()).collect();
    Json(json!({ "ok": true, "item_types": item_types }))
}

/// `POST /cart`
async fn add_to_cart<S: Store>(
    State(service): Shared<S>,
    body: Body,
) -> Result<Json<Value>, ApiError> {
    let line = decode::<AddToCartInput>(body)?.validate()?;
    let added = service.add_to_cart(line).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Item added to cart",
        "order_id": added.order_id,
        "detail_id": added.detail_id,
    })))
}

/// `DELETE /cart/:detail_id`
async fn remove_from_cart<S: Store>(
    State(service): Shared<S>,
    Path(detail_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let detail_id = parse_id(&detail_id, "detail_id")?;
    service.remove_from_cart(detail_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Item removed from cart successfully.",
    })))
}

/// `GET /customers/:customer_id/cart`
async fn view_cart<S: Store>(
    State(service): Shared<S>,
    Path(customer_id): Path<String>,
) -> Result<Json<Cart>, ApiError> {
    let customer_id = parse_id(&customer_id, "customer_id")?;
    Ok(Json(service.cart(customer_id).await?))
}

/// `POST /customers/:customer_id/checkout`
async fn checkout<S: Store>(
    State(service): Shared<S>,
    Path(customer_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let customer_id = parse_id(&customer_id, "customer_id")?;
    let cart = service.checkout(customer_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Order checked out",
        "order_id": cart.order_id,
        "total": cart.total,
    })))
}

/// `POST /orders/:order_id/archive`
async fn archive_order<S: Store>(
    State(service): Shared<S>,
    Path(order_id): Path<String>,
) -> Result<Json<Value>, ApiError> {
    let order_id = parse_id(&order_id, "order_id")?;
    let order = service.archive_order(order_id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Order archived",
        "order_id": order.order_id,
    })))
}

async fn list_items<S: Store>(
    State(service): Shared<S>,
    item_type: ItemType,
) -> Result<Json<Vec<PricedItem>>, ApiError> {
    Ok(Json(service.list_items(item_type).await?))
}

async fn get_item<S: Store>(
    State(service): Shared<S>,
    item_type: ItemType,
    id: String,
) -> Result<Json<PricedItem>, ApiError> {
    let id = parse_id(&id, "id")?;
    Ok(Json(service.get_item(item_type, id).await?))
}

async fn create_item<S: Store>(
    State(service): Shared<S>,
    item_type: ItemType,
    body: Body,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let fields = decode::<ItemInput>(body)?.validate()?;
    let item = service.create_item(item_type, fields).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": format!("{} added successfully.", item_type.label()),
            "id": item.id,
        })),
    ))
}

async fn update_item<S: Store>(
    State(service): Shared<S>,
    item_type: ItemType,
    id: String,
    body: Body,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "id")?;
    let fields = decode::<ItemInput>(body)?.validate()?;
    service.update_item(item_type, id, fields).await?;
    Ok(Json(json!({
        "message": format!("{} updated successfully.", item_type.label()),
    })))
}

async fn delete_item<S: Store>(
    State(service): Shared<S>,
    item_type: ItemType,
    id: String,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, "id")?;
    service.delete_item(item_type, id).await?;
    Ok(Json(json!({
        "message": format!("{} deleted successfully.", item_type.label()),
    })))
}
