//! Cart view, checkout and archive.

use lounge_pos::{ItemType, OrderStatus};
use serde_json::json;

use crate::support::{start_server, TestServer};

async fn add(server: &TestServer, customer_id: i64, item_id: i64, quantity: i64) -> serde_json::Value {
    let (status, body) = server
        .post(
            "/cart",
            &json!({
                "customer_id": customer_id,
                "item_id": item_id,
                "item_type": "Drink",
                "quantity": quantity,
            }),
        )
        .await;
    assert_eq!(status, 200);
    body
}

#[tokio::test]
async fn health_lists_item_types() {
    let server = start_server().await;
    let (status, body) = server.get("/health").await;
    assert_eq!(status, 200);
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["item_types"],
        json!(["Drink", "Food", "Top_up", "Games_Top_up"])
    );
}

#[tokio::test]
async fn cart_view_totals_lines() {
    let server = start_server().await;
    let latte = server.seed(ItemType::Drink, "Latte", "3.50").await;
    let tea = server.seed(ItemType::Drink, "Tea", "1.20").await;

    let (status, _) = server.get("/customers/5/cart").await;
    assert_eq!(status, 404);

    let added = add(&server, 5, latte, 2).await;
    add(&server, 5, tea, 3).await;

    let (status, cart) = server.get("/customers/5/cart").await;
    assert_eq!(status, 200);
    assert_eq!(cart["order_id"], added["order_id"]);
    assert_eq!(cart["customer_id"], 5);
    assert_eq!(cart["status"], "Open");
    assert_eq!(cart["lines"].as_array().unwrap().len(), 2);
    assert_eq!(cart["lines"][0]["status"], "In-cart");
    assert_eq!(cart["total"], "10.60");
}

#[tokio::test]
async fn checkout_closes_the_order_and_next_add_opens_a_new_one() {
    let server = start_server().await;
    let latte = server.seed(ItemType::Drink, "Latte", "3.50").await;

    let first = add(&server, 8, latte, 2).await;
    let (status, body) = server.post("/customers/8/checkout", &json!({})).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["order_id"], first["order_id"]);
    assert_eq!(body["total"], "7.00");

    let (status, _) = server.get("/customers/8/cart").await;
    assert_eq!(status, 404);

    let second = add(&server, 8, latte, 1).await;
    assert_ne!(first["order_id"], second["order_id"]);

    let orders = server.store.orders().unwrap();
    assert_eq!(orders.len(), 2);
    assert_eq!(orders[0].status, OrderStatus::CheckedOut);
    assert_eq!(orders[1].status, OrderStatus::Open);
}

#[tokio::test]
async fn checkout_without_cart_is_404_and_empty_cart_is_400() {
    let server = start_server().await;
    let (status, body) = server.post("/customers/2/checkout", &json!({})).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No open cart for customer 2");

    let latte = server.seed(ItemType::Drink, "Latte", "3.50").await;
    let added = add(&server, 2, latte, 1).await;
    let detail_id = added["detail_id"].as_i64().unwrap();
    server.delete(&format!("/cart/{detail_id}")).await;

    let (status, body) = server.post("/customers/2/checkout", &json!({})).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Cart is empty");
}

#[tokio::test]
async fn archive_follows_the_lifecycle() {
    let server = start_server().await;
    let latte = server.seed(ItemType::Drink, "Latte", "3.50").await;
    let added = add(&server, 4, latte, 1).await;
    let order_id = added["order_id"].as_i64().unwrap();

    let (status, _) = server
        .post(&format!("/orders/{order_id}/archive"), &json!({}))
        .await;
    assert_eq!(status, 409);

    server.post("/customers/4/checkout", &json!({})).await;
    let (status, body) = server
        .post(&format!("/orders/{order_id}/archive"), &json!({}))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["order_id"], order_id);

    let (status, _) = server
        .post(&format!("/orders/{order_id}/archive"), &json!({}))
        .await;
    assert_eq!(status, 409);

    let (status, _) = server.post("/orders/999/archive", &json!({})).await;
    assert_eq!(status, 404);
}
