//! `POST /cart` and `DELETE /cart/:detail_id`.

use lounge_pos::{DetailStatus, ItemType};
use serde_json::json;

use crate::support::start_server;

#[tokio::test]
async fn add_drink_snapshots_price() {
    let server = start_server().await;
    for i in 1..=4 {
        server.seed(ItemType::Drink, &format!("Filler{i}"), "1.00").await;
    }
    let id = server.seed(ItemType::Drink, "Latte", "3.50").await;
    assert_eq!(id, 5);

    let (status, body) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": 5, "item_type": "Drink", "quantity": 2 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Item added to cart");
    let order_id = body["order_id"].as_i64().unwrap();

    let details = server.store.details().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].order_id, order_id);
    assert_eq!(details[0].item_type, ItemType::Drink);
    assert_eq!(details[0].item_id, 5);
    assert_eq!(details[0].quantity, 2);
    assert_eq!(details[0].price_per_item.to_string(), "3.50");
    assert_eq!(details[0].status, DetailStatus::InCart);
}

#[tokio::test]
async fn second_add_reuses_the_order() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Cola", "2.00").await;
    let food = server.seed(ItemType::Food, "Toast", "4.25").await;

    let (_, first) = server
        .post(
            "/cart",
            &json!({ "customer_id": 7, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;
    let (_, second) = server
        .post(
            "/cart",
            &json!({ "customer_id": 7, "item_id": food, "item_type": "Food", "quantity": 3 }),
        )
        .await;

    assert_eq!(first["order_id"], second["order_id"]);
    assert_ne!(first["detail_id"], second["detail_id"]);
    assert_eq!(server.store.orders().unwrap().len(), 1);
}

#[tokio::test]
async fn ids_sent_as_text_are_accepted() {
    let server = start_server().await;
    let food = server.seed(ItemType::Food, "Nachos", "5.75").await;

    let (status, body) = server
        .post(
            "/cart",
            &json!({ "customer_id": "12", "item_id": food.to_string(), "item_type": "Food", "quantity": "3" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let details = server.store.details().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].item_id, food);
    assert_eq!(details[0].quantity, 3);
}

#[tokio::test]
async fn customers_get_separate_orders() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Cola", "2.00").await;

    let (_, a) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;
    let (_, b) = server
        .post(
            "/cart",
            &json!({ "customer_id": 2, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;
    assert_ne!(a["order_id"], b["order_id"]);
}

#[tokio::test]
async fn unsupported_item_type_is_400() {
    let server = start_server().await;
    let (status, body) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": 5, "item_type": "Snack", "quantity": 2 }),
        )
        .await;
    assert_eq!(status, 400);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .starts_with("Unsupported item_type"));
    assert!(server.store.orders().unwrap().is_empty());
}

#[tokio::test]
async fn missing_fields_are_400() {
    let server = start_server().await;
    let (status, body) = server
        .post("/cart", &json!({ "customer_id": 1, "item_type": "Drink" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Missing required fields");
}

#[tokio::test]
async fn non_positive_quantity_is_400() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Cola", "2.00").await;
    let (status, body) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": drink, "item_type": "Drink", "quantity": -3 }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "quantity must be a positive integer");
    assert!(server.store.details().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_body_is_400() {
    let server = start_server().await;
    let resp = server
        .client
        .post(server.url("/cart"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let body: serde_json::Value = resp.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_item_is_404_and_writes_nothing() {
    let server = start_server().await;
    let (status, body) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": 42, "item_type": "Food", "quantity": 1 }),
        )
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "Item not found in Foods table");
    assert!(server.store.details().unwrap().is_empty());
    assert!(server.store.orders().unwrap().is_empty());
}

#[tokio::test]
async fn later_price_change_does_not_touch_the_cart() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Matcha", "3.50").await;
    server
        .post(
            "/cart",
            &json!({ "customer_id": 3, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;

    let (status, _) = server
        .put(
            &format!("/drinks/{drink}"),
            &json!({ "name": "Matcha", "price": 9.99, "ImageLink": "matcha.png" }),
        )
        .await;
    assert_eq!(status, 200);

    let details = server.store.details().unwrap();
    assert_eq!(details[0].price_per_item.to_string(), "3.50");

    let (_, cart) = server.get("/customers/3/cart").await;
    assert_eq!(cart["lines"][0]["price_per_item"], "3.50");
}

#[tokio::test]
async fn remove_in_cart_line() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Cola", "2.00").await;
    let (_, added) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;
    let detail_id = added["detail_id"].as_i64().unwrap();

    let (status, body) = server.delete(&format!("/cart/{detail_id}")).await;
    assert_eq!(status, 200);
    assert_eq!(
        body,
        json!({ "success": true, "message": "Item removed from cart successfully." })
    );
    assert!(server.store.details().unwrap().is_empty());
}

#[tokio::test]
async fn removing_an_ordered_line_is_a_successful_no_op() {
    let server = start_server().await;
    let drink = server.seed(ItemType::Drink, "Cola", "2.00").await;
    let (_, added) = server
        .post(
            "/cart",
            &json!({ "customer_id": 1, "item_id": drink, "item_type": "Drink", "quantity": 1 }),
        )
        .await;
    let detail_id = added["detail_id"].as_i64().unwrap();
    let (status, _) = server.post("/customers/1/checkout", &json!({})).await;
    assert_eq!(status, 200);

    let (status, body) = server.delete(&format!("/cart/{detail_id}")).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let details = server.store.details().unwrap();
    assert_eq!(details.len(), 1);
    assert_eq!(details[0].status, DetailStatus::Ordered);
}

#[tokio::test]
async fn removing_an_unknown_line_still_succeeds() {
    let server = start_server().await;
    let (status, body) = server.delete("/cart/999").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
}

#[tokio::test]
async fn non_numeric_detail_id_is_400() {
    let server = start_server().await;
    let (status, body) = server.delete("/cart/abc").await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "detail_id must be a positive integer");
}
