//! Request payloads and their validation.

use axum::extract::rejection::JsonRejection;
use axum::Json;
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::error::ApiError;
use crate::catalog::{to_currency, ItemFields, ItemType, UnsupportedItemType, MAX_PRICE};
use crate::order::NewLine;

/// Deserialize a JSON body into a typed payload.
///
/// Syntax errors and shape mismatches both become `Validation`.
pub fn decode<T: DeserializeOwned>(payload: Result<Json<Value>, JsonRejection>) -> Result<T, ApiError> {
    let Json(value) = payload?;
    Ok(serde_json::from_value(value)?)
}

/// Parse a positive integer id from a path segment.
pub fn parse_id(raw: &str, field: &str) -> Result<i64, ApiError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ApiError::Validation(format!("{} is required", field)));
    }
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| ApiError::Validation(format!("{} must be a positive integer", field)))
}

/// Integer given either as a JSON number or as numeric text (`2` or `"2"`).
/// Blank text counts as absent.
fn lenient_int<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Int(i64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Int(value)) => Ok(Some(value)),
        Some(Raw::Text(text)) if text.trim().is_empty() => Ok(None),
        Some(Raw::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("expected an integer, found {:?}", text))),
    }
}

/// Body of `POST /cart`.
#[derive(Debug, Default, Deserialize)]
pub struct AddToCartInput {
    #[serde(default, deserialize_with = "lenient_int")]
    pub customer_id: Option<i64>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub item_id: Option<i64>,
    pub item_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_int")]
    pub quantity: Option<i64>,
}

impl AddToCartInput {
    pub fn validate(self) -> Result<NewLine, ApiError> {
        let (Some(customer_id), Some(item_id), Some(item_type), Some(quantity)) = (
            self.customer_id.filter(|v| *v != 0),
            self.item_id.filter(|v| *v != 0),
            self.item_type.filter(|t| !t.is_empty()),
            self.quantity.filter(|v| *v != 0),
        ) else {
            return Err(ApiError::Validation("Missing required fields".into()));
        };

        let item_type: ItemType = item_type
            .parse()
            .map_err(|e: UnsupportedItemType| ApiError::Validation(e.to_string()))?;

        if customer_id < 0 {
            return Err(ApiError::Validation(
                "customer_id must be a positive integer".into(),
            ));
        }
        if item_id < 0 {
            return Err(ApiError::Validation("item_id must be a positive integer".into()));
        }
        let quantity = i32::try_from(quantity)
            .ok()
            .filter(|q| *q > 0)
            .ok_or_else(|| ApiError::Validation("quantity must be a positive integer".into()))?;

        Ok(NewLine {
            customer_id,
            item_type,
            item_id,
            quantity,
        })
    }
}

/// Body of catalog create/update requests.
#[derive(Debug, Default, Deserialize)]
pub struct ItemInput {
    pub name: Option<String>,
    pub price: Option<Decimal>,
    #[serde(rename = "ImageLink")]
    pub image_link: Option<String>,
}

impl ItemInput {
    pub fn validate(self) -> Result<ItemFields, ApiError> {
        let (Some(name), Some(price), Some(image_link)) = (
            self.name.filter(|n| !n.trim().is_empty()),
            self.price,
            self.image_link.filter(|l| !l.trim().is_empty()),
        ) else {
            return Err(ApiError::Validation(
                "Name, price, and ImageLink are required.".into(),
            ));
        };
        if price.is_sign_negative() && !price.is_zero() {
            return Err(ApiError::Validation("price must not be negative".into()));
        }
        let price = to_currency(price);
        if price > MAX_PRICE {
            return Err(ApiError::Validation(format!(
                "price must not exceed {}",
                MAX_PRICE
            )));
        }
        Ok(ItemFields {
            name,
            price,
            image_link,
        })
    }
}
