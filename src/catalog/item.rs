use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub type ItemId = i64;

/// A catalog row: something with a name, a current price and an image.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct PricedItem {
    pub id: ItemId,
    pub name: String,
    pub price: Decimal,
    #[serde(rename = "ImageLink")]
    pub image_link: String,
}

/// Validated field set for creating or replacing a catalog row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemFields {
    pub name: String,
    pub price: Decimal,
    pub image_link: String,
}

impl ItemFields {
    pub fn into_item(self, id: ItemId) -> PricedItem {
        PricedItem {
            id,
            name: self.name,
            price: self.price,
            image_link: self.image_link,
        }
    }
}

/// Largest price a catalog column holds (`NUMERIC(10, 2)`).
/// Mantissa 9_999_999_999 at scale 2, i.e. 99_999_999.99.
pub const MAX_PRICE: Decimal = Decimal::from_parts(0x540B_E3FF, 0x2, 0, false, 2);

/// Normalise a money amount to currency scale (two decimal places).
pub fn to_currency(amount: Decimal) -> Decimal {
    let mut value = amount.round_dp(2);
    value.rescale(2);
    value
}
