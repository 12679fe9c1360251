use rust_decimal::Decimal;
use serde::Serialize;

use super::detail::OrderDetail;
use super::order::{CustomerId, OrderId, OrderStatus};

/// A customer's order together with its line items and running total.
#[derive(Clone, Serialize, Debug, PartialEq, Eq)]
pub struct Cart {
    pub order_id: OrderId,
    pub customer_id: CustomerId,
    pub status: OrderStatus,
    pub lines: Vec<OrderDetail>,
    pub total: Decimal,
}

impl Cart {
    pub fn new(
        order_id: OrderId,
        customer_id: CustomerId,
        status: OrderStatus,
        lines: Vec<OrderDetail>,
    ) -> Self {
        let total = lines.iter().map(OrderDetail::line_total).sum();
        Self {
            order_id,
            customer_id,
            status,
            lines,
            total,
        }
    }
}
