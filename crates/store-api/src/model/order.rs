//! Order header, line items and notes as stored by the store API.

use crate::model::{CustomerId, OrderId, ProductId};
use serde::{Deserialize, Serialize};

/// An order header: status, totals, addresses and owning store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Order {
    pub id: OrderId,
    pub order_number: String,
    pub order_date: String,
    pub status: String,
    pub subtotal: f64,
    pub shipping_handling: f64,
    pub insurance: f64,
    pub taxes: f64,
    pub total: f64,
    pub refunded: f64,
    pub order_type: String,
    pub pickup: bool,
    pub username: String,
    pub customer_id: CustomerId,
    pub customer_name: String,
    pub billing_address: String,
    pub billing_address_id: i64,
    pub shipping_address: String,
    pub shipping_address_id: i64,
    pub shipping_method_id: i64,
    pub shipping_method_name: String,
    pub store_id: i64,
}

/// A line item exactly as it was recorded when the order was placed.
///
/// `sku`, the processing flags and both prices are the values at order time.
/// Pages show the live [`Product`](crate::model::Product) values instead.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: OrderId,
    pub product_id: ProductId,
    pub quantity: i64,
    pub back_ordered: bool,
    pub dropship: bool,
    pub product_name: String,
    pub product_short_desc: String,
    pub sku: String,
    pub special_processing: bool,
    pub special_processing_type: String,
    pub price: f64,
    pub sale_price: f64,
}

/// A free-text note attached to an order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderComment {
    pub id: i64,
    pub order_id: OrderId,
    pub username: String,
    pub comment: String,
}
