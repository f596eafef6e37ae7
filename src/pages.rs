//! View models handed to the page renderer.

use serde::Serialize;
use store_api::model::{Address, Customer, Order, OrderComment, OrderId, OrderItem, Product, ProductId};

/// Statuses offered by the order pages, in display order.
pub const ORDER_STATUS_LIST: [&str; 6] = [
    "New",
    "Processing",
    "Not Paid",
    "Shipped",
    "Canceled",
    "Partial Cancel",
];

/// An order line as shown on the edit-order page.
///
/// Quantity and names come from the stored line; sku, processing flags and
/// pricing always come from the live product, whatever the stored line says.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemView {
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

impl OrderItemView {
    pub fn enrich(item: OrderItem, product: &Product) -> Self {
        Self {
            id: item.id,
            order_id: item.order_id,
            product_id: item.product_id,
            quantity: item.quantity,
            back_ordered: item.back_ordered,
            dropship: item.dropship,
            product_name: item.product_name,
            product_short_desc: item.product_short_desc,
            sku: product.sku.clone(),
            special_processing: product.special_processing,
            special_processing_type: product.special_processing_type.clone(),
            price: product.price,
            sale_price: product.sale_price,
        }
    }
}

/// Model of the edit-order and order-list pages.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPage {
    pub error: String,
    pub order: Option<Order>,
    pub notes: Vec<OrderComment>,
    pub order_item_list: Vec<OrderItemView>,
    pub orders: Vec<Order>,
    pub status: String,
    pub order_status_list: Vec<String>,
    pub user_name_for_notes: String,
}

impl OrderPage {
    pub fn with_status_list() -> Self {
        Self {
            order_status_list: ORDER_STATUS_LIST.iter().map(|s| s.to_string()).collect(),
            ..Self::default()
        }
    }
}

/// Model of the customer account pages.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerPage {
    pub error: String,
    pub customer: Option<Customer>,
    pub address_list: Vec<Address>,
}
