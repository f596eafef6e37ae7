use crate::model::ProductId;
use serde::{Deserialize, Serialize};

/// A catalogue product in its current state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Product {
    pub id: ProductId,
    pub sku: String,
    pub name: String,
    pub short_desc: String,
    pub price: f64,
    pub sale_price: f64,
    pub special_processing: bool,
    pub special_processing_type: String,
    pub stock: i64,
    pub store_id: i64,
}
