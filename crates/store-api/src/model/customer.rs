//! Customer, address and login records, plus the account bundle created on
//! sign-up.

use crate::model::{AddressId, CustomerId};
use serde::{Deserialize, Serialize};

/// Address type used for billing addresses.
pub const BILLING_ADDRESS_TYPE: &str = "Billing";
/// Address type used for shipping addresses.
pub const SHIPPING_ADDRESS_TYPE: &str = "Shipping";
/// Role given to users created through account sign-up.
pub const CUSTOMER_ROLE: &str = "customer";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Customer {
    pub id: CustomerId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub phone: String,
    pub store_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Address {
    pub id: AddressId,
    pub customer_id: CustomerId,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
    #[serde(rename = "type")]
    pub address_type: String,
}

/// Store login for a customer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct User {
    pub username: String,
    pub password: String,
    pub role: String,
    pub enabled: bool,
    pub customer_id: CustomerId,
}

/// Everything created when a shopper signs up.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomerAccount {
    pub customer: Customer,
    pub addresses: Vec<Address>,
    pub user: User,
}
