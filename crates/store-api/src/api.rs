//! # The `StoreApi` Seam
//!
//! The web layer never talks HTTP to the store directly. It holds an
//! `Arc<dyn StoreApi>` so handlers can be exercised against
//! [`MockStoreApi`](crate::mock::MockStoreApi) in tests and against
//! [`HttpStoreApi`](crate::HttpStoreApi) in production.
//!
//! Every call takes the request [`Headers`] built from the caller's session.

use crate::error::StoreApiError;
use crate::model::{
    Address, AddressId, Customer, CustomerId, Headers, Order, OrderComment, OrderId, OrderItem,
    Product, ProductId, ResponseStatus, User,
};
use async_trait::async_trait;

/// Operations the storefront consumes from the remote store API.
#[async_trait]
pub trait StoreApi: Send + Sync {
    /// Fetch one order header.
    async fn get_order(&self, id: OrderId, headers: &Headers) -> Result<Order, StoreApiError>;

    /// List the stored line items of an order.
    async fn get_order_item_list(
        &self,
        order_id: OrderId,
        headers: &Headers,
    ) -> Result<Vec<OrderItem>, StoreApiError>;

    /// Fetch the live state of a product.
    async fn get_product_by_id(
        &self,
        id: ProductId,
        headers: &Headers,
    ) -> Result<Product, StoreApiError>;

    /// List the notes attached to an order.
    async fn get_order_comment_list(
        &self,
        order_id: OrderId,
        headers: &Headers,
    ) -> Result<Vec<OrderComment>, StoreApiError>;

    async fn update_order(
        &self,
        order: &Order,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    async fn add_order_comments(
        &self,
        comment: &OrderComment,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    /// Every order of the store.
    async fn get_store_order_list(&self, headers: &Headers) -> Result<Vec<Order>, StoreApiError>;

    /// Orders of the store in one status.
    async fn get_store_order_list_by_status(
        &self,
        status: &str,
        headers: &Headers,
    ) -> Result<Vec<Order>, StoreApiError>;

    /// Look a customer up by email. `None` when no such customer exists.
    async fn get_customer(
        &self,
        email: &str,
        headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError>;

    async fn get_customer_by_id(
        &self,
        id: CustomerId,
        headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError>;

    async fn update_customer(
        &self,
        customer: &Customer,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    /// Create a customer; the new id is reported in [`ResponseStatus::id`].
    async fn add_customer(
        &self,
        customer: &Customer,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    /// Create the store login of a customer.
    async fn add_customer_user(
        &self,
        user: &User,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    async fn add_address(
        &self,
        address: &Address,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    async fn delete_address(
        &self,
        id: AddressId,
        customer_id: CustomerId,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError>;

    async fn get_address_list(
        &self,
        customer_id: CustomerId,
        headers: &Headers,
    ) -> Result<Vec<Address>, StoreApiError>;
}
