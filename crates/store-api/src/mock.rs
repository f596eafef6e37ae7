//! # Mock Store & Testing Guide
//!
//! [`MockStoreApi`] implements [`StoreApi`] entirely in memory. Tests queue the
//! replies they expect, run the code under test against an
//! `Arc<dyn StoreApi>`, then call [`MockStoreApi::verify`].
//!
//! ## Keyed Expectations
//!
//! The order-detail page fetches products from many tasks at once, so replies
//! cannot be matched by arrival order. Each expectation is keyed by the call
//! *and its arguments* ([`StoreCall`]); calls with the same key are answered in
//! the order they were queued.
//!
//! ```rust
//! use std::sync::Arc;
//! use store_api::mock::MockStoreApi;
//! use store_api::model::{Headers, Product, ProductId};
//! use store_api::StoreApi;
//!
//! #[tokio::main]
//! async fn main() {
//!     let mock = Arc::new(MockStoreApi::new());
//!     mock.expect_get_product_by_id(ProductId(1)).return_ok(Product {
//!         id: ProductId(1),
//!         sku: "A".to_string(),
//!         ..Default::default()
//!     });
//!
//!     let api: Arc<dyn StoreApi> = mock.clone();
//!     let product = api.get_product_by_id(ProductId(1), &Headers::new()).await.unwrap();
//!     assert_eq!(product.sku, "A");
//!     mock.verify();
//! }
//! ```
//!
//! ## Inspecting Calls
//!
//! [`MockStoreApi::calls`] lists every call received; [`MockStoreApi::posted`]
//! keeps the record each mutating call carried, so tests can check how a
//! handler mapped its form.
//!
//! ## Failures and Slow Calls
//!
//! `return_err` injects a [`StoreApiError`]; `with_delay` makes the call sleep
//! before answering, which is how tests prove a caller waits for every fetch.
//!
//! An unexpected call panics, as does a reply of the wrong type.

use std::collections::{HashMap, VecDeque};
use std::marker::PhantomData;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::api::StoreApi;
use crate::error::StoreApiError;
use crate::model::{
    Address, AddressId, Customer, CustomerId, Headers, Order, OrderComment, OrderId, OrderItem,
    Product, ProductId, ResponseStatus, User,
};

/// A store call and the arguments that identify it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum StoreCall {
    GetOrder(OrderId),
    GetOrderItemList(OrderId),
    GetProductById(ProductId),
    GetOrderCommentList(OrderId),
    UpdateOrder(OrderId),
    AddOrderComments(OrderId),
    GetStoreOrderList,
    GetStoreOrderListByStatus(String),
    GetCustomer(String),
    GetCustomerById(CustomerId),
    UpdateCustomer(CustomerId),
    /// Keyed by the new customer's email.
    AddCustomer(String),
    /// Keyed by the username.
    AddCustomerUser(String),
    AddAddress(CustomerId),
    DeleteAddress(AddressId, CustomerId),
    GetAddressList(CustomerId),
}

/// Type-erased reply stored in the expectation queue.
#[derive(Debug)]
pub enum Reply {
    Order(Order),
    Orders(Vec<Order>),
    OrderItems(Vec<OrderItem>),
    Product(Product),
    Comments(Vec<OrderComment>),
    Customer(Option<Customer>),
    Addresses(Vec<Address>),
    Status(ResponseStatus),
}

/// Conversion between a concrete reply type and [`Reply`].
pub trait MockReply: Sized {
    fn into_reply(self) -> Reply;
    fn from_reply(reply: Reply) -> Option<Self>;
}

macro_rules! mock_reply {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl MockReply for $ty {
                fn into_reply(self) -> Reply {
                    Reply::$variant(self)
                }

                fn from_reply(reply: Reply) -> Option<Self> {
                    match reply {
                        Reply::$variant(value) => Some(value),
                        _ => None,
                    }
                }
            }
        )*
    };
}

mock_reply! {
    Order => Order,
    Vec<Order> => Orders,
    Vec<OrderItem> => OrderItems,
    Product => Product,
    Vec<OrderComment> => Comments,
    Option<Customer> => Customer,
    Vec<Address> => Addresses,
    ResponseStatus => Status,
}

struct Expectation {
    response: Result<Reply, StoreApiError>,
    delay: Option<Duration>,
}

type Expectations = Arc<Mutex<HashMap<StoreCall, VecDeque<Expectation>>>>;

/// The record sent by a mutating call.
#[derive(Debug, Clone, PartialEq)]
pub enum Posted {
    Order(Order),
    Comment(OrderComment),
    Customer(Customer),
    User(User),
    Address(Address),
}

/// In-memory [`StoreApi`] driven by queued expectations.
#[derive(Default)]
pub struct MockStoreApi {
    expectations: Expectations,
    calls: Arc<Mutex<Vec<StoreCall>>>,
    completed: Arc<Mutex<Vec<StoreCall>>>,
    posted: Arc<Mutex<Vec<Posted>>>,
}

impl MockStoreApi {
    /// Creates a mock with no expectations.
    pub fn new() -> Self {
        Self::default()
    }

    fn builder<T: MockReply>(&self, call: StoreCall) -> ExpectationBuilder<T> {
        ExpectationBuilder {
            call,
            delay: None,
            expectations: self.expectations.clone(),
            _reply: PhantomData,
        }
    }

    /// Every call received so far, in arrival order.
    pub fn calls(&self) -> Vec<StoreCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that have finished (after any configured delay), in completion order.
    pub fn completed(&self) -> Vec<StoreCall> {
        self.completed.lock().unwrap().clone()
    }

    /// Records sent by mutating calls, in arrival order.
    pub fn posted(&self) -> Vec<Posted> {
        self.posted.lock().unwrap().clone()
    }

    fn post(&self, record: Posted) {
        self.posted.lock().unwrap().push(record);
    }

    /// Number of times `call` was received.
    pub fn call_count(&self, call: &StoreCall) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| *c == call).count()
    }

    /// Verifies that every queued expectation was consumed.
    pub fn verify(&self) {
        let exps = self.expectations.lock().unwrap();
        let remaining: Vec<&StoreCall> = exps
            .iter()
            .filter(|(_, queue)| !queue.is_empty())
            .map(|(call, _)| call)
            .collect();
        if !remaining.is_empty() {
            panic!("Not all expectations were met. Remaining: {:?}", remaining);
        }
    }

    async fn respond<T: MockReply>(&self, call: StoreCall) -> Result<T, StoreApiError> {
        debug!(?call, "Mock store call");
        self.calls.lock().unwrap().push(call.clone());

        let expectation = self
            .expectations
            .lock()
            .unwrap()
            .get_mut(&call)
            .and_then(VecDeque::pop_front);
        let Some(expectation) = expectation else {
            panic!("Unexpected store call: {:?}", call);
        };

        if let Some(delay) = expectation.delay {
            tokio::time::sleep(delay).await;
        }
        self.completed.lock().unwrap().push(call.clone());

        match expectation.response {
            Ok(reply) => Ok(T::from_reply(reply)
                .unwrap_or_else(|| panic!("Expectation for {:?} holds the wrong reply type", call))),
            Err(e) => Err(e),
        }
    }
}

/// Builder returned by the `expect_*` methods.
pub struct ExpectationBuilder<T: MockReply> {
    call: StoreCall,
    delay: Option<Duration>,
    expectations: Expectations,
    _reply: PhantomData<fn() -> T>,
}

impl<T: MockReply> ExpectationBuilder<T> {
    /// Sleeps for `delay` before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Answers with `value`.
    pub fn return_ok(self, value: T) {
        self.push(Ok(value.into_reply()));
    }

    /// Answers with `error`.
    pub fn return_err(self, error: StoreApiError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<Reply, StoreApiError>) {
        let mut exps = self.expectations.lock().unwrap();
        exps.entry(self.call).or_default().push_back(Expectation {
            response,
            delay: self.delay,
        });
    }
}

macro_rules! expectations {
    ($($name:ident($($arg:ident: $ty:ty),*) -> $reply:ty => $call:expr;)*) => {
        paste::paste! {
            impl MockStoreApi {
                $(
                    #[doc = concat!("Expects a `", stringify!($name), "` call.")]
                    pub fn [<expect_ $name>](&self, $($arg: $ty),*) -> ExpectationBuilder<$reply> {
                        self.builder($call)
                    }
                )*
            }
        }
    };
}

expectations! {
    get_order(id: OrderId) -> Order => StoreCall::GetOrder(id);
    get_order_item_list(order_id: OrderId) -> Vec<OrderItem> => StoreCall::GetOrderItemList(order_id);
    get_product_by_id(id: ProductId) -> Product => StoreCall::GetProductById(id);
    get_order_comment_list(order_id: OrderId) -> Vec<OrderComment> => StoreCall::GetOrderCommentList(order_id);
    update_order(id: OrderId) -> ResponseStatus => StoreCall::UpdateOrder(id);
    add_order_comments(order_id: OrderId) -> ResponseStatus => StoreCall::AddOrderComments(order_id);
    get_store_order_list() -> Vec<Order> => StoreCall::GetStoreOrderList;
    get_store_order_list_by_status(status: &str) -> Vec<Order> => StoreCall::GetStoreOrderListByStatus(status.to_string());
    get_customer(email: &str) -> Option<Customer> => StoreCall::GetCustomer(email.to_string());
    get_customer_by_id(id: CustomerId) -> Option<Customer> => StoreCall::GetCustomerById(id);
    update_customer(id: CustomerId) -> ResponseStatus => StoreCall::UpdateCustomer(id);
    add_customer(email: &str) -> ResponseStatus => StoreCall::AddCustomer(email.to_string());
    add_customer_user(username: &str) -> ResponseStatus => StoreCall::AddCustomerUser(username.to_string());
    add_address(customer_id: CustomerId) -> ResponseStatus => StoreCall::AddAddress(customer_id);
    delete_address(id: AddressId, customer_id: CustomerId) -> ResponseStatus => StoreCall::DeleteAddress(id, customer_id);
    get_address_list(customer_id: CustomerId) -> Vec<Address> => StoreCall::GetAddressList(customer_id);
}

#[async_trait]
impl StoreApi for MockStoreApi {
    async fn get_order(&self, id: OrderId, _headers: &Headers) -> Result<Order, StoreApiError> {
        self.respond(StoreCall::GetOrder(id)).await
    }

    async fn get_order_item_list(
        &self,
        order_id: OrderId,
        _headers: &Headers,
    ) -> Result<Vec<OrderItem>, StoreApiError> {
        self.respond(StoreCall::GetOrderItemList(order_id)).await
    }

    async fn get_product_by_id(
        &self,
        id: ProductId,
        _headers: &Headers,
    ) -> Result<Product, StoreApiError> {
        self.respond(StoreCall::GetProductById(id)).await
    }

    async fn get_order_comment_list(
        &self,
        order_id: OrderId,
        _headers: &Headers,
    ) -> Result<Vec<OrderComment>, StoreApiError> {
        self.respond(StoreCall::GetOrderCommentList(order_id)).await
    }

    async fn update_order(
        &self,
        order: &Order,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::Order(order.clone()));
        self.respond(StoreCall::UpdateOrder(order.id)).await
    }

    async fn add_order_comments(
        &self,
        comment: &OrderComment,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::Comment(comment.clone()));
        self.respond(StoreCall::AddOrderComments(comment.order_id))
            .await
    }

    async fn get_store_order_list(&self, _headers: &Headers) -> Result<Vec<Order>, StoreApiError> {
        self.respond(StoreCall::GetStoreOrderList).await
    }

    async fn get_store_order_list_by_status(
        &self,
        status: &str,
        _headers: &Headers,
    ) -> Result<Vec<Order>, StoreApiError> {
        self.respond(StoreCall::GetStoreOrderListByStatus(status.to_string()))
            .await
    }

    async fn get_customer(
        &self,
        email: &str,
        _headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError> {
        self.respond(StoreCall::GetCustomer(email.to_string())).await
    }

    async fn get_customer_by_id(
        &self,
        id: CustomerId,
        _headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError> {
        self.respond(StoreCall::GetCustomerById(id)).await
    }

    async fn update_customer(
        &self,
        customer: &Customer,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::Customer(customer.clone()));
        self.respond(StoreCall::UpdateCustomer(customer.id)).await
    }

    async fn add_customer(
        &self,
        customer: &Customer,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::Customer(customer.clone()));
        self.respond(StoreCall::AddCustomer(customer.email.clone()))
            .await
    }

    async fn add_customer_user(
        &self,
        user: &User,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::User(user.clone()));
        self.respond(StoreCall::AddCustomerUser(user.username.clone()))
            .await
    }

    async fn add_address(
        &self,
        address: &Address,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.post(Posted::Address(address.clone()));
        self.respond(StoreCall::AddAddress(address.customer_id)).await
    }

    async fn delete_address(
        &self,
        id: AddressId,
        customer_id: CustomerId,
        _headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.respond(StoreCall::DeleteAddress(id, customer_id)).await
    }

    async fn get_address_list(
        &self,
        customer_id: CustomerId,
        _headers: &Headers,
    ) -> Result<Vec<Address>, StoreApiError> {
        self.respond(StoreCall::GetAddressList(customer_id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_keyed_expectations_answer_out_of_order() {
        let mock = MockStoreApi::new();
        for (id, sku) in [(1, "A"), (2, "B")] {
            mock.expect_get_product_by_id(ProductId(id)).return_ok(Product {
                id: ProductId(id),
                sku: sku.to_string(),
                ..Default::default()
            });
        }

        let headers = Headers::new();
        let second = mock.get_product_by_id(ProductId(2), &headers).await.unwrap();
        let first = mock.get_product_by_id(ProductId(1), &headers).await.unwrap();

        assert_eq!(second.sku, "B");
        assert_eq!(first.sku, "A");
        assert_eq!(
            mock.calls(),
            vec![
                StoreCall::GetProductById(ProductId(2)),
                StoreCall::GetProductById(ProductId(1))
            ]
        );
        mock.verify();
    }

    #[tokio::test]
    async fn test_return_err_is_propagated() {
        let mock = MockStoreApi::new();
        mock.expect_get_order(OrderId(3))
            .return_err(StoreApiError::Timeout);

        let result = mock.get_order(OrderId(3), &Headers::new()).await;
        assert!(matches!(result, Err(StoreApiError::Timeout)));
    }

    #[tokio::test]
    async fn test_delay_is_applied_before_completion() {
        let mock = MockStoreApi::new();
        mock.expect_get_store_order_list()
            .with_delay(Duration::from_millis(50))
            .return_ok(vec![]);

        let started = std::time::Instant::now();
        mock.get_store_order_list(&Headers::new()).await.unwrap();

        assert!(started.elapsed() >= Duration::from_millis(50));
        assert_eq!(mock.completed(), vec![StoreCall::GetStoreOrderList]);
    }

    #[tokio::test]
    async fn test_mutation_records_are_kept() {
        let mock = MockStoreApi::new();
        mock.expect_add_address(CustomerId(9))
            .return_ok(ResponseStatus::ok(5));

        let address = Address {
            customer_id: CustomerId(9),
            city: "Macon".to_string(),
            ..Default::default()
        };
        mock.add_address(&address, &Headers::new()).await.unwrap();

        assert_eq!(mock.posted(), vec![Posted::Address(address)]);
    }

    #[test]
    #[should_panic(expected = "Not all expectations were met")]
    fn test_verify_panics_on_unused_expectation() {
        let mock = MockStoreApi::new();
        mock.expect_get_customer("nobody@example.com").return_ok(None);
        mock.verify();
    }

    #[tokio::test]
    #[should_panic(expected = "Unexpected store call")]
    async fn test_unexpected_call_panics() {
        let mock = MockStoreApi::new();
        let _ = mock.get_order(OrderId(1), &Headers::new()).await;
    }
}
