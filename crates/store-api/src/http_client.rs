//! # HTTP Store Client
//!
//! [`HttpStoreApi`] implements [`StoreApi`] over the store's JSON REST API
//! using `reqwest`. Reads decode the JSON body or fail with
//! [`StoreApiError`]; mutations always try to decode the store's
//! [`ResponseStatus`] so that a rejected update surfaces as `success == false`
//! rather than as a transport error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::api::StoreApi;
use crate::error::StoreApiError;
use crate::model::{
    Address, AddressId, Customer, CustomerId, Headers, Order, OrderComment, OrderId, OrderItem,
    Product, ProductId, ResponseStatus, User,
};

/// HTTP client configuration.
#[derive(Debug, Clone)]
pub struct StoreApiConfig {
    /// Base URL of the store API, e.g. `http://localhost:3002`.
    pub base_url: String,

    /// Per-request deadline. `None` waits for as long as the store takes.
    pub request_timeout: Option<Duration>,
}

impl Default for StoreApiConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002".to_string(),
            request_timeout: None,
        }
    }
}

impl StoreApiConfig {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

/// `reqwest`-backed [`StoreApi`].
#[derive(Debug, Clone)]
pub struct HttpStoreApi {
    client: Client,
    base_url: Url,
}

impl HttpStoreApi {
    pub fn new(config: StoreApiConfig) -> Result<Self, StoreApiError> {
        if config.base_url.is_empty() {
            return Err(StoreApiError::Config("base url not configured".to_string()));
        }
        let base_url =
            Url::parse(&config.base_url).map_err(|e| StoreApiError::Config(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreApiError::Config(format!(
                "{} cannot be used as a base url",
                config.base_url
            )));
        }

        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| StoreApiError::Config(e.to_string()))?;

        Ok(Self { client, base_url })
    }

    /// Appends path segments to the base url, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url, StoreApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| StoreApiError::Config("base url cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, url: Url, headers: &Headers) -> RequestBuilder {
        headers
            .iter()
            .fold(self.client.request(method, url), |req, (key, value)| {
                req.header(key, value)
            })
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        headers: &Headers,
    ) -> Result<T, StoreApiError> {
        self.fetch_optional(segments, headers)
            .await?
            .ok_or_else(|| StoreApiError::Status {
                status: StatusCode::NOT_FOUND.as_u16(),
                path: segments.join("/"),
            })
    }

    /// Like [`fetch`](Self::fetch) but maps `404 Not Found` to `None`.
    async fn fetch_optional<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        headers: &Headers,
    ) -> Result<Option<T>, StoreApiError> {
        let url = self.url(segments)?;
        debug!(path = url.path(), "Sending request");
        let response = self.request(Method::GET, url.clone(), headers).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !status.is_success() {
            warn!(path = url.path(), status = status.as_u16(), "Store read failed");
            return Err(StoreApiError::Status {
                status: status.as_u16(),
                path: url.path().to_string(),
            });
        }
        Ok(Some(response.json::<T>().await?))
    }

    async fn submit<B: Serialize + ?Sized>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        let url = self.url(segments)?;
        debug!(%method, path = url.path(), "Sending request");
        let mut request = self.request(method, url.clone(), headers);
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<ResponseStatus>().await?);
        }

        warn!(path = url.path(), status = status.as_u16(), "Store mutation rejected");
        let code = i64::from(status.as_u16());
        Ok(response
            .json::<ResponseStatus>()
            .await
            .unwrap_or_else(|_| ResponseStatus::failed(code)))
    }
}

#[async_trait]
impl StoreApi for HttpStoreApi {
    #[instrument(skip(self, headers))]
    async fn get_order(&self, id: OrderId, headers: &Headers) -> Result<Order, StoreApiError> {
        self.fetch(&["rs", "order", "get", "id", &id.0.to_string()], headers)
            .await
    }

    #[instrument(skip(self, headers))]
    async fn get_order_item_list(
        &self,
        order_id: OrderId,
        headers: &Headers,
    ) -> Result<Vec<OrderItem>, StoreApiError> {
        self.fetch(
            &["rs", "orderItem", "get", "list", &order_id.0.to_string()],
            headers,
        )
        .await
    }

    #[instrument(skip(self, headers))]
    async fn get_product_by_id(
        &self,
        id: ProductId,
        headers: &Headers,
    ) -> Result<Product, StoreApiError> {
        self.fetch(&["rs", "product", "get", "id", &id.0.to_string()], headers)
            .await
    }

    #[instrument(skip(self, headers))]
    async fn get_order_comment_list(
        &self,
        order_id: OrderId,
        headers: &Headers,
    ) -> Result<Vec<OrderComment>, StoreApiError> {
        self.fetch(
            &["rs", "orderComment", "get", "list", &order_id.0.to_string()],
            headers,
        )
        .await
    }

    #[instrument(skip(self, order, headers), fields(order_id = %order.id))]
    async fn update_order(
        &self,
        order: &Order,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(Method::PUT, &["rs", "order", "update"], Some(order), headers)
            .await
    }

    #[instrument(skip(self, comment, headers), fields(order_id = %comment.order_id))]
    async fn add_order_comments(
        &self,
        comment: &OrderComment,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(
            Method::POST,
            &["rs", "orderComment", "add"],
            Some(comment),
            headers,
        )
        .await
    }

    #[instrument(skip(self, headers))]
    async fn get_store_order_list(&self, headers: &Headers) -> Result<Vec<Order>, StoreApiError> {
        self.fetch(&["rs", "order", "get", "store", "list"], headers)
            .await
    }

    #[instrument(skip(self, headers))]
    async fn get_store_order_list_by_status(
        &self,
        status: &str,
        headers: &Headers,
    ) -> Result<Vec<Order>, StoreApiError> {
        self.fetch(
            &["rs", "order", "get", "store", "list", "status", status],
            headers,
        )
        .await
    }

    #[instrument(skip(self, headers))]
    async fn get_customer(
        &self,
        email: &str,
        headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError> {
        let customer: Option<Customer> = self
            .fetch_optional(&["rs", "customer", "get", "email", email], headers)
            .await?;
        Ok(customer.filter(|c| !c.id.is_zero()))
    }

    #[instrument(skip(self, headers))]
    async fn get_customer_by_id(
        &self,
        id: CustomerId,
        headers: &Headers,
    ) -> Result<Option<Customer>, StoreApiError> {
        let customer: Option<Customer> = self
            .fetch_optional(&["rs", "customer", "get", "id", &id.0.to_string()], headers)
            .await?;
        Ok(customer.filter(|c| !c.id.is_zero()))
    }

    #[instrument(skip(self, customer, headers), fields(customer_id = %customer.id))]
    async fn update_customer(
        &self,
        customer: &Customer,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(
            Method::PUT,
            &["rs", "customer", "update"],
            Some(customer),
            headers,
        )
        .await
    }

    #[instrument(skip(self, customer, headers))]
    async fn add_customer(
        &self,
        customer: &Customer,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(
            Method::POST,
            &["rs", "customer", "add"],
            Some(customer),
            headers,
        )
        .await
    }

    #[instrument(skip(self, user, headers), fields(username = %user.username))]
    async fn add_customer_user(
        &self,
        user: &User,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(
            Method::POST,
            &["rs", "customer", "user", "add"],
            Some(user),
            headers,
        )
        .await
    }

    #[instrument(skip(self, address, headers), fields(customer_id = %address.customer_id))]
    async fn add_address(
        &self,
        address: &Address,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit(Method::POST, &["rs", "address", "add"], Some(address), headers)
            .await
    }

    #[instrument(skip(self, headers))]
    async fn delete_address(
        &self,
        id: AddressId,
        customer_id: CustomerId,
        headers: &Headers,
    ) -> Result<ResponseStatus, StoreApiError> {
        self.submit::<()>(
            Method::DELETE,
            &[
                "rs",
                "address",
                "delete",
                &id.0.to_string(),
                &customer_id.0.to_string(),
            ],
            None,
            headers,
        )
        .await
    }

    #[instrument(skip(self, headers))]
    async fn get_address_list(
        &self,
        customer_id: CustomerId,
        headers: &Headers,
    ) -> Result<Vec<Address>, StoreApiError> {
        self.fetch(
            &["rs", "address", "get", "list", &customer_id.0.to_string()],
            headers,
        )
        .await
    }
}
