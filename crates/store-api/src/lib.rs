//! # Store API
//!
//! Client side of the remote store API consumed by the storefront web layer.
//!
//! ## Layers
//!
//! 1. **Records** ([`model`]) - orders, items, products, customers, addresses
//!    and the [`ResponseStatus`](model::ResponseStatus) reported by mutations.
//! 2. **Seam** ([`StoreApi`]) - the async trait the web layer depends on.
//! 3. **Implementations** - [`HttpStoreApi`] for production and
//!    [`mock::MockStoreApi`] for tests.
//!
//! ## Error Handling
//!
//! Every call returns `Result<_, StoreApiError>`. The client itself never
//! retries and never substitutes defaults; whether a failed read becomes an
//! empty page section or a failed mutation becomes a "fail" redirect is the
//! caller's decision.
//!
//! ## Observability
//!
//! [`HttpStoreApi`] methods are `#[instrument]`ed and log the request path at
//! debug level, so `RUST_LOG=debug` shows every remote call nested under the
//! handler span that issued it.

pub mod api;
pub mod error;
pub mod http_client;
pub mod mock;
pub mod model;

pub use api::StoreApi;
pub use error::StoreApiError;
pub use http_client::{HttpStoreApi, StoreApiConfig};
