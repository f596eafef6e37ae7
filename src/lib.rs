//! # Storefront Admin
//!
//! The web layer of the storefront: store-admin order management and
//! customer self-service account pages, served with `axum` on top of a
//! remote store API ([`store_api`]) and an actor-owned session store
//! ([`session_actor`]).
//!
//! ## 🚀 Core Components
//!
//! - **[handlers]**: The HTTP handlers and the [`router`](handlers::router).
//! - **[order_detail]**: The edit-order page's fan-out/fan-in aggregator.
//! - **[account_manager]**: Customer sign-up (customer, addresses, user).
//! - **[session]**: Per-request session extraction, login checks and store
//!   headers.
//! - **[forms]**: Permissive form-field parsing.
//! - **[pages]** / **[render]**: View models and the page renderer seam.
//! - **[lifecycle]**: Wiring, startup and shutdown of the running system.
//!
//! ## 📚 Request Flow
//!
//! ```text
//! request ─▶ UserSession (cookie → session actor)
//!         ─▶ login check ─▶ redirect to login
//!         ─▶ store calls (Arc<dyn StoreApi>)
//!         ─▶ render page │ redirect
//! ```
//!
//! ## 🧪 Testing
//!
//! [`StorefrontSystem::with_parts`](lifecycle::StorefrontSystem::with_parts)
//! runs the real router against
//! [`MockStoreApi`](store_api::mock::MockStoreApi) and a
//! [`RecordingRenderer`](render::RecordingRenderer).

pub mod account_manager;
pub mod config;
pub mod error;
pub mod forms;
pub mod handlers;
pub mod lifecycle;
pub mod order_detail;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;

pub use config::AppConfig;
pub use error::WebError;
pub use handlers::{router, AppState};
pub use lifecycle::{setup_tracing, StorefrontSystem};
