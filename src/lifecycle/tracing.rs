//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global `tracing` subscriber once at start-up.
//!
//! ## Configuration
//!
//! Levels come from `RUST_LOG`. The format is compact and hides module paths
//! (`with_target(false)`); structured fields (`order_id`, `product_id`,
//! `status`) carry the context instead.
//!
//! ```bash
//! RUST_LOG=info cargo run                         # request summaries
//! RUST_LOG=debug cargo run                        # every store call and session request
//! RUST_LOG=storefront_admin::order_detail=debug cargo run
//! ```
//!
//! ## What Gets Traced
//!
//! - **HTTP requests**: one span per request from `tower_http::trace::TraceLayer`.
//! - **Store calls**: `HttpStoreApi` methods are instrumented and log the path.
//! - **Edit-order page**: each fan-out unit logs its outcome; failed units log
//!   at `warn` with the error, so a page with blank sections can be explained.
//! - **Sessions**: create / load / save / destroy, with the store size.
//!
//! With `RUST_LOG=debug` an edit-order request looks like:
//!
//! ```text
//! DEBUG request{method=GET uri=/admin/editOrder/42}: Session resolved id=... new=false
//! DEBUG request{...}:build{order_id=42}: Fetched order items count=3
//! WARN  request{...}:build{order_id=42}: Product fetch failed product_id=3 error=Store API call timed out
//! DEBUG request{...}:build{order_id=42}: Order page assembled items=3 notes=1
//! ```

pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
