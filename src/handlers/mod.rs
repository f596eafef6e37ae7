//! # HTTP Handlers
//!
//! Every handler follows the same shape: resolve the [`UserSession`], check the
//! login predicate its area requires (redirecting to the matching login page
//! otherwise), read the request fields, call the store, then either render a
//! page or redirect.
//!
//! Store failures never surface as HTTP errors. Reads degrade to empty page
//! data and mutations to the area's failure redirect. Only session and render
//! failures end a request with `500` (see [`WebError`]).
//!
//! [`UserSession`]: crate::session::UserSession
//! [`WebError`]: crate::error::WebError

use std::sync::Arc;

use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use session_actor::SessionClient;
use store_api::StoreApi;
use tower_http::trace::TraceLayer;

use crate::config::AppConfig;
use crate::order_detail::OrderDetailAggregator;
use crate::render::PageRenderer;
use crate::routes;

pub mod admin_order;
pub mod customer_account;

/// State shared by every handler; cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub api: Arc<dyn StoreApi>,
    pub sessions: SessionClient,
    pub renderer: Arc<dyn PageRenderer>,
    pub order_detail: Arc<OrderDetailAggregator>,
}

impl AppState {
    pub fn new(
        config: &AppConfig,
        api: Arc<dyn StoreApi>,
        sessions: SessionClient,
        renderer: Arc<dyn PageRenderer>,
    ) -> Self {
        let order_detail = Arc::new(OrderDetailAggregator::new(
            api.clone(),
            config.order_detail_config(),
        ));
        Self {
            config: Arc::new(config.clone()),
            api,
            sessions,
            renderer,
            order_detail,
        }
    }
}

/// The `error` message a failure redirect hands to the next page.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PageQuery {
    pub error: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route(routes::HEALTH, get(health))
        .route(
            routes::ADMIN_EDIT_ORDER_PAGE,
            get(admin_order::store_admin_edit_order_page),
        )
        .route(
            routes::ADMIN_UPDATE_ORDER,
            post(admin_order::store_admin_edit_order),
        )
        .route(
            routes::ADMIN_ORDER_LIST_VIEW,
            get(admin_order::store_admin_view_order_list),
        )
        .route(
            routes::ADMIN_ORDER_LIST_BY_STATUS,
            get(admin_order::store_admin_view_order_list),
        )
        .route(
            routes::CREATE_CUSTOMER_PAGE,
            get(customer_account::create_customer_account_page),
        )
        .route(
            routes::CREATE_CUSTOMER,
            post(customer_account::create_customer_account),
        )
        .route(
            routes::CUSTOMER_INFO_VIEW,
            get(customer_account::update_customer_account_page),
        )
        .route(
            routes::UPDATE_CUSTOMER,
            post(customer_account::update_customer_account),
        )
        .route(
            routes::ADD_ADDRESS_PAGE,
            get(customer_account::customer_add_address_page),
        )
        .route(
            routes::ADD_ADDRESS,
            post(customer_account::customer_add_address),
        )
        .route(
            routes::DELETE_ADDRESS,
            get(customer_account::delete_customer_address)
                .post(customer_account::delete_customer_address),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health() -> StatusCode {
    StatusCode::OK
}
