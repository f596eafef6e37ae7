//! # Order Detail Aggregator
//!
//! Builds the admin edit-order page for one order id from several remote
//! fetches:
//!
//! 1. The order's line items are fetched first; their count `N` sizes the
//!    rest of the work.
//! 2. Then, concurrently: the order header, the order's comments, and one
//!    enrichment task per line item that fetches the item's live product and
//!    sends the combined [`OrderItemView`] into a channel of capacity
//!    `max(N, 1)`.
//! 3. Every task is awaited (a barrier) before the channel is drained, so the
//!    page holds exactly one view per fetched line item.
//!
//! ## Failures
//!
//! No fetch failure escapes [`OrderDetailAggregator::build`]. A failed unit is
//! logged and contributes its zero value: no order header, no comments, an
//! empty item list, or an item view whose product fields are empty. With a
//! configured `fetch_timeout`, a fetch that overruns it counts as failed.
//!
//! ## Ordering
//!
//! Views arrive in completion order. Callers must not rely on the item list
//! matching the stored line order.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use store_api::model::{Headers, Order, OrderComment, OrderId, OrderItem, Product};
use store_api::{StoreApi, StoreApiError};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, instrument, warn, Instrument, Span};

use crate::pages::{OrderItemView, OrderPage};

#[derive(Debug, Clone)]
pub struct OrderDetailConfig {
    /// Username pre-filled for notes added from the page.
    pub notes_username: String,
    /// Deadline per remote fetch; `None` waits indefinitely.
    pub fetch_timeout: Option<Duration>,
}

impl Default for OrderDetailConfig {
    fn default() -> Self {
        Self {
            notes_username: "admin".to_string(),
            fetch_timeout: None,
        }
    }
}

pub struct OrderDetailAggregator {
    api: Arc<dyn StoreApi>,
    config: OrderDetailConfig,
}

impl OrderDetailAggregator {
    pub fn new(api: Arc<dyn StoreApi>, config: OrderDetailConfig) -> Self {
        Self { api, config }
    }

    pub fn config(&self) -> &OrderDetailConfig {
        &self.config
    }

    /// Assembles the edit-order page for `order_id`.
    ///
    /// The page's `error` is left empty for the caller to fill.
    #[instrument(skip(self, headers), fields(order_id = order_id.0))]
    pub async fn build(&self, order_id: OrderId, headers: &Headers) -> OrderPage {
        let headers = Arc::new(headers.clone());
        let deadline = self.config.fetch_timeout;

        let items = match with_deadline(
            deadline,
            self.api.get_order_item_list(order_id, &headers),
        )
        .await
        {
            Ok(items) => items,
            Err(e) => {
                warn!(error = %e, "Order item list fetch failed");
                Vec::new()
            }
        };
        debug!(count = items.len(), "Fetched order items");

        let (sender, mut receiver) = mpsc::channel(items.len().max(1));

        let order_task = tokio::spawn(
            fetch_order(self.api.clone(), order_id, headers.clone(), deadline)
                .instrument(Span::current()),
        );

        let enrichment: Vec<JoinHandle<()>> = items
            .into_iter()
            .map(|item| {
                tokio::spawn(
                    enrich_item(
                        self.api.clone(),
                        item,
                        headers.clone(),
                        deadline,
                        sender.clone(),
                    )
                    .instrument(Span::current()),
                )
            })
            .collect();

        let notes_task = tokio::spawn(
            fetch_comments(self.api.clone(), order_id, headers.clone(), deadline)
                .instrument(Span::current()),
        );
        drop(sender);

        let order = order_task.await.unwrap_or_else(|e| {
            warn!(error = %e, "Order header task failed");
            None
        });
        for handle in enrichment {
            if let Err(e) = handle.await {
                warn!(error = %e, "Enrichment task failed");
            }
        }
        let notes = notes_task.await.unwrap_or_else(|e| {
            warn!(error = %e, "Comment task failed");
            Vec::new()
        });

        let mut order_item_list = Vec::new();
        while let Some(view) = receiver.recv().await {
            order_item_list.push(view);
        }
        debug!(items = order_item_list.len(), notes = notes.len(), "Order page assembled");

        OrderPage {
            order,
            notes,
            order_item_list,
            user_name_for_notes: self.config.notes_username.clone(),
            ..OrderPage::with_status_list()
        }
    }
}

async fn fetch_order(
    api: Arc<dyn StoreApi>,
    order_id: OrderId,
    headers: Arc<Headers>,
    deadline: Option<Duration>,
) -> Option<Order> {
    match with_deadline(deadline, api.get_order(order_id, &headers)).await {
        Ok(order) => Some(order),
        Err(e) => {
            warn!(error = %e, "Order header fetch failed");
            None
        }
    }
}

async fn fetch_comments(
    api: Arc<dyn StoreApi>,
    order_id: OrderId,
    headers: Arc<Headers>,
    deadline: Option<Duration>,
) -> Vec<OrderComment> {
    match with_deadline(deadline, api.get_order_comment_list(order_id, &headers)).await {
        Ok(comments) => comments,
        Err(e) => {
            warn!(error = %e, "Order comment fetch failed");
            Vec::new()
        }
    }
}

async fn enrich_item(
    api: Arc<dyn StoreApi>,
    item: OrderItem,
    headers: Arc<Headers>,
    deadline: Option<Duration>,
    sender: mpsc::Sender<OrderItemView>,
) {
    let product_id = item.product_id;
    let product = match with_deadline(deadline, api.get_product_by_id(product_id, &headers)).await
    {
        Ok(product) => product,
        Err(e) => {
            warn!(product_id = product_id.0, error = %e, "Product fetch failed");
            Product::default()
        }
    };

    // Capacity covers every item, so this never waits.
    if sender.send(OrderItemView::enrich(item, &product)).await.is_err() {
        warn!(product_id = product_id.0, "Order page dropped before item arrived");
    }
}

async fn with_deadline<T>(
    deadline: Option<Duration>,
    call: impl Future<Output = Result<T, StoreApiError>>,
) -> Result<T, StoreApiError> {
    match deadline {
        Some(limit) => tokio::time::timeout(limit, call)
            .await
            .unwrap_or(Err(StoreApiError::Timeout)),
        None => call.await,
    }
}
