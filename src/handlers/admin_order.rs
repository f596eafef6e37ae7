//! Store-admin order pages: edit one order, save it, list orders.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use store_api::model::{CustomerId, Order, OrderComment, OrderId, ResponseStatus};
use tracing::{debug, warn};

use crate::error::WebError;
use crate::forms::{parse_int_or_zero, FormValues};
use crate::handlers::{AppState, PageQuery};
use crate::pages::OrderPage;
use crate::render::render_page;
use crate::routes::{self, templates};
use crate::session::UserSession;

/// `GET /admin/editOrder/{id}`
pub async fn store_admin_edit_order_page(
    State(state): State<AppState>,
    user: UserSession,
    Path(id): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    if !user.is_store_admin_logged_in() {
        return Ok(user.respond(routes::found(routes::ADMIN_LOGIN)));
    }

    let order_id = OrderId(parse_int_or_zero(&id));
    debug!(order_id = order_id.0, "Order id in edit");
    let headers = user.headers(&state.config.store_api);

    let mut page = state.order_detail.build(order_id, &headers).await;
    page.error = query.error;

    let html = render_page(state.renderer.as_ref(), templates::ADMIN_EDIT_ORDER, &page)?;
    Ok(user.respond(html))
}

/// `POST /admin/updateOrder`
pub async fn store_admin_edit_order(
    State(state): State<AppState>,
    user: UserSession,
    form: FormValues,
) -> Result<Response, WebError> {
    if !user.is_store_admin_logged_in() {
        return Ok(user.respond(routes::found(routes::ADMIN_LOGIN)));
    }

    let order = order_from_form(&form);
    let comment = comment_from_form(&form);
    let headers = user.headers(&state.config.store_api);

    let status = state
        .api
        .update_order(&order, &headers)
        .await
        .unwrap_or_else(|e| {
            warn!(order_id = order.id.0, error = %e, "Order update failed");
            ResponseStatus::default()
        });

    if let Some(comment) = comment {
        match state.api.add_order_comments(&comment, &headers).await {
            Ok(res) => debug!(success = res.success, code = res.code, "Order comment add response"),
            Err(e) => warn!(order_id = order.id.0, error = %e, "Order comment add failed"),
        }
    }
    debug!(success = status.success, code = status.code, "Order update response");

    let target = if status.success {
        routes::ADMIN_ORDER_LIST_VIEW
    } else {
        routes::ADMIN_ORDER_LIST_VIEW_FAIL
    };
    Ok(user.respond(routes::found(target)))
}

/// `GET /admin/orderList` and `GET /admin/orderList/{status}`
pub async fn store_admin_view_order_list(
    State(state): State<AppState>,
    user: UserSession,
    status: Option<Path<String>>,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    if !user.is_store_admin_logged_in() {
        return Ok(user.respond(routes::found(routes::ADMIN_LOGIN)));
    }

    let status = status.map(|Path(status)| status).unwrap_or_default();
    let headers = user.headers(&state.config.store_api);

    let orders = if status.is_empty() {
        state.api.get_store_order_list(&headers).await
    } else {
        state.api.get_store_order_list_by_status(&status, &headers).await
    };
    let orders = orders.unwrap_or_else(|e| {
        warn!(%status, error = %e, "Order list fetch failed");
        Vec::new()
    });
    debug!(count = orders.len(), %status, "Orders in list");

    let page = OrderPage {
        error: query.error,
        orders,
        status,
        ..OrderPage::with_status_list()
    };
    let html = render_page(state.renderer.as_ref(), templates::ADMIN_ORDER_LIST, &page)?;
    Ok(user.respond(html))
}

/// Order record posted by the edit-order form.
///
/// The form posts the shipping method's name as `billingMethodName`.
pub fn order_from_form(form: &FormValues) -> Order {
    Order {
        id: OrderId(form.int("id")),
        status: form.text("status"),
        subtotal: form.float("subTotal"),
        shipping_handling: form.float("shippingHandling"),
        insurance: form.float("insurance"),
        taxes: form.float("taxes"),
        total: form.float("total"),
        refunded: form.float("refunded"),
        order_number: form.text("orderNumber"),
        order_type: form.text("orderType"),
        pickup: form.flag("pickup"),
        username: form.text("username"),
        customer_name: form.text("customerName"),
        customer_id: CustomerId(form.int("customerId")),
        billing_address: form.text("billingAddress"),
        billing_address_id: form.int("billingAddressId"),
        shipping_address: form.text("shippingAddress"),
        shipping_address_id: form.int("shippingAddressId"),
        shipping_method_id: form.int("shippingMethodId"),
        shipping_method_name: form.text("billingMethodName"),
        store_id: form.int("storeId"),
        ..Order::default()
    }
}

/// The note typed into the edit-order form, if any.
pub fn comment_from_form(form: &FormValues) -> Option<OrderComment> {
    let comment = form.text("newComment");
    if comment.is_empty() {
        return None;
    }
    Some(OrderComment {
        order_id: OrderId(form.int("id")),
        username: form.text("usernameForNotes"),
        comment,
        ..OrderComment::default()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_form_mapping() {
        let form = FormValues::from_pairs([
            ("id", "42"),
            ("status", "Shipped"),
            ("subTotal", "10.50"),
            ("total", "oops"),
            ("pickup", "true"),
            ("customerId", "9"),
            ("billingMethodName", "UPS Ground"),
            ("shippingMethodId", "3"),
        ]);

        let order = order_from_form(&form);
        assert_eq!(order.id, OrderId(42));
        assert_eq!(order.status, "Shipped");
        assert_eq!(order.subtotal, 10.5);
        assert_eq!(order.total, 0.0);
        assert!(order.pickup);
        assert_eq!(order.customer_id, CustomerId(9));
        assert_eq!(order.shipping_method_name, "UPS Ground");
        assert_eq!(order.shipping_method_id, 3);
    }

    #[test]
    fn test_comment_only_when_text_present() {
        let empty = FormValues::from_pairs([("id", "42"), ("newComment", "")]);
        assert!(comment_from_form(&empty).is_none());

        let form = FormValues::from_pairs([
            ("id", "42"),
            ("newComment", "refund issued"),
            ("usernameForNotes", "admin"),
        ]);
        let comment = comment_from_form(&form).unwrap();
        assert_eq!(comment.order_id, OrderId(42));
        assert_eq!(comment.username, "admin");
        assert_eq!(comment.comment, "refund issued");
    }
}
