use std::time::Duration;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, put};
use axum::{Json, Router};
use serde_json::json;
use store_api::model::{
    AddressId, CustomerId, Headers, Order, OrderId, ProductId, STORE_NAME,
};
use store_api::{HttpStoreApi, StoreApi, StoreApiConfig, StoreApiError};

/// Serves `router` on an ephemeral port and returns its base url.
async fn spawn_store(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

fn client(base_url: String) -> HttpStoreApi {
    HttpStoreApi::new(StoreApiConfig::default().with_base_url(base_url)).unwrap()
}

#[tokio::test]
async fn test_get_order_decodes_body_and_forwards_headers() {
    let router = Router::new().route(
        "/rs/order/get/id/:id",
        get(|Path(id): Path<i64>, headers: HeaderMap| async move {
            let store = headers
                .get("storeName")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            Json(json!({ "id": id, "status": "New", "total": 12.5, "orderNumber": store }))
        }),
    );
    let api = client(spawn_store(router).await);

    let headers = Headers::new().with(STORE_NAME, "acme");
    let order = api.get_order(OrderId(42), &headers).await.unwrap();

    assert_eq!(order.id, OrderId(42));
    assert_eq!(order.status, "New");
    assert_eq!(order.total, 12.5);
    assert_eq!(order.order_number, "acme");
}

#[tokio::test]
async fn test_missing_customer_is_none() {
    let router = Router::new().route(
        "/rs/customer/get/email/:email",
        get(|| async { StatusCode::NOT_FOUND }),
    );
    let api = client(spawn_store(router).await);

    let customer = api
        .get_customer("nobody@example.com", &Headers::new())
        .await
        .unwrap();
    assert!(customer.is_none());
}

#[tokio::test]
async fn test_zero_id_customer_is_none() {
    let router = Router::new().route(
        "/rs/customer/get/id/:id",
        get(|| async { Json(json!({ "id": 0 })) }),
    );
    let api = client(spawn_store(router).await);

    let customer = api
        .get_customer_by_id(CustomerId(3), &Headers::new())
        .await
        .unwrap();
    assert!(customer.is_none());
}

#[tokio::test]
async fn test_rejected_update_reports_unsuccessful_status() {
    let router = Router::new().route(
        "/rs/order/update",
        put(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "code": 400 })),
            )
        }),
    );
    let api = client(spawn_store(router).await);

    let order = Order {
        id: OrderId(1),
        ..Default::default()
    };
    let status = api.update_order(&order, &Headers::new()).await.unwrap();
    assert!(!status.success);
    assert_eq!(status.code, 400);
}

#[tokio::test]
async fn test_rejected_mutation_without_body_uses_status_code() {
    let router = Router::new().route(
        "/rs/address/delete/:id/:cid",
        delete(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let api = client(spawn_store(router).await);

    let status = api
        .delete_address(AddressId(5), CustomerId(9), &Headers::new())
        .await
        .unwrap();
    assert!(!status.success);
    assert_eq!(status.code, 500);
}

#[tokio::test]
async fn test_delete_address_hits_id_and_customer_path() {
    let router = Router::new().route(
        "/rs/address/delete/:id/:cid",
        delete(|Path((id, cid)): Path<(i64, i64)>| async move {
            Json(json!({ "success": id == 5 && cid == 9, "code": 200 }))
        }),
    );
    let api = client(spawn_store(router).await);

    let status = api
        .delete_address(AddressId(5), CustomerId(9), &Headers::new())
        .await
        .unwrap();
    assert!(status.success);
}

#[tokio::test]
async fn test_status_filter_is_path_encoded() {
    let router = Router::new().route(
        "/rs/order/get/store/list/status/:status",
        get(|Path(status): Path<String>| async move {
            Json(json!([{ "id": 1, "status": status }]))
        }),
    );
    let api = client(spawn_store(router).await);

    let orders = api
        .get_store_order_list_by_status("Not Paid", &Headers::new())
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
    assert_eq!(orders[0].status, "Not Paid");
}

#[tokio::test]
async fn test_server_error_on_read_is_status_error() {
    let router = Router::new().route(
        "/rs/product/get/id/:id",
        get(|| async { StatusCode::INTERNAL_SERVER_ERROR }),
    );
    let api = client(spawn_store(router).await);

    let result = api.get_product_by_id(ProductId(1), &Headers::new()).await;
    assert!(matches!(
        result,
        Err(StoreApiError::Status { status: 500, .. })
    ));
}

#[tokio::test]
async fn test_request_timeout_maps_to_timeout_error() {
    let router = Router::new().route(
        "/rs/order/get/store/list",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Json(json!([]))
        }),
    );
    let base_url = spawn_store(router).await;
    let api = HttpStoreApi::new(
        StoreApiConfig::default()
            .with_base_url(base_url)
            .with_request_timeout(Duration::from_millis(100)),
    )
    .unwrap();

    let result = api.get_store_order_list(&Headers::new()).await;
    assert!(matches!(result, Err(StoreApiError::Timeout)));
}
