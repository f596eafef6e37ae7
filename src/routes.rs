//! Route paths, redirect targets and template names.
//!
//! Failure targets carry the message shown by the page in an `error` query
//! parameter.

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

pub const HEALTH: &str = "/health";

pub const ADMIN_LOGIN: &str = "/admin/login";
pub const ADMIN_EDIT_ORDER_PAGE: &str = "/admin/editOrder/:id";
pub const ADMIN_UPDATE_ORDER: &str = "/admin/updateOrder";
pub const ADMIN_ORDER_LIST_VIEW: &str = "/admin/orderList";
pub const ADMIN_ORDER_LIST_BY_STATUS: &str = "/admin/orderList/:status";
pub const ADMIN_ORDER_LIST_VIEW_FAIL: &str = "/admin/orderList?error=Update%20Failed";

pub const CUSTOMER_LOGIN_VIEW: &str = "/customerLoginPage";
pub const CUSTOMER_SHOPPING_CART_VIEW: &str = "/shoppingCartView";
pub const CREATE_CUSTOMER_PAGE: &str = "/createCustomerAccountPage";
pub const CREATE_CUSTOMER: &str = "/createCustomerAccount";
pub const CREATE_CUSTOMER_VIEW_FAIL: &str =
    "/createCustomerAccountPage?error=Customer%20Already%20Exists";
pub const CREATE_CUSTOMER_VIEW_ERROR: &str = "/createCustomerAccountPage?error=Add%20Failed";
pub const CUSTOMER_INFO_VIEW: &str = "/updateCustomerAccountPage";
pub const CUSTOMER_INFO_VIEW_FAIL: &str = "/updateCustomerAccountPage?error=Update%20Failed";
pub const UPDATE_CUSTOMER: &str = "/updateCustomerAccount";
pub const ADD_ADDRESS_PAGE: &str = "/addAddressPage";
pub const ADD_ADDRESS: &str = "/addAddress";
pub const DELETE_ADDRESS: &str = "/deleteAddress";

pub mod templates {
    pub const ADMIN_EDIT_ORDER: &str = "editOrder.html";
    pub const ADMIN_ORDER_LIST: &str = "orderList.html";
    pub const CUSTOMER_CREATE: &str = "createCustomerAccount.html";
    pub const CUSTOMER_UPDATE: &str = "updateCustomerAccount.html";
    pub const CUSTOMER_CREATE_ADDRESS: &str = "addAddress.html";

    pub const ALL: [&str; 5] = [
        ADMIN_EDIT_ORDER,
        ADMIN_ORDER_LIST,
        CUSTOMER_CREATE,
        CUSTOMER_UPDATE,
        CUSTOMER_CREATE_ADDRESS,
    ];
}

/// `302 Found` to `location`.
pub fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}
