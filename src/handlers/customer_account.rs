//! Customer account pages: sign-up, profile update and address book.

use axum::extract::{Query, State};
use axum::response::Response;
use store_api::model::{
    Address, AddressId, Customer, CustomerAccount, CustomerId, Headers, User,
    BILLING_ADDRESS_TYPE, CUSTOMER_ROLE, SHIPPING_ADDRESS_TYPE,
};
use store_api::StoreApi;
use tracing::{debug, info, warn};

use crate::account_manager::create_customer_account as create_account;
use crate::error::WebError;
use crate::forms::FormValues;
use crate::handlers::{AppState, PageQuery};
use crate::pages::CustomerPage;
use crate::render::render_page;
use crate::routes::{self, templates};
use crate::session::UserSession;

/// `GET /createCustomerAccountPage`
pub async fn create_customer_account_page(
    State(state): State<AppState>,
    user: UserSession,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    let page = CustomerPage {
        error: query.error,
        ..CustomerPage::default()
    };
    let html = render_page(state.renderer.as_ref(), templates::CUSTOMER_CREATE, &page)?;
    Ok(user.respond(html))
}

/// `POST /createCustomerAccount`
pub async fn create_customer_account(
    State(state): State<AppState>,
    mut user: UserSession,
    form: FormValues,
) -> Result<Response, WebError> {
    let headers = user.headers(&state.config.store_api);
    let email = form.text("email");

    if find_customer(state.api.as_ref(), &email, &headers)
        .await
        .is_some_and(|customer| !customer.id.is_zero())
    {
        debug!(%email, "Customer already exists");
        return Ok(user.respond(routes::found(routes::CREATE_CUSTOMER_VIEW_FAIL)));
    }

    let account = account_from_form(&form);
    match create_account(state.api.as_ref(), account, &headers).await {
        Ok(created) => {
            info!(customer_id = created.customer.id.0, "Customer account created");
            user.log_in_customer(&email, &form.text("password"), created.customer.id);
            if let Err(e) = user.save(&state.sessions).await {
                warn!(error = %e, "Session save failed after sign-up");
            }
            Ok(user.respond(routes::found(routes::CUSTOMER_SHOPPING_CART_VIEW)))
        }
        Err(e) => {
            warn!(%email, error = %e, "Customer account not created");
            Ok(user.respond(routes::found(routes::CREATE_CUSTOMER_VIEW_ERROR)))
        }
    }
}

/// `GET /updateCustomerAccountPage`
pub async fn update_customer_account_page(
    State(state): State<AppState>,
    user: UserSession,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    if !user.is_customer_logged_in() {
        return Ok(user.respond(routes::found(routes::CUSTOMER_LOGIN_VIEW)));
    }

    let headers = user.headers(&state.config.store_api);
    let customer = match state
        .api
        .get_customer_by_id(user.customer_id(), &headers)
        .await
    {
        Ok(customer) => customer,
        Err(e) => {
            warn!(customer_id = user.customer_id().0, error = %e, "Customer fetch failed");
            None
        }
    };

    let address_list = match &customer {
        Some(customer) => state
            .api
            .get_address_list(customer.id, &headers)
            .await
            .unwrap_or_else(|e| {
                warn!(customer_id = customer.id.0, error = %e, "Address list fetch failed");
                Vec::new()
            }),
        None => Vec::new(),
    };

    let page = CustomerPage {
        error: query.error,
        customer,
        address_list,
    };
    let html = render_page(state.renderer.as_ref(), templates::CUSTOMER_UPDATE, &page)?;
    Ok(user.respond(html))
}

/// `POST /updateCustomerAccount`
pub async fn update_customer_account(
    State(state): State<AppState>,
    user: UserSession,
    form: FormValues,
) -> Result<Response, WebError> {
    if !user.is_customer_logged_in() {
        return Ok(user.respond(routes::found(routes::CUSTOMER_LOGIN_VIEW)));
    }

    let headers = user.headers(&state.config.store_api);
    let mut success = false;
    if let Some(mut customer) = find_customer(state.api.as_ref(), &form.text("email"), &headers).await {
        customer.first_name = form.text("firstName");
        customer.last_name = form.text("lastName");
        customer.company = form.text("company");
        customer.city = form.text("city");
        customer.state = form.text("state");
        customer.zip = form.text("zip");
        customer.phone = form.text("phone");

        success = match state.api.update_customer(&customer, &headers).await {
            Ok(res) => res.success,
            Err(e) => {
                warn!(customer_id = customer.id.0, error = %e, "Customer update failed");
                false
            }
        };
    }

    Ok(user.respond(routes::found(customer_info_target(success))))
}

/// `GET /addAddressPage`
pub async fn customer_add_address_page(
    State(state): State<AppState>,
    user: UserSession,
    Query(query): Query<PageQuery>,
) -> Result<Response, WebError> {
    if !user.is_customer_logged_in() {
        return Ok(user.respond(routes::found(routes::CUSTOMER_LOGIN_VIEW)));
    }

    let headers = user.headers(&state.config.store_api);
    let page = CustomerPage {
        error: query.error,
        customer: find_customer(state.api.as_ref(), user.username(), &headers).await,
        ..CustomerPage::default()
    };
    let html = render_page(
        state.renderer.as_ref(),
        templates::CUSTOMER_CREATE_ADDRESS,
        &page,
    )?;
    Ok(user.respond(html))
}

/// `POST /addAddress`
///
/// The address is only added when `email` names the customer whose id was
/// posted as `cid`.
pub async fn customer_add_address(
    State(state): State<AppState>,
    user: UserSession,
    form: FormValues,
) -> Result<Response, WebError> {
    if !user.is_customer_logged_in() {
        return Ok(user.respond(routes::found(routes::CUSTOMER_LOGIN_VIEW)));
    }

    let headers = user.headers(&state.config.store_api);
    let cid = CustomerId(form.int("cid"));
    let mut success = false;

    match find_customer(state.api.as_ref(), &form.text("email"), &headers).await {
        Some(customer) if customer.id == cid => {
            let address = Address {
                customer_id: customer.id,
                address: form.text("address"),
                city: form.text("city"),
                state: form.text("state"),
                zip: form.text("zip"),
                country: form.text("country"),
                address_type: form.text("type"),
                ..Address::default()
            };
            success = match state.api.add_address(&address, &headers).await {
                Ok(res) => res.success,
                Err(e) => {
                    warn!(customer_id = cid.0, error = %e, "Address add failed");
                    false
                }
            };
        }
        Some(customer) => {
            warn!(posted = cid.0, actual = customer.id.0, "Address posted for another customer");
        }
        None => debug!(customer_id = cid.0, "No customer for address"),
    }

    Ok(user.respond(routes::found(customer_info_target(success))))
}

/// `GET|POST /deleteAddress`
pub async fn delete_customer_address(
    State(state): State<AppState>,
    user: UserSession,
    form: FormValues,
) -> Result<Response, WebError> {
    if !user.is_customer_logged_in() {
        return Ok(user.respond(routes::found(routes::CUSTOMER_LOGIN_VIEW)));
    }

    let headers = user.headers(&state.config.store_api);
    let id = AddressId(form.int("id"));
    let cid = CustomerId(form.int("cid"));

    let success = match state.api.delete_address(id, cid, &headers).await {
        Ok(res) => {
            debug!(success = res.success, code = res.code, "Address delete response");
            res.success
        }
        Err(e) => {
            warn!(address_id = id.0, customer_id = cid.0, error = %e, "Address delete failed");
            false
        }
    };

    Ok(user.respond(routes::found(customer_info_target(success))))
}

/// The account posted by the sign-up form.
///
/// A billing or shipping address is included only when its street, city,
/// state and zip are all filled in. The login user is the customer's email.
pub fn account_from_form(form: &FormValues) -> CustomerAccount {
    let email = form.text("email");
    let addresses = [("bill", BILLING_ADDRESS_TYPE), ("ship", SHIPPING_ADDRESS_TYPE)]
        .into_iter()
        .filter_map(|(prefix, address_type)| address_from_form(form, prefix, address_type))
        .collect();

    CustomerAccount {
        customer: Customer {
            email: email.clone(),
            first_name: form.text("firstName"),
            last_name: form.text("lastName"),
            company: form.text("company"),
            city: form.text("city"),
            state: form.text("state"),
            zip: form.text("zip"),
            phone: form.text("phone"),
            ..Customer::default()
        },
        addresses,
        user: User {
            username: email,
            password: form.text("password"),
            role: CUSTOMER_ROLE.to_string(),
            enabled: true,
            ..User::default()
        },
    }
}

fn address_from_form(form: &FormValues, prefix: &str, address_type: &str) -> Option<Address> {
    let field = |name: &str| form.text(&format!("{prefix}{name}"));
    let address = Address {
        address: field("Address"),
        city: field("City"),
        state: field("State"),
        zip: field("Zip"),
        country: field("Country"),
        address_type: address_type.to_string(),
        ..Address::default()
    };

    let complete = [&address.address, &address.city, &address.state, &address.zip]
        .iter()
        .all(|value| !value.is_empty());
    complete.then_some(address)
}

async fn find_customer(api: &dyn StoreApi, email: &str, headers: &Headers) -> Option<Customer> {
    match api.get_customer(email, headers).await {
        Ok(customer) => customer,
        Err(e) => {
            warn!(%email, error = %e, "Customer lookup failed");
            None
        }
    }
}

fn customer_info_target(success: bool) -> &'static str {
    if success {
        routes::CUSTOMER_INFO_VIEW
    } else {
        routes::CUSTOMER_INFO_VIEW_FAIL
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_address_is_skipped() {
        let form = FormValues::from_pairs([
            ("email", "ann@example.com"),
            ("password", "pw"),
            ("billAddress", "1 Main"),
            ("billCity", "Atlanta"),
            ("billState", "GA"),
            ("billZip", "30303"),
            ("shipAddress", "2 Side"),
            ("shipCity", "Atlanta"),
            ("shipState", "GA"),
        ]);

        let account = account_from_form(&form);
        assert_eq!(account.addresses.len(), 1);
        assert_eq!(account.addresses[0].address_type, BILLING_ADDRESS_TYPE);
        assert_eq!(account.addresses[0].zip, "30303");
        assert_eq!(account.user.username, "ann@example.com");
        assert_eq!(account.user.role, CUSTOMER_ROLE);
        assert!(account.user.enabled);
    }

    #[test]
    fn test_both_addresses_in_order() {
        let mut pairs = vec![("email".to_string(), "bo@example.com")];
        for prefix in ["bill", "ship"] {
            for (name, value) in [("Address", "x"), ("City", "y"), ("State", "z"), ("Zip", "1")] {
                pairs.push((format!("{prefix}{name}"), value));
            }
        }
        let account = account_from_form(&FormValues::from_pairs(pairs));
        let types: Vec<_> = account
            .addresses
            .iter()
            .map(|a| a.address_type.as_str())
            .collect();
        assert_eq!(types, [BILLING_ADDRESS_TYPE, SHIPPING_ADDRESS_TYPE]);
    }
}
