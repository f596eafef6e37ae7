//! Customer sign-up: one customer, its addresses and its login user.

use store_api::model::{CustomerAccount, CustomerId, Headers};
use store_api::{StoreApi, StoreApiError};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a sign-up did not produce an account.
#[derive(Debug, Error)]
pub enum AccountError {
    /// The store answered the customer add with a failure code.
    #[error("Store rejected the customer (code {0})")]
    CustomerRejected(i64),

    /// The store answered the login user add with a failure code.
    #[error("Store rejected the user (code {0})")]
    UserRejected(i64),

    /// The store could not be reached or answered garbage.
    #[error(transparent)]
    Store(#[from] StoreApiError),
}

/// Creates `account` in the store.
///
/// The customer is added first; its new id is then stamped on every address
/// and on the user before they are added. The account exists only if both the
/// customer and the user were accepted. A rejected address is logged and does
/// not fail the sign-up.
#[instrument(skip(api, account, headers), fields(email = %account.customer.email))]
pub async fn create_customer_account(
    api: &dyn StoreApi,
    mut account: CustomerAccount,
    headers: &Headers,
) -> Result<CustomerAccount, AccountError> {
    let customer = api.add_customer(&account.customer, headers).await?;
    if !customer.success {
        return Err(AccountError::CustomerRejected(customer.code));
    }
    let customer_id = CustomerId(customer.id);
    account.customer.id = customer_id;
    debug!(customer_id = customer_id.0, "Customer added");

    for address in &mut account.addresses {
        address.customer_id = customer_id;
        match api.add_address(address, headers).await {
            Ok(status) if status.success => address.id = status.id.into(),
            Ok(status) => warn!(code = status.code, "Address rejected"),
            Err(e) => warn!(error = %e, "Address add failed"),
        }
    }

    account.user.customer_id = customer_id;
    let user = api.add_customer_user(&account.user, headers).await?;
    if !user.success {
        return Err(AccountError::UserRejected(user.code));
    }
    debug!("Customer user added");

    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;
    use store_api::mock::{MockStoreApi, StoreCall};
    use store_api::model::{
        Address, Customer, ResponseStatus, User, BILLING_ADDRESS_TYPE, SHIPPING_ADDRESS_TYPE,
    };

    fn account() -> CustomerAccount {
        CustomerAccount {
            customer: Customer {
                email: "ann@example.com".to_string(),
                ..Customer::default()
            },
            addresses: vec![
                Address {
                    address: "1 Main".to_string(),
                    address_type: BILLING_ADDRESS_TYPE.to_string(),
                    ..Address::default()
                },
                Address {
                    address: "2 Side".to_string(),
                    address_type: SHIPPING_ADDRESS_TYPE.to_string(),
                    ..Address::default()
                },
            ],
            user: User {
                username: "ann@example.com".to_string(),
                ..User::default()
            },
        }
    }

    #[tokio::test]
    async fn test_new_customer_id_flows_to_addresses_and_user() {
        let mock = MockStoreApi::new();
        mock.expect_add_customer("ann@example.com")
            .return_ok(ResponseStatus::ok(31));
        mock.expect_add_address(CustomerId(31))
            .return_ok(ResponseStatus::ok(101));
        mock.expect_add_address(CustomerId(31))
            .return_ok(ResponseStatus::ok(102));
        mock.expect_add_customer_user("ann@example.com")
            .return_ok(ResponseStatus::ok(0));

        let created = create_customer_account(&mock, account(), &Headers::new())
            .await
            .unwrap();

        assert_eq!(created.customer.id, CustomerId(31));
        assert_eq!(created.user.customer_id, CustomerId(31));
        assert!(created.addresses.iter().all(|a| a.customer_id == CustomerId(31)));
        assert_eq!(created.addresses[1].id.0, 102);
        mock.verify();
    }

    #[tokio::test]
    async fn test_rejected_customer_stops_signup() {
        let mock = MockStoreApi::new();
        mock.expect_add_customer("ann@example.com")
            .return_ok(ResponseStatus::failed(409));

        let err = create_customer_account(&mock, account(), &Headers::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::CustomerRejected(409)));
        assert_eq!(mock.calls(), vec![StoreCall::AddCustomer("ann@example.com".to_string())]);
    }

    #[tokio::test]
    async fn test_rejected_user_fails_signup_but_address_failure_does_not() {
        let mock = MockStoreApi::new();
        mock.expect_add_customer("ann@example.com")
            .return_ok(ResponseStatus::ok(31));
        mock.expect_add_address(CustomerId(31))
            .return_ok(ResponseStatus::failed(400));
        mock.expect_add_address(CustomerId(31))
            .return_err(StoreApiError::Timeout);
        mock.expect_add_customer_user("ann@example.com")
            .return_ok(ResponseStatus::failed(500));

        let err = create_customer_account(&mock, account(), &Headers::new())
            .await
            .unwrap_err();

        assert!(matches!(err, AccountError::UserRejected(500)));
        mock.verify();
    }
}
