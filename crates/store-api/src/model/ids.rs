//! Type-safe identifiers for store records.
//!
//! The store API uses 64-bit integers for every id. Wrapping them keeps an
//! order id from being passed where a product id is expected.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

macro_rules! store_id {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($label, "_{}"), self.0)
            }
        }

        impl $name {
            /// A zero id is what the store returns for "no such record".
            pub fn is_zero(&self) -> bool {
                self.0 == 0
            }
        }
    };
}

store_id!(
    /// Identifier of an order header.
    OrderId,
    "order"
);
store_id!(
    /// Identifier of a catalogue product.
    ProductId,
    "product"
);
store_id!(
    /// Identifier of a store customer.
    CustomerId,
    "customer"
);
store_id!(
    /// Identifier of a customer address.
    AddressId,
    "address"
);
