//! Records exchanged with the remote store API.
//!
//! Field names follow the store's JSON contract (camelCase), so every record
//! derives `Serialize`/`Deserialize` with `rename_all = "camelCase"` and
//! `default` so that missing fields decode to their zero value.

pub mod customer;
pub mod headers;
pub mod ids;
pub mod order;
pub mod product;
pub mod response;

pub use customer::*;
pub use headers::*;
pub use ids::*;
pub use order::*;
pub use product::*;
pub use response::*;
