//! # Runtime Lifecycle
//!
//! Start-up and shutdown of the web layer's long-lived parts.
//!
//! - [`StorefrontSystem`] creates the store client, spawns the session actor
//!   and shuts it down once the server has stopped.
//! - [`setup_tracing`] installs the logging subscriber.

pub mod app_system;
pub mod tracing;

pub use self::app_system::*;
pub use self::tracing::*;
