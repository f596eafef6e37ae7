//! # Session Actor
//!
//! In-process session store for the storefront web layer, built as a single
//! Tokio actor.
//!
//! ## Architecture
//!
//! 1. **Record** ([`Session`]) - an id plus string-keyed JSON values.
//! 2. **Server** ([`SessionActor`]) - owns every session and handles one
//!    [`SessionRequest`] at a time.
//! 3. **Interface** ([`SessionClient`]) - cloneable handle; one method per
//!    request kind, each awaiting a oneshot reply.
//!
//! ```rust
//! use session_actor::{SessionActor, SessionConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, sessions) = SessionActor::new(SessionConfig::default());
//!     let handle = tokio::spawn(actor.run());
//!
//!     let mut session = sessions.create().await.unwrap();
//!     session.insert("loggedIn", true);
//!     sessions.save(&session).await.unwrap();
//!
//!     let loaded = sessions.load(&session.id).await.unwrap().unwrap();
//!     assert!(loaded.get_bool("loggedIn"));
//!
//!     // Dropping the last client closes the channel and stops the actor.
//!     drop(sessions);
//!     handle.await.unwrap();
//! }
//! ```
//!
//! ## Shutdown
//!
//! The actor exits when every [`SessionClient`] has been dropped and the
//! channel drains.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod session;

pub use actor::{SessionActor, SessionConfig};
pub use client::SessionClient;
pub use error::SessionError;
pub use message::{Response, SessionRequest};
pub use session::{Session, SessionId};
