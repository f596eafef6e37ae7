//! # Session Messages
//!
//! Requests sent from [`SessionClient`](crate::SessionClient) to
//! [`SessionActor`](crate::SessionActor). Each carries a oneshot sender the
//! actor answers on.

use crate::error::SessionError;
use crate::session::{Session, SessionId};
use tokio::sync::oneshot;

/// One-shot response channel used by the session actor.
pub type Response<T> = oneshot::Sender<Result<T, SessionError>>;

#[derive(Debug)]
pub enum SessionRequest {
    /// Mint a fresh, empty session. It is not stored until saved.
    Create { respond_to: Response<Session> },
    /// Look a session up; `None` when unknown or expired.
    Load {
        id: SessionId,
        respond_to: Response<Option<Session>>,
    },
    /// Persist the values of a session snapshot (insert or replace).
    Save {
        session: Session,
        respond_to: Response<()>,
    },
    /// Forget a session.
    Destroy {
        id: SessionId,
        respond_to: Response<()>,
    },
    /// Number of stored sessions.
    Count { respond_to: Response<usize> },
}
