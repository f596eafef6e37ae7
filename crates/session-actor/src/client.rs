//! # Session Client
//!
//! Cheap-to-clone handle on the [`SessionActor`](crate::SessionActor). Each
//! method sends one [`SessionRequest`] and waits for the oneshot reply.

use crate::error::SessionError;
use crate::message::SessionRequest;
use crate::session::{Session, SessionId};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct SessionClient {
    sender: mpsc::Sender<SessionRequest>,
}

impl SessionClient {
    pub fn new(sender: mpsc::Sender<SessionRequest>) -> Self {
        Self { sender }
    }

    /// A new session with a fresh id. The store keeps it only once
    /// [`save`](Self::save)d.
    #[instrument(skip(self))]
    pub async fn create(&self) -> Result<Session, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Create { respond_to })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn load(&self, id: &SessionId) -> Result<Option<Session>, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Load {
                id: id.clone(),
                respond_to,
            })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }

    /// Loads the session named by `id`, or starts a new one when `id` is
    /// absent, unknown or expired.
    pub async fn load_or_create(&self, id: Option<&SessionId>) -> Result<Session, SessionError> {
        if let Some(id) = id {
            if let Some(session) = self.load(id).await? {
                return Ok(session);
            }
        }
        self.create().await
    }

    #[instrument(skip(self, session), fields(id = %session.id))]
    pub async fn save(&self, session: &Session) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Save {
                session: session.clone(),
                respond_to,
            })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }

    #[instrument(skip(self))]
    pub async fn destroy(&self, id: &SessionId) -> Result<(), SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Destroy {
                id: id.clone(),
                respond_to,
            })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }

    /// Number of sessions currently stored.
    #[instrument(skip(self))]
    pub async fn len(&self) -> Result<usize, SessionError> {
        debug!("Sending request");
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(SessionRequest::Count { respond_to })
            .await
            .map_err(|_| SessionError::ActorClosed)?;
        response.await.map_err(|_| SessionError::ActorDropped)?
    }
}
