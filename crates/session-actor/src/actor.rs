//! # Session Actor
//!
//! [`SessionActor`] owns every stored session. It processes
//! [`SessionRequest`]s one at a time from an mpsc channel, so the session map
//! needs no lock: exclusive ownership inside a single task is the
//! synchronisation.
//!
//! ## Storage
//!
//! `Create` only mints a fresh id; nothing is stored until the first `Save`.
//! Visitors who never log in therefore leave no entry behind.
//!
//! ## Expiry
//!
//! When [`SessionConfig::max_age`] is set, a session that has not been loaded
//! or saved for longer than `max_age` is gone: `Load` treats it as unknown,
//! and a sweep on a `max_age` interval removes the ones nobody asks for again.

use crate::client::SessionClient;
use crate::error::SessionError;
use crate::message::SessionRequest;
use crate::session::{Session, SessionId};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::{Instant, Interval, MissedTickBehavior};
use tracing::{debug, info, warn};

/// Session store configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Capacity of the request channel.
    pub buffer_size: usize,
    /// Idle lifetime of a session. `None` keeps sessions until destroyed.
    pub max_age: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            buffer_size: 32,
            max_age: Some(Duration::from_secs(3600)),
        }
    }
}

struct Entry {
    session: Session,
    touched: Instant,
}

/// The server half of the session store.
pub struct SessionActor {
    receiver: mpsc::Receiver<SessionRequest>,
    sessions: HashMap<SessionId, Entry>,
    max_age: Option<Duration>,
}

impl SessionActor {
    /// Creates the actor and the client used to reach it.
    ///
    /// The actor does nothing until [`run`](Self::run) is spawned.
    pub fn new(config: SessionConfig) -> (Self, SessionClient) {
        let (sender, receiver) = mpsc::channel(config.buffer_size.max(1));
        let actor = Self {
            receiver,
            sessions: HashMap::new(),
            max_age: config.max_age,
        };
        (actor, SessionClient::new(sender))
    }

    fn is_expired(&self, entry: &Entry, now: Instant) -> bool {
        self.max_age
            .is_some_and(|max_age| now.duration_since(entry.touched) > max_age)
    }

    fn evict_expired(&mut self, now: Instant) {
        let Some(max_age) = self.max_age else {
            return;
        };
        let before = self.sessions.len();
        self.sessions
            .retain(|_, entry| now.duration_since(entry.touched) <= max_age);
        let evicted = before - self.sessions.len();
        if evicted > 0 {
            debug!(evicted, size = self.sessions.len(), "Evicted idle sessions");
        }
    }

    fn sweeper(&self) -> Option<Interval> {
        let period = self.max_age?.max(Duration::from_millis(1));
        let mut sweep = tokio::time::interval_at(Instant::now() + period, period);
        sweep.set_missed_tick_behavior(MissedTickBehavior::Skip);
        Some(sweep)
    }

    /// Processes requests until every client has been dropped.
    pub async fn run(mut self) {
        info!(max_age = ?self.max_age, "Session actor started");
        let mut sweep = self.sweeper();

        loop {
            tokio::select! {
                msg = self.receiver.recv() => match msg {
                    Some(msg) => self.handle(msg, Instant::now()),
                    None => break,
                },
                _ = next_sweep(&mut sweep) => self.evict_expired(Instant::now()),
            }
        }

        info!(size = self.sessions.len(), "Session actor shutdown");
    }

    fn handle(&mut self, msg: SessionRequest, now: Instant) {
        match msg {
            SessionRequest::Create { respond_to } => {
                let session = Session::new(SessionId::generate());
                debug!(id = %session.id, "Created session");
                let _ = respond_to.send(Ok(session));
            }
            SessionRequest::Load { id, respond_to } => {
                let expired = self
                    .sessions
                    .get(&id)
                    .is_some_and(|entry| self.is_expired(entry, now));
                if expired {
                    self.sessions.remove(&id);
                    debug!(%id, "Session expired");
                }
                let session = self.sessions.get_mut(&id).map(|entry| {
                    entry.touched = now;
                    entry.session.clone().loaded()
                });
                debug!(%id, found = session.is_some(), "Load");
                let _ = respond_to.send(Ok(session));
            }
            SessionRequest::Save { session, respond_to } => {
                let id = session.id.clone();
                let values = session.len();
                let stored = self
                    .sessions
                    .insert(
                        id.clone(),
                        Entry {
                            session: session.loaded(),
                            touched: now,
                        },
                    )
                    .is_some();
                if stored {
                    debug!(%id, values, "Save");
                } else {
                    info!(%id, size = self.sessions.len(), "Stored new session");
                }
                let _ = respond_to.send(Ok(()));
            }
            SessionRequest::Destroy { id, respond_to } => {
                if self.sessions.remove(&id).is_some() {
                    info!(%id, size = self.sessions.len(), "Destroyed session");
                    let _ = respond_to.send(Ok(()));
                } else {
                    warn!(%id, "Not found");
                    let _ = respond_to.send(Err(SessionError::NotFound(id.to_string())));
                }
            }
            SessionRequest::Count { respond_to } => {
                let _ = respond_to.send(Ok(self.sessions.len()));
            }
        }
    }
}

/// Waits for the next sweep tick, or forever when sessions never expire.
async fn next_sweep(sweep: &mut Option<Interval>) {
    match sweep {
        Some(sweep) => {
            sweep.tick().await;
        }
        None => std::future::pending().await,
    }
}
