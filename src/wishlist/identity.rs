//! Actor Resolver
//!
//! Derives the current actor from a read-only session accessor. The wishlist
//! has no guest tier: an actor without an authenticated user id may read
//! neutral defaults but may not mutate anything.

use crate::shared::config::WishlistConfig;
use crate::shared::error::StorageError;
use crate::shared::types::{Session, UserInfo};
use crate::wishlist::storage::KeyValueStorage;
use crate::wishlist::sync::StorageSubscription;
use std::fmt::Debug;
use std::sync::{Arc, Mutex, RwLock};

/// Synchronous view of the authentication subsystem
pub trait SessionReader: Send + Sync + Debug {
    fn session(&self) -> Session;
}

/// The current actor as the store sees it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Actor {
    pub actor_id: Option<String>,
    pub is_authenticated: bool,
}

impl Actor {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Actor id, only when the actor may own a partition
    pub fn authenticated_id(&self) -> Option<&str> {
        if self.is_authenticated {
            self.actor_id.as_deref()
        } else {
            None
        }
    }
}

/// Turns whatever the session reader reports into an `Actor`
#[derive(Debug, Clone)]
pub struct ActorResolver {
    reader: Arc<dyn SessionReader>,
}

impl ActorResolver {
    pub fn new(reader: Arc<dyn SessionReader>) -> Self {
        Self { reader }
    }

    /// Authenticated iff the session says so and carries a non-empty user id
    pub fn current(&self) -> Actor {
        let session = self.reader.session();
        let actor_id = session.user_id.filter(|id| !id.is_empty());
        Actor {
            is_authenticated: session.is_authenticated && actor_id.is_some(),
            actor_id,
        }
    }
}

/// In-memory session an embedding host (or a test) updates directly
#[derive(Debug, Default)]
pub struct SharedSession {
    state: RwLock<Session>,
}

impl SharedSession {
    pub fn new(session: Session) -> Self {
        Self {
            state: RwLock::new(session),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn login(&self, user_id: impl Into<String>, token: impl Into<String>) {
        self.set(Session::authenticated(user_id, token));
    }

    pub fn logout(&self) {
        self.set(Session::anonymous());
    }

    pub fn set(&self, session: Session) {
        if let Ok(mut state) = self.state.write() {
            *state = session;
        }
    }
}

impl SessionReader for SharedSession {
    fn session(&self) -> Session {
        self.state.read().map(|s| s.clone()).unwrap_or_default()
    }
}

/// Session persisted by the authentication subsystem in the same storage
/// backend: a token entry plus a JSON `UserInfo` record.
///
/// The parsed session is cached and dropped whenever the backend reports a
/// change to the user or token key. Backends without change events are read
/// on every call.
#[derive(Debug)]
pub struct StorageSession {
    storage: Arc<dyn KeyValueStorage>,
    user_key: String,
    token_key: String,
    changes: Option<Mutex<StorageSubscription>>,
    cached: Mutex<Option<Session>>,
}

impl StorageSession {
    pub fn new(storage: Arc<dyn KeyValueStorage>, config: &WishlistConfig) -> Self {
        let changes = storage.events().map(|events| Mutex::new(events.subscribe()));
        Self {
            storage,
            user_key: config.user_key.clone(),
            token_key: config.token_key.clone(),
            changes,
            cached: Mutex::new(None),
        }
    }

    fn read_user(&self) -> Option<UserInfo> {
        let raw = match self.storage.get(&self.user_key) {
            Ok(raw) => raw?,
            Err(e) => {
                tracing::warn!("[AUTH] Failed to read user record: {}", e);
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(user) => Some(user),
            Err(e) => {
                tracing::warn!("[AUTH] Ignoring malformed user record: {}", e);
                None
            }
        }
    }

    fn read_token(&self) -> Option<String> {
        self.storage
            .get(&self.token_key)
            .unwrap_or_else(|e| {
                tracing::warn!("[AUTH] Failed to read session token: {}", e);
                None
            })
            .filter(|token| !token.is_empty())
    }

    fn read_session(&self) -> Session {
        let token = self.read_token();
        let user_id = self.read_user().map(|user| user.id);
        Session {
            is_authenticated: token.is_some() && user_id.is_some(),
            user_id,
            token,
        }
    }

    /// Whether the session keys may have changed since the last read
    fn is_stale(&self) -> bool {
        let Some(changes) = &self.changes else {
            return true;
        };
        let Ok(mut changes) = changes.lock() else {
            return true;
        };
        let keys = [self.user_key.as_str(), self.token_key.as_str()];
        let stale = changes.drain().iter().any(|event| event.touches(&keys));
        if stale {
            tracing::trace!("[AUTH] Session keys changed, re-reading");
        }
        stale
    }

    /// Persist a signed-in session, as the login flow does
    pub fn sign_in(&self, user: &UserInfo, token: &str) -> Result<(), StorageError> {
        self.storage.set(&self.user_key, &serde_json::to_string(user)?)?;
        self.storage.set(&self.token_key, token)
    }

    /// Remove the persisted session
    pub fn sign_out(&self) -> Result<(), StorageError> {
        self.storage.remove(&self.token_key)?;
        self.storage.remove(&self.user_key)
    }
}

impl SessionReader for StorageSession {
    fn session(&self) -> Session {
        let stale = self.is_stale();
        let Ok(mut cached) = self.cached.lock() else {
            return self.read_session();
        };
        if stale {
            *cached = None;
        }
        cached.get_or_insert_with(|| self.read_session()).clone()
    }
}
