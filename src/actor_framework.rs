//! # Resource Actor
//!
//! A single tokio task owns every record of one entity type. Callers hold a
//! cloneable [`ResourceClient`] and talk to the task over a bounded mailbox,
//! so list/get/create/update/delete are applied one at a time and nobody can
//! observe a half-applied mutation.
//!
//! Updates are optimistic: the caller may pass the version it last saw, and
//! the actor refuses the write when the stored version has moved on.

use std::collections::BTreeMap;
use std::fmt::{Debug, Display};
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument, warn};

// =============================================================================
// 1. THE ABSTRACTION
// =============================================================================

/// Trait that any domain entity must implement to be managed by ResourceActor
pub trait Entity: Clone + Send + Sync + 'static {
    type Id: Ord + Copy + Send + Sync + Display + Debug;
    type CreatePayload: Send + Sync + Debug;
    type UpdatePayload: Send + Sync + Debug;

    /// Short name used in log fields and error messages.
    const KIND: &'static str;

    fn id(&self) -> Self::Id;
    fn version(&self) -> u64;
    fn set_version(&mut self, version: u64);

    /// Construct the full entity at version 1.
    fn from_create(id: Self::Id, payload: Self::CreatePayload) -> Self;

    /// Replace the mutable fields. Identity and version are handled by the actor.
    fn on_update(&mut self, payload: Self::UpdatePayload);

    // --- Validation hooks, run before anything is touched ---

    fn validate_create(_payload: &Self::CreatePayload) -> Result<(), String> {
        Ok(())
    }

    fn validate_update(_payload: &Self::UpdatePayload) -> Result<(), String> {
        Ok(())
    }
}

/// What an update requires of the stored version before it may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Precondition {
    /// No check: last writer wins.
    Unconditional,
    /// The stored version must equal this one.
    Version(u64),
    /// A version was named but no record can ever carry it.
    Unsatisfiable,
}

impl Precondition {
    fn admits(self, actual: u64) -> bool {
        match self {
            Precondition::Unconditional => true,
            Precondition::Version(expected) => expected == actual,
            Precondition::Unsatisfiable => false,
        }
    }
}

impl Display for Precondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Precondition::Unconditional => write!(f, "any"),
            Precondition::Version(version) => write!(f, "{}", version),
            Precondition::Unsatisfiable => write!(f, "unsatisfiable"),
        }
    }
}

/// Failures reported by the actor or by the channel in between.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FrameworkError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("version mismatch: expected {expected}, current {actual}")]
    VersionConflict { expected: Precondition, actual: u64 },
    #[error("Rejected: {0}")]
    Rejected(String),
    #[error("Actor closed")]
    ActorClosed,
    #[error("Actor dropped")]
    ActorDropped,
}

// =============================================================================
// 2. THE GENERIC MESSAGES
// =============================================================================

pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum ResourceRequest<T: Entity> {
    List {
        respond_to: Response<Vec<T>>,
    },
    Get {
        id: T::Id,
        respond_to: Response<Option<T>>,
    },
    Create {
        payload: T::CreatePayload,
        respond_to: Response<T>,
    },
    Update {
        id: T::Id,
        payload: T::UpdatePayload,
        precondition: Precondition,
        respond_to: Response<T>,
    },
    Delete {
        id: T::Id,
        respond_to: Response<bool>,
    },
    #[cfg(test)]
    Count {
        respond_to: Response<usize>,
    },
}

// =============================================================================
// 3. THE GENERIC ACTOR SERVER
// =============================================================================

pub struct ResourceActor<T: Entity> {
    receiver: mpsc::Receiver<ResourceRequest<T>>,
    store: BTreeMap<T::Id, T>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

impl<T: Entity> ResourceActor<T> {
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, ResourceClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            store: BTreeMap::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        let client = ResourceClient::new(sender);
        (actor, client)
    }

    /// Runs until every client has been dropped.
    #[instrument(name = "resource_actor", fields(kind = T::KIND), skip(self))]
    pub async fn run(mut self) {
        info!("ResourceActor starting");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                ResourceRequest::List { respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_list()));
                }
                ResourceRequest::Get { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_get(id)));
                }
                ResourceRequest::Create { payload, respond_to } => {
                    let _ = respond_to.send(self.handle_create(payload));
                }
                ResourceRequest::Update {
                    id,
                    payload,
                    precondition,
                    respond_to,
                } => {
                    let _ = respond_to.send(self.handle_update(id, payload, precondition));
                }
                ResourceRequest::Delete { id, respond_to } => {
                    let _ = respond_to.send(Ok(self.handle_delete(id)));
                }
                #[cfg(test)]
                ResourceRequest::Count { respond_to } => {
                    let _ = respond_to.send(Ok(self.store.len()));
                }
            }
        }

        info!("ResourceActor stopped");
    }

    #[instrument(skip(self))]
    fn handle_list(&self) -> Vec<T> {
        let items: Vec<T> = self.store.values().cloned().collect();
        debug!(count = items.len(), "Listed items");
        items
    }

    #[instrument(skip(self))]
    fn handle_get(&self, id: T::Id) -> Option<T> {
        let item = self.store.get(&id).cloned();
        match &item {
            Some(item) => debug!(version = item.version(), "Item found"),
            None => debug!("Item not found"),
        }
        item
    }

    #[instrument(skip(self, payload))]
    fn handle_create(&mut self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        if let Err(reason) = T::validate_create(&payload) {
            warn!(%reason, "Create rejected");
            return Err(FrameworkError::Rejected(reason));
        }

        let id = (self.next_id_fn)();
        let item = T::from_create(id, payload);
        self.store.insert(item.id(), item.clone());

        info!(item_id = %id, "Item created");
        Ok(item)
    }

    /// Read-modify-write on a copy; the stored record is only replaced once
    /// every check has passed.
    #[instrument(skip(self, payload))]
    fn handle_update(
        &mut self,
        id: T::Id,
        payload: T::UpdatePayload,
        precondition: Precondition,
    ) -> Result<T, FrameworkError> {
        let Some(current) = self.store.get(&id) else {
            debug!("Item not found for update");
            return Err(FrameworkError::NotFound(format!("{} {}", T::KIND, id)));
        };

        let actual = current.version();
        if !precondition.admits(actual) {
            warn!(actual, "Version conflict");
            return Err(FrameworkError::VersionConflict {
                expected: precondition,
                actual,
            });
        }

        if let Err(reason) = T::validate_update(&payload) {
            warn!(%reason, "Update rejected");
            return Err(FrameworkError::Rejected(reason));
        }

        let mut next = current.clone();
        next.on_update(payload);
        next.set_version(actual + 1);
        self.store.insert(id, next.clone());

        info!(version = actual + 1, "Item updated");
        Ok(next)
    }

    #[instrument(skip(self))]
    fn handle_delete(&mut self, id: T::Id) -> bool {
        let removed = self.store.remove(&id).is_some();
        if removed {
            info!("Item deleted");
        } else {
            debug!("Item not found for delete");
        }
        removed
    }
}

// =============================================================================
// 4. THE GENERIC CLIENT
// =============================================================================

#[derive(Clone)]
pub struct ResourceClient<T: Entity> {
    sender: mpsc::Sender<ResourceRequest<T>>,
}

impl<T: Entity> ResourceClient<T> {
    pub fn new(sender: mpsc::Sender<ResourceRequest<T>>) -> Self {
        Self { sender }
    }

    async fn call<R>(
        &self,
        build: impl FnOnce(Response<R>) -> ResourceRequest<T>,
    ) -> Result<R, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub async fn list(&self) -> Result<Vec<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::List { respond_to }).await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Get { id, respond_to }).await
    }

    pub async fn create(&self, payload: T::CreatePayload) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Create { payload, respond_to })
            .await
    }

    /// `Precondition::Unconditional` skips the version check (last writer wins).
    pub async fn update(
        &self,
        id: T::Id,
        payload: T::UpdatePayload,
        precondition: Precondition,
    ) -> Result<T, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Update {
            id,
            payload,
            precondition,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<bool, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Delete { id, respond_to })
            .await
    }

    #[cfg(test)]
    pub async fn count(&self) -> Result<usize, FrameworkError> {
        self.call(|respond_to| ResourceRequest::Count { respond_to })
            .await
    }
}

// =============================================================================
// 5. EXAMPLE USAGE (Test)
// =============================================================================
