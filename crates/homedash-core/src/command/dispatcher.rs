// ── Action dispatcher ──
//
// Executes commands against the backend with a per-target pending gate,
// and invalidates affected cache kinds before reporting success.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use tokio::sync::broadcast;
use tracing::{info, warn};
use uuid::Uuid;

use super::{ActionTarget, Command, Verb};
use crate::backend::{Backend, MutationReply};
use crate::error::CoreError;
use crate::store::CacheStore;

const EVENT_CHANNEL_SIZE: usize = 64;

/// Result of a dispatched action.
#[derive(Debug, Clone)]
pub enum ActionOutcome {
    Succeeded { message: String },
    /// `error` is `None` when the backend answered 2xx with
    /// `success: false`.
    Failed {
        message: String,
        error: Option<CoreError>,
    },
}

impl ActionOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Succeeded { .. })
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Succeeded { message } | Self::Failed { message, .. } => message,
        }
    }
}

/// Latest known state of the action on one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionState {
    Pending {
        id: Uuid,
        verb: Verb,
        started_at: DateTime<Utc>,
    },
    Succeeded {
        id: Uuid,
        verb: Verb,
        message: String,
        finished_at: DateTime<Utc>,
    },
    Failed {
        id: Uuid,
        verb: Verb,
        message: String,
        finished_at: DateTime<Utc>,
    },
}

impl ActionState {
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

/// Broadcast to UIs as actions start and finish.
#[derive(Debug, Clone)]
pub enum ActionEvent {
    Started {
        id: Uuid,
        target: ActionTarget,
        verb: Verb,
    },
    Finished {
        id: Uuid,
        target: ActionTarget,
        verb: Verb,
        outcome: ActionOutcome,
    },
}

/// Clears the pending gate for a target, even if the dispatch future is
/// dropped before the backend answers.
struct PendingGuard<'a> {
    pending: &'a DashMap<ActionTarget, Uuid>,
    target: ActionTarget,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.pending.remove(&self.target);
    }
}

/// Executes commands with at most one pending action per target.
pub struct ActionDispatcher {
    backend: Arc<dyn Backend>,
    store: Arc<CacheStore>,
    pending: DashMap<ActionTarget, Uuid>,
    states: DashMap<ActionTarget, ActionState>,
    events: broadcast::Sender<ActionEvent>,
}

impl ActionDispatcher {
    pub fn new(backend: Arc<dyn Backend>, store: Arc<CacheStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_SIZE);
        Self {
            backend,
            store,
            pending: DashMap::new(),
            states: DashMap::new(),
            events,
        }
    }

    /// Run `command`.
    ///
    /// Returns `Err(CoreError::ActionPending)` without contacting the
    /// backend if an action on the same target is still pending. Every
    /// other failure is an [`ActionOutcome::Failed`] and leaves the cache
    /// untouched. On success the affected kinds are invalidated before
    /// this returns; their refetch happens asynchronously.
    pub async fn dispatch(&self, command: Command) -> Result<ActionOutcome, CoreError> {
        let target = command.target();
        let verb = command.verb();
        let id = Uuid::new_v4();
        let _gate = self.acquire(&target, id)?;

        self.states.insert(
            target.clone(),
            ActionState::Pending {
                id,
                verb,
                started_at: Utc::now(),
            },
        );
        let _ = self.events.send(ActionEvent::Started {
            id,
            target: target.clone(),
            verb,
        });
        info!(%id, %target, %verb, "dispatching action");

        let outcome = match self.backend.execute(&command).await {
            Ok(MutationReply::Ack(resp)) if resp.success => ActionOutcome::Succeeded {
                message: resp.message,
            },
            Ok(MutationReply::Ack(resp)) => ActionOutcome::Failed {
                message: resp.message,
                error: None,
            },
            Ok(MutationReply::Uploaded(wallpaper)) => ActionOutcome::Succeeded {
                message: format!("Uploaded {}", wallpaper.name),
            },
            Err(e) => ActionOutcome::Failed {
                message: e.message(),
                error: Some(e),
            },
        };

        let finished_at = Utc::now();
        if outcome.is_success() {
            for kind in command.affected() {
                self.store.invalidate_kind(*kind);
            }
            info!(%id, %target, %verb, "action succeeded");
            self.states.insert(
                target.clone(),
                ActionState::Succeeded {
                    id,
                    verb,
                    message: outcome.message().to_owned(),
                    finished_at,
                },
            );
        } else {
            warn!(%id, %target, %verb, error = outcome.message(), "action failed");
            self.states.insert(
                target.clone(),
                ActionState::Failed {
                    id,
                    verb,
                    message: outcome.message().to_owned(),
                    finished_at,
                },
            );
        }

        let _ = self.events.send(ActionEvent::Finished {
            id,
            target,
            verb,
            outcome: outcome.clone(),
        });
        Ok(outcome)
    }

    /// `true` while an action on `target` is awaiting the backend.
    pub fn is_pending(&self, target: &ActionTarget) -> bool {
        self.pending.contains_key(target)
    }

    /// Latest state of the most recent action on `target`.
    pub fn action_state(&self, target: &ActionTarget) -> Option<ActionState> {
        self.states.get(target).map(|s| s.clone())
    }

    pub fn events(&self) -> broadcast::Receiver<ActionEvent> {
        self.events.subscribe()
    }

    fn acquire(&self, target: &ActionTarget, id: Uuid) -> Result<PendingGuard<'_>, CoreError> {
        match self.pending.entry(target.clone()) {
            Entry::Occupied(held) => {
                warn!(%target, pending = %held.get(), "rejecting double submit");
                Err(CoreError::ActionPending {
                    target: target.to_string(),
                })
            }
            Entry::Vacant(slot) => {
                slot.insert(id);
                Ok(PendingGuard {
                    pending: &self.pending,
                    target: target.clone(),
                })
            }
        }
    }
}
