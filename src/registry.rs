//! Matchmaking registry: pending queue, promotion, active lookup.

use crate::session::{GameId, GameSession};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use tracing::{debug, info, instrument, warn};

/// Error returned when a registry operation is rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum RegistryError {
    /// No pending entry exists under the given queue id.
    #[display("No pending game is queued under id {}", _0)]
    UnknownQueueEntry(GameId),
}

impl std::error::Error for RegistryError {}

/// Mutable registry state: the id sequence and both tables.
///
/// Guarded as a unit by one mutex so promotion never loses a pending
/// entry or duplicates an id.
#[derive(Debug)]
pub(crate) struct RegistryInner {
    next_id: GameId,
    pending: HashMap<GameId, String>,
    active: HashMap<GameId, Arc<GameSession>>,
}

impl RegistryInner {
    pub(crate) fn evict(&mut self, game_id: GameId) {
        self.active.remove(&game_id);
    }
}

/// Process-wide matchmaking registry.
///
/// Pairs a waiting first player with a joining second player and owns
/// the table of live sessions. Handles are cheap clones sharing one
/// store; create the registry once at process start and hand clones to
/// every caller.
#[derive(Debug, Clone)]
pub struct GameRegistry {
    inner: Arc<Mutex<RegistryInner>>,
}

impl GameRegistry {
    /// Creates an empty registry. Ids are issued from 1 and never reused.
    pub fn new() -> Self {
        info!("Creating game registry");
        Self {
            inner: Arc::new(Mutex::new(RegistryInner {
                next_id: 1,
                pending: HashMap::new(),
                active: HashMap::new(),
            })),
        }
    }

    /// Queues `player1` for a match and returns the queue id.
    #[instrument(skip(self, player1))]
    pub fn queue_game(&self, player1: impl Into<String>) -> GameId {
        let player1 = player1.into();
        let mut inner = self.inner.lock().unwrap();
        let queue_id = inner.next_id;
        inner.next_id += 1;
        info!(queue_id, %player1, "Queued game");
        inner.pending.insert(queue_id, player1);
        queue_id
    }

    /// Withdraws a pending entry.
    ///
    /// Idempotent: unknown or already-promoted ids are a no-op.
    #[instrument(skip(self))]
    pub fn remove_queued_game(&self, queue_id: GameId) {
        let mut inner = self.inner.lock().unwrap();
        if inner.pending.remove(&queue_id).is_some() {
            info!(queue_id, "Withdrew pending game");
        } else {
            debug!(queue_id, "Withdrawal of unknown queue id ignored");
        }
    }

    /// Promotes the pending entry under `queue_id` into an active session.
    ///
    /// The pending removal, session creation and active insertion
    /// happen under one lock, so the queue id becomes the game id
    /// exactly once even under racing joiners.
    #[instrument(skip(self, player2))]
    pub fn start_game(
        &self,
        queue_id: GameId,
        player2: impl Into<String>,
    ) -> Result<Arc<GameSession>, RegistryError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(player1) = inner.pending.remove(&queue_id) else {
            warn!(queue_id, "Promotion of unknown queue id rejected");
            return Err(RegistryError::UnknownQueueEntry(queue_id));
        };
        let session = Arc::new(GameSession::attached(
            queue_id,
            player1,
            player2.into(),
            Arc::downgrade(&self.inner),
        ));
        inner.active.insert(queue_id, Arc::clone(&session));
        info!(
            game_id = queue_id,
            player1 = %session.player1_name(),
            player2 = %session.player2_name(),
            "Started game"
        );
        Ok(session)
    }

    /// Looks up a live session.
    ///
    /// A session that already finished answers `None` even when its
    /// eviction has not landed yet.
    #[instrument(skip(self))]
    pub fn active_game(&self, game_id: GameId) -> Option<Arc<GameSession>> {
        let session = self.inner.lock().unwrap().active.get(&game_id).cloned();
        match session {
            Some(session) if !session.is_over() => Some(session),
            Some(_) => {
                debug!(game_id, "Session finished but not yet evicted");
                None
            }
            None => {
                debug!(game_id, "No active game under id");
                None
            }
        }
    }

    /// Returns a point-in-time copy of the pending queue.
    ///
    /// The copy maps queue id to the waiting player's name and is
    /// isolated from the live registry in both directions.
    #[instrument(skip(self))]
    pub fn pending_games(&self) -> HashMap<GameId, String> {
        self.inner.lock().unwrap().pending.clone()
    }
}

impl Default for GameRegistry {
    fn default() -> Self {
        Self::new()
    }
}
