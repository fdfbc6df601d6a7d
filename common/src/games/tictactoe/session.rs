use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};

use crate::error::{GameError, GameResult};
use crate::games::{GameBroadcaster, SessionRng};
use crate::log;
use super::game_state::{GameSnapshot, TicTacToeGameState};
use super::settings::TicTacToeSessionSettings;
use super::types::{GameStatus, OpponentMode, Player};

struct SessionInner {
    game_state: TicTacToeGameState,
    rng: SessionRng,
    /// Bumped by every reset; a scheduled engine move only lands if the
    /// generation it was scheduled under is still current.
    generation: u64,
    /// Engine move that is scheduled but not played yet.
    pending_engine_move: Option<AbortHandle>,
    /// Engine tasks that played their move and are still broadcasting it.
    engine_broadcasts: Vec<AbortHandle>,
    /// Join side of the most recently scheduled engine task.
    engine_task: Option<JoinHandle<()>>,
}

impl SessionInner {
    fn cancel_engine_tasks(&mut self) {
        if let Some(handle) = self.pending_engine_move.take() {
            handle.abort();
        }
        for handle in self.engine_broadcasts.drain(..) {
            handle.abort();
        }
        self.generation += 1;
    }
}

/// Game controller: owns the board, applies moves and runs the engine side.
///
/// Engine replies are scheduled as separate tasks after `bot_delay`, so
/// callers return as soon as the human's move is applied.
pub struct TicTacToeSession<B: GameBroadcaster> {
    session_id: String,
    bot_delay: Duration,
    inner: Arc<Mutex<SessionInner>>,
    broadcaster: B,
}

impl<B: GameBroadcaster> TicTacToeSession<B> {
    /// Creates the session and starts the first game.
    pub async fn start(
        session_id: impl Into<String>,
        settings: &TicTacToeSessionSettings,
        broadcaster: B,
    ) -> Self {
        let rng = match settings.seed {
            Some(seed) => SessionRng::new(seed),
            None => SessionRng::from_random(),
        };
        let seed = rng.seed();

        let session = Self {
            session_id: session_id.into(),
            bot_delay: settings.bot_delay,
            inner: Arc::new(Mutex::new(SessionInner {
                game_state: TicTacToeGameState::new(settings),
                rng,
                generation: 0,
                pending_engine_move: None,
                engine_broadcasts: Vec::new(),
                engine_task: None,
            })),
            broadcaster,
        };

        log!(
            "[session:{}] Created: opponent {:?}, engine plays {}, rng seed {}",
            session.session_id,
            settings.opponent_mode,
            settings.engine_player,
            seed
        );

        session.reset().await;
        session
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Clears the board for a new game. A pending engine move is cancelled and
    /// can no longer land.
    pub async fn reset(&self) {
        let (snapshot, generation) = {
            let mut inner = self.inner.lock().await;
            inner.cancel_engine_tasks();
            inner.game_state.reset();
            (inner.game_state.snapshot(), inner.generation)
        };

        log!("[session:{}] New game", self.session_id);
        self.after_change(snapshot, generation).await;
    }

    /// Selects the opponent for the next game and resets.
    pub async fn configure(&self, opponent_mode: OpponentMode) {
        let (snapshot, generation) = {
            let mut inner = self.inner.lock().await;
            inner.cancel_engine_tasks();
            inner.game_state.configure(opponent_mode);
            (inner.game_state.snapshot(), inner.generation)
        };

        log!("[session:{}] Opponent set to {:?}", self.session_id, opponent_mode);
        self.after_change(snapshot, generation).await;
    }

    /// Places a mark for whichever human is to move.
    pub async fn submit_move(&self, index: usize) -> GameResult<GameStatus> {
        let player = {
            let inner = self.inner.lock().await;
            let state = &inner.game_state;
            if state.status().is_terminal() {
                return Err(GameError::GameFinished);
            }
            state.human_to_move().ok_or(GameError::TurnViolation {
                player: state.current_player(),
            })?
        };
        self.submit_move_as(player, index).await
    }

    /// Places `player`'s mark at `index`; rejected if it is not that human's turn.
    pub async fn submit_move_as(&self, player: Player, index: usize) -> GameResult<GameStatus> {
        let (status, snapshot, generation) = {
            let mut inner = self.inner.lock().await;
            match inner.game_state.submit_move(player, index) {
                Ok(status) => (status, inner.game_state.snapshot(), inner.generation),
                Err(e) => {
                    log!(
                        "[session:{}] Player {} failed to place mark at {}: {}",
                        self.session_id, player, index, e
                    );
                    return Err(e);
                }
            }
        };

        self.after_change(snapshot, generation).await;
        Ok(status)
    }

    pub async fn available_moves(&self) -> Vec<usize> {
        self.inner.lock().await.game_state.available_moves()
    }

    pub async fn snapshot(&self) -> GameSnapshot {
        self.inner.lock().await.game_state.snapshot()
    }

    pub async fn status(&self) -> GameStatus {
        self.inner.lock().await.game_state.status()
    }

    pub async fn has_pending_engine_move(&self) -> bool {
        self.inner
            .lock()
            .await
            .pending_engine_move
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }

    /// Waits until the scheduled engine move, if any, has landed and been
    /// broadcast, or has been cancelled. Cancellation stays possible while
    /// waiting.
    pub async fn wait_for_engine(&self) {
        let handle = self.inner.lock().await.engine_task.take();
        let Some(handle) = handle else {
            return;
        };
        if let Err(e) = handle.await
            && !e.is_cancelled()
        {
            log!("[session:{}] Engine task failed: {}", self.session_id, e);
        }
    }

    async fn after_change(&self, snapshot: GameSnapshot, generation: u64) {
        self.broadcaster.broadcast_state(snapshot).await;

        if snapshot.status.is_terminal() {
            log!("[session:{}] Game over: {}", self.session_id, snapshot.status);
            self.broadcaster.broadcast_game_over(snapshot).await;
            return;
        }

        let mut inner = self.inner.lock().await;
        if inner.generation != generation || !inner.game_state.is_engine_turn() {
            return;
        }
        if inner.pending_engine_move.is_some() {
            return;
        }

        let task = EngineMoveTask {
            session_id: self.session_id.clone(),
            inner: Arc::clone(&self.inner),
            broadcaster: self.broadcaster.clone(),
            generation,
            delay: self.bot_delay,
        };
        let handle = tokio::spawn(task.run());
        inner.pending_engine_move = Some(handle.abort_handle());
        inner.engine_task = Some(handle);
    }
}

struct EngineMoveTask<B: GameBroadcaster> {
    session_id: String,
    inner: Arc<Mutex<SessionInner>>,
    broadcaster: B,
    generation: u64,
    delay: Duration,
}

impl<B: GameBroadcaster> EngineMoveTask<B> {
    async fn run(self) {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let snapshot = {
            let mut inner = self.inner.lock().await;
            if inner.generation != self.generation {
                log!("[session:{}] Dropping stale engine move", self.session_id);
                return;
            }
            // From here on reset aborts this task through its broadcast handle.
            if let Some(handle) = inner.pending_engine_move.take() {
                inner.engine_broadcasts.retain(|handle| !handle.is_finished());
                inner.engine_broadcasts.push(handle);
            }

            let SessionInner { game_state, rng, .. } = &mut *inner;
            match game_state.play_engine_move(rng) {
                Ok(index) => {
                    log!(
                        "[session:{}] Engine ({:?}) placed {} at {}",
                        self.session_id,
                        game_state.opponent_mode(),
                        game_state.engine_player(),
                        index
                    );
                    game_state.snapshot()
                }
                Err(e) => {
                    log!("[session:{}] Engine failed to move: {}", self.session_id, e);
                    return;
                }
            }
        };

        self.broadcaster.broadcast_state(snapshot).await;
        if snapshot.status.is_terminal() {
            log!("[session:{}] Game over: {}", self.session_id, snapshot.status);
            self.broadcaster.broadcast_game_over(snapshot).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games::NoopBroadcaster;

    fn settings(opponent_mode: OpponentMode) -> TicTacToeSessionSettings {
        TicTacToeSessionSettings {
            opponent_mode,
            engine_player: Player::X,
            bot_delay: Duration::ZERO,
            seed: Some(1),
        }
    }

    #[tokio::test]
    async fn test_engine_replies_after_human_move() {
        let session =
            TicTacToeSession::start("test", &settings(OpponentMode::Optimal), NoopBroadcaster).await;
        assert_eq!(session.submit_move(0).await, Ok(GameStatus::InProgress));
        session.wait_for_engine().await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.move_count(), 2);
        assert_eq!(snapshot.last_move, Some(4));
        assert_eq!(snapshot.current_player, Player::O);
    }

    #[tokio::test]
    async fn test_human_vs_human_has_no_engine() {
        let session =
            TicTacToeSession::start("test", &settings(OpponentMode::None), NoopBroadcaster).await;
        session.submit_move(0).await.unwrap();
        assert!(!session.has_pending_engine_move().await);
        assert_eq!(session.submit_move_as(Player::X, 4).await, Ok(GameStatus::InProgress));
        assert_eq!(session.available_moves().await.len(), 7);
    }

    #[tokio::test]
    async fn test_submit_while_engine_to_move_is_rejected() {
        let session = TicTacToeSession::start(
            "test",
            &TicTacToeSessionSettings {
                bot_delay: Duration::from_secs(60),
                ..settings(OpponentMode::Heuristic)
            },
            NoopBroadcaster,
        )
        .await;
        session.submit_move(0).await.unwrap();
        assert_eq!(
            session.submit_move(1).await,
            Err(GameError::TurnViolation { player: Player::X })
        );
        assert_eq!(
            session.submit_move_as(Player::X, 1).await,
            Err(GameError::TurnViolation { player: Player::X })
        );
        assert_eq!(session.snapshot().await.board.move_count(), 1);
        session.reset().await;
    }

    #[tokio::test]
    async fn test_configure_switches_mode_and_clears_board() {
        let session =
            TicTacToeSession::start("test", &settings(OpponentMode::None), NoopBroadcaster).await;
        session.submit_move(4).await.unwrap();
        session.configure(OpponentMode::Heuristic).await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.opponent_mode, OpponentMode::Heuristic);
        assert_eq!(snapshot.board.move_count(), 0);
        assert_eq!(session.session_id(), "test");
    }

    #[tokio::test(start_paused = true)]
    async fn test_engine_move_from_old_generation_is_dropped() {
        let session = TicTacToeSession::start(
            "test",
            &TicTacToeSessionSettings {
                bot_delay: Duration::from_millis(500),
                ..settings(OpponentMode::Optimal)
            },
            NoopBroadcaster,
        )
        .await;
        session.submit_move(0).await.unwrap();

        {
            let mut inner = session.inner.lock().await;
            // The engine task wakes up and queues behind this lock.
            tokio::time::sleep(Duration::from_millis(600)).await;
            // A new game whose abort never reached the queued task.
            inner.pending_engine_move = None;
            inner.generation += 1;
            inner.game_state.reset();
        }
        session.wait_for_engine().await;

        let snapshot = session.snapshot().await;
        assert_eq!(snapshot.board.move_count(), 0);
        assert_eq!(snapshot.last_move, None);
        assert_eq!(snapshot.current_player, Player::O);
    }

    #[tokio::test(start_paused = true)]
    async fn test_reset_cancels_engine_while_someone_waits() {
        let delay = Duration::from_millis(500);
        let session = TicTacToeSession::start(
            "test",
            &TicTacToeSessionSettings {
                bot_delay: delay,
                ..settings(OpponentMode::Optimal)
            },
            NoopBroadcaster,
        )
        .await;
        session.submit_move(0).await.unwrap();

        tokio::join!(session.wait_for_engine(), async {
            tokio::time::sleep(delay / 2).await;
            assert!(session.has_pending_engine_move().await);
            session.reset().await;
        });

        assert!(!session.has_pending_engine_move().await);
        assert_eq!(session.snapshot().await.board.move_count(), 0);
    }
}
