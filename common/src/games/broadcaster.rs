use std::future::Future;

use crate::games::tictactoe::GameSnapshot;

/// Receives every state change a session makes, so a UI can redraw.
pub trait GameBroadcaster: Send + Sync + Clone + 'static {
    /// Called after every applied move and after each reset.
    fn broadcast_state(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;

    /// Called once when the game reaches a win or a draw.
    fn broadcast_game_over(&self, snapshot: GameSnapshot) -> impl Future<Output = ()> + Send;
}

/// Broadcaster for headless sessions that nobody watches.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBroadcaster;

impl GameBroadcaster for NoopBroadcaster {
    async fn broadcast_state(&self, _snapshot: GameSnapshot) {}

    async fn broadcast_game_over(&self, _snapshot: GameSnapshot) {}
}
