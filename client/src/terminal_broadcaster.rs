use common::games::GameBroadcaster;
use common::games::tictactoe::{GameSnapshot, GameStatus, OpponentMode};

/// Prints the board to stdout after every change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TerminalBroadcaster;

impl GameBroadcaster for TerminalBroadcaster {
    async fn broadcast_state(&self, snapshot: GameSnapshot) {
        println!("{}", render(&snapshot));
    }

    async fn broadcast_game_over(&self, snapshot: GameSnapshot) {
        if let Some(message) = game_over_message(&snapshot) {
            println!("{}\nType 'reset' for a new game.", message);
        }
    }
}

pub fn game_over_message(snapshot: &GameSnapshot) -> Option<String> {
    if !snapshot.status.is_terminal() {
        return None;
    }
    match (snapshot.status.winner(), snapshot.winning_line) {
        (Some(player), Some(line)) => {
            let [a, b, c] = line.cells;
            Some(format!("Player {} wins on {}-{}-{}!", player, a, b, c))
        }
        (Some(player), None) => Some(format!("Player {} wins!", player)),
        (None, _) => Some("It's a draw!".to_string()),
    }
}

pub fn render(snapshot: &GameSnapshot) -> String {
    let mut out = format!("\n{}\n", snapshot.board);
    if snapshot.status == GameStatus::InProgress {
        let waiting_on_engine = snapshot.opponent_mode != OpponentMode::None
            && snapshot.current_player == snapshot.engine_player;
        if waiting_on_engine {
            out.push_str(&format!("Engine ({}) is thinking...", snapshot.current_player));
        } else {
            out.push_str(&format!("Player {} to move", snapshot.current_player));
        }
    }
    out
}
