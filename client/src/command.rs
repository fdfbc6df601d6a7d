use common::games::tictactoe::OpponentMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCommand {
    PlaceMark(usize),
    Reset,
    Configure(OpponentMode),
    ShowMoves,
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  0-8                         place a mark (cells are numbered row by row)
  reset                       start a new game
  mode none|optimal|heuristic change the opponent and start a new game
  moves                       list free cells
  help                        show this text
  quit                        leave";

pub fn parse_command(line: &str) -> Result<ClientCommand, String> {
    let mut parts = line.split_whitespace();
    let Some(head) = parts.next() else {
        return Err("empty command".to_string());
    };

    let command = match head.to_ascii_lowercase().as_str() {
        "reset" | "r" | "new" => ClientCommand::Reset,
        "moves" | "m" => ClientCommand::ShowMoves,
        "help" | "h" | "?" => ClientCommand::Help,
        "quit" | "q" | "exit" => ClientCommand::Quit,
        "mode" => {
            let mode = parts.next().ok_or("mode needs a value")?;
            ClientCommand::Configure(parse_mode(mode)?)
        }
        cell => {
            let index = cell
                .parse::<usize>()
                .map_err(|_| format!("unknown command: {}", line.trim()))?;
            ClientCommand::PlaceMark(index)
        }
    };

    if parts.next().is_some() {
        return Err(format!("unexpected input after command: {}", line.trim()));
    }
    Ok(command)
}

fn parse_mode(value: &str) -> Result<OpponentMode, String> {
    match value.to_ascii_lowercase().as_str() {
        "none" | "human" => Ok(OpponentMode::None),
        "optimal" | "hard" => Ok(OpponentMode::Optimal),
        "heuristic" | "easy" => Ok(OpponentMode::Heuristic),
        other => Err(format!("unknown mode: {}", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_cell() {
        assert_eq!(parse_command("4"), Ok(ClientCommand::PlaceMark(4)));
        assert_eq!(parse_command("  8 \n"), Ok(ClientCommand::PlaceMark(8)));
    }

    #[test]
    fn test_out_of_range_cell_is_left_to_the_session() {
        assert_eq!(parse_command("12"), Ok(ClientCommand::PlaceMark(12)));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(
            parse_command("mode heuristic"),
            Ok(ClientCommand::Configure(OpponentMode::Heuristic))
        );
        assert_eq!(
            parse_command("MODE None"),
            Ok(ClientCommand::Configure(OpponentMode::None))
        );
        assert!(parse_command("mode").is_err());
        assert!(parse_command("mode grandmaster").is_err());
    }

    #[test]
    fn test_parse_keywords() {
        assert_eq!(parse_command("reset"), Ok(ClientCommand::Reset));
        assert_eq!(parse_command("q"), Ok(ClientCommand::Quit));
        assert_eq!(parse_command("moves"), Ok(ClientCommand::ShowMoves));
        assert_eq!(parse_command("?"), Ok(ClientCommand::Help));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(parse_command("").is_err());
        assert!(parse_command("place 4").is_err());
        assert!(parse_command("4 5").is_err());
        assert!(parse_command("-1").is_err());
    }
}
