mod command;
mod config;
mod terminal_broadcaster;

use clap::{Parser, ValueEnum};
use common::config::{EngineConfig, Validate};
use common::games::tictactoe::{OpponentMode, Player, TicTacToeSession, TicTacToeSessionSettings};
use common::{log, logger};
use tokio::io::{AsyncBufReadExt, BufReader};

use command::{ClientCommand, HELP, parse_command};
use terminal_broadcaster::TerminalBroadcaster;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    None,
    Optimal,
    Heuristic,
}

impl From<ModeArg> for OpponentMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::None => OpponentMode::None,
            ModeArg::Optimal => OpponentMode::Optimal,
            ModeArg::Heuristic => OpponentMode::Heuristic,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerArg {
    O,
    X,
}

impl From<PlayerArg> for Player {
    fn from(player: PlayerArg) -> Self {
        match player {
            PlayerArg::O => Player::O,
            PlayerArg::X => Player::X,
        }
    }
}

#[derive(Parser)]
#[command(name = "tictactoe_client", about = "Play tic-tac-toe against the engine in a terminal")]
struct Args {
    /// YAML config file; defaults to tictactoe_config.yaml next to the binary.
    #[arg(long)]
    config: Option<String>,

    #[arg(long, value_enum)]
    mode: Option<ModeArg>,

    /// Side played by the engine.
    #[arg(long, value_enum)]
    engine_player: Option<PlayerArg>,

    /// Pause before the engine replies, in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    #[arg(long)]
    seed: Option<u64>,

    /// Write the current options back to the config file.
    #[arg(long)]
    save_config: bool,

    #[arg(long)]
    use_log_prefix: bool,
}

impl Args {
    fn apply_overrides(&self, config: &mut EngineConfig) {
        if let Some(mode) = self.mode {
            config.opponent_mode = mode.into();
        }
        if let Some(player) = self.engine_player {
            config.engine_player = player.into();
        }
        if let Some(delay_ms) = self.delay_ms {
            config.bot_delay_ms = delay_ms;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let prefix = if args.use_log_prefix {
        Some("Client".to_string())
    } else {
        None
    };
    logger::init_logger(prefix);

    let config_manager = config::get_config_manager(args.config.as_deref());
    let mut engine_config = config_manager.get_config()?;
    args.apply_overrides(&mut engine_config);
    engine_config.validate()?;

    if args.save_config {
        config_manager.set_config(&engine_config)?;
        log!("Config saved");
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(run(TicTacToeSessionSettings::from(&engine_config)))
}

async fn run(settings: TicTacToeSessionSettings) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", HELP);
    let session = TicTacToeSession::start("local", &settings, TerminalBroadcaster).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }

        match parse_command(&line) {
            Ok(ClientCommand::PlaceMark(index)) => {
                if let Err(e) = session.submit_move(index).await {
                    println!("Move rejected: {}", e);
                }
            }
            Ok(ClientCommand::Reset) => session.reset().await,
            Ok(ClientCommand::Configure(mode)) => session.configure(mode).await,
            Ok(ClientCommand::ShowMoves) => {
                println!("Free cells: {:?}", session.available_moves().await);
            }
            Ok(ClientCommand::Help) => println!("{}", HELP),
            Ok(ClientCommand::Quit) => break,
            Err(e) => println!("{}", e),
        }
    }

    session.reset().await;
    log!("Client shut down");
    Ok(())
}
