use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tictac::prelude::*;
use tokio::io::{AsyncBufReadExt, BufReader};

// ---------------------------------------------------------------------------
// Arguments
// ---------------------------------------------------------------------------

/// Play tic-tac-toe against the tictac server from a terminal.
#[derive(Parser, Debug)]
#[command(name = "tic-tac-toe", version)]
struct Args {
    /// API base URL. Empty posts to the origin instead.
    #[arg(long, env = "TICTAC_API_BASE", default_value = "")]
    api_base: String,

    /// Origin used when the API base is empty.
    #[arg(long, env = "TICTAC_ORIGIN", default_value = tictac::DEFAULT_ORIGIN)]
    origin: String,

    /// Bot that hands out the reward.
    #[arg(long, env = "TICTAC_BOT", default_value = tictac::DEFAULT_BOT_USERNAME)]
    bot: String,

    /// File the session identifier is kept in.
    #[arg(long, env = "TICTAC_STORE", default_value = tictac::DEFAULT_STORE_PATH)]
    store: PathBuf,

    /// Seconds to wait for the server before giving up on a move.
    /// 0 waits forever.
    #[arg(long, default_value_t = tictac::DEFAULT_REQUEST_TIMEOUT.as_secs())]
    timeout_secs: u64,
}

impl Args {
    fn request_timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}

// ---------------------------------------------------------------------------
// Input
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Play(usize),
    Reset,
    Help,
    Quit,
}

impl Command {
    fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" => None,
            "r" | "reset" => Some(Self::Reset),
            "h" | "help" | "?" => Some(Self::Help),
            "q" | "quit" | "exit" => Some(Self::Quit),
            other => other.parse().ok().map(Self::Play),
        }
    }
}

const HELP: &str = "\
  0-8    mark that cell (row-major, top-left is 0)
  r      start a new game
  q      quit";

// ---------------------------------------------------------------------------
// Output
// ---------------------------------------------------------------------------

/// Draws the board with free cells numbered so the user knows what to type.
fn render_board(board: &Board) -> String {
    let rows: Vec<String> = board
        .cells()
        .chunks(3)
        .enumerate()
        .map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(|(col, cell)| match cell {
                    Cell::Player => "X".to_string(),
                    Cell::Opponent => "O".to_string(),
                    Cell::Empty => (row * 3 + col).to_string(),
                })
                .collect::<Vec<_>>()
                .join(" | ")
        })
        .map(|row| format!(" {row} "))
        .collect();
    rows.join("\n---+---+---\n")
}

fn render(snap: &Snapshot) -> String {
    let mut out = render_board(&snap.board);
    let headline = match snap.status {
        GameStatus::InProgress => "your move",
        GameStatus::Win => "you win!",
        GameStatus::Lose => "you lose",
        GameStatus::Draw => "draw",
    };
    out.push_str(&format!("\n\n{headline}"));
    if let Some(error) = &snap.error {
        out.push_str(&format!("\nerror: {error}"));
    }
    if let Some(link) = &snap.reward_link {
        out.push_str(&format!("\nclaim your reward: {link}"));
    }
    if snap.status.is_terminal() {
        out.push_str("\n(r to play again)");
    }
    out
}

// ---------------------------------------------------------------------------
// Main loop
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let args = Args::parse();
    tictac::init_tracing();

    let request_timeout = args.request_timeout();
    let controller = TictacClientBuilder::new()
        .api_base(&args.api_base)
        .origin(&args.origin)
        .bot_username(&args.bot)
        .store_path(args.store)
        .request_timeout(request_timeout)
        .build()?;

    println!("session {}\n{HELP}\n", controller.session_id());
    println!("{}", render(&controller.snapshot()));

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let Some(command) = Command::parse(&line) else {
            continue;
        };
        match command {
            Command::Play(cell) => {
                if let MoveOutcome::Ignored(reason) = controller.play(cell).await {
                    println!("({reason})");
                    continue;
                }
            }
            Command::Reset => controller.reset(),
            Command::Help => {
                println!("{HELP}");
                continue;
            }
            Command::Quit => break,
        }
        println!("\n{}", render(&controller.snapshot()));
    }

    tracing::debug!("input closed, exiting");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_parse() {
        assert_eq!(Command::parse(" 4 \n"), Some(Command::Play(4)));
        assert_eq!(Command::parse("12"), Some(Command::Play(12)));
        assert_eq!(Command::parse("R"), Some(Command::Reset));
        assert_eq!(Command::parse("quit"), Some(Command::Quit));
        assert_eq!(Command::parse("?"), Some(Command::Help));
        assert_eq!(Command::parse(""), None);
        assert_eq!(Command::parse("-1"), None);
        assert_eq!(Command::parse("x"), None);
    }

    #[test]
    fn test_args_defaults() {
        let args = Args::try_parse_from(["tic-tac-toe"]).unwrap();
        assert_eq!(args.bot, "ttt432_bot");
        assert_eq!(args.request_timeout(), Some(Duration::from_secs(15)));
    }

    #[test]
    fn test_args_zero_timeout_disables_it() {
        let args = Args::try_parse_from(["tic-tac-toe", "--timeout-secs", "0"]).unwrap();
        assert_eq!(args.request_timeout(), None);
    }

    #[test]
    fn test_render_board_numbers_free_cells() {
        let mut cells = [Cell::Empty; 9];
        cells[4] = Cell::Player;
        cells[8] = Cell::Opponent;

        let out = render_board(&Board::from(cells));

        assert_eq!(
            out,
            " 0 | 1 | 2 \n---+---+---\n 3 | X | 5 \n---+---+---\n 6 | 7 | O "
        );
    }

    #[test]
    fn test_render_win_shows_reward_link() {
        let mut snap = Snapshot::initial(SessionId::new("S"));
        snap.status = GameStatus::Win;
        snap.reward_link = Some("https://t.me/ttt432_bot?start=S".into());

        let out = render(&snap);

        assert!(out.contains("you win!"));
        assert!(out.contains("claim your reward: https://t.me/ttt432_bot?start=S"));
        assert!(out.contains("r to play again"));
    }

    #[test]
    fn test_render_error() {
        let mut snap = Snapshot::initial(SessionId::new("S"));
        snap.error = Some("cellIndex out of range".into());

        assert!(render(&snap).contains("error: cellIndex out of range"));
    }
}
