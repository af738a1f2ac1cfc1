// Console chess for two players sharing one terminal
//
// Set `RUST_LOG=rookwise=debug` to see the engine's events.

use rookwise::{
    board::PrettyStyle,
    notation::{self, Command},
    Game, PromotePiece, PushStatus,
};
use std::io::{self, BufRead, Write};
use tracing_subscriber::EnvFilter;

fn read_line(stdin: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut s = String::new();
    if stdin.read_line(&mut s)? == 0 {
        return Ok(None);
    }
    Ok(Some(s))
}

fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let mut stdin = io::stdin().lock();
    let mut game = Game::new();

    loop {
        println!("{}", game.board().pretty(PrettyStyle::Utf8));
        if let Some(outcome) = game.outcome() {
            println!("Game finished: {}", outcome);
            break;
        }
        if game.board().is_check(game.side()) {
            println!("{} is in check!", game.side());
        }
        print!("{}'s turn. Enter move (e.g., E2 E4; EXIT to quit): ", game.side());
        io::stdout().flush()?;

        let line = match read_line(&mut stdin)? {
            Some(line) => line,
            None => break,
        };
        let (from, to, promote) = match notation::parse_command(&line) {
            Ok(Command::Exit) => {
                println!("Game exited.");
                break;
            }
            Ok(Command::Move { from, to, promote }) => (from, to, promote),
            Err(e) => {
                println!("Invalid input: {}", e);
                println!();
                continue;
            }
        };

        let res = match game.try_push(from, to) {
            Ok(PushStatus::Done(rec)) => Ok(rec),
            Ok(PushStatus::PromotionPending(pending)) => {
                let choice = match promote {
                    Some(p) => p,
                    None => {
                        print!("Promote to (Q, R, B, N) [Q]: ");
                        io::stdout().flush()?;
                        let line = read_line(&mut stdin)?.unwrap_or_default();
                        PromotePiece::from_choice(&line)
                    }
                };
                game.finish_promotion(pending, choice)
            }
            Err(e) => Err(e),
        };

        match res {
            Ok(rec) => {
                if let Some((color, _)) = rec.captured.parts() {
                    println!("{} captured: {}", color, rec.captured);
                }
            }
            Err(e) => println!("Move not allowed: {}", e),
        }
        println!();
    }
    Ok(())
}
