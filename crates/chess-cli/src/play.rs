//! Interactive play: one move or command per input line.

use crate::output::{write_json, GameSummary, MoveListing};
use chess_rules::Game;
use std::io::{BufRead, Write};
use tracing::info;

/// How `play` reports back.
#[derive(Debug, Clone, Copy)]
pub struct PlayOptions {
    pub show_board: bool,
    pub json: bool,
}

const HELP: &str = "\
Enter a move (e4, Nf3, exd5, O-O, e7e8q, 12... Nc6) or a command:
  moves   list legal moves for the side to move
  board   print the board
  fen     print the position as FEN
  undo    take back the last move
  reset   start a new game
  help    show this text
  quit    leave";

/// Reads lines from `input` until it ends or `quit` is entered.
///
/// Bad moves are reported on `out` and do not end the session.
pub fn run<R: BufRead, W: Write>(
    game: &mut Game,
    input: R,
    out: &mut W,
    options: PlayOptions,
) -> anyhow::Result<()> {
    if !options.json {
        writeln!(out, "{}", HELP)?;
    }
    report(game, out, options)?;

    for line in input.lines() {
        let line = line?;
        let command = line.trim();
        if command.is_empty() {
            continue;
        }

        match command {
            "quit" | "exit" => break,
            "help" => writeln!(out, "{}", HELP)?,
            "board" => writeln!(out, "{}", game.position().board)?,
            "fen" => print_fen(game, out, options)?,
            "moves" => {
                let listing = MoveListing {
                    color: game.side_to_move(),
                    moves: game.legal_moves_for_color(game.side_to_move()),
                };
                if options.json {
                    write_json(out, &listing)?;
                } else {
                    writeln!(out, "{}", listing.moves.join(" "))?;
                }
            }
            "undo" => match game.undo() {
                Some(record) => {
                    info!(notation = %record.notation, "took back move");
                    if !options.json {
                        writeln!(out, "took back {}", record.notation)?;
                    }
                    report(game, out, options)?;
                }
                None => writeln!(out, "nothing to undo")?,
            },
            "reset" => {
                game.reset();
                report(game, out, options)?;
            }
            text => match game.make_move_text(text) {
                Ok(record) => {
                    if options.json {
                        write_json(out, &record)?;
                    } else {
                        writeln!(out, "{}. {}", game.ply_count(), record.notation)?;
                    }
                    report(game, out, options)?;
                }
                Err(err) => {
                    if options.json {
                        write_json(out, &serde_json::json!({ "error": err.to_string() }))?;
                    } else {
                        writeln!(out, "error: {}", err)?;
                    }
                }
            },
        }
    }

    Ok(())
}

fn print_fen<W: Write>(game: &Game, out: &mut W, options: PlayOptions) -> anyhow::Result<()> {
    if options.json {
        write_json(out, &GameSummary::of(game))
    } else {
        writeln!(out, "{}", game.fen())?;
        Ok(())
    }
}

/// Board (when enabled) and whose turn it is, or a JSON summary.
fn report<W: Write>(game: &Game, out: &mut W, options: PlayOptions) -> anyhow::Result<()> {
    if options.json {
        return write_json(out, &GameSummary::of(game));
    }
    if options.show_board {
        writeln!(out, "{}", game.position().board)?;
    }
    if game.is_game_over() {
        writeln!(out, "game over: {}", game.state())?;
    } else {
        writeln!(out, "{} to move ({})", game.side_to_move(), game.state())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(game: &mut Game, input: &str, options: PlayOptions) -> String {
        let mut out = Vec::new();
        run(game, input.as_bytes(), &mut out, options).unwrap();
        String::from_utf8(out).unwrap()
    }

    const TEXT: PlayOptions = PlayOptions {
        show_board: false,
        json: false,
    };

    #[test]
    fn plays_moves_and_prints_fen() {
        let mut game = Game::new();
        let out = session(&mut game, "e4\n1... e5\nfen\n", TEXT);
        assert!(out.contains("1. e4"));
        assert!(out.contains("2. e5"));
        assert!(out.contains("rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2"));
        assert_eq!(game.ply_count(), 2);
    }

    #[test]
    fn bad_input_keeps_session_alive() {
        let mut game = Game::new();
        let out = session(&mut game, "e5\nNf3\n", TEXT);
        assert!(out.contains("error: no legal move matches 'e5'"));
        assert!(out.contains("1. Nf3"));
    }

    #[test]
    fn quit_stops_reading() {
        let mut game = Game::new();
        session(&mut game, "e4\nquit\ne5\n", TEXT);
        assert_eq!(game.ply_count(), 1);
    }

    #[test]
    fn undo_and_reset() {
        let mut game = Game::new();
        let out = session(&mut game, "undo\ne4\nundo\nd4\nreset\n", TEXT);
        assert!(out.contains("nothing to undo"));
        assert!(out.contains("took back e4"));
        assert_eq!(game.ply_count(), 0);
    }

    #[test]
    fn reports_game_over() {
        let mut game = Game::new();
        let out = session(&mut game, "f3\ne5\ng4\nQh4#\na3\n", TEXT);
        assert!(out.contains("game over: checkmate"));
        assert!(out.contains("error: game is over (checkmate)"));
    }

    #[test]
    fn shows_board_when_enabled() {
        let mut game = Game::new();
        let options = PlayOptions {
            show_board: true,
            json: false,
        };
        let out = session(&mut game, "e4\n", options);
        assert!(out.contains("4  . . . . P . . ."));
    }

    #[test]
    fn json_lines() {
        let mut game = Game::new();
        let options = PlayOptions {
            show_board: true,
            json: true,
        };
        let out = session(&mut game, "e4\nmoves\nbogus\n", options);
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        // summary, move record, summary, listing, error
        assert_eq!(lines.len(), 5);
        assert_eq!(lines[1]["notation"], "e4");
        assert_eq!(lines[2]["side_to_move"], "black");
        assert_eq!(lines[3]["moves"].as_array().unwrap().len(), 20);
        assert!(lines[4]["error"].is_string());
    }
}
