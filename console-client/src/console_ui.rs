use std::io::{self, BufRead, Write};
use tictactoe_engine::{Board, EngineMove, GameStatus, Mark, Move, MoveSource, TicTacToeGame, analyze_move};
use crate::config::ConsoleConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place(Move),
    Quit,
    Invalid(String),
}

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") || trimmed.eq_ignore_ascii_case("quit") {
        return Command::Quit;
    }
    match trimmed.parse::<Move>() {
        Ok(index) => Command::Place(index),
        Err(_) => Command::Invalid(format!("Enter a cell number 0-8 or q to quit, got {:?}", trimmed)),
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Scoreboard {
    pub human_wins: u32,
    pub ai_wins: u32,
    pub draws: u32,
}

impl Scoreboard {
    fn record(&mut self, status: GameStatus, human_mark: Mark) {
        match status.winner() {
            Some(mark) if mark == human_mark => self.human_wins += 1,
            Some(_) => self.ai_wins += 1,
            None => self.draws += 1,
        }
    }
}

pub fn render_board(board: &Board, show_cell_numbers: bool) -> String {
    let mut out = String::new();
    for row in 0..3 {
        if row > 0 {
            out.push_str("---+---+---\n");
        }
        let symbols: Vec<String> = (row * 3..row * 3 + 3)
            .map(|index| match board.cell(index).and_then(|cell| cell.mark()) {
                Some(mark) => mark.to_string(),
                None if show_cell_numbers => index.to_string(),
                None => " ".to_string(),
            })
            .collect();
        out.push_str(&format!(" {} | {} | {} \n", symbols[0], symbols[1], symbols[2]));
    }
    out
}

fn describe_ai_move(mark: Mark, engine_move: &EngineMove, explain: bool) -> String {
    if !explain {
        return format!("AI ({}) plays {}", mark, engine_move.index);
    }
    let reason = match engine_move.source {
        MoveSource::Win => "completes a line".to_string(),
        MoveSource::Block => "blocks your line".to_string(),
        MoveSource::Search => format!(
            "searched {} positions, expects {}",
            engine_move.nodes_searched,
            match engine_move.score {
                Some(1) => "a win",
                Some(-1) => "a loss",
                _ => "a draw",
            }
        ),
    };
    format!("AI ({}) plays {}: {}", mark, engine_move.index, reason)
}

fn announce(status: GameStatus, human_mark: Mark) -> &'static str {
    match status.winner() {
        Some(mark) if mark == human_mark => "You win!",
        Some(_) => "AI wins!",
        None => "Draw!",
    }
}

/// Runs games until the input ends or the player quits, starting a new game after each result.
pub fn run<R: BufRead, W: Write>(config: &ConsoleConfig, input: R, output: &mut W) -> io::Result<Scoreboard> {
    let mut game = TicTacToeGame::new(config.human_mark);
    let mut scoreboard = Scoreboard::default();
    let mut lines = input.lines();

    writeln!(output, "You play {}. X moves first.", config.human_mark)?;

    loop {
        if game.is_ai_turn() {
            let engine_move = game.play_ai_move().map_err(io::Error::other)?;
            writeln!(output, "{}", describe_ai_move(game.ai_mark(), &engine_move, config.explain_ai_moves))?;
        }

        let status = game.status();
        if status.is_over() {
            write!(output, "{}", render_board(game.board(), false))?;
            writeln!(output, "{}", announce(status, game.human_mark()))?;
            scoreboard.record(status, game.human_mark());
            tictactoe_engine::log!("Game finished: {:?}, score {:?}", status, scoreboard);
            game.reset();
            writeln!(output, "New game.")?;
            continue;
        }

        write!(output, "{}", render_board(game.board(), config.show_cell_numbers))?;
        write!(output, "Your move ({}): ", game.human_mark())?;
        output.flush()?;

        let Some(line) = lines.next() else {
            writeln!(output)?;
            break;
        };

        match parse_command(&line?) {
            Command::Quit => break,
            Command::Invalid(message) => writeln!(output, "{}", message)?,
            Command::Place(index) => {
                if let Err(e) = game.apply_human_move(index) {
                    writeln!(output, "{}", e)?;
                }
            }
        }
    }

    writeln!(
        output,
        "Score: you {}, AI {}, draws {}",
        scoreboard.human_wins, scoreboard.ai_wins, scoreboard.draws
    )?;
    Ok(scoreboard)
}

/// Engine against itself from an empty board.
pub fn self_play<W: Write>(output: &mut W) -> io::Result<GameStatus> {
    let mut board = Board::empty();

    while !board.is_terminal() {
        let mark = board.next_mark();
        let engine_move = analyze_move(&board, mark);
        board = board.place(engine_move.index, mark).map_err(io::Error::other)?;
        writeln!(output, "{}", describe_ai_move(mark, &engine_move, true))?;
    }

    write!(output, "{}", board)?;
    let status = board.status();
    writeln!(output, "Result: {:?}", status)?;
    Ok(status)
}
