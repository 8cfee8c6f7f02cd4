mod board;
mod bot_controller;
mod game_state;
mod types;

pub use board::{Board, BoardParseError, MoveError, apply_human_move};
pub use bot_controller::{EngineMove, MoveSource, analyze_move, choose_move};
pub use game_state::{GameError, TicTacToeGame};
pub use types::{BOARD_SIZE, Cell, GameStatus, LINES, Line, Mark, Move};
