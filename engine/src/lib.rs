pub mod config;
pub mod logger;
pub mod tictactoe;

pub use tictactoe::{
    Board, Cell, EngineMove, GameError, GameStatus, Mark, Move, MoveError, MoveSource,
    TicTacToeGame, analyze_move, apply_human_move, choose_move,
};
