use std::fmt;
use crate::log;
use super::board::{Board, MoveError};
use super::bot_controller::{EngineMove, analyze_move};
use super::types::{GameStatus, Mark, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    GameOver,
    NotYourTurn,
    Illegal(MoveError),
}

impl fmt::Display for GameError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameError::GameOver => write!(f, "Game is already over"),
            GameError::NotYourTurn => write!(f, "Not your turn"),
            GameError::Illegal(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for GameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GameError::Illegal(e) => Some(e),
            _ => None,
        }
    }
}

impl From<MoveError> for GameError {
    fn from(e: MoveError) -> Self {
        GameError::Illegal(e)
    }
}

/// One human-vs-engine game. X always moves first.
#[derive(Debug, Clone)]
pub struct TicTacToeGame {
    board: Board,
    human_mark: Mark,
    current_mark: Mark,
    status: GameStatus,
    last_move: Option<Move>,
}

impl TicTacToeGame {
    pub fn new(human_mark: Mark) -> Self {
        Self {
            board: Board::empty(),
            human_mark,
            current_mark: Mark::X,
            status: GameStatus::InProgress,
            last_move: None,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn current_mark(&self) -> Mark {
        self.current_mark
    }

    pub fn last_move(&self) -> Option<Move> {
        self.last_move
    }

    pub fn human_mark(&self) -> Mark {
        self.human_mark
    }

    pub fn ai_mark(&self) -> Mark {
        self.human_mark.opponent()
    }

    pub fn is_ai_turn(&self) -> bool {
        self.status == GameStatus::InProgress && self.current_mark == self.ai_mark()
    }

    pub fn apply_human_move(&mut self, index: Move) -> Result<GameStatus, GameError> {
        self.ensure_turn(self.human_mark)?;
        self.place_mark(index)?;
        Ok(self.status)
    }

    pub fn play_ai_move(&mut self) -> Result<EngineMove, GameError> {
        self.ensure_turn(self.ai_mark())?;
        let engine_move = analyze_move(&self.board, self.current_mark);
        self.place_mark(engine_move.index)?;
        Ok(engine_move)
    }

    pub fn reset(&mut self) {
        self.board = Board::empty();
        self.current_mark = Mark::X;
        self.status = GameStatus::InProgress;
        self.last_move = None;
        log!("Board reset, {} to move", self.current_mark);
    }

    fn ensure_turn(&self, mark: Mark) -> Result<(), GameError> {
        if self.status != GameStatus::InProgress {
            return Err(GameError::GameOver);
        }
        if mark != self.current_mark {
            return Err(GameError::NotYourTurn);
        }
        Ok(())
    }

    fn place_mark(&mut self, index: Move) -> Result<(), GameError> {
        self.board = self.board.place(index, self.current_mark)?;
        self.last_move = Some(index);
        self.status = self.board.status();

        if self.status == GameStatus::InProgress {
            self.current_mark = self.current_mark.opponent();
        } else {
            log!("Game over: {:?}", self.status);
        }
        Ok(())
    }
}
