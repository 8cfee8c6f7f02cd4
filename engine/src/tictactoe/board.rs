use std::fmt;
use std::str::FromStr;
use super::types::{BOARD_SIZE, Cell, GameStatus, LINES, Mark, Move};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveError {
    OutOfRange { index: usize },
    Occupied { index: usize },
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::OutOfRange { index } => {
                write!(f, "Illegal move: cell {} is outside 0..{}", index, BOARD_SIZE - 1)
            }
            MoveError::Occupied { index } => write!(f, "Illegal move: cell {} is already marked", index),
        }
    }
}

impl std::error::Error for MoveError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardParseError {
    InvalidSymbol(char),
    WrongCellCount(usize),
}

impl fmt::Display for BoardParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardParseError::InvalidSymbol(c) => write!(f, "Invalid cell symbol: {:?}", c),
            BoardParseError::WrongCellCount(n) => {
                write!(f, "Expected {} cells, found {}", BOARD_SIZE, n)
            }
        }
    }
}

impl std::error::Error for BoardParseError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_cells(cells: [Cell; BOARD_SIZE]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Cell; BOARD_SIZE] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<Cell> {
        self.cells.get(index).copied()
    }

    /// Returns a copy of the board with `mark` at `index`; `self` is untouched.
    pub fn place(&self, index: Move, mark: Mark) -> Result<Board, MoveError> {
        match self.cells.get(index) {
            None => Err(MoveError::OutOfRange { index }),
            Some(cell) if !cell.is_empty() => Err(MoveError::Occupied { index }),
            Some(_) => Ok(self.with_mark(index, mark)),
        }
    }

    /// Search probe for a move already known to be legal.
    pub(crate) fn with_mark(&self, index: Move, mark: Mark) -> Board {
        let mut next = *self;
        next.cells[index] = mark.into();
        next
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|&[a, b, c]| {
            let mark = self.cells[a].mark()?;
            (self.cells[b] == self.cells[a] && self.cells[c] == self.cells[a]).then_some(mark)
        })
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|cell| !cell.is_empty())
    }

    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    pub fn legal_moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_empty())
            .map(|(index, _)| index)
    }

    pub fn count(&self, mark: Mark) -> usize {
        let cell = Cell::from(mark);
        self.cells.iter().filter(|&&c| c == cell).count()
    }

    /// X moves first, so O is due whenever X is one mark ahead.
    pub fn next_mark(&self) -> Mark {
        if self.count(Mark::X) > self.count(Mark::O) {
            Mark::O
        } else {
            Mark::X
        }
    }

    pub fn status(&self) -> GameStatus {
        if let Some(mark) = self.winner() {
            GameStatus::won_by(mark)
        } else if self.is_full() {
            GameStatus::Draw
        } else {
            GameStatus::InProgress
        }
    }
}

/// Places the mark whose turn it is on `board`.
pub fn apply_human_move(board: &Board, index: Move) -> Result<Board, MoveError> {
    board.place(index, board.next_mark())
}

impl FromStr for Board {
    type Err = BoardParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = Vec::with_capacity(BOARD_SIZE);
        for c in s.chars() {
            let cell = match c {
                'X' | 'x' => Cell::X,
                'O' | 'o' => Cell::O,
                '.' | '-' | '_' => Cell::Empty,
                '|' => continue,
                c if c.is_whitespace() => continue,
                c => return Err(BoardParseError::InvalidSymbol(c)),
            };
            cells.push(cell);
        }

        let cells: [Cell; BOARD_SIZE] = cells
            .try_into()
            .map_err(|v: Vec<Cell>| BoardParseError::WrongCellCount(v.len()))?;
        Ok(Board { cells })
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (row, chunk) in self.cells.chunks(3).enumerate() {
            if row > 0 {
                writeln!(f, "---+---+---")?;
            }
            writeln!(f, " {} | {} | {} ", chunk[0].symbol(), chunk[1].symbol(), chunk[2].symbol())?;
        }
        Ok(())
    }
}
