//! Board state representation and basic operations

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::types::StateKey;

/// Character used for an empty cell in state keys and persisted Q-tables.
pub const EMPTY_MARKER: char = ' ';

/// A cell on the board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    /// Character used in state keys.
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => EMPTY_MARKER,
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' => Some(Cell::O),
            _ => None,
        }
    }

    /// Player occupying this cell, if any
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }

    fn display_char(self) -> char {
        match self {
            Cell::Empty => '.',
            other => other.to_char(),
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_cell().to_char())
    }
}

impl FromStr for Player {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Player::X),
            "O" | "o" => Ok(Player::O),
            other => Err(crate::Error::ParsePlayer {
                input: other.to_string(),
            }),
        }
    }
}

/// Board dimensions and win condition.
///
/// A board is `size × size` cells; a player wins with `win_length`
/// consecutive symbols along a row, column, or either diagonal direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Geometry {
    size: usize,
    win_length: usize,
}

impl Geometry {
    /// Create a geometry, validating that the win condition fits on the board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidGeometry`] if `size` is zero or
    /// `win_length` is zero or larger than `size`.
    pub fn new(size: usize, win_length: usize) -> Result<Self, crate::Error> {
        if size == 0 || win_length == 0 || win_length > size {
            return Err(crate::Error::InvalidGeometry { size, win_length });
        }
        Ok(Self { size, win_length })
    }

    /// Classic 3×3 Tic-Tac-Toe, three in a row.
    pub const fn classic() -> Self {
        Self {
            size: 3,
            win_length: 3,
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn win_length(&self) -> usize {
        self.win_length
    }

    /// Total number of cells (`size²`).
    pub fn cell_count(&self) -> usize {
        self.size * self.size
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::classic()
    }
}

impl fmt::Display for Geometry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{} ({} in a row)", self.size, self.size, self.win_length)
    }
}

/// Fixed-length sequence of cells in row-major order.
///
/// The length is `geometry.cell_count()` for the lifetime of the board. Boards
/// are values: applying a move returns a new board and leaves the original
/// untouched. Whose turn it is is not part of the board; callers pass the
/// symbol explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: Vec<Cell>,
    geometry: Geometry,
}

impl Board {
    /// Create an empty board
    pub fn empty(geometry: Geometry) -> Self {
        Self {
            cells: vec![Cell::Empty; geometry.cell_count()],
            geometry,
        }
    }

    /// Parse a board from one character per cell.
    ///
    /// Accepts `X`/`x`, `O`/`o`, and a space or `.` for an empty cell.
    ///
    /// # Errors
    ///
    /// Returns an error if the text does not have exactly
    /// `geometry.cell_count()` characters or contains an unknown character.
    pub fn parse(text: &str, geometry: Geometry) -> Result<Self, crate::Error> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() != geometry.cell_count() {
            return Err(crate::Error::InvalidBoardLength {
                expected: geometry.cell_count(),
                got: chars.len(),
                context: text.to_string(),
            });
        }

        let cells = chars
            .iter()
            .enumerate()
            .map(|(position, &c)| {
                Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                    character: c,
                    position,
                    context: text.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { cells, geometry })
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Get cell at position, or `None` when out of range
    pub fn get(&self, pos: usize) -> Option<Cell> {
        self.cells.get(pos).copied()
    }

    /// Indices of empty cells, ascending.
    pub fn available_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place `player` at `pos` and return the resulting board.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MoveOutOfRange`] for an index past the end of
    /// the board and [`crate::Error::InvalidMove`] for an occupied cell.
    #[must_use = "apply_move returns a new board; the original is unchanged"]
    pub fn apply_move(&self, pos: usize, player: Player) -> Result<Board, crate::Error> {
        match self.get(pos) {
            None => Err(crate::Error::MoveOutOfRange {
                position: pos,
                cells: self.cells.len(),
            }),
            Some(Cell::Empty) => Ok(self.place(pos, player)),
            Some(_) => Err(crate::Error::InvalidMove { position: pos }),
        }
    }

    /// Unchecked placement for positions taken from `available_moves`.
    pub(crate) fn place(&self, pos: usize, player: Player) -> Board {
        debug_assert_eq!(self.cells[pos], Cell::Empty);
        let mut next = self.clone();
        next.cells[pos] = player.to_cell();
        next
    }

    /// First complete line found, scanning rows, columns, then both diagonal families.
    pub fn winner(&self) -> Option<Player> {
        LineAnalyzer::new(self.geometry).winner(&self.cells)
    }

    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// Check if the game is over (win or draw)
    pub fn is_terminal(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Result from `perspective`'s point of view: +1 win, -1 loss, 0 otherwise.
    ///
    /// Only meaningful on terminal boards; a board still in play scores 0.
    pub fn outcome(&self, perspective: Player) -> i8 {
        match self.winner() {
            Some(winner) if winner == perspective => 1,
            Some(_) => -1,
            None => 0,
        }
    }

    /// Count the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    pub fn state_key(&self) -> StateKey {
        StateKey::from(self)
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::empty(Geometry::classic())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.geometry.size();
        for (row_idx, row) in self.cells.chunks(size).enumerate() {
            if row_idx > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell.display_char())?;
            }
        }
        Ok(())
    }
}
