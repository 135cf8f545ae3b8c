//! Winning line analysis for N×N boards with a K-in-a-row win condition

use super::{Cell, Geometry, Player};

/// A run of `len` cells starting at `start`, stepping `stride` indices each time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line {
    pub start: usize,
    pub stride: usize,
    pub len: usize,
}

impl Line {
    /// Cell indices covered by this line
    pub fn positions(self) -> impl Iterator<Item = usize> {
        (0..self.len).map(move |i| self.start + i * self.stride)
    }
}

/// Utility for enumerating and checking winning lines on a board
#[derive(Debug, Clone, Copy)]
pub struct LineAnalyzer {
    geometry: Geometry,
}

impl LineAnalyzer {
    pub fn new(geometry: Geometry) -> Self {
        Self { geometry }
    }

    /// Every window of `win_length` cells, in scan order: rows top-to-bottom,
    /// columns left-to-right, then main diagonals, then anti-diagonals.
    pub fn lines(&self) -> impl Iterator<Item = Line> {
        let n = self.geometry.size();
        let k = self.geometry.win_length();
        let span = n - k + 1;

        let rows = (0..n).flat_map(move |r| {
            (0..span).map(move |c| Line {
                start: r * n + c,
                stride: 1,
                len: k,
            })
        });
        let columns = (0..n).flat_map(move |c| {
            (0..span).map(move |r| Line {
                start: r * n + c,
                stride: n,
                len: k,
            })
        });
        let diagonals = (0..span).flat_map(move |r| {
            (0..span).map(move |c| Line {
                start: r * n + c,
                stride: n + 1,
                len: k,
            })
        });
        let anti_diagonals = (0..span).flat_map(move |r| {
            (k - 1..n).map(move |c| Line {
                start: r * n + c,
                stride: n - 1,
                len: k,
            })
        });

        rows.chain(columns).chain(diagonals).chain(anti_diagonals)
    }

    /// Owner of the first uniformly-filled line, if any
    pub fn winner(&self, cells: &[Cell]) -> Option<Player> {
        self.lines().find_map(|line| Self::line_owner(cells, line))
    }

    fn line_owner(cells: &[Cell], line: Line) -> Option<Player> {
        let first = cells[line.start].to_player()?;
        let target = first.to_cell();
        line.positions()
            .all(|idx| cells[idx] == target)
            .then_some(first)
    }
}
