use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::{GameStatus, PlayerMark};
use crate::error::{Result, TttError};

/// Represents a coordinate on the board
///
///  0 1 2
///  3 4 5
///  6 7 8
///
/// invariant: the number inside must be 0-8
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct TTTAddr(pub usize);

impl TTTAddr {
    pub fn new(index: usize) -> Result<Self> {
        if index < 9 {
            Ok(Self(index))
        } else {
            Err(TttError::IllegalMove {
                index,
                reason: "off the board",
            })
        }
    }

    /// The center and the four corners
    pub fn is_center_or_corner(&self) -> bool {
        matches!(self.0, 0 | 2 | 4 | 6 | 8)
    }
}

impl std::fmt::Display for TTTAddr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

/// Three cells in a row, column or diagonal
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct WinLine(pub [usize; 3]);

/// Rows (top to bottom), columns (left to right), then the diagonal pointing southeast and the one pointing northeast.
/// The order decides which line is reported when several are complete.
pub const WIN_LINES: [WinLine; 8] = [
    WinLine([0, 1, 2]),
    WinLine([3, 4, 5]),
    WinLine([6, 7, 8]),
    WinLine([0, 3, 6]),
    WinLine([1, 4, 7]),
    WinLine([2, 5, 8]),
    WinLine([0, 4, 8]),
    WinLine([2, 4, 6]),
];

impl WinLine {
    pub fn cells(&self) -> [usize; 3] {
        self.0
    }

    pub fn contains(&self, index: usize) -> bool {
        self.0.contains(&index)
    }

    pub fn count(&self, board: &TTTBoard, mark: PlayerMark) -> usize {
        self.0
            .iter()
            .filter(|&&i| board.0[i] == Some(mark))
            .count()
    }

    /// The empty cell of a line where `mark` holds the other two, i.e. a win-in-one
    pub fn completing_cell(&self, board: &TTTBoard, mark: PlayerMark) -> Option<TTTAddr> {
        if self.count(board, mark) != 2 {
            return None;
        }
        self.0
            .iter()
            .find(|&&i| board.0[i].is_none())
            .map(|&i| TTTAddr(i))
    }
}

/// The first member is the board entries from top left row wise to bottom right.
/// The second member is the victory counters. +1 for naughts. -1 for crosses.
/// Someone wins on a +3 or -3.
/// It holds one counter per entry of `WIN_LINES`, in the same order.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Default)]
pub struct TTTBoard([Option<PlayerMark>; 9], [i32; 8]);

impl TTTBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty cells in ascending order
    pub fn valid_moves(&self) -> Vec<TTTAddr> {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(num, &mark)| {
                if mark.is_none() {
                    Some(TTTAddr(num))
                } else {
                    None
                }
            })
            .collect()
    }

    pub fn game_status(&self) -> GameStatus {
        let line = self
            .1
            .iter()
            .zip(WIN_LINES.iter())
            .find(|(&counter, _)| counter.abs() == 3);
        match line {
            Some((&counter, &line)) => {
                let mark = if counter > 0 {
                    PlayerMark::Naught
                } else {
                    PlayerMark::Cross
                };
                GameStatus::Won(mark, line)
            }
            None if self.is_full() => GameStatus::Draw,
            None => GameStatus::InProgress,
        }
    }

    pub fn game_is_over(&self) -> bool {
        self.game_status().is_over()
    }

    /// Is there a winner?
    pub fn winner(&self) -> Option<PlayerMark> {
        self.game_status().winner()
    }

    pub fn place_mark(&mut self, a: TTTAddr, marker: PlayerMark) -> Result<()> {
        let TTTAddr(num) = TTTAddr::new(a.0)?;
        if self.0[num].is_some() {
            return Err(TttError::IllegalMove {
                index: num,
                reason: "cell is already taken",
            });
        }
        self.put(num, marker);
        Ok(())
    }

    /// A copy of the board with `marker` placed at `a`. The board itself is untouched.
    pub fn with_move(&self, a: TTTAddr, marker: PlayerMark) -> Result<Self> {
        let mut next = *self;
        next.place_mark(a, marker)?;
        Ok(next)
    }

    /// Empties the cell and returns whatever was there
    pub fn clear(&mut self, a: TTTAddr) -> Result<Option<PlayerMark>> {
        let TTTAddr(num) = TTTAddr::new(a.0)?;
        Ok(self.take(num))
    }

    pub fn get(&self, a: TTTAddr) -> Option<PlayerMark> {
        self.0.get(a.0).copied().flatten()
    }

    pub fn cells(&self) -> [Option<PlayerMark>; 9] {
        self.0
    }

    pub fn count(&self, marker: PlayerMark) -> usize {
        self.0.iter().filter(|&&q| q == Some(marker)).count()
    }

    pub fn n_moves_made(&self) -> usize {
        self.0.iter().filter(|&q| q.is_some()).count()
    }

    pub fn is_full(&self) -> bool {
        self.0.iter().all(|&q| q.is_some())
    }

    /// Unchecked placement for search. `num` must be an empty cell.
    pub(crate) fn put(&mut self, num: usize, marker: PlayerMark) {
        debug_assert!(self.0[num].is_none());
        self.bump(num, Self::delta(marker));
        self.0[num] = Some(marker);
    }

    /// Undo of `put`
    pub(crate) fn take(&mut self, num: usize) -> Option<PlayerMark> {
        let old = self.0[num].take();
        if let Some(marker) = old {
            self.bump(num, -Self::delta(marker));
        }
        old
    }

    fn delta(marker: PlayerMark) -> i32 {
        match marker {
            PlayerMark::Naught => 1,
            PlayerMark::Cross => -1,
        }
    }

    fn bump(&mut self, num: usize, delta: i32) {
        let row = num / 3;
        let col = num % 3;
        self.1[row] += delta;
        self.1[3 + col] += delta;
        if row == col {
            self.1[6] += delta;
        }
        if row == 2 - col {
            self.1[7] += delta;
        }
    }
}

/// Nine characters, row wise. `x`/`X` for crosses, `o`/`O` for naughts, space or `.` for empty.
impl FromStr for TTTBoard {
    type Err = TttError;

    fn from_str(s: &str) -> Result<Self> {
        if s.chars().count() != 9 {
            return Err(TttError::BadBoard(format!(
                "expected 9 cells, got {}",
                s.chars().count()
            )));
        }
        let mut b = Self::new();
        for (num, c) in s.chars().enumerate() {
            match c {
                'x' | 'X' => b.put(num, PlayerMark::Cross),
                'o' | 'O' => b.put(num, PlayerMark::Naught),
                ' ' | '.' => {}
                _ => {
                    return Err(TttError::BadBoard(format!(
                        "may only contain x, o, '.' or blank space, found {c:?}"
                    )))
                }
            }
        }
        Ok(b)
    }
}

impl std::fmt::Display for TTTBoard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let m = |m| match m {
            None => ' ',
            Some(PlayerMark::Cross) => 'X',
            Some(PlayerMark::Naught) => 'O',
        };
        writeln!(f, " ------- ")?;
        for row in self.0.chunks(3) {
            write!(f, "| ")?;
            row.iter().try_for_each(|&mark| write!(f, "{} ", m(mark)))?;
            writeln!(f, "|")?;
        }
        writeln!(f, " ------- ")
    }
}
