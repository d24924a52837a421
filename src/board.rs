use std::fmt;

pub const SQUARES: usize = 9;

static WIN_SEQUENCES: [[usize; 3]; 8] = [
    // Horizontal
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    // Vertical
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    // Diagonal
    [0, 4, 8],
    [2, 4, 6],
];

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mark {
    X,
    O,
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mark::X => f.write_str("X"),
            Mark::O => f.write_str("O"),
        }
    }
}

/// 1-based row and column of a square, for display only.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn from_index(index: usize) -> Position {
        Position {
            row: index / 3 + 1,
            col: index % 3 + 1,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(r{}, c{})", self.row, self.col)
    }
}

/// Outcome of scanning a board for three in a row.
///
/// `line` is empty when there is no winner, otherwise it holds the three
/// indices of the first completed sequence in scan order.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Verdict {
    pub winner: Option<Mark>,
    pub line: &'static [usize],
}

impl Verdict {
    const NONE: Verdict = Verdict {
        winner: None,
        line: &[],
    };
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Mark>; SQUARES],
}

impl Board {
    pub fn new() -> Self {
        let squares = [None; SQUARES];
        Self { squares }
    }

    pub fn from_squares(squares: [Option<Mark>; SQUARES]) -> Self {
        Self { squares }
    }

    pub fn get(&self, index: usize) -> Option<Mark> {
        self.squares.get(index).copied().flatten()
    }

    /// Returns a copy of this board with `mark` placed at `index`.
    pub fn mark(&self, index: usize, mark: Mark) -> Board {
        let mut new_board = *self;
        new_board.squares[index] = Some(mark);
        new_board
    }

    fn display_squares(&self) -> [&'static str; SQUARES] {
        let mut display = [""; SQUARES];
        for (dsquare, square) in display.iter_mut().zip(self.squares.iter()) {
            match square {
                Some(Mark::X) => *dsquare = "X",
                Some(Mark::O) => *dsquare = "O",
                None => *dsquare = " ",
            }
        }
        display
    }

    pub fn is_valid_move(&self, index: usize) -> bool {
        index < SQUARES && self.squares[index].is_none()
    }

    pub fn is_full(&self) -> bool {
        self.squares.iter().all(Option::is_some)
    }

    pub fn evaluate(&self) -> Verdict {
        for seq in &WIN_SEQUENCES {
            let first = self.squares[seq[0]];
            if first.is_some() && seq.iter().map(|i| self.squares[*i]).all(|x| x == first) {
                return Verdict {
                    winner: first,
                    line: seq,
                };
            }
        }
        Verdict::NONE
    }

    pub fn get_winner(&self) -> Option<Mark> {
        self.evaluate().winner
    }

    pub fn is_draw(&self, winner: Option<Mark>) -> bool {
        winner.is_none() && self.is_full()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ds = self.display_squares();
        writeln!(f, " {} | {} | {}", ds[0], ds[1], ds[2])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[3], ds[4], ds[5])?;
        f.write_str("---+---+---\n")?;
        writeln!(f, " {} | {} | {}", ds[6], ds[7], ds[8])?;
        Ok(())
    }
}
