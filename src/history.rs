use std::fmt;

use crate::board::{Board, Mark, Position, Verdict, SQUARES};
use crate::Error;

/// A board together with the square played to reach it.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pub board: Board,
    pub last_move: Option<usize>,
}

impl Snapshot {
    pub fn initial() -> Snapshot {
        Snapshot {
            board: Board::new(),
            last_move: None,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Status {
    Winner(Mark),
    Draw,
    NextPlayer(Mark),
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Winner(mark) => write!(f, "Winner: {}", mark),
            Status::Draw => f.write_str("Draw!"),
            Status::NextPlayer(mark) => write!(f, "Next player: {}", mark),
        }
    }
}

/// Linear move history with a movable cursor.
///
/// Always holds at least the initial empty snapshot, and `current_step`
/// always indexes an existing snapshot. Playing from an earlier step drops
/// every snapshot after it before appending.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameHistory {
    snapshots: Vec<Snapshot>,
    current_step: usize,
}

impl Default for GameHistory {
    fn default() -> Self {
        Self::new()
    }
}

impl GameHistory {
    pub fn new() -> GameHistory {
        GameHistory {
            snapshots: vec![Snapshot::initial()],
            current_step: 0,
        }
    }

    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn current_step(&self) -> usize {
        self.current_step
    }

    pub fn current_snapshot(&self) -> &Snapshot {
        &self.snapshots[self.current_step]
    }

    /// X moves on even steps, O on odd ones.
    pub fn next_mark(&self) -> Mark {
        if self.current_step % 2 == 0 {
            Mark::X
        } else {
            Mark::O
        }
    }

    pub fn verdict(&self) -> Verdict {
        self.current_snapshot().board.evaluate()
    }

    pub fn is_draw(&self) -> bool {
        let board = &self.current_snapshot().board;
        board.is_draw(board.get_winner())
    }

    pub fn status(&self) -> Status {
        let board = &self.current_snapshot().board;
        match board.get_winner() {
            Some(mark) => Status::Winner(mark),
            None if board.is_full() => Status::Draw,
            None => Status::NextPlayer(self.next_mark()),
        }
    }

    pub fn play_move(&mut self, index: usize) -> Result<(), Error> {
        if index >= SQUARES {
            return Err(Error::InvalidIndex(index));
        }
        let current = self.current_snapshot();
        if current.board.get_winner().is_some() {
            return Err(Error::GameOver);
        }
        if !current.board.is_valid_move(index) {
            return Err(Error::InvalidMove(index));
        }

        let next = Snapshot {
            board: current.board.mark(index, self.next_mark()),
            last_move: Some(index),
        };
        self.snapshots.truncate(self.current_step + 1);
        self.snapshots.push(next);
        self.current_step = self.snapshots.len() - 1;
        Ok(())
    }

    pub fn jump_to(&mut self, step: usize) -> Result<(), Error> {
        if step >= self.snapshots.len() {
            return Err(Error::StepOutOfRange {
                step,
                len: self.snapshots.len(),
            });
        }
        self.current_step = step;
        Ok(())
    }

    pub fn reset(&mut self) {
        *self = GameHistory::new();
    }

    /// Label for the history entry at `step`, e.g. `Go to move #3 (r1, c2)`.
    pub fn describe_move(&self, step: usize) -> String {
        if step == 0 {
            return "Go to game start".to_string();
        }
        let mut desc = format!("Go to move #{}", step);
        if let Some(index) = self.snapshots.get(step).and_then(|s| s.last_move) {
            desc.push(' ');
            desc.push_str(&Position::from_index(index).to_string());
        }
        desc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn played(moves: &[usize]) -> GameHistory {
        let mut history = GameHistory::new();
        for &index in moves {
            history.play_move(index).unwrap();
        }
        history
    }

    #[test]
    fn starts_with_a_single_empty_snapshot() {
        let history = GameHistory::new();
        assert_eq!(history.snapshots(), &[Snapshot::initial()]);
        assert_eq!(history.current_step(), 0);
        assert_eq!(history.status(), Status::NextPlayer(Mark::X));
    }

    #[test]
    fn marks_alternate_starting_with_x() {
        let history = played(&[0, 1, 2]);
        let board = history.current_snapshot().board;
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(1), Some(Mark::O));
        assert_eq!(board.get(2), Some(Mark::X));
        assert_eq!(history.next_mark(), Mark::O);
        assert_eq!(history.current_snapshot().last_move, Some(2));
    }

    #[test]
    fn playing_an_occupied_square_changes_nothing() {
        let mut history = played(&[4]);
        let before = history.clone();
        assert!(matches!(history.play_move(4), Err(Error::InvalidMove(4))));
        assert_eq!(history, before);
    }

    #[test]
    fn out_of_range_square_is_rejected() {
        let mut history = GameHistory::new();
        assert!(matches!(history.play_move(9), Err(Error::InvalidIndex(9))));
        assert_eq!(history, GameHistory::new());
    }

    #[test]
    fn replaying_from_an_earlier_step_discards_the_future() {
        let mut history = played(&[0, 1, 2]);
        let kept = history.snapshots()[..2].to_vec();

        history.jump_to(1).unwrap();
        history.play_move(5).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.current_step(), 2);
        assert_eq!(&history.snapshots()[..2], &kept[..]);
        let board = history.current_snapshot().board;
        assert_eq!(board.get(5), Some(Mark::O));
        assert_eq!(board.get(2), None);
    }

    #[test]
    fn jump_is_a_view_change_only() {
        let mut history = played(&[0, 3, 1, 4, 2]);
        assert_eq!(history.status(), Status::Winner(Mark::X));

        history.jump_to(2).unwrap();
        assert_eq!(history.len(), 6);
        assert_eq!(history.status(), Status::NextPlayer(Mark::X));

        history.jump_to(5).unwrap();
        assert_eq!(history.status(), Status::Winner(Mark::X));
    }

    #[test]
    fn jump_past_the_end_is_rejected() {
        let mut history = played(&[0, 1]);
        let err = history.jump_to(3).unwrap_err();
        assert!(matches!(err, Error::StepOutOfRange { step: 3, len: 3 }));
        assert_eq!(history.current_step(), 2);
    }

    #[test]
    fn no_moves_after_a_win() {
        let mut history = played(&[0, 3, 1, 4, 2]);
        let before = history.clone();
        for index in [5, 6, 7, 8] {
            assert!(matches!(history.play_move(index), Err(Error::GameOver)));
        }
        assert_eq!(history, before);
    }

    #[test]
    fn reset_restores_the_initial_history() {
        let mut history = played(&[0, 1, 2, 3]);
        history.jump_to(1).unwrap();
        history.reset();
        assert_eq!(history, GameHistory::new());
    }

    #[test]
    fn draw_is_reported() {
        // X O X / X O O / O X X
        let history = played(&[0, 1, 2, 4, 3, 5, 7, 6, 8]);
        assert_eq!(history.verdict().winner, None);
        assert!(history.is_draw());
        assert_eq!(history.status(), Status::Draw);
        assert_eq!(history.status().to_string(), "Draw!");
    }

    #[test]
    fn describes_moves_with_row_and_column() {
        let history = played(&[0, 4]);
        assert_eq!(history.describe_move(0), "Go to game start");
        assert_eq!(history.describe_move(1), "Go to move #1 (r1, c1)");
        assert_eq!(history.describe_move(2), "Go to move #2 (r2, c2)");
    }

    #[test]
    fn status_strings() {
        assert_eq!(Status::Winner(Mark::O).to_string(), "Winner: O");
        assert_eq!(Status::NextPlayer(Mark::X).to_string(), "Next player: X");
    }
}
