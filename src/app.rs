use std::fmt;

use clap::ValueEnum;
use tracing::{debug, info};

use crate::board::Board;
use crate::history::{GameHistory, Status};
use crate::Error;

/// Everything a front end can ask the game to do.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    Play(usize),
    JumpTo(usize),
    Reset,
    ToggleSort,
}

/// Display order of the move list. Never affects stored history.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum SortOrder {
    #[default]
    #[value(name = "asc")]
    Ascending,
    #[value(name = "desc")]
    Descending,
}

impl SortOrder {
    pub fn toggle(&self) -> SortOrder {
        match self {
            SortOrder::Ascending => SortOrder::Descending,
            SortOrder::Descending => SortOrder::Ascending,
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortOrder::Ascending => f.write_str("ASC"),
            SortOrder::Descending => f.write_str("DESC"),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderInput {
    pub board: Board,
    pub winning_line: &'static [usize],
    pub is_locked: bool,
}

impl RenderInput {
    pub fn is_playable(&self, index: usize) -> bool {
        !self.is_locked && self.board.is_valid_move(index)
    }

    pub fn is_highlighted(&self, index: usize) -> bool {
        self.winning_line.contains(&index)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveEntry {
    pub step: usize,
    pub description: String,
    pub is_current: bool,
}

/// Owns the game and the list ordering; every event goes through `handle`.
#[derive(Clone, Debug, Default)]
pub struct App {
    history: GameHistory,
    order: SortOrder,
}

impl App {
    pub fn new(order: SortOrder) -> App {
        App {
            history: GameHistory::new(),
            order,
        }
    }

    pub fn history(&self) -> &GameHistory {
        &self.history
    }

    pub fn order(&self) -> SortOrder {
        self.order
    }

    pub fn handle(&mut self, event: Event) -> Result<(), Error> {
        debug!(?event, step = self.history.current_step(), "handling event");

        let result = match event {
            Event::Play(index) => self.history.play_move(index),
            Event::JumpTo(step) => self.history.jump_to(step),
            Event::Reset => {
                self.history.reset();
                info!("game reset");
                Ok(())
            }
            Event::ToggleSort => {
                self.order = self.order.toggle();
                Ok(())
            }
        };

        match &result {
            Ok(()) => {
                if let Event::Play(index) = event {
                    match self.history.status() {
                        Status::Winner(mark) => {
                            info!(%mark, line = ?self.history.verdict().line, "game won")
                        }
                        Status::Draw => info!("game drawn"),
                        Status::NextPlayer(_) => debug!(index, "move accepted"),
                    }
                }
            }
            Err(err) => debug!(?event, %err, "event rejected"),
        }
        result
    }

    pub fn render_input(&self) -> RenderInput {
        let snapshot = self.history.current_snapshot();
        let verdict = snapshot.board.evaluate();
        RenderInput {
            board: snapshot.board,
            winning_line: verdict.line,
            is_locked: verdict.winner.is_some(),
        }
    }

    pub fn status(&self) -> Status {
        self.history.status()
    }

    /// History entries in display order, with the current step flagged.
    pub fn move_list(&self) -> Vec<MoveEntry> {
        let current = self.history.current_step();
        let mut entries: Vec<MoveEntry> = (0..self.history.len())
            .map(|step| MoveEntry {
                step,
                description: self.history.describe_move(step),
                is_current: step == current,
            })
            .collect();
        if self.order == SortOrder::Descending {
            entries.reverse();
        }
        entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Mark;

    fn app_with(moves: &[usize]) -> App {
        let mut app = App::default();
        for &index in moves {
            app.handle(Event::Play(index)).unwrap();
        }
        app
    }

    #[test]
    fn toggling_sort_reverses_only_the_display() {
        let mut app = app_with(&[0, 4]);
        let ascending = app.move_list();
        assert_eq!(
            ascending.iter().map(|e| e.step).collect::<Vec<_>>(),
            vec![0, 1, 2]
        );

        app.handle(Event::ToggleSort).unwrap();
        assert_eq!(app.order(), SortOrder::Descending);
        let descending = app.move_list();
        assert_eq!(
            descending.iter().map(|e| e.step).collect::<Vec<_>>(),
            vec![2, 1, 0]
        );
        assert_eq!(descending[0].description, "Go to move #2 (r2, c2)");
        assert!(descending[0].is_current);
        assert_eq!(app.history().current_step(), 2);
        assert_eq!(app.history().len(), 3);
    }

    #[test]
    fn jumping_while_descending_keeps_step_numbers() {
        let mut app = app_with(&[0, 4, 8]);
        app.handle(Event::ToggleSort).unwrap();
        app.handle(Event::JumpTo(1)).unwrap();

        let current: Vec<_> = app.move_list().into_iter().filter(|e| e.is_current).collect();
        assert_eq!(current.len(), 1);
        assert_eq!(current[0].step, 1);
        assert_eq!(current[0].description, "Go to move #1 (r1, c1)");
    }

    #[test]
    fn render_input_locks_a_won_board() {
        let app = app_with(&[0, 3, 1, 4, 2]);
        let render = app.render_input();
        assert!(render.is_locked);
        assert_eq!(render.winning_line, &[0, 1, 2]);
        assert!(render.is_highlighted(1));
        assert!(!render.is_playable(8));
    }

    #[test]
    fn render_input_for_a_running_game() {
        let app = app_with(&[4]);
        let render = app.render_input();
        assert!(!render.is_locked);
        assert!(render.winning_line.is_empty());
        assert!(render.is_playable(0));
        assert!(!render.is_playable(4));
    }

    #[test]
    fn rejected_events_leave_the_app_alone() {
        let mut app = app_with(&[4]);
        assert!(app.handle(Event::Play(4)).unwrap_err().is_rejection());
        assert!(app.handle(Event::JumpTo(7)).unwrap_err().is_rejection());
        assert_eq!(app.history().len(), 2);
        assert_eq!(app.history().current_step(), 1);
        assert_eq!(app.status(), Status::NextPlayer(Mark::O));
    }

    #[test]
    fn reset_keeps_the_sort_order() {
        let mut app = App::new(SortOrder::Descending);
        app.handle(Event::Play(0)).unwrap();
        app.handle(Event::Reset).unwrap();
        assert_eq!(app.order(), SortOrder::Descending);
        assert_eq!(app.history(), &GameHistory::new());
        assert_eq!(app.move_list().len(), 1);
    }

    #[test]
    fn sort_order_labels() {
        assert_eq!(SortOrder::Ascending.to_string(), "ASC");
        assert_eq!(SortOrder::Descending.to_string(), "DESC");
    }
}
