use std::{io, num::ParseIntError};

use thiserror::Error;

mod app;
mod board;
mod command;
mod config;
mod history;

pub use app::{App, Event, MoveEntry, RenderInput, SortOrder};
pub use board::{Board, Mark, Position, Verdict, SQUARES};
pub use command::{Command, HELP};
pub use config::Config;
pub use history::{GameHistory, Snapshot, Status};

#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid move: square {0} is already taken!")]
    InvalidMove(usize),

    #[error("invalid move: the game is already over!")]
    GameOver,

    #[error("invalid index: {0}!")]
    InvalidIndex(usize),

    #[error("invalid step: {step} (history has {len} entries)!")]
    StepOutOfRange { step: usize, len: usize },

    #[error("invalid input: {0}!")]
    InvalidInteger(#[from] ParseIntError),

    #[error("unknown command: {0:?}, type `help` for a list")]
    UnknownCommand(String),

    #[error("could not set up logging: {0}")]
    Logging(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    /// True for moves and jumps the game refused; these leave state untouched.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Error::InvalidMove(_)
                | Error::GameOver
                | Error::InvalidIndex(_)
                | Error::StepOutOfRange { .. }
        )
    }
}
