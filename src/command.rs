use std::str::FromStr;

use crate::app::Event;
use crate::board::SQUARES;
use crate::Error;

pub const HELP: &str = "\
commands:
  1-9          mark a square, counted left to right from the top row
  j N, jump N  show the board after move N (0 is the game start)
  r, reset     start over
  s, sort      flip the order of the move list
  h, help, ?   show this message
  q, quit      leave the game";

/// One line of CLI input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Event(Event),
    Help,
    Quit,
}

impl FromStr for Command {
    type Err = Error;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(head) = words.next() else {
            return Err(Error::UnknownCommand(line.to_string()));
        };
        let rest: Vec<&str> = words.collect();

        let command = match (head, rest.as_slice()) {
            ("j" | "jump", [step]) => Command::Event(Event::JumpTo(step.parse()?)),
            ("r" | "reset", []) => Command::Event(Event::Reset),
            ("s" | "sort", []) => Command::Event(Event::ToggleSort),
            ("h" | "help" | "?", []) => Command::Help,
            ("q" | "quit", []) => Command::Quit,
            (square, []) if square.starts_with(|c: char| c.is_ascii_digit()) => {
                let square: usize = square.parse()?;
                if !(1..=SQUARES).contains(&square) {
                    return Err(Error::InvalidIndex(square));
                }
                Command::Event(Event::Play(square - 1))
            }
            _ => return Err(Error::UnknownCommand(line.trim().to_string())),
        };
        Ok(command)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Command, Error> {
        line.parse()
    }

    #[test]
    fn squares_are_one_based() {
        assert_eq!(parse("1").unwrap(), Command::Event(Event::Play(0)));
        assert_eq!(parse(" 9 ").unwrap(), Command::Event(Event::Play(8)));
    }

    #[test]
    fn squares_outside_the_board_are_rejected() {
        assert!(matches!(parse("0"), Err(Error::InvalidIndex(0))));
        assert!(matches!(parse("10"), Err(Error::InvalidIndex(10))));
    }

    #[test]
    fn bad_integers_are_reported() {
        assert!(matches!(parse("4x"), Err(Error::InvalidInteger(_))));
        assert!(matches!(parse("jump two"), Err(Error::InvalidInteger(_))));
    }

    #[test]
    fn word_commands() {
        assert_eq!(parse("j 3").unwrap(), Command::Event(Event::JumpTo(3)));
        assert_eq!(parse("jump 0").unwrap(), Command::Event(Event::JumpTo(0)));
        assert_eq!(parse("reset").unwrap(), Command::Event(Event::Reset));
        assert_eq!(parse("s").unwrap(), Command::Event(Event::ToggleSort));
        assert_eq!(parse("?").unwrap(), Command::Help);
        assert_eq!(parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn unknown_input() {
        assert!(matches!(parse(""), Err(Error::UnknownCommand(_))));
        assert!(matches!(parse("jump"), Err(Error::UnknownCommand(_))));
        assert!(matches!(parse("dance"), Err(Error::UnknownCommand(s)) if s == "dance"));
    }
}
