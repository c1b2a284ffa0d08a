use std::io::{BufRead, Write};

use crate::{
    core::{Difficulty, GameMode},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard},
};

/// What the person at the keyboard asked for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    Place(TTTAddr),
    Restart,
    Mode(GameMode),
    Difficulty(Difficulty),
    Quit,
}

pub struct ConsolePlayer<R> {
    input: R,
}

impl<R: BufRead> ConsolePlayer<R> {
    pub fn new(input: R) -> Self {
        ConsolePlayer { input }
    }

    /// Keeps asking until the line parses to a command and, for a move, the cell is free.
    pub fn read_command(&mut self, b: &TTTBoard, out: &mut impl Write) -> Result<ConsoleCommand> {
        loop {
            let mut line = String::new();
            let n = self
                .input
                .read_line(&mut line)
                .map_err(|e| TttError::InputClosed(e.to_string()))?;
            if n == 0 {
                return Err(TttError::InputClosed("end of input".into()));
            }
            let complaint = match parse_command(&line) {
                Ok(ConsoleCommand::Place(addr)) if b.get(addr).is_some() => {
                    format!("Cell {} is taken, pick another", addr.0 + 1)
                }
                Ok(cmd) => return Ok(cmd),
                Err(msg) => msg,
            };
            writeln!(out, "{complaint}").map_err(|e| TttError::InputClosed(e.to_string()))?;
        }
    }
}

/// `1`-`9` places a mark (1 = top left, 9 = bottom right), `r` restarts, `q` quits,
/// `pvp`/`ai` switch mode and `easy`/`medium`/`hard`/`adversarial` switch difficulty.
pub fn parse_command(line: &str) -> std::result::Result<ConsoleCommand, String> {
    let word = line.trim().to_ascii_lowercase();
    match word.as_str() {
        "" => Err("At least one non-space character must be input".into()),
        "r" | "restart" => Ok(ConsoleCommand::Restart),
        "q" | "quit" => Ok(ConsoleCommand::Quit),
        "pvp" => Ok(ConsoleCommand::Mode(GameMode::Pvp)),
        "ai" => Ok(ConsoleCommand::Mode(GameMode::Ai)),
        "easy" => Ok(ConsoleCommand::Difficulty(Difficulty::Easy)),
        "medium" => Ok(ConsoleCommand::Difficulty(Difficulty::Medium)),
        "hard" => Ok(ConsoleCommand::Difficulty(Difficulty::Hard)),
        "adversarial" => Ok(ConsoleCommand::Difficulty(Difficulty::Adversarial)),
        w => match w.parse::<usize>() {
            Ok(num) if (1..=9).contains(&num) => Ok(ConsoleCommand::Place(TTTAddr(num - 1))),
            Ok(_) => Err("Number not in range 1-9".into()),
            Err(_) => Err(format!("Don't know what {w:?} means")),
        },
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;
    use std::str::FromStr;

    use super::*;

    #[test]
    fn parses_moves_one_based() {
        assert_eq!(parse_command("1\n"), Ok(ConsoleCommand::Place(TTTAddr(0))));
        assert_eq!(parse_command(" 9 "), Ok(ConsoleCommand::Place(TTTAddr(8))));
        assert!(parse_command("0").is_err());
        assert!(parse_command("10").is_err());
        assert_eq!(
            parse_command("Hard"),
            Ok(ConsoleCommand::Difficulty(Difficulty::Hard))
        );
    }

    #[test]
    fn skips_bad_lines_and_taken_cells() {
        let b = TTTBoard::from_str("x        ").unwrap();
        let mut player = ConsolePlayer::new(Cursor::new("\nbanana\n1\n5\n"));
        let mut out = Vec::new();
        assert_eq!(
            player.read_command(&b, &mut out),
            Ok(ConsoleCommand::Place(TTTAddr(4)))
        );
        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("Cell 1 is taken"));
    }

    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _: &[u8]) -> std::io::Result<usize> {
            Err(std::io::ErrorKind::BrokenPipe.into())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn lost_output_is_an_error() {
        let b = TTTBoard::new();
        let mut player = ConsolePlayer::new(Cursor::new("banana\n5\n"));
        assert!(matches!(
            player.read_command(&b, &mut BrokenPipe),
            Err(TttError::InputClosed(_))
        ));
    }

    #[test]
    fn end_of_input_is_an_error() {
        let b = TTTBoard::new();
        let mut player = ConsolePlayer::new(Cursor::new(""));
        assert!(matches!(
            player.read_command(&b, &mut std::io::sink()),
            Err(TttError::InputClosed(_))
        ));
    }
}
