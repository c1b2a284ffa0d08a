//! A game session: the board, whose turn it is, the scoreboard and the settings, driven by commands.
//!
//! One `handle` call runs a whole turn to completion in a fixed order:
//! human move, then the optional cheat, then the end-of-game check, then the AI move and another check.

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::{
    core::{Difficulty, GameMode, GameStatus, PlayerMark, RandomSource},
    error::{Result, TttError},
    game::tictactoe::{TTTAddr, TTTBoard},
    player::{
        adversarial::{cheat_decision, relocate},
        difficulty::select_ai_move,
    },
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    WaitingForHuman,
    /// The human's move is on the board and may still be moved by the AI
    Resolving,
    WaitingForAi,
    GameOver,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Place(TTTAddr),
    Restart,
    SetMode(GameMode),
    SetDifficulty(Difficulty),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    Placed { mark: PlayerMark, at: TTTAddr },
    Relocated { from: TTTAddr, to: TTTAddr },
    /// A cheat triggered but there was no free cell to move the mark to
    CheatAborted { at: TTTAddr },
    AiPlaced { at: TTTAddr },
    TurnChanged(PlayerMark),
    GameOver(GameStatus),
    Restarted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    pub x: u32,
    pub o: u32,
    pub draws: u32,
}

/// Everything a front end needs to draw the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub cells: [Option<PlayerMark>; 9],
    pub state: SessionState,
    pub mode: GameMode,
    pub difficulty: Difficulty,
    pub to_move: PlayerMark,
    pub status: GameStatus,
    pub status_text: String,
    pub scores: Scoreboard,
}

pub struct GameSession<R> {
    board: TTTBoard,
    state: SessionState,
    mode: GameMode,
    difficulty: Difficulty,
    to_move: PlayerMark,
    scores: Scoreboard,
    rng: R,
}

impl<R: RandomSource> GameSession<R> {
    pub fn new(mode: GameMode, difficulty: Difficulty, rng: R) -> Self {
        Self {
            board: TTTBoard::new(),
            state: SessionState::WaitingForHuman,
            mode,
            difficulty,
            to_move: PlayerMark::Cross,
            scores: Scoreboard::default(),
            rng,
        }
    }

    /// Picks up a game from an existing position. X is to move when both have the same number of marks.
    ///
    /// The human is always X against the AI, so in AI mode a board with O to move gets the AI's
    /// reply straight away.
    pub fn resume(board: TTTBoard, mode: GameMode, difficulty: Difficulty, rng: R) -> Result<Self> {
        let crosses = board.count(PlayerMark::Cross);
        let naughts = board.count(PlayerMark::Naught);
        if naughts > crosses || crosses > naughts + 1 {
            return Err(TttError::BadBoard(format!(
                "{crosses} X and {naughts} O cannot come from alternating moves"
            )));
        }
        let to_move = if crosses > naughts {
            PlayerMark::Naught
        } else {
            PlayerMark::Cross
        };
        let mut session = Self {
            board,
            state: SessionState::WaitingForHuman,
            mode,
            difficulty,
            to_move,
            scores: Scoreboard::default(),
            rng,
        };
        if session.board.game_is_over() {
            session.state = SessionState::GameOver;
        } else if mode == GameMode::Ai && to_move == PlayerMark::AI {
            session.state = SessionState::WaitingForAi;
            session.ai_turn(&mut Vec::new())?;
        }
        Ok(session)
    }

    pub fn board(&self) -> &TTTBoard {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn scores(&self) -> Scoreboard {
        self.scores
    }

    pub fn mode(&self) -> GameMode {
        self.mode
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn to_move(&self) -> PlayerMark {
        self.to_move
    }

    pub fn handle(&mut self, command: Command) -> Result<Vec<Event>> {
        debug!("{:?} in state {:?}", command, self.state);
        match command {
            Command::Place(at) => self.human_turn(at),
            Command::Restart => Ok(self.restart()),
            Command::SetMode(mode) => {
                self.mode = mode;
                Ok(self.restart())
            }
            Command::SetDifficulty(difficulty) => {
                self.difficulty = difficulty;
                Ok(self.restart())
            }
        }
    }

    pub fn status_text(&self) -> String {
        match self.board.game_status() {
            GameStatus::Won(mark, _) => format!("{mark} Wins!"),
            GameStatus::Draw => "Draw!".into(),
            GameStatus::InProgress => format!("Turn: {}", self.to_move),
        }
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            cells: self.board.cells(),
            state: self.state,
            mode: self.mode,
            difficulty: self.difficulty,
            to_move: self.to_move,
            status: self.board.game_status(),
            status_text: self.status_text(),
            scores: self.scores,
        }
    }

    fn restart(&mut self) -> Vec<Event> {
        self.board = TTTBoard::new();
        self.to_move = PlayerMark::Cross;
        self.state = SessionState::WaitingForHuman;
        vec![Event::Restarted, Event::TurnChanged(PlayerMark::Cross)]
    }

    fn human_turn(&mut self, at: TTTAddr) -> Result<Vec<Event>> {
        match self.state {
            SessionState::WaitingForHuman => {}
            SessionState::GameOver => {
                return Err(TttError::IllegalMove {
                    index: at.0,
                    reason: "game over",
                })
            }
            SessionState::Resolving | SessionState::WaitingForAi => {
                return Err(TttError::IllegalMove {
                    index: at.0,
                    reason: "not the human's turn",
                })
            }
        }
        let mark = match self.mode {
            GameMode::Pvp => self.to_move,
            GameMode::Ai => PlayerMark::HUMAN,
        };
        self.board.place_mark(at, mark)?;
        let mut events = vec![Event::Placed { mark, at }];

        if self.mode == GameMode::Pvp {
            if !self.finish_if_over(&mut events) {
                self.pass_turn(&mut events);
            }
            return Ok(events);
        }

        self.state = SessionState::Resolving;
        if self.difficulty == Difficulty::Adversarial {
            let decision = cheat_decision(&self.board, at, &mut self.rng);
            match (decision.triggered, decision.relocate_to) {
                (true, Some(to)) => {
                    relocate(&mut self.board, at, to)?;
                    debug!("moved the human's mark from {at} to {to}");
                    events.push(Event::Relocated { from: at, to });
                }
                (true, None) => events.push(Event::CheatAborted { at }),
                (false, _) => {}
            }
        }
        if self.finish_if_over(&mut events) {
            return Ok(events);
        }

        self.state = SessionState::WaitingForAi;
        self.pass_turn(&mut events);
        self.ai_turn(&mut events)?;
        Ok(events)
    }

    fn ai_turn(&mut self, events: &mut Vec<Event>) -> Result<()> {
        let ai_move = select_ai_move(&self.board, self.difficulty, &mut self.rng)?;
        self.board.place_mark(ai_move, PlayerMark::AI)?;
        events.push(Event::AiPlaced { at: ai_move });
        if !self.finish_if_over(events) {
            self.pass_turn(events);
        }
        Ok(())
    }

    fn pass_turn(&mut self, events: &mut Vec<Event>) {
        self.to_move = self.to_move.other();
        if self.mode == GameMode::Pvp || self.to_move == PlayerMark::HUMAN {
            self.state = SessionState::WaitingForHuman;
        }
        events.push(Event::TurnChanged(self.to_move));
    }

    fn finish_if_over(&mut self, events: &mut Vec<Event>) -> bool {
        let status = self.board.game_status();
        match status {
            GameStatus::InProgress => return false,
            GameStatus::Draw => self.scores.draws += 1,
            GameStatus::Won(PlayerMark::Cross, _) => self.scores.x += 1,
            GameStatus::Won(PlayerMark::Naught, _) => self.scores.o += 1,
        }
        info!("{}", self.status_text());
        self.state = SessionState::GameOver;
        events.push(Event::GameOver(status));
        true
    }
}
