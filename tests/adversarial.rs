//! The cheating tier, through the public API
use std::str::FromStr;

use crooked_ttt::{
    core::{Difficulty, FixedSequence, GameMode, GameStatus, PlayerMark},
    game::{
        run_match,
        tictactoe::{TTTAddr, TTTBoard, WIN_LINES},
    },
    player::{
        adversarial::relocate, cheat_decision, impossible_move, should_cheat, worst_position,
        ABAi, DifficultyAi,
    },
    session::{Command, Event, GameSession},
};

fn board(s: &str) -> TTTBoard {
    TTTBoard::from_str(s).unwrap()
}

#[test]
fn optimal_play_from_both_sides_draws() {
    let mut x = ABAi::new(PlayerMark::Cross);
    let mut o = ABAi::new(PlayerMark::Naught);
    let (_, status) = run_match(&mut x, &mut o).unwrap();
    assert_eq!(status, GameStatus::Draw);
}

#[test]
fn adversarial_without_cheats_still_draws_perfect_play() {
    let mut x = ABAi::new(PlayerMark::Cross);
    let mut o = DifficultyAi::new(
        PlayerMark::Naught,
        Difficulty::Adversarial,
        FixedSequence::new(vec![0.0]),
    );
    let (_, status) = run_match(&mut x, &mut o).unwrap();
    assert_eq!(status, GameStatus::Draw);
}

#[test]
fn takes_its_winning_line_first() {
    // X also threatens 5, the AI ignores that and wins
    assert_eq!(impossible_move(&board("oo xx    ")), Ok(TTTAddr(2)));
}

#[test]
fn one_human_mark_and_a_low_draw_cheats() {
    let b = board("    x    ");
    let mut rng = FixedSequence::new(vec![0.5]);
    assert!(should_cheat(&b, TTTAddr(4), &mut rng));
}

#[test]
fn worst_position_skips_lines_the_ai_holds() {
    let b = board("xo       ");
    let chosen = worst_position(&b, TTTAddr(0)).unwrap();
    assert!([2, 3, 4, 5, 6, 7, 8].contains(&chosen.0));
    let after = b.with_move(chosen, PlayerMark::HUMAN).unwrap();
    for line in WIN_LINES.iter().filter(|l| l.contains(chosen.0)) {
        assert!(
            !(line.count(&after, PlayerMark::AI) >= 1 && line.count(&after, PlayerMark::HUMAN) >= 2),
            "picked {chosen} on {line:?}"
        );
    }
    assert_eq!(chosen, TTTAddr(7));
}

#[test]
fn relocation_round_trip() {
    let mut b = board("o   x    ");
    b.place_mark(TTTAddr(2), PlayerMark::HUMAN).unwrap();
    let humans = b.count(PlayerMark::HUMAN);
    let mut rng = FixedSequence::new(vec![0.0]);
    let decision = cheat_decision(&b, TTTAddr(2), &mut rng);
    assert!(decision.triggered);
    let to = decision.relocate_to.unwrap();
    relocate(&mut b, TTTAddr(2), to).unwrap();
    assert_eq!(b.get(TTTAddr(2)), None);
    assert_eq!(b.get(to), Some(PlayerMark::HUMAN));
    assert_eq!(b.count(PlayerMark::HUMAN), humans);
}

#[test]
fn high_draws_leave_the_mark_alone() {
    // The cheat check runs after the mark is down, so the early-game rule sees one human mark
    let mut s = GameSession::new(
        GameMode::Ai,
        Difficulty::Adversarial,
        FixedSequence::new(vec![0.99]),
    );
    let events = s.handle(Command::Place(TTTAddr(1))).unwrap();
    assert!(!events.iter().any(|e| matches!(e, Event::Relocated { .. })));
    assert!(s.board().count(PlayerMark::HUMAN) >= 1);
}

#[test]
fn cheating_session_plays_whole_games() {
    let mut s = GameSession::new(
        GameMode::Ai,
        Difficulty::Adversarial,
        FixedSequence::new(vec![0.0, 0.3, 0.8]),
    );
    let mut x = ABAi::new(PlayerMark::Cross);
    for _ in 0..5 {
        s.handle(Command::Restart).unwrap();
        while !s.board().game_is_over() {
            let at = x.best_move(s.board()).unwrap();
            s.handle(Command::Place(at)).unwrap();
        }
    }
    let scores = s.scores();
    assert_eq!(scores.x + scores.o + scores.draws, 5);
}
