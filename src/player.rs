pub mod adversarial;
pub mod alpha_beta;
pub mod console;
pub mod difficulty;
mod heuristics;
pub mod min_max;
pub mod random;

pub use adversarial::{cheat_decision, impossible_move, should_cheat, worst_position, CheatDecision};
pub use alpha_beta::ABAi;
pub use difficulty::{select_ai_move, select_move, DifficultyAi};
pub use heuristics::{ttt_terminal_score, WIN_SCORE};
pub use min_max::MinMaxAi;
pub use random::{random_move, RandomAi};
