//! Pits the AI tiers against scripted humans, or against each other, and reports how it went.
//!

use anyhow::bail;
use clap::{Parser, Subcommand, ValueEnum};
use enum_iterator::{all, Sequence};
use itertools::Itertools as _;
use log::{info, Level};
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};
use serde::Serialize;

use crooked_ttt::{
    core::{Difficulty, GameMode, GameStatus, PlayerMark},
    game::run_match,
    player::{select_move, DifficultyAi},
    session::{Command, Event, GameSession, SessionState},
};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// More output, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The seed for the random number generators
    #[arg(long)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Play one AI tier against one kind of human
    Run {
        #[arg(short, long)]
        difficulty: Difficulty,

        #[arg(short, long, default_value = "random")]
        opponent: Opponent,

        #[arg(short, long, default_value = "100")]
        games: u32,
    },
    /// Every AI tier against every kind of human
    Sweep {
        #[arg(short, long, default_value = "100")]
        games: u32,
    },
    /// Two AI tiers against each other, no cheating
    Duel {
        #[arg(short = 'x', long)]
        crosses: Difficulty,

        #[arg(short = 'o', long)]
        naughts: Difficulty,

        #[arg(short, long, default_value = "100")]
        games: u32,
    },
}

/// How the scripted human picks moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Sequence, Serialize)]
enum Opponent {
    Random,
    Optimal,
}

impl Opponent {
    fn as_difficulty(&self) -> Difficulty {
        match self {
            Opponent::Random => Difficulty::Easy,
            Opponent::Optimal => Difficulty::Hard,
        }
    }
}

#[derive(Debug, Serialize)]
struct Report {
    x: String,
    o: String,
    games: u32,
    x_wins: u32,
    o_wins: u32,
    draws: u32,
    /// Human marks the AI moved
    relocations: u32,
}

fn run_against_human(
    difficulty: Difficulty,
    opponent: Opponent,
    games: u32,
    rng: &mut StdRng,
) -> anyhow::Result<Report> {
    let mut session = GameSession::new(GameMode::Ai, difficulty, StdRng::seed_from_u64(rng.gen()));
    let mut human_rng = StdRng::seed_from_u64(rng.gen());
    let mut relocations = 0;
    for _ in 0..games {
        session.handle(Command::Restart)?;
        while session.state() != SessionState::GameOver {
            let at = select_move(
                session.board(),
                PlayerMark::HUMAN,
                opponent.as_difficulty(),
                &mut human_rng,
            )?;
            let events = session.handle(Command::Place(at))?;
            relocations += events
                .iter()
                .filter(|e| matches!(e, Event::Relocated { .. }))
                .count() as u32;
        }
    }
    let scores = session.scores();
    Ok(Report {
        x: format!("{opponent:?} human"),
        o: format!("{difficulty} AI"),
        games,
        x_wins: scores.x,
        o_wins: scores.o,
        draws: scores.draws,
        relocations,
    })
}

fn run_duel(
    crosses: Difficulty,
    naughts: Difficulty,
    games: u32,
    rng: &mut StdRng,
) -> anyhow::Result<Report> {
    let mut x = DifficultyAi::new(PlayerMark::Cross, crosses, StdRng::seed_from_u64(rng.gen()));
    let mut o = DifficultyAi::new(PlayerMark::Naught, naughts, StdRng::seed_from_u64(rng.gen()));
    let mut report = Report {
        x: format!("{crosses} AI"),
        o: format!("{naughts} AI"),
        games,
        x_wins: 0,
        o_wins: 0,
        draws: 0,
        relocations: 0,
    };
    for _ in 0..games {
        match run_match(&mut x, &mut o)?.1 {
            GameStatus::Won(PlayerMark::Cross, _) => report.x_wins += 1,
            GameStatus::Won(PlayerMark::Naught, _) => report.o_wins += 1,
            GameStatus::Draw => report.draws += 1,
            GameStatus::InProgress => bail!("a match stopped before the game was over"),
        }
    }
    Ok(report)
}

fn print_reports(reports: &[Report], json: bool) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(reports)?);
        return Ok(());
    }
    println!(
        "{:<20} {:<20} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "X", "O", "games", "X won", "O won", "draws", "moved"
    );
    for r in reports {
        println!(
            "{:<20} {:<20} {:>6} {:>6} {:>6} {:>6} {:>6}",
            r.x, r.o, r.games, r.x_wins, r.o_wins, r.draws, r.relocations
        );
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let level = match args.verbose {
        0 => Level::Warn,
        1 => Level::Info,
        _ => Level::Debug,
    };
    simple_logger::init_with_level(level)?;
    let seed = args.seed.unwrap_or(StdRng::from_entropy().gen());
    info!("arena seed: {}", seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let reports = match args.command {
        Commands::Run {
            difficulty,
            opponent,
            games,
        } => vec![run_against_human(difficulty, opponent, games, &mut rng)?],
        Commands::Sweep { games } => all::<Difficulty>()
            .cartesian_product(all::<Opponent>().collect::<Vec<_>>())
            .map(|(difficulty, opponent)| run_against_human(difficulty, opponent, games, &mut rng))
            .collect::<anyhow::Result<Vec<_>>>()?,
        Commands::Duel {
            crosses,
            naughts,
            games,
        } => vec![run_duel(crosses, naughts, games, &mut rng)?],
    };
    print_reports(&reports, args.json)
}
