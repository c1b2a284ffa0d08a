use clap::Parser;
use crooked_ttt::{
    core::{Difficulty, GameMode},
    player::console::{ConsoleCommand, ConsolePlayer},
    session::{Command, Event, GameSession, SessionState},
    TttError,
};
use log::Level;
use rand::{rngs::StdRng, Rng as _, SeedableRng as _};

/// A Tic-Tac-Toe game for the command line, with a cool AI integrated!
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Play against a friend or against the AI
    #[arg(long, default_value = "ai")]
    mode: GameMode,

    /// How hard the AI plays. Adversarial cheats.
    #[arg(long, default_value = "medium")]
    difficulty: Difficulty,

    /// The seed for the random number generator
    #[arg(long)]
    seed: Option<u64>,

    /// More output, repeat for even more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn log_level(verbose: u8) -> Level {
    match verbose {
        0 => Level::Warn,
        1 => Level::Info,
        2 => Level::Debug,
        _ => Level::Trace,
    }
}

fn describe(event: &Event) {
    match event {
        Event::Placed { mark, at } => println!("{mark} placed at {}", at.0 + 1),
        Event::Relocated { from, to } => {
            println!("Hmm... your mark seems to have slipped from {} to {}", from.0 + 1, to.0 + 1)
        }
        Event::CheatAborted { .. } => {}
        Event::AiPlaced { at } => println!("The AI plays {}", at.0 + 1),
        Event::TurnChanged(_) => {}
        Event::GameOver(_) => {}
        Event::Restarted => println!("New game"),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    simple_logger::init_with_level(log_level(args.verbose))?;
    let seed = args.seed.unwrap_or(StdRng::from_entropy().gen());
    println!("AI seed: {}", seed);
    let mut session = GameSession::new(args.mode, args.difficulty, StdRng::seed_from_u64(seed));

    println!("Input a number 1-9 to make a move 1 = top left, 9 = bottom right");
    println!("r restarts, q quits, pvp/ai switches mode, easy/medium/hard/adversarial sets the AI");
    let mut console = ConsolePlayer::new(std::io::stdin().lock());
    let mut out = std::io::stdout();
    loop {
        print!("{}", session.board());
        println!("{}", session.status_text());
        if session.state() == SessionState::GameOver {
            println!("r to play again");
        }
        let command = match console.read_command(session.board(), &mut out) {
            Ok(ConsoleCommand::Quit) | Err(TttError::InputClosed(_)) => break,
            Ok(ConsoleCommand::Place(addr)) => Command::Place(addr),
            Ok(ConsoleCommand::Restart) => Command::Restart,
            Ok(ConsoleCommand::Mode(mode)) => Command::SetMode(mode),
            Ok(ConsoleCommand::Difficulty(d)) => Command::SetDifficulty(d),
            Err(e) => return Err(e.into()),
        };
        match session.handle(command) {
            Ok(events) => events.iter().for_each(describe),
            Err(e) => println!("{e}"),
        }
    }
    let scores = session.scores();
    println!("X: {}  O: {}  draws: {}", scores.x, scores.o, scores.draws);
    Ok(())
}
