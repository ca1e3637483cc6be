//! Headless self-play runner
//!
//! Plays the scripted opponent against itself with the starter deck and
//! prints win statistics as JSON or text.

use clap::{Parser, ValueEnum};
use serde::Serialize;

use scholar_duel::ai::{play_match, Difficulty, HeuristicPolicy};
use scholar_duel::cards::starter_catalog;
use scholar_duel::core::{PlayerId, RulesConfig};
use scholar_duel::deck::starter_deck;
use scholar_duel::rules::Duel;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Level {
    Easy,
    Normal,
    Hard,
}

impl From<Level> for Difficulty {
    fn from(level: Level) -> Self {
        match level {
            Level::Easy => Difficulty::Easy,
            Level::Normal => Difficulty::Normal,
            Level::Hard => Difficulty::Hard,
        }
    }
}

/// Self-play runner for the scholar duel engine
#[derive(Parser, Debug)]
#[command(name = "self_play")]
#[command(about = "Play scripted opponents against each other and report win rates")]
struct Args {
    /// Number of matches to play
    #[arg(long, default_value_t = 100)]
    games: u32,

    /// Base seed; match i uses seed + i
    #[arg(long)]
    seed: Option<u64>,

    /// Difficulty of the first player
    #[arg(long, value_enum, default_value_t = Level::Normal)]
    first: Level,

    /// Difficulty of the second player
    #[arg(long, value_enum, default_value_t = Level::Normal)]
    second: Level,

    /// Turn cap; longer matches count as draws
    #[arg(long, default_value_t = 200)]
    max_turns: u32,

    /// Optional rules file (JSON); defaults are used otherwise
    #[arg(long)]
    rules: Option<std::path::PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

#[derive(Debug, Default, Serialize)]
struct Summary {
    games: u32,
    first_wins: u32,
    second_wins: u32,
    draws: u32,
    first_win_rate: f64,
    average_turns: f64,
    seed: u64,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let config = match &args.rules {
        Some(path) => serde_json::from_str::<RulesConfig>(&std::fs::read_to_string(path)?)?,
        None => RulesConfig::default(),
    };

    let registry = starter_catalog();
    let deck = starter_deck(&registry, "Starter")?.build()?;

    let mut summary = Summary {
        games: args.games,
        seed,
        ..Summary::default()
    };
    let mut total_turns = 0u64;

    for game in 0..args.games {
        let match_seed = seed.wrapping_add(u64::from(game));
        let mut duel = Duel::start(config.clone(), match_seed, &deck, &deck);
        let mut first = HeuristicPolicy::new(args.first.into(), match_seed ^ 0x9E37_79B9);
        let mut second = HeuristicPolicy::new(args.second.into(), match_seed ^ 0x7F4A_7C15);

        let winner = play_match(&mut duel, &mut first, &mut second, args.max_turns)?;
        total_turns += u64::from(duel.state().turn);
        match winner {
            Some(PlayerId::ONE) => summary.first_wins += 1,
            Some(_) => summary.second_wins += 1,
            None => summary.draws += 1,
        }
        tracing::debug!(game, ?winner, turns = duel.state().turn, "match finished");
    }

    if args.games > 0 {
        summary.first_win_rate = f64::from(summary.first_wins) / f64::from(args.games);
        summary.average_turns = total_turns as f64 / f64::from(args.games);
    }

    match args.format.as_str() {
        "text" => {
            println!("Self-Play Summary");
            println!("=================");
            println!("Games:          {}", summary.games);
            println!("First wins:     {}", summary.first_wins);
            println!("Second wins:    {}", summary.second_wins);
            println!("Draws:          {}", summary.draws);
            println!("First win rate: {:.1}%", summary.first_win_rate * 100.0);
            println!("Average turns:  {:.1}", summary.average_turns);
            println!("Seed:           {}", summary.seed);
        }
        _ => println!("{}", serde_json::to_string_pretty(&summary)?),
    }
    Ok(())
}
