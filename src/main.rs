use clap::Parser;
use combo_odds::card::CardCatalog;
use combo_odds::game::TriggerIds;
use combo_odds::simulation::{
    build_deck, parse_combos_file, parse_deck_file, PossibilityCatalog, SimConfig, TrialRunner,
};

#[derive(Parser)]
#[command(name = "combo-odds")]
#[command(about = "Monte Carlo opening-hand combo probability simulator", long_about = None)]
struct Cli {
    /// Total deck size after filler padding
    #[arg(long)]
    deck_size: usize,

    /// Deck list file: whitespace-separated `<name> <copies>` pairs
    #[arg(short, long, default_value = "deck.txt")]
    deck: String,

    /// Combination rules file: one winning combination per line
    #[arg(short, long, default_value = "combo.txt")]
    combos: String,

    /// Number of trials to run
    #[arg(short, long)]
    trials: Option<u64>,

    /// Opening hand size
    #[arg(long)]
    hand_size: Option<usize>,

    /// Extras pool capacity
    #[arg(long)]
    extras: Option<usize>,

    /// Seed for random number generator (for reproducibility)
    #[arg(short, long)]
    seed: Option<u64>,

    /// Run trials on a single thread
    #[arg(long)]
    serial: bool,

    /// JSON file with run-parameter overrides
    #[arg(long)]
    config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => match SimConfig::from_file(path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("✗ Failed to load config '{}': {}", path, e);
                std::process::exit(1);
            }
        },
        None => SimConfig::default(),
    };

    if let Some(trials) = cli.trials {
        config.trials = trials;
    }
    if let Some(hand_size) = cli.hand_size {
        config.hand_size = hand_size;
    }
    if let Some(extras) = cli.extras {
        config.extras_capacity = extras;
    }

    if let Err(e) = config.validate(cli.deck_size) {
        eprintln!("✗ {}", e);
        std::process::exit(1);
    }

    let mut catalog = CardCatalog::new();

    let entries = match parse_deck_file(&cli.deck) {
        Ok(entries) => entries,
        Err(e) => {
            eprintln!("✗ Failed to parse deck file '{}': {}", cli.deck, e);
            std::process::exit(1);
        }
    };

    let build = match build_deck(&entries, cli.deck_size, &mut catalog) {
        Ok(build) => build,
        Err(e) => {
            eprintln!("✗ Failed to build deck: {}", e);
            std::process::exit(1);
        }
    };
    if build.truncated > 0 {
        eprintln!(
            "Warning: deck list exceeds deck size, {} copies truncated",
            build.truncated
        );
    }

    let triggers = TriggerIds::register(&mut catalog);

    let possibilities = match parse_combos_file(&cli.combos, &mut catalog) {
        Ok(possibilities) => possibilities,
        Err(e) => {
            eprintln!(
                "Warning: combos file '{}' not usable ({}), running with no winning combinations",
                cli.combos, e
            );
            PossibilityCatalog::new()
        }
    };

    eprintln!("✓ Deck: {} ({} cards)", cli.deck, build.deck.len());
    eprintln!(
        "✓ Combinations: {} ({} loaded)",
        cli.combos,
        possibilities.len()
    );

    let runner = TrialRunner::new(
        &build.deck,
        &possibilities,
        &triggers,
        config.hand_size,
        config.extras_capacity,
    );

    let report = if cli.serial {
        runner.run_serial(config.trials, cli.seed)
    } else {
        runner.run_parallel(config.trials, cli.seed, true)
    };

    eprintln!("Seed: {}", report.seed);
    println!("Total simulations: {}", report.trials);
    println!("Success rate: {:.2}%", report.success_rate());
    println!("Time taken: {:.2} seconds", report.elapsed.as_secs_f64());
}
