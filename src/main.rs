//! Wordtile - CLI
//!
//! Generate daily puzzles, re-run the estimator with other beam bounds,
//! benchmark many seeds, or browse puzzles in the TUI inspector.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use wordtile::{
    commands::{benchmark_seeds, run_benchmark, run_estimate, run_generate},
    config::GeneratorConfig,
    dictionary::WordList,
    output::{print_benchmark_result, print_estimate_result, print_generate_result},
    solver::BeamConfig,
};

#[derive(Parser)]
#[command(
    name = "wordtile",
    about = "Daily word-tile puzzle generator with beam-search score estimation",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Dictionary: 'embedded' (default) or path to a word list file
    #[arg(short = 'd', long, global = true, default_value = "embedded")]
    dictionary: String,

    /// JSON configuration file; missing fields keep their defaults
    #[arg(short = 'c', long, global = true)]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive puzzle inspector (default)
    Inspect {
        /// Seed phrase of the first puzzle shown
        #[arg(short, long, default_value = "wordtile")]
        seed: String,
    },

    /// Generate the puzzle for a seed
    Generate {
        /// Seed phrase, e.g. a date
        #[arg(short, long)]
        seed: String,

        /// Print the puzzle as JSON
        #[arg(long)]
        json: bool,

        /// Board size (odd, 5-15)
        #[arg(long)]
        size: Option<usize>,

        /// Letter pool size
        #[arg(long)]
        letters: Option<usize>,

        /// Wall-clock budget in milliseconds
        #[arg(long)]
        time_budget_ms: Option<u64>,

        /// Also print the solver's best line
        #[arg(short, long)]
        verbose: bool,
    },

    /// Re-estimate a seed's puzzle with different beam bounds
    Estimate {
        /// Seed phrase
        #[arg(short, long)]
        seed: String,

        /// Beam width (W)
        #[arg(short, long)]
        width: Option<usize>,

        /// Moves expanded per state (K)
        #[arg(short = 'k', long)]
        fan_out: Option<usize>,

        /// Turn budget (T)
        #[arg(short, long)]
        turns: Option<usize>,
    },

    /// Generate many puzzles and summarize
    Benchmark {
        /// Number of seeds to generate
        #[arg(short = 'n', long, default_value = "50")]
        count: usize,

        /// Seed prefix; seeds are PREFIX-1 .. PREFIX-N
        #[arg(short, long, default_value = "bench")]
        prefix: String,
    },
}

/// Load the dictionary based on the -d flag
fn load_dictionary(mode: &str) -> Result<WordList> {
    match mode {
        "embedded" => Ok(WordList::embedded()),
        path => WordList::load_from_file(path)
            .with_context(|| format!("loading dictionary {path}")),
    }
}

fn load_config(path: Option<&str>) -> Result<GeneratorConfig> {
    match path {
        Some(path) => Ok(GeneratorConfig::from_json_file(path)?),
        None => Ok(GeneratorConfig::default()),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let dictionary = load_dictionary(&cli.dictionary)?;
    let config = load_config(cli.config.as_deref())?;
    info!("loaded {} dictionary words", dictionary.len());

    // Default to the inspector if no command given
    let command = cli.command.unwrap_or(Commands::Inspect {
        seed: "wordtile".to_string(),
    });

    match command {
        Commands::Inspect { seed } => run_inspect_command(&dictionary, &config, &seed),
        Commands::Generate {
            seed,
            json,
            size,
            letters,
            time_budget_ms,
            verbose,
        } => {
            let mut config = config;
            if let Some(size) = size {
                config.board_size = size;
            }
            if let Some(letters) = letters {
                config.pool.size = letters;
            }
            if time_budget_ms.is_some() {
                config.time_budget_ms = time_budget_ms;
            }
            config.validate()?;
            run_generate_command(&dictionary, &config, &seed, json, verbose)
        }
        Commands::Estimate {
            seed,
            width,
            fan_out,
            turns,
        } => {
            let beam = BeamConfig {
                turns: turns.unwrap_or(config.beam.turns),
                width: width.unwrap_or(config.beam.width),
                fan_out: fan_out.unwrap_or(config.beam.fan_out),
            };
            let overridden = GeneratorConfig { beam, ..config.clone() };
            overridden.validate()?;
            let result = run_estimate(&seed, &config, beam, &dictionary);
            print_estimate_result(&result);
            Ok(())
        }
        Commands::Benchmark { count, prefix } => {
            println!("Generating {count} puzzles with seeds {prefix}-1..{prefix}-{count}...");
            let seeds = benchmark_seeds(&prefix, count);
            let result = run_benchmark(&seeds, &config, &dictionary, true);
            print_benchmark_result(&result);
            Ok(())
        }
    }
}

fn run_generate_command(
    dictionary: &WordList,
    config: &GeneratorConfig,
    seed: &str,
    json: bool,
    verbose: bool,
) -> Result<()> {
    let result = run_generate(seed, config, dictionary);
    if json {
        println!("{}", serde_json::to_string_pretty(&result.puzzle)?);
    } else {
        print_generate_result(&result, verbose);
    }
    Ok(())
}

fn run_inspect_command(dictionary: &WordList, config: &GeneratorConfig, seed: &str) -> Result<()> {
    use wordtile::interactive::{App, run_tui};

    let app = App::new(dictionary, config, seed);
    run_tui(app)
}
