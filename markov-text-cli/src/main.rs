use std::io::Write;
use std::path::PathBuf;

use clap::Parser;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use markov_text_core::io::{read_text, write_text};
use markov_text_core::pipeline::{ChainConfig, Query, RunConfig, run};
use markov_text_core::MarkovError;

/// Train word and character Markov chains on a text file, generate a
/// sequence with each and report transition probabilities.
#[derive(Parser, Debug)]
#[command(name = "markov-text", version, about)]
struct Args {
    /// Text file to learn from
    #[arg(short, long, default_value = "input.txt")]
    input: PathBuf,

    /// Where to write the report, `-` for stdout
    #[arg(short, long, default_value = "result.txt")]
    output: PathBuf,

    /// Number of words in a word-level context
    #[arg(long, default_value_t = 3)]
    word_order: usize,

    /// Number of characters in a char-level context
    #[arg(long, default_value_t = 4)]
    char_order: usize,

    /// Words to generate after the seed
    #[arg(long, default_value_t = 50)]
    word_length: usize,

    /// Characters to generate after the seed
    #[arg(long, default_value_t = 200)]
    char_length: usize,

    /// Word probability query as CONTEXT=TOKEN (repeatable)
    #[arg(long = "word-query", value_name = "CONTEXT=TOKEN")]
    word_queries: Vec<Query>,

    /// Char probability query as CONTEXT=TOKEN (repeatable)
    #[arg(long = "char-query", value_name = "CONTEXT=TOKEN")]
    char_queries: Vec<Query>,

    /// Seed for the random generator, for reproducible output
    #[arg(long)]
    seed: Option<u64>,
}

impl Args {
    /// Builds the run configuration, keeping the default queries
    /// when none are given on the command line.
    fn run_config(&self) -> RunConfig {
        let defaults = RunConfig::default();
        RunConfig {
            word: ChainConfig { order: self.word_order, length: self.word_length },
            char: ChainConfig { order: self.char_order, length: self.char_length },
            word_queries: if self.word_queries.is_empty() {
                defaults.word_queries
            } else {
                self.word_queries.clone()
            },
            char_queries: if self.char_queries.is_empty() {
                defaults.char_queries
            } else {
                self.char_queries.clone()
            },
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }
}

fn execute(args: &Args) -> Result<(), MarkovError> {
    let text = read_text(&args.input)?;
    info!("Read {} bytes from {}", text.len(), args.input.display());

    let report = run(&text, &args.run_config(), &mut args.rng())?;

    if args.output.as_os_str() == "-" {
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{report}")?;
    } else {
        write_text(&args.output, &report.to_string())?;
        info!("Report written to {}", args.output.display());
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    if let Err(e) = execute(&args) {
        eprintln!("Application error: {}", e);
        let mut current_err: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(&e);
        while let Some(source) = current_err {
            eprintln!("Caused by: {}", source);
            current_err = source.source();
        }
        std::process::exit(1);
    }
}
