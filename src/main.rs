use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use keyfix::config::{AutocorrectConfig, MAX_WORD_LENGTH, MIN_WORD_LENGTH};
use keyfix::dictionary::Dictionary;
use keyfix::engine::Autocorrect;
use keyfix::keyboard::key_events_for_text;
use keyfix::model::KeyEvent;
use keyfix::replay::replay;
use keyfix::sim;

#[derive(Debug, Args, Clone)]
struct DictionaryArgs {
    /// JSON dictionary file: an array of {"typo": .., "correction": ..}.
    ///
    /// Defaults to the built-in table.
    #[arg(long, value_name = "PATH")]
    dictionary: Option<PathBuf>,
}

#[derive(Debug, Parser)]
#[command(name = "keyfix")]
#[command(about = "Keystroke-level autocorrect engine for keyboard firmware", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Feed typed text (or a key-event script) through the engine
    Replay {
        /// Input file, or '-' for stdin
        #[arg(long, value_name = "PATH")]
        input: PathBuf,

        /// Treat the input as a JSON array of key events instead of text
        #[arg(long)]
        events: bool,

        /// Print the full JSON report instead of the corrected host text
        #[arg(long)]
        json: bool,

        /// Output file (defaults to stdout)
        #[arg(long, value_name = "PATH")]
        output: Option<PathBuf>,

        /// Word buffer capacity, including one reserved slot
        #[arg(long, default_value_t = MAX_WORD_LENGTH)]
        max_word_length: usize,

        /// Shortest completed word that is looked up
        #[arg(long, default_value_t = MIN_WORD_LENGTH)]
        min_word_length: usize,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// Look up a single word
    Lookup {
        word: String,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },

    /// Print the dictionary as JSON
    Dict {
        /// Warn about typos shorter than this
        #[arg(long, default_value_t = MIN_WORD_LENGTH)]
        min_word_length: usize,

        #[command(flatten)]
        dictionary: DictionaryArgs,
    },
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn read_input(path: &PathBuf) -> Result<String> {
    if path.as_os_str() == std::ffi::OsStr::new("-") {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read stdin")?;
        return Ok(buf);
    }

    fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn write_output(path: &PathBuf, contents: &str) -> Result<()> {
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}

fn load_dictionary(args: &DictionaryArgs) -> Result<Dictionary> {
    match &args.dictionary {
        Some(path) => Dictionary::load(path),
        None => Ok(Dictionary::builtin()),
    }
}

fn parse_events(input: &str, as_script: bool) -> Result<Vec<KeyEvent>> {
    if as_script {
        return serde_json::from_str(input).context("failed to parse key-event JSON");
    }
    key_events_for_text(input)
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Replay {
            input,
            events,
            json,
            output,
            max_word_length,
            min_word_length,
            dictionary,
        } => {
            let cfg = AutocorrectConfig {
                max_word_length,
                min_word_length,
                ..Default::default()
            };
            let mut engine = Autocorrect::new(cfg, load_dictionary(&dictionary)?)?;

            let raw = read_input(&input)?;
            let key_events = parse_events(&raw, events)?;
            let report = replay(&mut engine, &key_events);

            let stats = sim::stats(&report.host_actions);
            eprintln!(
                "Replayed: {} events, {} corrections ({} failed), {} host key events, {} backspaces",
                key_events.len(),
                report.plans.len(),
                report.failures,
                stats.key_events,
                stats.backspaces
            );

            let rendered = if json {
                serde_json::to_string_pretty(&report).context("failed to serialize report")?
            } else {
                sim::simulate_host_text(&report.host_actions)?
            };

            match output {
                Some(out) => write_output(&out, &rendered)?,
                None => print!("{rendered}"),
            }
        }
        Command::Lookup { word, dictionary } => {
            let dict = load_dictionary(&dictionary)?;
            let folded = word.to_ascii_lowercase();
            let correction = dict
                .lookup(&folded)
                .ok_or_else(|| anyhow!("no correction for {word:?}"))?;
            println!("{correction}");
        }
        Command::Dict {
            min_word_length,
            dictionary,
        } => {
            let dict = load_dictionary(&dictionary)?;
            for typo in dict.unreachable_entries(min_word_length) {
                eprintln!(
                    "warning: {typo:?} is shorter than {min_word_length} letters and is never corrected"
                );
            }

            let json = serde_json::to_string_pretty(&dict.entries())
                .context("failed to serialize dictionary")?;
            println!("{json}");
        }
    }

    Ok(())
}
