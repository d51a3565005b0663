//! Detective Quest console game.
//!
//! Explore the mansion room by room, collect clues, and accuse the culprit.
//!
//! ```bash
//! cargo run -p detective -- --level master
//! cargo run -p detective -- --case my_case.json
//! cargo run -p detective -- --dump-case standard_case.json
//! ```

mod play;

use anyhow::Context;
use detective_core::{CaseFile, Investigation, InvestigationConfig, Level};
use std::io;

/// Log filter variable; falls back to `warn` (or `debug` with `--verbose`).
const LOG_ENV: &str = "DETECTIVE_LOG";

/// Default case file path when `--case` is not given.
const CASE_ENV: &str = "DETECTIVE_CASE";

/// Options collected from the command line.
#[derive(Debug, Default)]
struct Options {
    level: Level,
    case_path: Option<String>,
    dump_path: Option<String>,
    verbose: bool,
    help: bool,
}

fn main() -> anyhow::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let options = parse_args(&args)?;

    if options.help {
        print_help();
        return Ok(());
    }

    init_tracing(options.verbose)?;

    if let Some(path) = &options.dump_path {
        CaseFile::standard()
            .save(path)
            .with_context(|| format!("failed to write case file to {path}"))?;
        println!("Standard case written to {path}");
        return Ok(());
    }

    let case = match options
        .case_path
        .clone()
        .or_else(|| std::env::var(CASE_ENV).ok())
    {
        Some(path) => {
            CaseFile::load(&path).with_context(|| format!("failed to load case file {path}"))?
        }
        None => CaseFile::standard(),
    };

    let config = InvestigationConfig::standard()
        .with_level(options.level)
        .with_case(case);
    let game = Investigation::new(config).context("invalid case")?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    play::run(game, &mut stdin.lock(), &mut stdout.lock())?;
    Ok(())
}

fn init_tracing(verbose: bool) -> anyhow::Result<()> {
    let level = if verbose { "debug" } else { "warn" };
    let filter = tracing_subscriber::EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn parse_args(args: &[String]) -> anyhow::Result<Options> {
    let mut options = Options::default();

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--level" => {
                let value = args.get(i + 1).context("--level needs a value")?;
                options.level = value.parse::<Level>().map_err(anyhow::Error::msg)?;
                i += 1;
            }
            "--case" => {
                options.case_path = Some(args.get(i + 1).context("--case needs a path")?.clone());
                i += 1;
            }
            "--dump-case" => {
                options.dump_path =
                    Some(args.get(i + 1).context("--dump-case needs a path")?.clone());
                i += 1;
            }
            "--verbose" | "-v" => options.verbose = true,
            "--help" | "-h" => options.help = true,
            other => anyhow::bail!("unknown argument: {other} (try --help)"),
        }
        i += 1;
    }

    Ok(options)
}

fn print_help() {
    println!("Detective Quest - explore the mansion and accuse the culprit");
    println!();
    println!("USAGE:");
    println!("  detective [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  --level <LEVEL>     novice, adventurer or master (default: master)");
    println!("  --case <PATH>       Play a case from a JSON file (or set {CASE_ENV})");
    println!("  --dump-case <PATH>  Write the standard case as JSON and exit");
    println!("  -v, --verbose       Log game events to stderr (or set {LOG_ENV})");
    println!("  -h, --help          Show this help");
    println!();
    println!("IN GAME:");
    println!("  e  go left    d  go right    s  leave and go to the accusation");
}
