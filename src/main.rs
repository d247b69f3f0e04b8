//! `tomes` command line: analyze a book directory or simplify its summaries.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{ArgAction, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use tomes::{report, Config, Corpus, FrequencyAnalyzer, LoadOutcome, SummarySimplifier};

const CHAPTER_EXTENSION: &str = "md";

#[derive(Parser)]
#[command(
    name = "tomes",
    version,
    about = "Find redundant content in a multi-chapter book and trim its summaries"
)]
struct Cli {
    /// TOML configuration file; defaults apply to anything it leaves out
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report repeated sentences, chapter volume, summary sizes, key phrases
    /// and case-study density
    Analyze {
        /// Directory holding one markdown file per chapter
        dir: PathBuf,
    },
    /// Rewrite each chapter's summary section in place
    Simplify {
        /// Directory holding one markdown file per chapter
        dir: PathBuf,
        /// Report what would change without writing any file
        #[arg(long)]
        dry_run: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match &cli.command {
        Command::Analyze { dir } => {
            let analyzer = FrequencyAnalyzer::new(&config)?;
            let corpus = load_corpus(&config, dir)?;
            let analysis = analyzer.analyze(&corpus);
            report::write_analysis(&mut out, &analysis, &config.report)?;
        }
        Command::Simplify { dir, dry_run } => {
            let simplifier = SummarySimplifier::new(&config.summary)?;
            let names = tomes::chapter_names(dir, CHAPTER_EXTENSION, &config.chapters)?;
            let batch = simplifier.simplify_files(dir, &names, !dry_run);
            report::write_batch(&mut out, &batch)?;
            if *dry_run {
                writeln!(out, "(dry run: no files written)")?;
            }
        }
    }

    out.flush()?;
    Ok(())
}

/// The configured chapters, or every chapter file in `dir`.
///
/// Chapters that are missing or unreadable are skipped with a warning.
fn load_corpus(config: &Config, dir: &Path) -> tomes::Result<Corpus> {
    let (corpus, outcomes) = Corpus::load_book(dir, CHAPTER_EXTENSION, &config.chapters)?;
    let skipped = outcomes
        .iter()
        .filter(|o| !matches!(o, LoadOutcome::Loaded(_)))
        .count();
    if skipped > 0 {
        tracing::warn!(skipped, "chapters skipped");
    }
    Ok(corpus)
}
