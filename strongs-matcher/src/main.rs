use std::fs;
use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use strongs_matcher_lib::output::to_summary;
use strongs_matcher_lib::tagged::{parse_tagged_verse, strip_tags};
use strongs_matcher_lib::verse::{annotate_results, match_tagged_verse};
use strongs_matcher_lib::{
    match_verse, AnnotatedVerse, Lexicon, Matcher, MatcherConfig, StageTally,
};

#[derive(Parser, Debug)]
#[command(name = "strongs-matcher", about = "Link Hebrew words to Strong's numbers")]
struct Cli {
    /// Hebrew word or verse to match. If omitted, reads one verse per line
    /// from stdin.
    input: Option<String>,

    /// Word-form lexicon table.
    #[arg(long, default_value = "data/lexicon/words.json")]
    words: PathBuf,

    /// Root lexicon table.
    #[arg(long, default_value = "data/lexicon/roots.json")]
    roots: PathBuf,

    /// Matcher configuration (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Input carries upstream tags (`word<S>1234</S>`).
    #[arg(long)]
    tagged: bool,

    /// Print only the verse text with prefix separators.
    #[arg(long, conflicts_with = "summary")]
    separators: bool,

    /// Print `word=strong` pairs instead of JSON.
    #[arg(long)]
    summary: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Report how many words each matching stage resolved (to stderr).
    #[arg(long)]
    stats: bool,

    /// Write the unresolved-word report to this file as JSON.
    #[arg(long, value_name = "FILE")]
    unresolved: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let lexicon = Lexicon::load(&cli.words, &cli.roots).context("failed to load lexicon")?;
    let config = match &cli.config {
        Some(path) => MatcherConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => MatcherConfig::default(),
    };
    let matcher = Matcher::with_config(&lexicon, config);
    let mut tally = StageTally::new();

    match cli.input {
        Some(ref text) => process_line(text, &matcher, &cli, &mut tally)?,
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read stdin")?;
                if !line.trim().is_empty() {
                    process_line(&line, &matcher, &cli, &mut tally)?;
                }
            }
        }
    }

    if cli.stats {
        print_stats(&tally);
    }
    if let Some(ref path) = cli.unresolved {
        let entries = matcher.unresolved().entries();
        let json = serde_json::to_string_pretty(&entries)?;
        fs::write(path, json)
            .with_context(|| format!("failed to write unresolved report {}", path.display()))?;
        log::info!("{} unresolved words written to {}", entries.len(), path.display());
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn process_line(line: &str, matcher: &Matcher<'_>, cli: &Cli, tally: &mut StageTally) -> Result<()> {
    let verse = if cli.tagged {
        let words = parse_tagged_verse(line).context("malformed tagged verse")?;
        let text = strip_tags(line)?;
        let results = match_tagged_verse(matcher, &words);
        tally.extend(&results);
        annotate_results(matcher, &text, &results)
    } else {
        let results = match_verse(matcher, line);
        tally.extend(&results);
        annotate_results(matcher, line, &results)
    };

    if cli.separators {
        println!("{}", verse.hebrew);
    } else if cli.summary {
        println!("{}", to_summary(&verse.words));
    } else {
        print_json(&verse, cli.pretty)?;
    }
    Ok(())
}

fn print_json(verse: &AnnotatedVerse, pretty: bool) -> Result<()> {
    // A single word prints as its record rather than a one-word verse.
    let json = match verse.words.as_slice() {
        [word] => to_json(word, pretty)?,
        _ => to_json(verse, pretty)?,
    };
    println!("{json}");
    Ok(())
}

fn to_json<T: Serialize>(value: &T, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    json.context("JSON serialization failed")
}

fn print_stats(tally: &StageTally) {
    let total = tally.total();
    let pct = |n: usize| {
        if total > 0 {
            (n as f64 / total as f64) * 100.0
        } else {
            0.0
        }
    };
    eprintln!(
        "{} words, {} resolved ({:.1}%)",
        total,
        tally.resolved(),
        pct(tally.resolved())
    );
    for (stage, n) in tally.iter() {
        eprintln!("  {:<20} {n:>6} ({:.1}%)", format!("{stage:?}"), pct(n));
    }
}
