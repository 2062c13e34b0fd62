//! Builds a DAWG from a word list and checks it.
//!
//! The word list doesn't have to be sorted. Every word must be accepted, and
//! every word wrapped in `x` on both sides must be rejected unless the wrapped
//! string is itself in the list.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use minidawg::dawg::{Arena, Builder, Dawg};

#[derive(Parser)]
#[command(name = "dawg-check")]
#[command(about = "Build a minimal DAWG from a word list and verify it", long_about = None)]
#[command(version)]
struct Cli {
    /// Word list, one word per line
    wordlist: PathBuf,

    /// Print the graph after building it
    #[arg(long)]
    dump: bool,

    /// Skip checking the words against the finished graph
    #[arg(long)]
    no_verify: bool,
}

fn main() -> Result<ExitCode> {
    env_logger::init();
    let cli = Cli::parse();

    let text = std::fs::read_to_string(&cli.wordlist)
        .with_context(|| format!("failed to read {}", cli.wordlist.display()))?;
    let mut words: Vec<&str> = text
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .collect();
    words.sort_unstable();
    words.dedup();
    println!("{} words", words.len());

    let arena = Arena::new();
    let started = Instant::now();
    let mut builder = Builder::new(&arena);
    for word in &words {
        builder
            .add(word)
            .with_context(|| format!("failed to add {word:?}"))?;
    }
    let registered = builder.register().len();
    let dawg = builder.finish();
    println!("build DAWG: {:?}", started.elapsed());
    println!(
        "{registered} states registered, {} states and {} transitions reachable",
        dawg.state_count(),
        dawg.transition_count()
    );

    if cli.dump {
        print!("{dawg}");
    }
    if cli.no_verify {
        return Ok(ExitCode::SUCCESS);
    }

    let started = Instant::now();
    let failures = verify(&dawg, &words);
    println!("check words: {:?}", started.elapsed());
    if failures > 0 {
        warn!("{failures} checks failed");
        return Ok(ExitCode::FAILURE);
    }
    info!("all {} words verified", words.len());
    Ok(ExitCode::SUCCESS)
}

/// Checks every word and its `x`-wrapped form, returning the number of failures.
///
/// `words` must be sorted.
fn verify(dawg: &Dawg<'_, char>, words: &[&str]) -> usize {
    let mut failures = 0;
    for word in words {
        if !dawg.contains(*word) {
            eprintln!("word not contained: {word}");
            failures += 1;
        }
        let wrapped = format!("x{word}x");
        let expected = words.binary_search(&wrapped.as_str()).is_ok();
        if dawg.contains(&wrapped) != expected {
            eprintln!("wrong answer for {wrapped}: expected {expected}");
            failures += 1;
        }
    }
    failures
}
