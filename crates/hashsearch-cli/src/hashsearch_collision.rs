//! Hash collision search CLI
//!
//! Usage: hashsearch_collision [--max-len <N>] [--limit <N>] [--hash <simple|sha256>]
//!
//! Example:
//!   hashsearch_collision
//!   hashsearch_collision --max-len 6 --workers 4 --verbose
//!
//! Scans fixed-length candidates until two of them share a digest.

use clap::Parser;
use hashsearch::{
    CollisionPolicy, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LEN, HashKind, LOG_FILTER_DEFAULT,
    LOG_FILTER_VERBOSE, SearchConfig, SearchPolicy, find_collision,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "hashsearch_collision", version, about = "Find two strings with the same hash")]
struct Args {
    /// Candidate length
    #[arg(long, env = "HASHSEARCH_MAX_LEN", default_value_t = DEFAULT_MAX_LEN)]
    max_len: usize,

    /// Number of candidates to try (default: every candidate of --max-len)
    #[arg(long)]
    limit: Option<u64>,

    /// Hash function: simple or sha256
    #[arg(long, default_value_t = HashKind::Simple)]
    hash: HashKind,

    /// Worker threads (default: available parallelism)
    #[arg(long, env = "HASHSEARCH_WORKERS")]
    workers: Option<usize>,

    /// Indices per unit of work
    #[arg(long, env = "HASHSEARCH_CHUNK_SIZE", default_value_t = DEFAULT_CHUNK_SIZE)]
    chunk_size: u64,

    /// Verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn init_tracing(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new(LOG_FILTER_VERBOSE)
        } else {
            EnvFilter::new(LOG_FILTER_DEFAULT)
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    // Every digest is kept until a collision turns up; a 256-bit digest
    // practically never collides, so the map only grows.
    if args.hash == HashKind::Sha256 && args.limit.is_none() {
        warn!(
            max_len = args.max_len,
            "sha256 collision search without --limit scans the whole space and \
             keeps every digest in memory"
        );
    }

    let config = SearchConfig::default()
        .with_max_len(args.max_len)
        .with_chunk_size(args.chunk_size)
        .with_workers(args.workers);

    let outcome = match find_collision(config, args.hash, args.limit) {
        Ok(outcome) => outcome,
        Err(e) => {
            error!("{e}");
            std::process::exit(1);
        }
    };

    info!(
        scanned = outcome.scanned,
        elapsed = ?outcome.elapsed,
        "search completed"
    );

    match outcome.result.into_option() {
        Some(collision) => {
            if !CollisionPolicy::new(args.hash).verify(&collision) {
                warn!("reported collision failed verification");
            }
            println!("Collision: {collision}");
        }
        None => println!("No collision found."),
    }
}
