//! Second preimage search CLI
//!
//! Usage: hashsearch_preimage [TARGET] [--max-len <N>] [--limit <N>] [--hash <simple|sha256>]
//!
//! Example:
//!   hashsearch_preimage
//!   hashsearch_preimage eliam --max-len 6
//!
//! Looks for a string other than TARGET whose digest equals TARGET's digest.

use clap::Parser;
use hashsearch::{
    DEFAULT_CHUNK_SIZE, DEFAULT_MAX_LEN, DEFAULT_PREIMAGE_TARGET, HashFn, HashKind,
    LOG_FILTER_DEFAULT, LOG_FILTER_VERBOSE, SearchConfig, SearchPolicy, SecondPreimagePolicy,
    find_second_preimage,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hashsearch_preimage",
    version,
    about = "Find a different string with the same hash as a target"
)]
struct Args {
    /// String whose digest must be matched
    #[arg(default_value = DEFAULT_PREIMAGE_TARGET)]
    target: String,

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

    info!(
        target_string = %args.target,
        digest = %args.hash.digest(args.target.as_bytes()),
        hash = %args.hash,
        "target loaded"
    );

    let config = SearchConfig::default()
        .with_max_len(args.max_len)
        .with_chunk_size(args.chunk_size)
        .with_workers(args.workers);

    let outcome = match find_second_preimage(config, args.hash, &args.target, args.limit) {
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
        Some(preimage) => {
            if !SecondPreimagePolicy::new(args.hash, args.target.as_str()).verify(&preimage) {
                warn!("reported preimage failed verification");
            }
            println!("Second preimage: \"{preimage}\"");
        }
        None => println!("Did not find a second preimage."),
    }
}
