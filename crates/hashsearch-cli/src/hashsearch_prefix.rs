//! Digest prefix search CLI
//!
//! Usage: hashsearch_prefix [PREFIX...] [--tag <TAG>] [--limit <N>] [--hash <simple|sha256>]
//!
//! Example:
//!   hashsearch_prefix
//!   hashsearch_prefix cafe faded --tag bitcoin
//!
//! For each prefix, finds TAG + candidate whose digest starts with PREFIX.
//! Prefixes are searched one after another; each search uses every worker.

use clap::Parser;
use hashsearch::{
    DEFAULT_CHUNK_SIZE, DEFAULT_PREFIX_TAG, DEFAULT_PREFIXES, HashFn, HashKind,
    LOG_FILTER_DEFAULT, LOG_FILTER_VERBOSE, PrefixPolicy, SearchConfig, SearchPolicy,
    find_hash_prefix,
};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "hashsearch_prefix",
    version,
    about = "Find inputs whose hash starts with given prefixes"
)]
struct Args {
    /// Digest prefixes to search for (default: cafe faded decade)
    prefixes: Vec<String>,

    /// Literal prepended to every candidate before hashing
    #[arg(long, default_value = DEFAULT_PREFIX_TAG)]
    tag: String,

    /// Number of candidates to try per prefix (default: 2^64 - 1)
    #[arg(long)]
    limit: Option<u64>,

    /// Hash function: simple or sha256
    #[arg(long, default_value_t = HashKind::Sha256)]
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

    let prefixes: Vec<String> = if args.prefixes.is_empty() {
        DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect()
    } else {
        args.prefixes.clone()
    };

    let config = SearchConfig::default()
        .with_chunk_size(args.chunk_size)
        .with_workers(args.workers);

    for prefix in &prefixes {
        println!("Searching for strings whose hash has the prefix \"{prefix}\"...");

        let outcome =
            match find_hash_prefix(config.clone(), args.hash, prefix, &args.tag, args.limit) {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("{e}");
                    std::process::exit(1);
                }
            };

        info!(
            prefix = %prefix,
            scanned = outcome.scanned,
            elapsed = ?outcome.elapsed,
            "search completed"
        );

        match outcome.result.into_option() {
            Some(input) => {
                let verified = PrefixPolicy::new(args.hash, prefix.as_str())
                    .map(|policy| policy.with_tag(args.tag.as_str()).verify(&input))
                    .unwrap_or(false);
                if !verified {
                    warn!(input = %input, "reported input failed verification");
                }
                println!(
                    "String \"{input}\" generates a hash with the desired prefix: {}",
                    args.hash.digest(input.as_bytes())
                );
            }
            None => println!("No string found that generates this prefix."),
        }
    }
}
