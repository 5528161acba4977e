//! Small CLI harness over the `bithash` library: builds an index from a
//! JSON array of vectors read on stdin, prints its bucket statistics, and
//! searches it for any query vectors given on the command line.

use bithash::{Indexer, RandomVectorGen, SimpleRecords};
use clap::Parser;
use std::io::{self, Read};
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Seed for the indexer's hyperplanes.
    #[arg(long, default_value_t = 39)]
    seed: i64,

    /// Number of hyperplanes (hash bits).
    #[arg(long, default_value_t = 8)]
    bitsize: usize,

    /// Max results returned per query.
    #[arg(long, default_value_t = 5)]
    limit: usize,

    /// Print `n` freshly generated Gaussian vectors as JSON and exit,
    /// instead of reading a corpus from stdin.
    #[arg(long, value_name = "N")]
    generate: Option<usize>,

    /// Dimension of the vectors produced by `--generate`.
    #[arg(long, default_value_t = 2)]
    dim: usize,

    /// Query vectors, one per flag, each a comma-separated list of floats
    /// (e.g. `--query 0.1,0.2`).
    #[arg(long = "query", value_delimiter = ',')]
    queries: Vec<f32>,
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    if let Some(n) = args.generate {
        let mut gen = RandomVectorGen::new(args.seed, args.dim);
        match gen.to_json(n) {
            Ok(json) => {
                println!("{json}");
                return ExitCode::SUCCESS;
            }
            Err(err) => {
                eprintln!("failed to generate vectors: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    let mut input = String::new();
    if let Err(err) = io::stdin().read_to_string(&mut input) {
        eprintln!("failed to read stdin: {err}");
        return ExitCode::FAILURE;
    }

    let corpus: Vec<Vec<f32>> = match serde_json::from_str(&input) {
        Ok(v) => v,
        Err(err) => {
            eprintln!("failed to parse stdin as a JSON array of vectors: {err}");
            return ExitCode::FAILURE;
        }
    };

    let Some(first) = corpus.first() else {
        eprintln!("input corpus is empty");
        return ExitCode::FAILURE;
    };
    let vecsize = first.len();

    let mut indexer = match Indexer::new(args.seed, args.bitsize, vecsize) {
        Ok(idx) => idx,
        Err(err) => {
            eprintln!("failed to build indexer: {err}");
            return ExitCode::FAILURE;
        }
    };

    for (i, vector) in corpus.iter().enumerate() {
        if let Err(err) = indexer.add((i + 1) as u64, vector) {
            eprintln!("failed to add vector {i}: {err}");
            return ExitCode::FAILURE;
        }
    }

    println!("{}", indexer.stats());

    let records = SimpleRecords(corpus);
    for query in args.queries.chunks(vecsize) {
        match indexer.search(query, args.limit, &records) {
            Ok(results) => {
                println!("query {query:?}:");
                for result in results {
                    println!("  item {} (distance {:.6})", result.item.item_id(), result.distance);
                }
            }
            Err(err) => {
                eprintln!("search failed for {query:?}: {err}");
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}
