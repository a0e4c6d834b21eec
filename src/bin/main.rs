use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::info;

use freqseq_miner::provider::FastaProvider;
use freqseq_miner::significance::thresholds;
use freqseq_miner::{
    frequent_patterns, logging, CountingPassCounter, Method, MinerConfig, Threshold,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MethodArg {
    Apriori,
    Position,
    Hybrid,
}

impl From<MethodArg> for Method {
    fn from(value: MethodArg) -> Self {
        match value {
            MethodArg::Apriori => Method::Apriori,
            MethodArg::Position => Method::Position,
            MethodArg::Hybrid => Method::Hybrid,
        }
    }
}

/// Find frequent contiguous sequential patterns in a DNA corpus.
#[derive(Parser, Debug)]
#[command(name = "freqseq-miner", version, about)]
struct Cli {
    /// Input corpus in FASTA format.
    #[arg(short = 'i', long)]
    in_fasta: PathBuf,
    /// Minimum pattern length.
    #[arg(long, default_value_t = 2)]
    min_len: usize,
    /// Maximum pattern length.
    #[arg(long, default_value_t = 8)]
    max_len: usize,
    /// Fixed support threshold applied to every length. Mutually exclusive
    /// with `--confidence`.
    #[arg(long, conflicts_with = "confidence")]
    threshold: Option<u64>,
    /// Confidence level for a per-length significance threshold derived
    /// from a Poisson null model, in (0, 1). Mutually exclusive with
    /// `--threshold`.
    #[arg(long, conflicts_with = "threshold")]
    confidence: Option<f64>,
    /// Total nucleotide count of the corpus, required when `--confidence`
    /// is used to derive per-length thresholds.
    #[arg(long)]
    corpus_size: Option<u64>,
    /// Mining algorithm to use.
    #[arg(long, value_enum, default_value_t = MethodArg::Hybrid)]
    method: MethodArg,
    /// Memory budget (bytes) for the Position queue.
    #[arg(long, default_value_t = freqseq_miner::config::DEFAULT_MEMORY_BUDGET_BYTES)]
    memory_budget_bytes: u64,
    /// Path to write run log. Logs to stderr if omitted.
    #[arg(long, alias = "log")]
    log_filepath: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let _handle = logging::init_logging(cli.log_filepath.as_ref());

    if cli.min_len == 0 || cli.min_len > cli.max_len {
        bail!("min-len must be >= 1 and <= max-len");
    }

    let threshold = match (cli.threshold, cli.confidence) {
        (Some(t), None) => Threshold::Scalar(t),
        (None, Some(c)) => {
            let n_total = cli
                .corpus_size
                .context("--corpus-size is required when using --confidence")?;
            let map = thresholds(n_total, cli.min_len, 1, c)?;
            Threshold::PerLength(map)
        }
        (None, None) => bail!("one of --threshold or --confidence is required"),
        (Some(_), Some(_)) => unreachable!("clap enforces mutual exclusion"),
    };

    let provider = FastaProvider::new(&cli.in_fasta);
    let config = MinerConfig {
        memory_budget_bytes: cli.memory_budget_bytes,
        ..MinerConfig::default()
    };
    let mut counter = CountingPassCounter::default();

    let results = frequent_patterns(
        &provider,
        cli.min_len,
        cli.max_len,
        threshold,
        cli.method.into(),
        Some(&mut counter),
        &config,
    )?;

    info!("mining complete in {} passes, {} patterns found", counter.count(), results.len());

    println!("pattern\tsupport");
    for (pattern, support) in results {
        println!("{pattern}\t{support}");
    }

    Ok(())
}
