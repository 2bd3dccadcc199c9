//! surfrank CLI - rank a directory of HTML pages.
//!
//! # Usage
//!
//! ```bash
//! # Both rankers with default settings
//! surfrank corpus0/
//!
//! # Reproducible sampling, iteration only, JSON output
//! surfrank corpus0/ --method iteration --json
//! surfrank corpus0/ --method sampling --samples 50000 --seed 7
//!
//! # Settings from a TOML file, flags override it
//! surfrank corpus0/ --config rank.toml --damping 0.9
//! ```

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use surfrank::{corpus, ConvergenceCriterion, LinkGraph, Method, RankConfig, RankVector};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "surfrank")]
#[command(about = "PageRank by random-surfer sampling and by iteration", long_about = None)]
struct Cli {
    /// Directory of .html pages
    corpus: PathBuf,

    /// Which ranker(s) to run
    #[arg(short, long, default_value = "both")]
    method: MethodArg,

    /// TOML file with ranking settings
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Damping factor, in (0, 1)
    #[arg(long)]
    damping: Option<f64>,

    /// Pages visited by the random surfer
    #[arg(long)]
    samples: Option<usize>,

    /// Convergence threshold for iteration
    #[arg(long)]
    threshold: Option<f64>,

    /// Maximum sweeps for iteration
    #[arg(long)]
    max_iterations: Option<usize>,

    /// Convergence criterion for iteration
    #[arg(long)]
    criterion: Option<CriterionArg>,

    /// Seed for sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Print JSON instead of text
    #[arg(long)]
    json: bool,

    /// Log engine progress to stderr
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum MethodArg {
    /// Random-surfer sampling
    Sampling,
    /// Fixed-point iteration
    Iteration,
    /// Sampling, then iteration
    Both,
}

impl MethodArg {
    fn methods(self) -> &'static [Method] {
        match self {
            Self::Sampling => &[Method::Sampling],
            Self::Iteration => &[Method::Iteration],
            Self::Both => &Method::ALL,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum CriterionArg {
    /// Largest change over a full sweep
    Sweep,
    /// Last few per-page changes (window from --config, else seven)
    Trailing,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    if cli.verbose {
        filter = filter.add_directive(tracing::Level::DEBUG.into());
    }
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();

    let config = build_config(&cli)?;
    let graph = corpus::load_corpus(&cli.corpus)
        .with_context(|| format!("Failed to load corpus from {}", cli.corpus.display()))?;

    let mut results = Vec::new();
    for &method in cli.method.methods() {
        let ranks = method
            .rank(&graph, config)
            .with_context(|| format!("{} ranking failed", method.name()))?;
        results.push((method, ranks));
    }

    if cli.json {
        print_json(&results)?;
    } else {
        print_text(&graph, config, &results);
    }
    Ok(())
}

fn build_config(cli: &Cli) -> Result<RankConfig> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RankConfig::default(),
    };
    if let Some(damping) = cli.damping {
        config.damping = damping;
    }
    if let Some(samples) = cli.samples {
        config.sample_count = samples;
    }
    if let Some(threshold) = cli.threshold {
        config.convergence_threshold = threshold;
    }
    if let Some(max_iterations) = cli.max_iterations {
        config.max_iterations = max_iterations;
    }
    if let Some(criterion) = cli.criterion {
        config.criterion = match criterion {
            CriterionArg::Sweep => ConvergenceCriterion::MaxSweepDelta,
            CriterionArg::Trailing => match config.criterion {
                trailing @ ConvergenceCriterion::TrailingDeltas { .. } => trailing,
                ConvergenceCriterion::MaxSweepDelta => {
                    ConvergenceCriterion::TrailingDeltas { window: 7 }
                }
            },
        };
    }
    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }
    config.validate().context("Invalid ranking settings")?;
    Ok(config)
}

fn load_config(path: &Path) -> Result<RankConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("Failed to parse config {}", path.display()))
}

fn print_text(graph: &LinkGraph, config: RankConfig, results: &[(Method, RankVector)]) {
    for (i, (method, ranks)) in results.iter().enumerate() {
        if i > 0 {
            println!();
        }
        match method {
            Method::Sampling => println!(
                "PageRank Results from Sampling (n = {})",
                config.sample_count
            ),
            Method::Iteration => println!("PageRank Results from Iteration"),
        }
        for page in graph.pages() {
            let score = ranks.get(page.as_str()).unwrap_or(0.0);
            println!("  {page}: {score:.4}");
        }
    }
}

fn print_json(results: &[(Method, RankVector)]) -> Result<()> {
    let mut out = serde_json::Map::new();
    for (method, ranks) in results {
        out.insert(method.name().to_string(), serde_json::to_value(ranks)?);
    }
    println!("{}", serde_json::to_string_pretty(&serde_json::Value::Object(out))?);
    Ok(())
}
