#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::missing_errors_doc)]

//! `surfrank` ranks the pages of a small hyperlink graph two ways:
//!
//! - [`algo::sampling`]: a random surfer walks the graph and each page's rank
//!   is the share of steps spent on it.
//! - [`algo::iteration`]: the PageRank recurrence is applied until the ranks
//!   settle, then normalized.
//!
//! Both read the same [`transition`] model: with probability `damping` the
//! surfer follows one of the current page's links, otherwise it jumps to a
//! uniformly random page. Pages without links jump uniformly.
//!
//! # Example
//!
//! ```rust
//! use surfrank::{iterate_pagerank, sample_pagerank, LinkGraph, RankConfig};
//!
//! let graph = LinkGraph::from_links([("a", vec!["b"]), ("b", vec!["a", "c"]), ("c", vec![])])?;
//! let config = RankConfig::default().with_seed(42);
//!
//! let sampled = sample_pagerank(&graph, config)?;
//! let iterated = iterate_pagerank(&graph, config)?;
//!
//! assert!((iterated.sum() - 1.0).abs() < 1e-9);
//! assert!((sampled.get("c").unwrap() - iterated.get("c").unwrap()).abs() < 0.05);
//! # Ok::<(), surfrank::Error>(())
//! ```
//!
//! The engine never reads files or prints. [`corpus::load_corpus`] builds a
//! graph from a directory of HTML pages; the `surfrank` binary wires the two
//! together.

pub mod algo;
pub mod config;
pub mod corpus;
pub mod error;
pub mod graph;
pub mod rank;
pub mod transition;

pub use algo::{
    iterate_pagerank, iterate_pagerank_with_stats, sample_pagerank, sample_pagerank_with_rng,
    IterationOutcome, Method,
};
pub use config::{ConvergenceCriterion, RankConfig};
pub use error::{Error, Result};
pub use graph::{LinkGraph, Page};
pub use rank::{normalize, RankVector};
pub use transition::{transition_model, TransitionDistribution};
