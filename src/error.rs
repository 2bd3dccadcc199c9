//! Error types for surfrank.

use thiserror::Error;

/// Error type for ranking operations.
#[derive(Error, Debug)]
pub enum Error {
    /// The link graph is empty, or names a page that is not one of its keys.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// A rank vector cannot be normalized (zero, negative or non-finite mass).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The iterative solver hit its iteration cap before settling.
    #[error("no convergence after {iterations} iterations (last delta {delta:e})")]
    NonConvergence { iterations: usize, delta: f64 },

    /// A configuration value is out of range.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// IO error while reading a corpus.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for ranking operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_convergence_message_names_iterations() {
        let err = Error::NonConvergence {
            iterations: 12,
            delta: 0.5,
        };
        let msg = err.to_string();
        assert!(msg.contains("12 iterations"), "{msg}");
    }

    #[test]
    fn io_errors_convert() {
        fn open() -> Result<()> {
            std::fs::read_dir("/definitely/not/a/real/dir/surfrank")?;
            Ok(())
        }
        assert!(matches!(open(), Err(Error::Io(_))));
    }
}
