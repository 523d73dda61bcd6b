//! Error taxonomy for a single `process` invocation.

use crate::cst::ParseError;
use crate::fix::{RewriteError, StrategyError};
use crate::matcher::TargetError;

/// Anything that can stop one source text from being processed.
///
/// An unresolvable callee is not an error: it simply does not match.
#[derive(Debug, thiserror::Error)]
pub enum DelogError {
    /// The source could not be parsed; no partial output is produced
    #[error(transparent)]
    Parse(#[from] ParseError),
    /// A configured target string is malformed
    #[error(transparent)]
    Target(#[from] TargetError),
    /// A configured strategy name is unknown
    #[error(transparent)]
    Strategy(#[from] StrategyError),
    /// Internal range bookkeeping went wrong
    #[error("failed to rewrite source: {0}")]
    Rewrite(#[from] RewriteError),
}
