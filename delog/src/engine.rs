//! Top-level transform: parse, walk, match, rewrite.
//!
//! Every call builds its own parser, tree and match list; nothing is shared
//! between invocations, so independent sources can be processed on separate
//! threads without coordination.

use crate::cst::{breadth_first, JsParser, Span};
use crate::error::DelogError;
use crate::fix::{plan_edits, ByteRangeRewriter, Strategy};
use crate::matcher::{find_matches, TargetSpec};

/// Resolved options for one invocation.
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Calls to neutralize
    pub targets: TargetSpec,
    /// Replacement strategy; `None` picks [`Strategy::default_for`] the semicolon flag
    pub strategy: Option<Strategy>,
    /// Swallow a directly trailing `;` into the replaced range
    pub remove_semicolon: bool,
}

impl Options {
    /// Strategy that will actually be applied.
    #[must_use]
    pub fn effective_strategy(&self) -> Strategy {
        self.strategy
            .clone()
            .unwrap_or_else(|| Strategy::default_for(self.remove_semicolon))
    }
}

/// Result of processing one source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    /// Rewritten source
    pub output: String,
    /// Replaced ranges in the original source, semicolon extension included
    pub replaced: Vec<Span>,
}

impl Outcome {
    /// Whether anything was replaced.
    #[must_use]
    pub fn changed(&self) -> bool {
        !self.replaced.is_empty()
    }
}

/// Neutralize targeted logging calls in `source`.
///
/// # Errors
/// Returns [`DelogError::Parse`] when `source` is not valid JavaScript.
pub fn process(source: &str, options: &Options) -> Result<Outcome, DelogError> {
    let strategy = options.effective_strategy();
    process_with(
        source,
        &options.targets,
        &|call| strategy.apply(call),
        options.remove_semicolon,
    )
}

/// Like [`process`], with a caller-supplied replacement function.
///
/// # Errors
/// Returns [`DelogError::Parse`] when `source` is not valid JavaScript.
pub fn process_with(
    source: &str,
    targets: &TargetSpec,
    strategy: &dyn Fn(&str) -> String,
    remove_semicolon: bool,
) -> Result<Outcome, DelogError> {
    let matches = scan(source, targets)?;
    let edits = plan_edits(source, &matches, strategy, remove_semicolon)?;
    let replaced = edits.iter().map(|edit| edit.span).collect();

    let mut rewriter = ByteRangeRewriter::new(source);
    rewriter.add_edits(edits);
    let output = rewriter.apply()?;

    Ok(Outcome { output, replaced })
}

/// Resolved match ranges without rewriting anything.
///
/// # Errors
/// Returns [`DelogError::Parse`] when `source` is not valid JavaScript.
pub fn scan(source: &str, targets: &TargetSpec) -> Result<Vec<Span>, DelogError> {
    let mut parser = JsParser::new()?;
    let root = parser.parse(source)?;
    let nodes = breadth_first(&root);
    Ok(find_matches(&nodes, targets))
}
