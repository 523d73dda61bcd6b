//! Source rewriting.
//!
//! The core component is `ByteRangeRewriter`, which applies
//! edits using byte offsets so that everything outside a replaced
//! range is preserved byte for byte. Replacement text comes from a
//! [`Strategy`] or any `Fn(&str) -> String`.

mod rewriter;
mod strategy;

pub use rewriter::{
    extend_to_semicolon, plan_edits, rewrite, ByteRangeRewriter, Edit, RewriteError,
};
pub use strategy::{Strategy, StrategyError, CALL_PLACEHOLDER};
