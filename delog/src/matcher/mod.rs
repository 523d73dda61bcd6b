//! Match resolution: which call expressions are logging calls.
//!
//! A call matches when its callee is a member-access chain of plain
//! identifiers whose `namespace.method` split is in the [`TargetSpec`].

mod resolver;
mod targets;

pub use resolver::{collapse_nested, find_matches, resolve_dotted_path, MemberChain};
pub use targets::{Target, TargetError, TargetSpec};
