//! CST (Concrete Syntax Tree) module.
//!
//! This module provides the syntax side of the engine:
//! - Tree-sitter parsing of JavaScript into an owned [`SyntaxNode`] tree
//! - Exact byte ranges for every node
//! - Breadth-first traversal used by the match resolver
//!
//! # Design Principles
//!
//! - **Byte-range anchored**: every node carries its `[start, end)` span
//! - **Fail closed**: sources that only parse with error recovery are rejected

mod node;
mod parser;
pub mod walk;

pub use node::{Span, SyntaxNode};
pub use parser::{JsParser, ParseError};
pub use walk::breadth_first;
