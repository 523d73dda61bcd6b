//! Core library for the delog JavaScript log stripper.
//!
//! This library parses JavaScript with tree-sitter, finds calls to configured
//! logging functions such as `console.log(...)`, and replaces their source
//! ranges with an inert expression or a comment. All other text is preserved
//! byte for byte.
//!
//! ```
//! use delog::engine::{process, Options};
//!
//! let outcome = process("console.log('hi'); run();", &Options::default()).unwrap();
//! assert_eq!(outcome.output, "null /* console.log('hi') */; run();");
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

/// Module for the owned syntax tree, the tree-sitter front end and the Tree Walker.
pub mod cst;

/// Module for target lists and the Match Resolver.
pub mod matcher;

/// Module for range validation, semicolon extension and replacement strategies.
pub mod fix;

/// Module tying parsing, matching and rewriting into one transform.
pub mod engine;

/// Module defining the error taxonomy for one transform.
pub mod error;

/// Module for loading configuration.
pub mod config;

/// Module containing shared constants and regex patterns.
pub mod constants;

/// Module containing utility functions.
/// This includes line/column lookup and JavaScript file discovery.
pub mod utils;

/// Module defining the entry point logic shared by the binary and tests.
pub mod entry_point;

/// Module for rich CLI output formatting with colored text and progress bars.
pub mod output;

/// Module defining the command-line interface arguments and structs.
pub mod cli;

/// Module for handling CLI commands and their execution logic.
pub mod commands;
