//! Main binary entry point for delog.
//!
//! This binary simply delegates to the shared `entry_point::run_with_args()` function
//! so the tests and the installed tool behave the same.

use anyhow::Result;

fn main() -> Result<()> {
    let code = delog::entry_point::run_with_args(std::env::args().skip(1).collect())?;
    std::process::exit(code);
}
