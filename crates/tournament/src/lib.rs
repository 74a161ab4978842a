//! Tournament Runner
//!
//! Local harness for search adapters:
//! - Playing games under a clock or a fixed time per move
//! - Relaying harness events (time control, opponent, result, quit)
//! - Saving game records and reporting match scores
//!
//! # Usage
//!
//! ```bash
//! # Baseline strategies against each other
//! cargo run -p tournament -- match random:7 alphabetical --games 20
//!
//! # Everything from a config file, results to JSON
//! cargo run -p tournament -- match --config tournament.toml --output results.json
//! ```

mod config;
mod match_runner;
mod results;

pub use config::*;
pub use match_runner::*;
pub use results::*;
