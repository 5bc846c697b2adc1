//! Result formatting and display
//!
//! - `report` - detailed statistics report for the console
//! - `json` - statistics as JSON
//! - `console` - line output for search and prune walks
//! - `utils` - byte, number and percentage formatting

mod config;
mod console;
mod json;
mod report;
mod utils;

pub use config::OutputConfig;
pub use console::ConsoleOutput;
pub use json::print_stats_json;
pub use report::{print_report, write_report};
pub use utils::{format_bytes, format_number, percentage};
