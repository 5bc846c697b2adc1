//! JSON output formatting

use std::io;

use crate::stats::DirectoryStats;

/// Print statistics as pretty-printed JSON to stdout.
pub fn print_stats_json(stats: &DirectoryStats) -> io::Result<()> {
    let json = serde_json::to_string_pretty(stats).map_err(io::Error::other)?;
    println!("{}", json);
    Ok(())
}
