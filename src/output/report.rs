//! Detailed statistics report

use std::io::{self, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use termcolor::{ColorSpec, StandardStream, WriteColor};

use crate::stats::DirectoryStats;

use super::config::OutputConfig;
use super::utils::{format_bytes, format_number, percentage};

const RULE: &str = "═══════════════════════════════════════";

/// Print the detailed report for `stats` to stdout.
///
/// Sorts the extension list by size before printing it.
pub fn print_report(stats: &mut DirectoryStats, root: &Path, config: &OutputConfig) -> io::Result<()> {
    let mut stdout = StandardStream::stdout(config.color_choice());
    write_report(&mut stdout, stats, root, Local::now())
}

/// Write the detailed report for `stats`, as of `date`.
pub fn write_report<W: WriteColor>(
    out: &mut W,
    stats: &mut DirectoryStats,
    root: &Path,
    date: DateTime<Local>,
) -> io::Result<()> {
    let mut bold = ColorSpec::new();
    bold.set_bold(true);

    writeln!(out, "{}", RULE)?;
    out.set_color(&bold)?;
    writeln!(out, "    Directory Analysis Results")?;
    out.reset()?;
    writeln!(out, "{}", RULE)?;
    writeln!(out, "Directory: {}", root.display())?;
    writeln!(out, "Analysis Date: {}", date.format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    heading(out, &bold, "SUMMARY:")?;
    writeln!(
        out,
        "Total Size: {} ({} bytes)",
        format_bytes(stats.total_size()),
        format_number(stats.total_size())
    )?;
    writeln!(out, "Files: {}", format_number(stats.file_count()))?;
    writeln!(out, "Directories: {}", format_number(stats.directory_count()))?;
    writeln!(out)?;

    if let Some(path) = stats.largest_file_path() {
        heading(out, &bold, "LARGEST FILE:")?;
        writeln!(out, "Size: {}", format_bytes(stats.largest_file_size()))?;
        writeln!(out, "File: {}", path.display())?;
        writeln!(out)?;
    }

    if stats.extension_count() > 0 {
        heading(out, &bold, "SIZE BY FILE TYPE:")?;
        stats.sort_extensions_by_size();
        let total = stats.total_size();
        for ext in stats.extensions() {
            writeln!(
                out,
                "{:<15}: {:>15} ({:>5.1}%)",
                ext.extension,
                format_bytes(ext.size),
                percentage(ext.size, total)
            )?;
        }
        writeln!(out)?;
    }

    if stats.inaccessible_count() > 0 {
        heading(out, &bold, "INACCESSIBLE PATHS:")?;
        for path in stats.inaccessible_paths() {
            writeln!(out, "{}", path.display())?;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", RULE)
}

/// Write a bold section heading underlined with dashes.
fn heading<W: WriteColor>(out: &mut W, bold: &ColorSpec, title: &str) -> io::Result<()> {
    out.set_color(bold)?;
    writeln!(out, "{}", title)?;
    out.reset()?;
    writeln!(out, "{}", "-".repeat(title.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::WalkerConfig;
    use chrono::TimeZone;
    use termcolor::NoColor;

    fn render(stats: &mut DirectoryStats) -> String {
        let date = Local.with_ymd_and_hms(2024, 3, 9, 14, 5, 0).unwrap();
        let mut out = NoColor::new(Vec::new());
        write_report(&mut out, stats, Path::new("/data"), date).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_report_sections() {
        let mut stats = DirectoryStats::new(&WalkerConfig::default());
        stats.record_directory();
        stats.record_file(3072, Path::new("/data/big.rs"));
        stats.add_extension_size("rs", 3072);
        stats.record_file(1024, Path::new("/data/notes"));
        stats.add_extension_size("no extension", 1024);

        let report = render(&mut stats);

        assert!(report.contains("Directory: /data"));
        assert!(report.contains("Analysis Date: 2024-03-09 14:05:00"));
        assert!(report.contains("SUMMARY:\n--------\n"));
        assert!(report.contains("Total Size: 4.00 KB (4,096 bytes)"));
        assert!(report.contains("Files: 2"));
        assert!(report.contains("Directories: 1"));
        assert!(report.contains("LARGEST FILE:"));
        assert!(report.contains("Size: 3.00 KB"));
        assert!(report.contains("File: /data/big.rs"));
        assert!(report.contains("no extension   :         1.00 KB ( 25.0%)"));
        assert!(report.contains("rs             :         3.00 KB ( 75.0%)"));
        assert!(!report.contains("INACCESSIBLE PATHS:"));
    }

    #[test]
    fn test_report_lists_extensions_ascending() {
        let mut stats = DirectoryStats::new(&WalkerConfig::default());
        stats.record_file(300, Path::new("/data/a.big"));
        stats.add_extension_size("big", 300);
        stats.record_file(100, Path::new("/data/b.small"));
        stats.add_extension_size("small", 100);

        let report = render(&mut stats);

        let small = report.find("small").unwrap();
        let big = report.find("big   ").unwrap();
        assert!(small < big);
        assert_eq!(stats.extensions()[0].extension, "small");
    }

    #[test]
    fn test_report_skips_empty_sections() {
        let mut stats = DirectoryStats::new(&WalkerConfig::default());
        stats.record_directory();
        stats.add_inaccessible_path(Path::new("/data/locked"));

        let report = render(&mut stats);

        assert!(!report.contains("LARGEST FILE:"));
        assert!(!report.contains("SIZE BY FILE TYPE:"));
        assert!(report.contains("INACCESSIBLE PATHS:\n-------------------\n/data/locked\n"));
    }
}
