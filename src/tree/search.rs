//! File-name and file-content search walks

use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;

use super::output::{WalkEvent, WalkOutput};
use super::traversal::{EntryKind, EntrySource, HostEntries, validate_root};
use super::walker::TreeWalker;

impl TreeWalker {
    /// Report the absolute path of every file named exactly `name`.
    ///
    /// Directories are descended into but never matched. The whole tree is
    /// searched; returns `true` if anything matched.
    pub fn find_file<O: WalkOutput + ?Sized>(
        &self,
        root: &Path,
        name: &str,
        output: &mut O,
    ) -> Result<bool> {
        let root = validate_root(root)?;
        let found = find_file_from(&HostEntries, &root, name, output)?;
        info!("Searched {} for '{}': found={}", root.display(), name, found);
        Ok(found)
    }

    /// Report every file containing `needle`, with its occurrence count.
    ///
    /// Files that cannot be read count as zero matches. Returns `true` if
    /// any file had at least one match.
    pub fn find_word<O: WalkOutput + ?Sized>(
        &self,
        root: &Path,
        needle: &str,
        output: &mut O,
    ) -> Result<bool> {
        let root = validate_root(root)?;
        let found = find_word_from(&HostEntries, &root, needle, output)?;
        info!("Searched {} for word '{}': found={}", root.display(), needle, found);
        Ok(found)
    }
}

fn find_file_from<S, O>(source: &S, root: &Path, name: &str, output: &mut O) -> Result<bool>
where
    S: EntrySource + ?Sized,
    O: WalkOutput + ?Sized,
{
    search_dir(source, root, output, &mut |path: &Path, output: &mut O| {
        if path.file_name().is_none_or(|n| n != name) {
            return Ok(false);
        }
        output.emit(WalkEvent::FileFound {
            path: path.to_path_buf(),
        })?;
        Ok(true)
    })
}

fn find_word_from<S, O>(source: &S, root: &Path, needle: &str, output: &mut O) -> Result<bool>
where
    S: EntrySource + ?Sized,
    O: WalkOutput + ?Sized,
{
    search_dir(source, root, output, &mut |path: &Path, output: &mut O| {
        let occurrences = count_in_file(path, needle).unwrap_or_else(|e| {
            debug!("Cannot search {}: {}", path.display(), e);
            0
        });
        if occurrences == 0 {
            return Ok(false);
        }
        output.emit(WalkEvent::WordFound {
            path: path.to_path_buf(),
            occurrences,
        })?;
        Ok(true)
    })
}

/// Depth-first search below `dir`, calling `on_file` for every regular file.
///
/// Returns `true` if any call to `on_file` did. Entries that cannot be read
/// are logged and skipped.
fn search_dir<S, O, F>(source: &S, dir: &Path, output: &mut O, on_file: &mut F) -> Result<bool>
where
    S: EntrySource + ?Sized,
    O: WalkOutput + ?Sized,
    F: FnMut(&Path, &mut O) -> Result<bool>,
{
    let listing = match source.list_dir(dir) {
        Ok(listing) => listing,
        Err(e) => {
            debug!("Cannot read {}: {}", dir.display(), e);
            return Ok(false);
        }
    };
    listing.log_errors(dir);

    let mut found = false;
    for child in &listing.children {
        found |= match source.entry_kind(child) {
            Ok(EntryKind::File { .. }) => on_file(child, output)?,
            Ok(EntryKind::Dir) => search_dir(source, child, output, on_file)?,
            Ok(EntryKind::Skipped) => false,
            Err(e) => {
                debug!("Cannot read {}: {}", child.display(), e);
                false
            }
        };
    }
    Ok(found)
}

/// Count occurrences of `needle` in a file, line by line.
///
/// A line ends at `\n`, `\r\n` or a lone `\r`. Lines are decoded lossily so
/// that non-UTF-8 bytes do not end the scan. The file is closed when this
/// returns, on success or error.
fn count_in_file(path: &Path, needle: &str) -> io::Result<usize> {
    let mut reader = BufReader::new(File::open(path)?);
    let mut buf = Vec::new();
    let mut count = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        let decoded = String::from_utf8_lossy(&buf);
        let text = decoded.strip_suffix('\n').unwrap_or(&*decoded);
        // A trailing `\r` from `\r\n` leaves an empty last piece
        count += text
            .split('\r')
            .map(|line| count_occurrences(line, needle))
            .sum::<usize>();
    }

    Ok(count)
}

/// Count possibly-overlapping occurrences of `needle` in `haystack`.
///
/// `"aa"` occurs twice in `"aaa"`. An empty needle matches nothing.
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }

    let mut count = 0;
    let mut start = 0;
    while let Some(pos) = haystack[start..].find(needle) {
        count += 1;
        let at = start + pos;
        // Step one character past the match start to allow overlaps
        start = at + haystack[at..].chars().next().map_or(1, char::len_utf8);
    }
    count
}
