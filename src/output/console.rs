//! Console output for search and prune walks
//!
//! `ConsoleOutput` writes one line per walk event to stdout as the walk
//! produces it.

use std::io::{self, Write};
use termcolor::{Color, ColorSpec, StandardStream, WriteColor};

use crate::tree::{WalkEvent, WalkOutput};

use super::config::OutputConfig;

/// Line-oriented stdout sink for walk events.
pub struct ConsoleOutput {
    stdout: StandardStream,
}

impl ConsoleOutput {
    pub fn new(config: OutputConfig) -> Self {
        Self {
            stdout: StandardStream::stdout(config.color_choice()),
        }
    }
}

impl WalkOutput for ConsoleOutput {
    fn emit(&mut self, event: WalkEvent) -> io::Result<()> {
        write_event(&mut self.stdout, &event)
    }
}

/// Write a single event line, colouring the part that identifies the match.
fn write_event<W: WriteColor>(out: &mut W, event: &WalkEvent) -> io::Result<()> {
    let mut highlight = ColorSpec::new();
    match event {
        WalkEvent::FileFound { .. } => {
            highlight.set_fg(Some(Color::Cyan));
            out.set_color(&highlight)?;
            write!(out, "{}", event)?;
            out.reset()?;
        }
        WalkEvent::WordFound { occurrences, .. } => {
            let line = event.to_string();
            let name_len = line.len() - occurrences.to_string().len() - 2;
            highlight.set_fg(Some(Color::Cyan));
            out.set_color(&highlight)?;
            write!(out, "{}", &line[..name_len])?;
            out.reset()?;
            write!(out, "{}", &line[name_len..])?;
        }
        WalkEvent::Removed { .. } => {
            highlight.set_fg(Some(Color::Yellow));
            out.set_color(&highlight)?;
            write!(out, "{}", event)?;
            out.reset()?;
        }
    }
    writeln!(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::RemovedKind;
    use std::path::PathBuf;
    use termcolor::NoColor;

    fn render(event: WalkEvent) -> String {
        let mut out = NoColor::new(Vec::new());
        write_event(&mut out, &event).unwrap();
        String::from_utf8(out.into_inner()).unwrap()
    }

    #[test]
    fn test_write_event_lines() {
        assert_eq!(
            render(WalkEvent::FileFound {
                path: PathBuf::from("/data/x.txt")
            }),
            "/data/x.txt\n"
        );
        assert_eq!(
            render(WalkEvent::WordFound {
                path: PathBuf::from("/data/notes.md"),
                occurrences: 12
            }),
            "notes.md: 12\n"
        );
        assert_eq!(
            render(WalkEvent::Removed {
                path: PathBuf::from("/data/empty"),
                kind: RemovedKind::Directory
            }),
            "Deleted empty folder: /data/empty\n"
        );
    }
}
