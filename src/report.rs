//! Match output for the parallel search
//!
//! A dedicated writer thread owns the output sink and receives matched
//! paths from all workers over a channel, so match lines never interleave
//! mid-line no matter how many workers report at once. Match order across
//! workers stays unspecified.
//!
//! Also provides the styled end-of-run summary printed to stderr.

use crate::error::{FindError, Result, WorkerError};
use crate::walker::SearchResult;
use console::style;
use crossbeam_channel::{unbounded, Receiver, Sender};
use std::io::Write;
use std::path::PathBuf;
use std::thread::{self, JoinHandle};

/// Writer thread receiving matched paths from all workers
pub struct MatchWriter {
    sender: Sender<PathBuf>,
    handle: JoinHandle<std::io::Result<()>>,
}

impl MatchWriter {
    /// Spawn the writer thread over an output sink
    pub fn new<W: Write + Send + 'static>(out: W) -> Result<Self> {
        let (sender, receiver) = unbounded();

        let handle = thread::Builder::new()
            .name("match-writer".into())
            .spawn(move || write_loop(receiver, out))
            .map_err(FindError::Io)?;

        Ok(Self { sender, handle })
    }

    /// Get a sender handle for a worker
    pub fn sink(&self) -> MatchSink {
        MatchSink {
            sender: self.sender.clone(),
        }
    }

    /// Close the channel, wait for all pending matches to be written,
    /// and surface any write error
    pub fn finish(self) -> Result<()> {
        let Self { sender, handle } = self;
        drop(sender);

        match handle.join() {
            Ok(result) => result.map_err(FindError::Io),
            Err(_) => Err(WorkerError::MatchChannelClosed.into()),
        }
    }
}

/// Handle for reporting matches from a worker
#[derive(Clone)]
pub struct MatchSink {
    sender: Sender<PathBuf>,
}

impl MatchSink {
    /// Report one matched path
    pub fn send(&self, path: PathBuf) -> std::result::Result<(), WorkerError> {
        self.sender
            .send(path)
            .map_err(|_| WorkerError::MatchChannelClosed)
    }
}

/// Drain the channel, one line per match
fn write_loop<W: Write>(receiver: Receiver<PathBuf>, mut out: W) -> std::io::Result<()> {
    for path in receiver {
        writeln!(out, "{}", path.display())?;
    }
    out.flush()
}

/// Format a number with thousands separators
fn format_number(n: u64) -> String {
    let s = n.to_string();
    let bytes: Vec<_> = s.bytes().rev().collect();

    let chunks: Vec<String> = bytes
        .chunks(3)
        .map(|chunk| chunk.iter().rev().map(|&b| b as char).collect::<String>())
        .collect();

    chunks.into_iter().rev().collect::<Vec<_>>().join(",")
}

/// Print a summary of the search to stderr (stdout carries only matches)
pub fn print_summary(result: &SearchResult) {
    let duration_secs = result.duration.as_secs_f64();
    let rate = if duration_secs > 0.0 {
        result.dirs_scanned as f64 / duration_secs
    } else {
        0.0
    };

    eprintln!();
    eprintln!("{}", style("Search Complete").green().bold());
    eprintln!("{}", style("─".repeat(50)).dim());
    eprintln!(
        "  {} {}",
        style("Directories:").bold(),
        format_number(result.dirs_scanned)
    );
    eprintln!(
        "  {} {}",
        style("Matches:").bold(),
        format_number(result.matches_found)
    );
    eprintln!(
        "  {} {:.1}s ({:.0} dirs/sec)",
        style("Duration:").bold(),
        duration_secs,
        rate
    );
    if result.skipped > 0 {
        eprintln!(
            "  {} {}",
            style("Skipped:").bold(),
            format_number(result.skipped)
        );
    }
    if result.errors > 0 {
        eprintln!(
            "  {} {}",
            style("Errors:").yellow().bold(),
            format_number(result.errors)
        );
    }
    eprintln!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[derive(Clone, Default)]
    struct SharedBuf(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuf {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_writer_one_line_per_match() {
        let buf = SharedBuf::default();
        let writer = MatchWriter::new(buf.clone()).unwrap();

        let sink = writer.sink();
        sink.send(PathBuf::from("/a/hit")).unwrap();
        sink.send(PathBuf::from("/b/hit")).unwrap();
        drop(sink);

        writer.finish().unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines, vec!["/a/hit", "/b/hit"]);
    }

    #[test]
    fn test_sinks_are_independent_clones() {
        let buf = SharedBuf::default();
        let writer = MatchWriter::new(buf.clone()).unwrap();

        let a = writer.sink();
        let b = a.clone();
        a.send(PathBuf::from("/x")).unwrap();
        b.send(PathBuf::from("/y")).unwrap();
        drop(a);
        drop(b);

        writer.finish().unwrap();

        let out = String::from_utf8(buf.0.lock().unwrap().clone()).unwrap();
        assert_eq!(out.lines().count(), 2);
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
        assert_eq!(format_number(1234567890), "1,234,567,890");
    }
}
