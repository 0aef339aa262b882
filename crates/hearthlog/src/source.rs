//! Source — where raw lines come from.
//!
//! Three flavours share the [`LineSource`] contract:
//!
//! - [`ListSource`]: a fixed, in-memory snapshot of lines
//! - [`FileSource`]: a finite text reader, exhausted at EOF
//! - [`MonitoringSource`]: tails a growing file, polling at EOF until a new
//!   line shows up or the shutdown signal fires
//!
//! Sources are generic over [`BufRead`] so the caller keeps ownership of the
//! underlying handle (`&mut BufReader<File>` works as well as an owned reader).

use std::collections::VecDeque;
use std::io::{self, BufRead};
use std::mem;
use std::thread;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tracing::{debug, trace, warn};

/// Poll interval used by [`MonitoringSource`] while waiting for new lines.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(100);

/// The source has no further lines.
///
/// For finite sources this is permanent. A monitoring source only reports it
/// after cancellation or a read failure.
#[derive(Debug, Error)]
pub enum NoMoreInput {
    #[error("end of input")]
    EndOfInput,

    #[error("input interrupted")]
    Interrupted,

    #[error("end of scoped view")]
    ScopeEnded,

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub trait LineSource {
    /// Produce the next raw line, without its line terminator.
    fn read_line(&mut self) -> Result<String, NoMoreInput>;
}

/// Remove a trailing `\n` or `\r\n`.
fn strip_line_ending(line: &mut String) {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
}

// ── List ────────────────────────────────────────────────────────

/// Snapshot of an in-memory sequence of lines.
#[derive(Debug, Clone, Default)]
pub struct ListSource {
    lines: VecDeque<String>,
}

impl ListSource {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl LineSource for ListSource {
    fn read_line(&mut self) -> Result<String, NoMoreInput> {
        self.lines.pop_front().ok_or(NoMoreInput::EndOfInput)
    }
}

// ── File ────────────────────────────────────────────────────────

/// Finite line reader. EOF and read failures both end the input; the
/// failure case carries the I/O error. Either way the source latches and
/// reports [`NoMoreInput::EndOfInput`] from then on.
pub struct FileSource<R> {
    reader: R,
    buf: String,
    ended: bool,
}

impl<R: BufRead> FileSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: String::new(),
            ended: false,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended
    }

    pub fn into_inner(self) -> R {
        self.reader
    }
}

impl<R: BufRead> LineSource for FileSource<R> {
    fn read_line(&mut self) -> Result<String, NoMoreInput> {
        if self.ended {
            return Err(NoMoreInput::EndOfInput);
        }
        self.buf.clear();
        loop {
            match self.reader.read_line(&mut self.buf) {
                Ok(0) => {
                    self.ended = true;
                    return Err(NoMoreInput::EndOfInput);
                }
                Ok(_) => {
                    let mut line = mem::take(&mut self.buf);
                    strip_line_ending(&mut line);
                    return Ok(line);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    debug!(error = %e, "file source: read failed, treating as end of input");
                    self.ended = true;
                    return Err(NoMoreInput::Io(e));
                }
            }
        }
    }
}

// ── Monitoring ──────────────────────────────────────────────────

/// Tails a file that another process keeps appending to.
///
/// At EOF the source sleeps for the poll interval and retries, so running
/// out of data never ends the input by itself. A trailing line without its
/// newline is held back until the rest of it arrives. Once the shutdown
/// signal is observed (or a read fails) the source latches and keeps
/// reporting [`NoMoreInput::Interrupted`].
pub struct MonitoringSource<R> {
    reader: R,
    partial: String,
    poll_interval: Duration,
    shutdown: Option<watch::Receiver<bool>>,
    interrupted: bool,
}

impl<R: BufRead> MonitoringSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            partial: String::new(),
            poll_interval: DEFAULT_POLL_INTERVAL,
            shutdown: None,
            interrupted: false,
        }
    }

    pub fn with_poll_interval(mut self, poll_interval: Duration) -> Self {
        self.poll_interval = poll_interval;
        self
    }

    /// Cancel the tail when the channel carries `true` or its sender is dropped.
    pub fn with_shutdown(mut self, shutdown_rx: watch::Receiver<bool>) -> Self {
        self.shutdown = Some(shutdown_rx);
        self
    }

    pub fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    fn shutdown_requested(&self) -> bool {
        match &self.shutdown {
            Some(rx) => match rx.has_changed() {
                Ok(_) => *rx.borrow(),
                Err(_) => true,
            },
            None => false,
        }
    }
}

impl<R: BufRead> LineSource for MonitoringSource<R> {
    fn read_line(&mut self) -> Result<String, NoMoreInput> {
        loop {
            if self.interrupted {
                return Err(NoMoreInput::Interrupted);
            }
            if self.shutdown_requested() {
                debug!(
                    buffered = self.partial.len(),
                    "monitoring source: shutdown requested, ending input"
                );
                self.interrupted = true;
                return Err(NoMoreInput::Interrupted);
            }

            match self.reader.read_line(&mut self.partial) {
                Ok(0) => thread::sleep(self.poll_interval),
                Ok(_) if self.partial.ends_with('\n') => {
                    let mut line = mem::take(&mut self.partial);
                    strip_line_ending(&mut line);
                    return Ok(line);
                }
                Ok(n) => {
                    trace!(bytes = n, "monitoring source: partial line, waiting for newline");
                    thread::sleep(self.poll_interval);
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(error = %e, "monitoring source: read failed, ending input");
                    self.interrupted = true;
                    return Err(NoMoreInput::Io(e));
                }
            }
        }
    }
}
