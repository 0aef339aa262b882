//! Entry resolution.
//!
//! An [`EntryReader`] turns lines from a [`LineReader`] into entries by
//! offering each line to a set of [`EntryParser`]s. A parser may pull as many
//! follow-up lines as it needs, including through a nested `EntryReader`
//! scoped with [`ReadWhile`](crate::cursor::ReadWhile).
//!
//! # Consumption policy
//!
//! Lines pulled by a parser that then declines stay consumed; the next
//! candidate continues from wherever the cursor is. Nothing is pushed back.
//! Every line consumed while resolving an entry is journalled, and when no
//! parser succeeds the journal is handed to the caller as a [`NotReadable`].
//!
//! - `traits.rs`: the parser contract
//! - `error.rs`: decline, resolution failure and read outcome types

pub mod error;
pub mod traits;

pub use error::{NotReadable, ParseError, ReadError};
pub use traits::{BoxedParser, EntryParser};

use std::mem;

use tracing::{debug, trace};

use crate::cursor::LineReader;
use crate::source::NoMoreInput;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    /// Entries successfully produced.
    pub entries: u64,
    /// Resolution failures reported.
    pub not_readable: u64,
    /// Lines consumed across all attempts.
    pub lines: u64,
}

pub struct EntryReader<R, E> {
    reader: R,
    parsers: Vec<BoxedParser<E>>,
    journal: Vec<String>,
    stats: ReadStats,
}

impl<R: LineReader, E> EntryReader<R, E> {
    pub fn new(reader: R, parsers: Vec<BoxedParser<E>>) -> Self {
        Self {
            reader,
            parsers,
            journal: Vec::new(),
            stats: ReadStats::default(),
        }
    }

    /// Build the parser set once from `factory`.
    pub fn from_factory<F>(reader: R, factory: F) -> Self
    where
        F: FnOnce() -> Vec<BoxedParser<E>>,
    {
        Self::new(reader, factory())
    }

    /// Whether another line is available. Never consumes.
    pub fn has_next(&mut self) -> bool {
        self.reader.has_next()
    }

    pub fn stats(&self) -> ReadStats {
        self.stats
    }

    pub fn parser_count(&self) -> usize {
        self.parsers.len()
    }

    pub fn into_inner(self) -> R {
        self.reader
    }

    /// Resolve the next entry.
    ///
    /// Consumes one line, then tries every parser whose `can_parse` accepts
    /// it, in order, until one succeeds. Fails with
    /// [`ReadError::NoMoreInput`] when no line is left, or with
    /// [`ReadError::NotReadable`] when every candidate declined.
    pub fn read_entry(&mut self) -> Result<E, ReadError> {
        let line = self.reader.consume()?;
        self.journal.push(line.clone());

        let mut causes = Vec::new();
        for parser in &self.parsers {
            if !parser.can_parse(&line) {
                continue;
            }

            let mut recorder = Recorder {
                inner: &mut self.reader,
                journal: &mut self.journal,
            };
            match parser.parse(&line, &mut recorder) {
                Ok(entry) => {
                    self.stats.entries += 1;
                    self.stats.lines += self.journal.len() as u64;
                    self.journal.clear();
                    return Ok(entry);
                }
                Err(cause) => {
                    trace!(
                        parser = parser.name(),
                        consumed = self.journal.len(),
                        error = %cause,
                        "reader: candidate declined"
                    );
                    causes.push(cause);
                }
            }
        }

        let lines = mem::take(&mut self.journal);
        self.stats.not_readable += 1;
        self.stats.lines += lines.len() as u64;
        debug!(
            first = %line,
            lines = lines.len(),
            causes = causes.len(),
            "reader: no parser could read entry"
        );
        Err(NotReadable { lines, causes }.into())
    }

    /// Iterate entries until the input is exhausted.
    ///
    /// Resolution failures are yielded as `Err` and iteration continues.
    pub fn entries(&mut self) -> Entries<'_, R, E> {
        Entries {
            reader: self,
            done: false,
        }
    }
}

/// Iterator returned by [`EntryReader::entries`].
pub struct Entries<'a, R, E> {
    reader: &'a mut EntryReader<R, E>,
    done: bool,
}

impl<R: LineReader, E> Iterator for Entries<'_, R, E> {
    type Item = Result<E, NotReadable>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.reader.read_entry() {
            Ok(entry) => Some(Ok(entry)),
            Err(ReadError::NotReadable(e)) => Some(Err(e)),
            Err(ReadError::NoMoreInput(reason)) => {
                trace!(reason = %reason, "reader: input exhausted");
                self.done = true;
                None
            }
        }
    }
}

/// Journals every line a parser consumes.
struct Recorder<'a> {
    inner: &'a mut dyn LineReader,
    journal: &'a mut Vec<String>,
}

impl LineReader for Recorder<'_> {
    fn peek(&mut self) -> Option<&str> {
        self.inner.peek()
    }

    fn consume(&mut self) -> Result<String, NoMoreInput> {
        let line = self.inner.consume()?;
        self.journal.push(line.clone());
        Ok(line)
    }
}
