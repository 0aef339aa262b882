//! Cursor — lookahead over a line source.
//!
//! [`LineCursor`] sits on top of a [`LineSource`] and adds a pending buffer
//! so parsers can peek at the next line without consuming it. [`ReadWhile`]
//! is a scoped view that stops (without consuming) at the first line that
//! fails its condition, leaving that line for whoever reads next.

use std::collections::VecDeque;

use tracing::trace;

use crate::source::{LineSource, ListSource, NoMoreInput};

/// Peek/consume access to a stream of lines.
pub trait LineReader {
    /// Next unconsumed line. Repeated calls return the same line until
    /// [`consume`](LineReader::consume) is called. `None` when exhausted.
    fn peek(&mut self) -> Option<&str>;

    /// Take the next line.
    fn consume(&mut self) -> Result<String, NoMoreInput>;

    /// Whether the next line exists and satisfies `condition`.
    fn matches_next(&mut self, condition: &dyn Fn(&str) -> bool) -> bool {
        self.peek().is_some_and(condition)
    }

    fn has_next(&mut self) -> bool {
        self.peek().is_some()
    }
}

impl<R: LineReader + ?Sized> LineReader for &mut R {
    fn peek(&mut self) -> Option<&str> {
        (**self).peek()
    }

    fn consume(&mut self) -> Result<String, NoMoreInput> {
        (**self).consume()
    }

    fn matches_next(&mut self, condition: &dyn Fn(&str) -> bool) -> bool {
        (**self).matches_next(condition)
    }

    fn has_next(&mut self) -> bool {
        (**self).has_next()
    }
}

pub type LineFilter<'a> = Box<dyn Fn(&str) -> bool + 'a>;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CursorStats {
    /// Physical lines pulled from the source.
    pub lines_pulled: u64,
    /// Lines the filter dropped.
    pub lines_filtered: u64,
}

/// Root cursor: a source, an optional line filter and the pending buffer.
///
/// The filter runs once per physical line as it is pulled from the source.
/// Rejected lines are dropped there and never reach `peek`, `consume` or
/// `matches_next`.
///
/// When a peek runs into the end of the input, the reason is kept and handed
/// to the next `consume` instead of pulling again.
pub struct LineCursor<'a> {
    source: Box<dyn LineSource + 'a>,
    filter: Option<LineFilter<'a>>,
    pending: VecDeque<String>,
    exhausted: Option<NoMoreInput>,
    stats: CursorStats,
}

impl<'a> LineCursor<'a> {
    pub fn new(source: impl LineSource + 'a) -> Self {
        Self {
            source: Box::new(source),
            filter: None,
            pending: VecDeque::new(),
            exhausted: None,
            stats: CursorStats::default(),
        }
    }

    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(ListSource::new(lines))
    }

    /// Only surface lines for which `accept` returns true.
    pub fn with_filter(mut self, accept: impl Fn(&str) -> bool + 'a) -> Self {
        self.filter = Some(Box::new(accept));
        self
    }

    pub fn stats(&self) -> CursorStats {
        self.stats
    }

    fn pull(&mut self) -> Result<String, NoMoreInput> {
        loop {
            let line = self.source.read_line()?;
            self.stats.lines_pulled += 1;
            match &self.filter {
                Some(accept) if !accept(&line) => {
                    self.stats.lines_filtered += 1;
                    trace!(line = %line, "cursor: line filtered out");
                }
                _ => return Ok(line),
            }
        }
    }
}

impl LineReader for LineCursor<'_> {
    fn peek(&mut self) -> Option<&str> {
        if self.pending.is_empty() && self.exhausted.is_none() {
            match self.pull() {
                Ok(line) => self.pending.push_back(line),
                Err(reason) => self.exhausted = Some(reason),
            }
        }
        self.pending.front().map(String::as_str)
    }

    fn consume(&mut self) -> Result<String, NoMoreInput> {
        if let Some(line) = self.pending.pop_front() {
            return Ok(line);
        }
        match self.exhausted.take() {
            Some(reason) => Err(reason),
            None => self.pull(),
        }
    }
}

/// View over `inner` that yields lines only while `condition` holds.
///
/// The first time the condition fails on the peeked line, the view ends for
/// good and reports [`NoMoreInput::ScopeEnded`]. That line is never consumed:
/// it stays buffered in `inner` for the parent reader. If instead `inner`
/// runs dry, the view ends too but passes on `inner`'s own reason.
pub struct ReadWhile<R, F> {
    inner: R,
    condition: F,
    ended: Option<ScopeEnd>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScopeEnd {
    Condition,
    Exhausted,
}

impl<R, F> ReadWhile<R, F>
where
    R: LineReader,
    F: Fn(&str) -> bool,
{
    pub fn new(inner: R, condition: F) -> Self {
        Self {
            inner,
            condition,
            ended: None,
        }
    }

    pub fn is_ended(&self) -> bool {
        self.ended.is_some()
    }

    pub fn into_inner(self) -> R {
        self.inner
    }

    fn in_scope(&mut self) -> bool {
        if self.ended.is_some() {
            return false;
        }
        let end = match self.inner.peek() {
            None => ScopeEnd::Exhausted,
            Some(line) if !(self.condition)(line) => ScopeEnd::Condition,
            Some(_) => return true,
        };
        self.ended = Some(end);
        false
    }
}

impl<R, F> LineReader for ReadWhile<R, F>
where
    R: LineReader,
    F: Fn(&str) -> bool,
{
    fn peek(&mut self) -> Option<&str> {
        if self.in_scope() {
            self.inner.peek()
        } else {
            None
        }
    }

    fn consume(&mut self) -> Result<String, NoMoreInput> {
        if self.in_scope() {
            return self.inner.consume();
        }
        match self.ended {
            Some(ScopeEnd::Exhausted) if !self.inner.has_next() => self.inner.consume(),
            _ => Err(NoMoreInput::ScopeEnded),
        }
    }
}
