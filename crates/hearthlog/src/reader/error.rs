use thiserror::Error;

use crate::source::NoMoreInput;

/// Why a single parser declined a line.
///
/// These never escape the [`EntryReader`](super::EntryReader) directly; they
/// are collected as the causes of a [`NotReadable`].
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("not parsable: {0}")]
    NotParsable(String),

    /// `expected` is the shallowest indentation the line may have.
    #[error("indentation {found} below expected {expected}")]
    Indentation { expected: usize, found: usize },

    #[error("unexpected entry: {0}")]
    Unexpected(String),

    #[error("ran out of input: {0}")]
    NoMoreInput(#[from] NoMoreInput),

    #[error("nested block not readable: {0}")]
    NotReadable(Box<NotReadable>),
}

impl From<NotReadable> for ParseError {
    fn from(e: NotReadable) -> Self {
        ParseError::NotReadable(Box::new(e))
    }
}

impl From<ReadError> for ParseError {
    fn from(e: ReadError) -> Self {
        match e {
            ReadError::NotReadable(e) => e.into(),
            ReadError::NoMoreInput(e) => e.into(),
        }
    }
}

impl ParseError {
    pub fn not_parsable(line: &str) -> Self {
        ParseError::NotParsable(line.to_string())
    }
}

/// No parser could turn the current lines into an entry.
///
/// `lines` holds every line consumed while trying, in order; `causes` holds
/// one error per parser that attempted a parse.
#[derive(Debug, Error)]
#[error("{} line(s) not readable ({} cause(s))", .lines.len(), .causes.len())]
pub struct NotReadable {
    pub lines: Vec<String>,
    pub causes: Vec<ParseError>,
}

/// Outcome of a failed [`read_entry`](super::EntryReader::read_entry).
#[derive(Debug, Error)]
pub enum ReadError {
    #[error(transparent)]
    NotReadable(#[from] NotReadable),

    #[error(transparent)]
    NoMoreInput(#[from] NoMoreInput),
}

impl ReadError {
    pub fn is_no_more_input(&self) -> bool {
        matches!(self, ReadError::NoMoreInput(_))
    }
}
