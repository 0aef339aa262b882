pub use super::error::ParseError;
use crate::cursor::LineReader;

pub trait EntryParser: Send + Sync {
    type Entry;

    /// cheap shape check; must not touch the reader
    fn can_parse(&self, line: &str) -> bool;

    /// parse `line`, pulling any follow-up lines from `reader`
    fn parse(&self, line: &str, reader: &mut dyn LineReader) -> Result<Self::Entry, ParseError>;

    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

pub type BoxedParser<E> = Box<dyn EntryParser<Entry = E>>;
