// Module structure for the hearthlog reader.

#[macro_use]
mod macros;

// Line plumbing
pub mod source;
pub mod cursor;
pub mod filter;

// Entry resolution
pub mod reader;
pub mod hearthstone;

// Process
pub mod conf;
pub mod runtime;
