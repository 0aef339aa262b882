//! Conf module — reader configuration model and loading.

pub mod load;
pub mod model;

pub use model::{FilterConfig, OutputFormat, ReaderConfig};
