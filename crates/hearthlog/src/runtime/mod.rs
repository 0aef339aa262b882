//! Runtime module — process lifecycle: boot, tail, serve, shutdown.

pub mod boot;
pub mod serve;
pub mod stop;
pub mod tail;
