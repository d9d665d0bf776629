//! CLI command implementations.

pub mod candles;
mod common;
pub mod indices;
mod offline;
pub mod predict;
pub mod search;
pub mod validate;
pub mod watch;
