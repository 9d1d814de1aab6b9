//! Command implementations

pub mod ask;
pub mod config;
pub mod intent;
pub mod serve;
pub mod stats;
