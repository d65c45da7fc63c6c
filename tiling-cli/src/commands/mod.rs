//! CLI command implementations.

pub mod assemble;
pub mod common;
pub mod config;
pub mod filter;
pub mod grid;
pub mod split;
