//! Core types and trait definitions for the gameweek prediction game.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

pub mod error;
pub mod model;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
