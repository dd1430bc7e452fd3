//! `brewscrape-worker` library crate.
//!
//! Holds the command-line configuration and the run entrypoint so both
//! can be exercised from integration tests. The binary lives in `main.rs`.

pub mod app;
pub mod config;
