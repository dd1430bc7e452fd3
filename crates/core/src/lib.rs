//! Pure building blocks for the beer scraper.
//!
//! Input decoding, record parsing, and name normalization. Nothing in
//! this crate touches the network or the async runtime.

pub mod encoding;
pub mod error;
pub mod naming;
pub mod records;
pub mod types;

pub use error::CoreError;
pub use records::{DataRange, InputRecord, RecordParser};
pub use types::BeerId;
