//! RateBeer lookup client.
//!
//! Exposes the two operations the scraper needs from the beer database,
//! search by name and fetch by URL, behind the [`LookupClient`] trait,
//! with a [`reqwest`]-backed implementation in [`api`].

pub mod api;
pub mod lookup;
pub mod types;
pub mod urls;

pub use api::{LookupError, RateBeerApi, RateBeerConfig};
pub use lookup::LookupClient;
pub use types::{RemoteEntity, SearchCandidate};
