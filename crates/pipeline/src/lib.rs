//! Beer resolution pipeline.
//!
//! Resolves parsed records against RateBeer with [`Resolver`], writes
//! each result with [`ArtifactWriter`], and drives both over a record
//! list with the fixed-size [`WorkerPool`].

pub mod artifact;
pub mod error;
pub mod pool;
pub mod resolver;

pub use artifact::ArtifactWriter;
pub use error::{ArtifactError, ProcessError, ResolveError};
pub use pool::{progress_line, PoolSummary, ProcessingOutcome, WorkerPool, DEFAULT_CONCURRENCY};
pub use resolver::{Resolution, ResolutionSource, Resolver};
