//! Ensemble orchestration domain
//!
//! Types describing one request's journey through the pipeline: the fan-out
//! phase where all workers answer in parallel, and the review phase where the
//! reviewer merges the successful answers.

pub mod entities;
pub mod value_objects;

pub use entities::Phase;
pub use value_objects::{EnsembleResponse, ResponseMetadata, ReviewOutcome, WorkerResult};
