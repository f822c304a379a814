//! Orchestration value objects - immutable result types for ensemble runs.
//!
//! These types represent the outputs of each phase:
//! - [`WorkerResult`] - One worker's answer (or failure) from the fan-out phase
//! - [`ReviewOutcome`] - The reviewer's critique and synthesized final answer
//! - [`EnsembleResponse`] - Complete per-request result returned to the caller

use serde::{Deserialize, Serialize};

/// Result of one worker invocation
///
/// Exactly one of these exists per configured worker, in configured order,
/// for every completed fan-out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    /// The agent that produced this result
    pub agent_name: String,
    /// The answer text; empty when the worker failed
    #[serde(rename = "response")]
    pub content: String,
    /// Whether the invocation succeeded
    pub is_success: bool,
    /// Error description, present iff the invocation failed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Wall time of the whole invocation including retries, in seconds
    #[serde(rename = "processing_time")]
    pub elapsed_secs: f64,
}

impl WorkerResult {
    pub fn success(
        agent_name: impl Into<String>,
        content: impl Into<String>,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            content: content.into(),
            is_success: true,
            error: None,
            elapsed_secs,
        }
    }

    pub fn failure(
        agent_name: impl Into<String>,
        error: impl Into<String>,
        elapsed_secs: f64,
    ) -> Self {
        Self {
            agent_name: agent_name.into(),
            content: String::new(),
            is_success: false,
            error: Some(error.into()),
            elapsed_secs,
        }
    }
}

/// The reviewer's output, split into critique and final answer
///
/// `review_comment` is empty when the reviewer's reply lacked the expected
/// structure (degraded mode); `final_answer` is always populated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewOutcome {
    pub review_comment: String,
    pub final_answer: String,
}

/// Summary counts and timing for one request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseMetadata {
    /// Full pipeline wall time (fan-out plus review), in seconds
    pub processing_time_seconds: f64,
    pub total_workers: usize,
    pub successful_workers: usize,
    pub failed_workers: usize,
}

/// Complete result of one ensemble request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnsembleResponse {
    pub final_answer: String,
    pub review_comment: String,
    /// One entry per configured worker, in configured order
    pub worker_responses: Vec<WorkerResult>,
    pub metadata: ResponseMetadata,
}

impl EnsembleResponse {
    /// Merge worker results, the review outcome, and pipeline timing into
    /// the response entity returned to the caller.
    pub fn compose(
        worker_results: Vec<WorkerResult>,
        review: ReviewOutcome,
        total_elapsed_secs: f64,
    ) -> Self {
        let total_workers = worker_results.len();
        let successful_workers = worker_results.iter().filter(|r| r.is_success).count();
        Self {
            final_answer: review.final_answer,
            review_comment: review.review_comment,
            metadata: ResponseMetadata {
                processing_time_seconds: total_elapsed_secs,
                total_workers,
                successful_workers,
                failed_workers: total_workers - successful_workers,
            },
            worker_responses: worker_results,
        }
    }

    /// Returns an iterator over only the successful worker results.
    pub fn successful_results(&self) -> impl Iterator<Item = &WorkerResult> {
        self.worker_responses.iter().filter(|r| r.is_success)
    }

    /// Returns an iterator over only the failed worker results.
    pub fn failed_results(&self) -> impl Iterator<Item = &WorkerResult> {
        self.worker_responses.iter().filter(|r| !r.is_success)
    }
}
