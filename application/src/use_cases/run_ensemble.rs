//! Run Ensemble use case
//!
//! Orchestrates the full pipeline for one request: concurrent worker fan-out,
//! review prompt construction, reviewer invocation, and result composition.
//!
//! Per-request flow:
//! dispatch → join on all workers → (all failed → terminal error) →
//! review → compose. Partial worker failure never aborts the request;
//! only "no workers answered" and "synthesis failed" are terminal.

use crate::invoker::{Invocation, invoke_agent};
use crate::ports::chat_endpoint::ChatEndpoint;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use ensemble_domain::{
    Conversation, DomainError, EnsembleAgents, EnsembleResponse, Message, Phase,
    ReviewPromptTemplate, WorkerResult, parse_review_reply,
};
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{info, warn};

/// Terminal errors of an ensemble run
///
/// Every per-worker fault is absorbed into a [`WorkerResult`]; only these
/// conditions propagate to the caller.
#[derive(Error, Debug)]
pub enum RunEnsembleError {
    #[error("Invalid request: {0}")]
    InvalidInput(#[from] DomainError),

    #[error("All {total} worker agents failed to respond")]
    AllWorkersFailed { total: usize },

    #[error("Reviewer agent '{agent}' failed: {detail}")]
    ReviewerFailed { agent: String, detail: String },
}

/// Input for the RunEnsemble use case
#[derive(Debug, Clone)]
pub struct RunEnsembleInput {
    /// The conversation, ending with the user prompt to answer
    pub conversation: Conversation,
    /// Agent roster for this request (shared read-only configuration)
    pub agents: EnsembleAgents,
}

impl RunEnsembleInput {
    pub fn new(conversation: Conversation, agents: EnsembleAgents) -> Self {
        Self {
            conversation,
            agents,
        }
    }
}

/// Use case for running one ensemble request
pub struct RunEnsembleUseCase<E: ChatEndpoint + 'static> {
    endpoint: Arc<E>,
}

impl<E: ChatEndpoint + 'static> RunEnsembleUseCase<E> {
    pub fn new(endpoint: Arc<E>) -> Self {
        Self { endpoint }
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(
        &self,
        input: RunEnsembleInput,
    ) -> Result<EnsembleResponse, RunEnsembleError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunEnsembleInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<EnsembleResponse, RunEnsembleError> {
        input.agents.validate()?;

        let start = Instant::now();
        info!(
            workers = input.agents.worker_count(),
            reviewer = %input.agents.reviewer.name,
            "Starting ensemble run"
        );

        // Phase 1: concurrent worker fan-out
        let worker_results = self.dispatch_workers(&input, progress).await;

        let successful = worker_results.iter().filter(|r| r.is_success).count();
        info!(
            successful,
            failed = worker_results.len() - successful,
            "Fan-out complete"
        );

        if successful == 0 {
            return Err(RunEnsembleError::AllWorkersFailed {
                total: worker_results.len(),
            });
        }

        // Phase 2: review of the successful subset
        let review = self
            .review_phase(&input, &worker_results, progress)
            .await?;

        let response = EnsembleResponse::compose(
            worker_results,
            review,
            start.elapsed().as_secs_f64(),
        );
        info!(
            elapsed_secs = response.metadata.processing_time_seconds,
            "Ensemble run complete"
        );
        Ok(response)
    }

    /// Launch one invoker task per worker and join on all of them.
    ///
    /// Each task writes to its own reserved slot, so the returned list is in
    /// configured order regardless of which endpoint answers first. A failing
    /// worker never aborts its siblings; the join barrier waits for every
    /// launched task.
    async fn dispatch_workers(
        &self,
        input: &RunEnsembleInput,
        progress: &dyn ProgressNotifier,
    ) -> Vec<WorkerResult> {
        let workers = &input.agents.workers;
        progress.on_phase_start(&Phase::FanOut, workers.len());

        let mut join_set = JoinSet::new();
        for (index, worker) in workers.iter().cloned().enumerate() {
            let endpoint = Arc::clone(&self.endpoint);
            let messages = input.conversation.messages().to_vec();

            join_set.spawn(async move {
                let outcome = invoke_agent(endpoint.as_ref(), &worker, &messages).await;
                (index, worker.name, outcome)
            });
        }

        let mut slots: Vec<Option<WorkerResult>> = (0..workers.len()).map(|_| None).collect();

        while let Some(joined) = join_set.join_next().await {
            match joined {
                Ok((index, name, outcome)) => {
                    progress.on_agent_complete(&Phase::FanOut, &name, outcome.is_success());
                    slots[index] = Some(outcome.into_worker_result(name));
                }
                Err(e) => {
                    warn!("Worker task join error: {}", e);
                }
            }
        }

        progress.on_phase_complete(&Phase::FanOut);

        // A slot can only still be empty if its task panicked or was aborted.
        slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| {
                    WorkerResult::failure(&workers[index].name, "worker task aborted", 0.0)
                })
            })
            .collect()
    }

    /// Build the review prompt from the successful results and invoke the
    /// reviewer. Reviewer failure is terminal for the whole request.
    async fn review_phase(
        &self,
        input: &RunEnsembleInput,
        worker_results: &[WorkerResult],
        progress: &dyn ProgressNotifier,
    ) -> Result<ensemble_domain::ReviewOutcome, RunEnsembleError> {
        let reviewer = &input.agents.reviewer;
        progress.on_phase_start(&Phase::Review, 1);

        let successful: Vec<&WorkerResult> =
            worker_results.iter().filter(|r| r.is_success).collect();

        let review_prompt = ReviewPromptTemplate::build(
            input.conversation.latest_prompt(),
            input.conversation.history(),
            &successful,
        );
        let messages = vec![Message::user(review_prompt)];

        let outcome = invoke_agent(self.endpoint.as_ref(), reviewer, &messages).await;
        progress.on_agent_complete(&Phase::Review, &reviewer.name, outcome.is_success());
        progress.on_phase_complete(&Phase::Review);

        match outcome {
            Invocation::Success { content, .. } => {
                if content.trim().is_empty() {
                    return Err(RunEnsembleError::ReviewerFailed {
                        agent: reviewer.name.clone(),
                        detail: "empty response body".to_string(),
                    });
                }
                let split = parse_review_reply(&content);
                if !split.is_structured() {
                    warn!(
                        agent = %reviewer.name,
                        "Reviewer reply lacked the expected structure, treating whole text as final answer"
                    );
                }
                Ok(split.into_outcome())
            }
            Invocation::Failure { kind, .. } => Err(RunEnsembleError::ReviewerFailed {
                agent: reviewer.name.clone(),
                detail: kind.to_string(),
            }),
        }
    }
}
