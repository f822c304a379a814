//! Progress notification port
//!
//! Defines the interface for reporting progress during an ensemble run.

use ensemble_domain::Phase;

/// Callback for progress updates during ensemble execution
///
/// Implementations live in the presentation layer and can display progress
/// in various ways (console, progress bars, etc.)
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when an agent invocation completes within a phase
    fn on_agent_complete(&self, phase: &Phase, agent_name: &str, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_agent_complete(&self, _phase: &Phase, _agent_name: &str, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
