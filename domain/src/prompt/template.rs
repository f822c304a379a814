//! Review prompt template
//!
//! Builds the single instruction message sent to the reviewer. This is a pure
//! transformation: no I/O, deterministic given the same inputs.
//!
//! Failed workers never appear here. The reviewer must not be asked to
//! evaluate error strings as if they were answers, so only successful results
//! are rendered, each attributed to its agent by name.

use crate::orchestration::value_objects::WorkerResult;
use crate::session::{Message, Role};

/// Heading the reviewer is asked to put its critique under
pub const REVIEW_HEADING: &str = "## Review";

/// Heading the reviewer is asked to put the final answer under
///
/// The parser in [`crate::review`] looks for this heading; the two form one
/// shared separator convention.
pub const FINAL_ANSWER_HEADING: &str = "## Final Answer";

/// Template for the reviewer instruction message
pub struct ReviewPromptTemplate;

impl ReviewPromptTemplate {
    /// Build the review prompt from the original question, optional prior
    /// conversation turns, and the successful worker results.
    ///
    /// Callers must pass only successful results; failed entries are skipped
    /// here as a second line of defense.
    pub fn build<'a>(
        user_prompt: &str,
        history: impl IntoIterator<Item = &'a Message>,
        successful_results: &[&WorkerResult],
    ) -> String {
        let mut prompt = String::from(
            "You are the chief reviewer of an AI ensemble. Several worker \
             agents have independently answered the user's question below.\n",
        );

        let mut history = history.into_iter().peekable();
        if history.peek().is_some() {
            prompt.push_str("\n# Conversation so far:\n");
            for message in history {
                let label = match message.role {
                    Role::User => "User",
                    Role::Assistant => "Final answer",
                    Role::System => "System",
                };
                prompt.push_str(&format!("[{}]\n{}\n\n", label, message.content));
            }
        }

        prompt.push_str(&format!("\n# User question:\n{}\n", user_prompt));
        prompt.push_str("\n# Worker answers:\n");

        for result in successful_results.iter().filter(|r| r.is_success) {
            prompt.push_str(&format!("---\n[Agent: {}]\n{}\n", result.agent_name, result.content));
        }

        prompt.push_str(&format!(
            r#"---

# Your task:
1. Critique: briefly evaluate each worker's answer, by agent name.
2. Synthesize: combine the strongest elements, correct any mistakes, and
   produce a single, highest-quality final answer.

# Output format (strict):
{REVIEW_HEADING}
(your critique of each worker answer)

{FINAL_ANSWER_HEADING}
(the synthesized final answer)
"#
        ));

        prompt
    }
}
