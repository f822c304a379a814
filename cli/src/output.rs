//! Console output formatting for ensemble results

use colored::Colorize;
use ensemble_domain::EnsembleResponse;

/// Formats ensemble results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result with every worker answer and the critique
    pub fn format(question: &str, response: &EnsembleResponse) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Ensemble Results"));
        output.push('\n');

        output.push_str(&format!("{} {}\n\n", "Question:".cyan().bold(), question));

        output.push_str(&Self::section_header("Worker Answers"));
        for result in &response.worker_responses {
            if result.is_success {
                output.push_str(&format!(
                    "\n{} ({:.2}s)\n{}\n",
                    format!("── {} ──", result.agent_name).yellow().bold(),
                    result.elapsed_secs,
                    result.content
                ));
            } else {
                output.push_str(&format!(
                    "\n{} ({:.2}s)\nError: {}\n",
                    format!("── {} ──", result.agent_name).red().bold(),
                    result.elapsed_secs,
                    result.error.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        if !response.review_comment.is_empty() {
            output.push_str(&Self::section_header("Reviewer Critique"));
            output.push_str(&format!("\n{}\n", response.review_comment));
        }

        output.push_str(&Self::section_header("Final Answer"));
        output.push_str(&format!("\n{}\n", response.final_answer));

        let meta = &response.metadata;
        output.push_str(&format!(
            "\n{} {}/{} workers succeeded in {:.2}s\n",
            "Summary:".cyan().bold(),
            meta.successful_workers,
            meta.total_workers,
            meta.processing_time_seconds
        ));

        output.push_str(&Self::footer());
        output
    }

    /// Format only the final answer
    pub fn format_answer_only(response: &EnsembleResponse) -> String {
        format!("{}\n", response.final_answer)
    }

    /// Format as JSON (the engine's caller-facing shape)
    pub fn format_json(response: &EnsembleResponse) -> String {
        serde_json::to_string_pretty(response).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ensemble_domain::{ReviewOutcome, WorkerResult};

    fn sample_response() -> EnsembleResponse {
        EnsembleResponse::compose(
            vec![
                WorkerResult::success("Worker A", "fast", 1.0),
                WorkerResult::failure("Worker B", "timed out", 60.0),
            ],
            ReviewOutcome {
                review_comment: "A was concise.".to_string(),
                final_answer: "Rust is fast.".to_string(),
            },
            61.0,
        )
    }

    #[test]
    fn test_full_format_mentions_workers_and_answer() {
        let text = ConsoleFormatter::format("What is Rust?", &sample_response());
        assert!(text.contains("Worker A"));
        assert!(text.contains("Worker B"));
        assert!(text.contains("timed out"));
        assert!(text.contains("Rust is fast."));
        assert!(text.contains("1/2 workers succeeded"));
    }

    #[test]
    fn test_answer_only() {
        let text = ConsoleFormatter::format_answer_only(&sample_response());
        assert_eq!(text, "Rust is fast.\n");
    }

    #[test]
    fn test_json_round_trips() {
        let json = ConsoleFormatter::format_json(&sample_response());
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["final_answer"], "Rust is fast.");
        assert_eq!(parsed["metadata"]["total_workers"], 2);
    }
}
