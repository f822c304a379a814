//! Splitting the reviewer's reply into critique and final answer.
//!
//! The review prompt asks the reviewer to answer under two markdown headings,
//! `## Review` and `## Final Answer`. This module scans for those headings and
//! splits the reply. It is pure text pattern matching with no I/O.
//!
//! A reply without the final-answer heading is not an error: the whole text
//! becomes the final answer and the critique is empty (degraded mode).

use crate::orchestration::value_objects::ReviewOutcome;

/// Result of parsing a reviewer reply
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewSplit {
    /// Both sections were found
    Structured { review: String, answer: String },
    /// No recognizable final-answer section; the whole reply is the answer
    Unstructured { answer: String },
}

impl ReviewSplit {
    /// Convert into the outcome value carried in the response.
    ///
    /// Degraded mode yields an empty `review_comment`.
    pub fn into_outcome(self) -> ReviewOutcome {
        match self {
            ReviewSplit::Structured { review, answer } => ReviewOutcome {
                review_comment: review,
                final_answer: answer,
            },
            ReviewSplit::Unstructured { answer } => ReviewOutcome {
                review_comment: String::new(),
                final_answer: answer,
            },
        }
    }

    pub fn is_structured(&self) -> bool {
        matches!(self, ReviewSplit::Structured { .. })
    }
}

/// Parse a raw reviewer reply into critique and final answer sections.
///
/// Headings are matched case-insensitively and tolerate any `#` depth, so
/// `### FINAL ANSWER` still splits correctly.
pub fn parse_review_reply(reply: &str) -> ReviewSplit {
    #[derive(PartialEq)]
    enum Section {
        Preamble,
        Review,
        Answer,
    }

    let mut section = Section::Preamble;
    let mut review_lines: Vec<&str> = Vec::new();
    let mut answer_lines: Vec<&str> = Vec::new();

    for line in reply.lines() {
        if is_heading(line, "final answer") {
            section = Section::Answer;
            continue;
        }
        if is_heading(line, "review") && section == Section::Preamble {
            section = Section::Review;
            continue;
        }
        match section {
            Section::Preamble | Section::Review => review_lines.push(line),
            Section::Answer => answer_lines.push(line),
        }
    }

    let answer = answer_lines.join("\n").trim().to_string();
    if answer.is_empty() {
        return ReviewSplit::Unstructured {
            answer: reply.trim().to_string(),
        };
    }

    ReviewSplit::Structured {
        review: review_lines.join("\n").trim().to_string(),
        answer,
    }
}

fn is_heading(line: &str, keyword: &str) -> bool {
    let trimmed = line.trim_start();
    if !trimmed.starts_with('#') {
        return false;
    }
    trimmed
        .trim_start_matches('#')
        .trim()
        .to_lowercase()
        .contains(keyword)
}
