//! Prompt construction for the ensemble flow

pub mod template;

pub use template::{FINAL_ANSWER_HEADING, REVIEW_HEADING, ReviewPromptTemplate};
