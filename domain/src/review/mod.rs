//! Reviewer reply parsing

pub mod parsing;

pub use parsing::{ReviewSplit, parse_review_reply};
