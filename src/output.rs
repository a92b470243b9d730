//! Output formatters (human and JSONL)

pub mod human;
pub mod jsonl;
mod records;

pub use human::HumanFormatter;
pub use jsonl::JsonlFormatter;
pub use records::{BatchEntry, Evaluation};
