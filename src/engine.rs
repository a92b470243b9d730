//! Loaded rule sets and flag evaluation

pub mod evaluator;
pub mod rules_engine;
pub mod slot;

pub use evaluator::{Decision, evaluate, explain};
pub use rules_engine::RulesEngine;
pub use slot::EngineSlot;
