//! Rules source parsing and schema validation

pub mod parser;
pub mod schema;

pub use parser::{Node, parse};
pub use schema::validate;
