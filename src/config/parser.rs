//! Parsing of raw rules sources into an untyped tree
//!
//! The parser only checks syntax. Whatever the grammar accepts is returned
//! as a [`Node`] tree; schema checks live in [`crate::config::schema`].

use crate::error::{ParseError, SourceLocation};
use crate::types::SourceFormat;

/// Untyped tree produced by the parser
///
/// Mappings keep their source key order (TOML tables come back sorted) and
/// keep keys as nodes so non-string keys can be reported by the validator.
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
}

impl Node {
    /// Short name of the node's kind, used in error messages
    pub fn kind(&self) -> &'static str {
        match self {
            Node::Null => "null",
            Node::Bool(_) => "boolean",
            Node::Integer(_) => "integer",
            Node::Float(_) => "float",
            Node::String(_) => "string",
            Node::Sequence(_) => "sequence",
            Node::Mapping(_) => "mapping",
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Node::String(s) => Some(s),
            _ => None,
        }
    }

    /// Looks up a string key in a mapping node
    pub fn get(&self, key: &str) -> Option<&Node> {
        match self {
            Node::Mapping(entries) => entries
                .iter()
                .find(|(k, _)| k.as_str() == Some(key))
                .map(|(_, v)| v),
            _ => None,
        }
    }

    /// Renders a scalar for error messages; collections are summarized by kind
    pub fn describe(&self) -> String {
        match self {
            Node::Null => "null".to_string(),
            Node::Bool(b) => b.to_string(),
            Node::Integer(i) => i.to_string(),
            Node::Float(f) => f.to_string(),
            Node::String(s) => format!("{s:?}"),
            Node::Sequence(_) | Node::Mapping(_) => self.kind().to_string(),
        }
    }
}

/// Parses a rules source in the given format
///
/// # Errors
///
/// Returns `ParseError` if the text is not well-formed for `format`,
/// including duplicate mapping keys.
pub fn parse(source: &str, format: SourceFormat) -> Result<Node, ParseError> {
    match format {
        SourceFormat::Yaml => parse_yaml(source),
        SourceFormat::Toml => parse_toml(source),
    }
}

fn parse_yaml(source: &str) -> Result<Node, ParseError> {
    let value: serde_yaml::Value = serde_yaml::from_str(source).map_err(|e| {
        let location = e.location().map(|loc| SourceLocation {
            line: loc.line(),
            column: loc.column(),
        });
        // serde_yaml appends the position to its message; keep it in `location` only
        let mut message = e.to_string();
        if let Some(loc) = location {
            let suffix = format!(" at line {} column {}", loc.line, loc.column);
            if let Some(stripped) = message.strip_suffix(&suffix) {
                message = stripped.to_string();
            }
        }
        ParseError {
            format: SourceFormat::Yaml,
            message,
            location,
        }
    })?;

    Ok(from_yaml(value))
}

fn from_yaml(value: serde_yaml::Value) -> Node {
    use serde_yaml::Value;

    match value {
        Value::Null => Node::Null,
        Value::Bool(b) => Node::Bool(b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => Node::Integer(i),
            None => Node::Float(n.as_f64().unwrap_or(f64::NAN)),
        },
        Value::String(s) => Node::String(s),
        Value::Sequence(items) => Node::Sequence(items.into_iter().map(from_yaml).collect()),
        Value::Mapping(mapping) => Node::Mapping(
            mapping
                .into_iter()
                .map(|(k, v)| (from_yaml(k), from_yaml(v)))
                .collect(),
        ),
        // Tags carry no meaning for rules; keep the tagged value
        Value::Tagged(tagged) => from_yaml(tagged.value),
    }
}

fn parse_toml(source: &str) -> Result<Node, ParseError> {
    let table: toml::Table = toml::from_str(source).map_err(|e| ParseError {
        format: SourceFormat::Toml,
        message: e.message().to_string(),
        location: e.span().map(|span| location_of(source, span.start)),
    })?;

    Ok(from_toml(toml::Value::Table(table)))
}

fn from_toml(value: toml::Value) -> Node {
    use toml::Value;

    match value {
        Value::String(s) => Node::String(s),
        Value::Integer(i) => Node::Integer(i),
        Value::Float(f) => Node::Float(f),
        Value::Boolean(b) => Node::Bool(b),
        Value::Datetime(dt) => Node::String(dt.to_string()),
        Value::Array(items) => Node::Sequence(items.into_iter().map(from_toml).collect()),
        Value::Table(table) => Node::Mapping(
            table
                .into_iter()
                .map(|(k, v)| (Node::String(k), from_toml(v)))
                .collect(),
        ),
    }
}

/// Converts a byte offset into a 1-based line/column pair
fn location_of(source: &str, offset: usize) -> SourceLocation {
    let offset = offset.min(source.len());
    let before = source.get(..offset).unwrap_or(source);
    let line = before.matches('\n').count() + 1;
    let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
    let column = before[line_start..].chars().count() + 1;
    SourceLocation { line, column }
}
