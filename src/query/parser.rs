//! Line-oriented command parser
//!
//! Each supported command has a fixed shape, recognised by an anchored
//! regular expression. Shapes are tried in order and the first match wins;
//! text that fits none of them becomes [`Command::Unknown`].

use super::ast::{Command, CreateCommand, MatchPattern, DEFAULT_VARIABLE};
use super::properties::parse_property_literal;
use regex::{Captures, Regex};
use std::sync::LazyLock;
use thiserror::Error;

/// Parser errors
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// A CREATE line that does not have the `CREATE (var:Type {...})` shape
    #[error("Invalid CREATE syntax: {0}")]
    InvalidCreate(String),

    /// A property literal with an unterminated quoted value
    #[error("Unbalanced quotes in property literal: {0}")]
    UnbalancedQuotes(String),

    #[error("Empty command")]
    Empty,
}

pub type ParseResult<T> = Result<T, ParseError>;

static CREATE_KEYWORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^CREATE\b").unwrap());

static CREATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^CREATE\s*\(\s*(?:(\w+)\s*)?:\s*(\w+)\s*(\{[^}]*\})?\s*\)\s*;?\s*$").unwrap()
});

static MATCH_NODES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^MATCH\s*\(\s*(\w+)?\s*(?::\s*(\w+))?\s*\)\s*RETURN\s+(\w+)\b[^;]*;?\s*$").unwrap()
});

static MATCH_ALL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^MATCH\s*\(\s*\w*\s*\)\s*RETURN\b[^;]*;?\s*$").unwrap()
});

static MATCH_RELATIONSHIPS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^MATCH\s*\(\s*\w*\s*\)\s*<?-\s*\[\s*(?:(\w+)\s*)?(?::\s*(\w+))?\s*\]\s*->?\s*\(\s*\w*\s*\)(?:\s*RETURN\b[^;]*)?\s*;?\s*$",
    )
    .unwrap()
});

static CLEAR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^CLEAR\s*;?\s*$").unwrap());

fn group(caps: &Captures<'_>, i: usize) -> Option<String> {
    caps.get(i).map(|m| m.as_str().to_string())
}

/// Parse one line of command text. Has no side effects.
pub fn parse_command(line: &str) -> ParseResult<Command> {
    let line = line.trim();
    if line.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(create) = parse_create(line)? {
        return Ok(Command::Create(create));
    }
    if let Some(pattern) = parse_match(line) {
        return Ok(Command::Match(pattern));
    }
    if parse_clear(line) {
        return Ok(Command::Clear);
    }
    Ok(Command::Unknown(line.to_string()))
}

/// `Ok(None)` when the line is not a CREATE at all; an error when it starts
/// with CREATE but is malformed.
pub fn parse_create(line: &str) -> ParseResult<Option<CreateCommand>> {
    if !CREATE_KEYWORD.is_match(line) {
        return Ok(None);
    }
    let caps = CREATE
        .captures(line)
        .ok_or_else(|| ParseError::InvalidCreate(line.to_string()))?;

    let properties = match caps.get(3) {
        Some(literal) => parse_property_literal(literal.as_str())?,
        None => Default::default(),
    };

    Ok(Some(CreateCommand {
        variable: group(&caps, 1).unwrap_or_else(|| DEFAULT_VARIABLE.to_string()),
        node_type: caps[2].to_string(),
        properties,
    }))
}

/// Try the MATCH shapes in order: typed/untyped node pattern, match-all,
/// single relationship pattern.
///
/// Only the first word after `RETURN` is kept; projections such as `p.name`
/// or a trailing `LIMIT` are accepted and ignored.
pub fn parse_match(line: &str) -> Option<MatchPattern> {
    if let Some(caps) = MATCH_NODES.captures(line) {
        return Some(MatchPattern::Nodes {
            variable: group(&caps, 1),
            node_type: group(&caps, 2),
            return_variable: caps[3].to_string(),
        });
    }
    if MATCH_ALL.is_match(line) {
        return Some(MatchPattern::AllNodes);
    }
    MATCH_RELATIONSHIPS
        .captures(line)
        .map(|caps| MatchPattern::Relationships {
            variable: group(&caps, 1),
            rel_type: group(&caps, 2),
        })
}

pub fn parse_clear(line: &str) -> bool {
    CLEAR.is_match(line)
}
