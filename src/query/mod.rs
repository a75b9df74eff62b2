//! Command language
//!
//! A small line-oriented dialect with four command kinds:
//! - `CREATE (var:Type {key: value, ...})`
//! - `MATCH (var:Type) RETURN var`, `MATCH () RETURN ...`, `MATCH ()-[r:TYPE]-()`
//! - `CLEAR`
//! - anything else, reported as an unknown command
//!
//! Parsing never touches the store; [`QueryExecutor`] applies parsed commands.

pub mod ast;
pub mod executor;
pub mod parser;
pub mod properties;

// Re-export main types
pub use ast::{Command, CreateCommand, MatchPattern};
pub use executor::{
    BatchFailure, BatchResult, BatchSummary, CommandError, CommandOutcome, CreateResult,
    ExecutionError, ExecutionResult, MatchResult, MatchedNode, MatchedRelationship,
    OutcomeDetail, QueryExecutor,
};
pub use parser::{parse_command, ParseError, ParseResult};
pub use properties::parse_property_literal;
