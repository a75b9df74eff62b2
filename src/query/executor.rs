//! Batch executor
//!
//! Runs newline-separated commands against a [`GraphStore`] in order. Each
//! command yields one [`CommandOutcome`]. The first parse or graph error stops
//! the batch; commands already applied stay applied.

use super::ast::{Command, CreateCommand, MatchPattern};
use super::parser::{parse_command, ParseError};
use crate::graph::{
    GraphError, GraphStats, GraphStore, Node, NodeId, PropertyMap, Relationship, RelationshipId,
};
use chrono::{SecondsFormat, Utc};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Confirmation text recorded for CLEAR
pub const CLEAR_MESSAGE: &str = "Graph cleared successfully";

/// Error raised by a single command
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommandError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

/// A batch stopped at a failing command
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{command} command failed: {cause}")]
pub struct ExecutionError {
    #[source]
    pub cause: CommandError,
    /// Keyword of the failing command, e.g. "CREATE"
    pub command: String,
    /// 1-based line number within the batch text
    pub line: usize,
    /// The whole batch text as submitted
    pub original_query: String,
    /// RFC 3339 time of the failure
    pub timestamp: String,
}

pub type ExecutionResult<T> = Result<T, ExecutionError>;

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Node fields echoed by MATCH
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedNode {
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    pub properties: PropertyMap,
}

impl From<&Node> for MatchedNode {
    fn from(node: &Node) -> Self {
        MatchedNode {
            id: node.id.clone(),
            node_type: node.node_type.clone(),
            properties: node.properties.clone(),
        }
    }
}

/// Relationship fields echoed by MATCH
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchedRelationship {
    pub id: RelationshipId,
    #[serde(rename = "type")]
    pub rel_type: String,
    pub source_id: NodeId,
    pub target_id: NodeId,
    pub properties: PropertyMap,
}

impl From<&Relationship> for MatchedRelationship {
    fn from(rel: &Relationship) -> Self {
        MatchedRelationship {
            id: rel.id.clone(),
            rel_type: rel.rel_type.clone(),
            source_id: rel.source_id.clone(),
            target_id: rel.target_id.clone(),
            properties: rel.properties.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateResult {
    pub node_id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    pub properties: PropertyMap,
    pub variable: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub pattern: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_nodes: Option<Vec<MatchedNode>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matched_relationships: Option<Vec<MatchedRelationship>>,
    pub count: usize,
    pub return_variable: String,
}

/// Per-command payload
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum OutcomeDetail {
    Created(CreateResult),
    Matched(MatchResult),
    Message(String),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    /// The command line as written
    pub command: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub result: OutcomeDetail,
    pub success: bool,
}

impl CommandOutcome {
    /// Entities reported by a MATCH, zero otherwise
    pub fn result_count(&self) -> usize {
        match &self.result {
            OutcomeDetail::Matched(m) => m.count,
            _ => 0,
        }
    }
}

/// Successful batch
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Commands that succeeded; unknown commands are not counted
    pub executed_commands: usize,
    pub commands: Vec<CommandOutcome>,
    pub timestamp: String,
    pub graph_stats: GraphStats,
}

impl BatchSummary {
    /// Sum of the MATCH result counts
    pub fn total_results(&self) -> usize {
        self.commands.iter().map(CommandOutcome::result_count).sum()
    }
}

/// Failed batch, as reported to callers
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchFailure {
    pub error: String,
    pub original_query: String,
    pub timestamp: String,
}

impl From<ExecutionError> for BatchFailure {
    fn from(err: ExecutionError) -> Self {
        BatchFailure {
            error: err.to_string(),
            original_query: err.original_query,
            timestamp: err.timestamp,
        }
    }
}

/// Result contract of [`QueryExecutor::run`]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum BatchResult {
    Success(BatchSummary),
    Failure(BatchFailure),
}

impl BatchResult {
    pub fn is_success(&self) -> bool {
        matches!(self, BatchResult::Success(_))
    }

    /// Zero for a failed batch
    pub fn executed_commands(&self) -> usize {
        match self {
            BatchResult::Success(summary) => summary.executed_commands,
            BatchResult::Failure(_) => 0,
        }
    }
}

impl From<ExecutionResult<BatchSummary>> for BatchResult {
    fn from(result: ExecutionResult<BatchSummary>) -> Self {
        match result {
            Ok(summary) => BatchResult::Success(summary),
            Err(err) => BatchResult::Failure(err.into()),
        }
    }
}

/// Executes command batches against a store it borrows mutably
pub struct QueryExecutor<'a> {
    store: &'a mut GraphStore,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(store: &'a mut GraphStore) -> Self {
        Self { store }
    }

    /// Execute a batch and package either outcome into the result contract
    pub fn run(&mut self, text: &str) -> BatchResult {
        self.execute_batch(text).into()
    }

    /// Execute every non-blank line in order, stopping at the first error
    pub fn execute_batch(&mut self, text: &str) -> ExecutionResult<BatchSummary> {
        let mut commands = Vec::new();
        let mut executed = 0;

        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let outcome = self.execute_line(line).map_err(|cause| {
                let command = keyword(line);
                warn!(line = index + 1, %command, error = %cause, "batch aborted");
                ExecutionError {
                    cause,
                    command,
                    line: index + 1,
                    original_query: text.to_string(),
                    timestamp: now_rfc3339(),
                }
            })?;

            if outcome.success {
                executed += 1;
            }
            commands.push(outcome);
        }

        info!(
            executed,
            total = commands.len(),
            nodes = self.store.node_count(),
            relationships = self.store.relationship_count(),
            "batch executed"
        );

        Ok(BatchSummary {
            executed_commands: executed,
            commands,
            timestamp: now_rfc3339(),
            graph_stats: self.store.get_graph_stats(),
        })
    }

    /// Parse and execute one line
    pub fn execute_line(&mut self, line: &str) -> Result<CommandOutcome, CommandError> {
        let command = parse_command(line)?;
        Ok(self.execute_command(&command, line)?)
    }

    /// Execute an already-parsed command. `text` is echoed into the outcome.
    pub fn execute_command(
        &mut self,
        command: &Command,
        text: &str,
    ) -> Result<CommandOutcome, GraphError> {
        debug!(
            kind = command.kind(),
            mutation = command.is_mutation(),
            command = %text,
            "executing command"
        );

        let (result, success) = match command {
            Command::Create(create) => (OutcomeDetail::Created(self.create(create)?), true),
            Command::Match(pattern) => (OutcomeDetail::Matched(self.evaluate_match(pattern)), true),
            Command::Clear => {
                self.store.clear_graph();
                (OutcomeDetail::Message(CLEAR_MESSAGE.to_string()), true)
            }
            Command::Unknown(original) => {
                warn!(command = %original, "unknown command");
                (OutcomeDetail::Message(format!("Unknown command: {}", original)), false)
            }
        };

        Ok(CommandOutcome {
            command: text.to_string(),
            kind: command.kind().to_string(),
            result,
            success,
        })
    }

    fn create(&mut self, create: &CreateCommand) -> Result<CreateResult, GraphError> {
        let node_id = self
            .store
            .create_node(create.node_type.clone(), create.properties.clone())?;
        Ok(CreateResult {
            node_id,
            node_type: create.node_type.clone(),
            properties: create.properties.clone(),
            variable: create.variable.clone(),
        })
    }

    /// Evaluate a pattern against the store as it is now
    pub fn evaluate_match(&self, pattern: &MatchPattern) -> MatchResult {
        match pattern {
            MatchPattern::Nodes { node_type, .. } => {
                let nodes: Vec<MatchedNode> = match node_type {
                    Some(t) => self.store.nodes_by_type(t).map(MatchedNode::from).collect(),
                    None => self.store.nodes().map(MatchedNode::from).collect(),
                };
                node_result(pattern, nodes)
            }
            MatchPattern::AllNodes => {
                node_result(pattern, self.store.nodes().map(MatchedNode::from).collect())
            }
            MatchPattern::Relationships { rel_type, .. } => {
                let rels: Vec<MatchedRelationship> = match rel_type {
                    Some(t) => self
                        .store
                        .relationships_by_type(t)
                        .map(MatchedRelationship::from)
                        .collect(),
                    None => self
                        .store
                        .relationships()
                        .map(MatchedRelationship::from)
                        .collect(),
                };
                MatchResult {
                    pattern: pattern.pattern_text(),
                    matched_nodes: None,
                    count: rels.len(),
                    matched_relationships: Some(rels),
                    return_variable: pattern.return_variable().to_string(),
                }
            }
        }
    }
}

fn node_result(pattern: &MatchPattern, nodes: Vec<MatchedNode>) -> MatchResult {
    MatchResult {
        pattern: pattern.pattern_text(),
        count: nodes.len(),
        matched_nodes: Some(nodes),
        matched_relationships: None,
        return_variable: pattern.return_variable().to_string(),
    }
}

/// First word of a line, upper-cased
fn keyword(line: &str) -> String {
    line.split(|c: char| !c.is_alphanumeric())
        .next()
        .unwrap_or_default()
        .to_uppercase()
}
