//! Typed command descriptions produced by the parser

use crate::graph::PropertyMap;

/// Variable name recorded when a CREATE omits one
pub const DEFAULT_VARIABLE: &str = "n";

/// One parsed line of the command language
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `CREATE (var:Type {props})`
    Create(CreateCommand),
    /// One of the supported MATCH shapes
    Match(MatchPattern),
    /// `CLEAR`
    Clear,
    /// Any other text, kept verbatim
    Unknown(String),
}

impl Command {
    /// Keyword used in logs and outcome records
    pub fn kind(&self) -> &'static str {
        match self {
            Command::Create(_) => "CREATE",
            Command::Match(_) => "MATCH",
            Command::Clear => "CLEAR",
            Command::Unknown(_) => "UNKNOWN",
        }
    }

    /// Whether executing the command can change the store
    pub fn is_mutation(&self) -> bool {
        matches!(self, Command::Create(_) | Command::Clear)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CreateCommand {
    pub variable: String,
    pub node_type: String,
    pub properties: PropertyMap,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MatchPattern {
    /// `MATCH (var:Type) RETURN ret`; no type matches every node
    Nodes {
        variable: Option<String>,
        node_type: Option<String>,
        return_variable: String,
    },
    /// `MATCH () RETURN ...`
    AllNodes,
    /// `MATCH ()-[r:TYPE]-()`; arrow heads are accepted and ignored
    Relationships {
        variable: Option<String>,
        rel_type: Option<String>,
    },
}

impl MatchPattern {
    /// Canonical pattern text reported in results
    pub fn pattern_text(&self) -> String {
        match self {
            MatchPattern::Nodes {
                variable,
                node_type,
                ..
            } => {
                let var = variable.as_deref().unwrap_or("");
                match node_type {
                    Some(t) => format!("({}:{})", var, t),
                    None => format!("({})", var),
                }
            }
            MatchPattern::AllNodes => "()".to_string(),
            MatchPattern::Relationships { rel_type, .. } => {
                format!("()-[{}]-()", rel_type.as_deref().unwrap_or(""))
            }
        }
    }

    /// Label echoed back as `returnVariable`
    pub fn return_variable(&self) -> &str {
        match self {
            MatchPattern::Nodes {
                return_variable, ..
            } => return_variable,
            MatchPattern::AllNodes => "all",
            MatchPattern::Relationships { .. } => "relationships",
        }
    }
}
