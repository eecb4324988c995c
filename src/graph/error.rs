//! Errors that can occur during graph operations

use super::types::Identifier;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Malformed identifier: {0:?}")]
    MalformedIdentifier(String),

    #[error("Member {0} not found")]
    NotFound(Identifier),

    #[error("Graph {0} not found")]
    GraphNotFound(Identifier),

    #[error("Node {0} not found")]
    NodeNotFound(Identifier),

    #[error("Invalid edge: tail node {0} does not exist")]
    InvalidEdgeTail(Identifier),

    #[error("Invalid edge: head node {0} does not exist")]
    InvalidEdgeHead(Identifier),

    #[error("Subgraph of {parent} would exceed max nesting depth {max_depth}")]
    NestingTooDeep { parent: Identifier, max_depth: usize },
}

pub type GraphResult<T> = Result<T, GraphError>;
