//! Error type shared by graph construction and all algorithms.
//!
//! Vertex identifiers are rendered with their `Debug` representation, so the error type does not
//! depend on the vertex type of the graph that produced it.

use thiserror::Error;

use crate::{Capacity, Direction, Weight};

pub type Result<T> = std::result::Result<T, GraphError>;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("unknown vertex: {0}")]
    UnknownVertex(String),

    #[error("duplicate edge: {from} -> {to}")]
    DuplicateEdge { from: String, to: String },

    #[error("self-loops are not supported: {0}")]
    SelfLoop(String),

    #[error("negative capacity {capacity} on edge {from} -> {to}")]
    NegativeCapacity {
        from: String,
        to: String,
        capacity: Capacity,
    },

    #[error("negative weight {weight} on edge {from} -> {to} is not allowed")]
    NegativeWeightNotAllowed {
        from: String,
        to: String,
        weight: Weight,
    },

    #[error("negative cycle detected at {0}")]
    NegativeCycleDetected(String),

    #[error("graph is not bipartite: edge {from} -> {to} joins vertices of the same side")]
    NotBipartite { from: String, to: String },

    #[error("operation requires a graph that is {expected}")]
    DirectionMismatch { expected: Direction },

    #[error("source and sink must differ: {0}")]
    SourceIsSink(String),

    #[error("invalid partition: {0}")]
    InvalidPartition(String),

    #[error("computation was interrupted")]
    Interrupted,

    #[error("parse error in line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GraphError {
    pub(crate) fn unknown_vertex<V: std::fmt::Debug + ?Sized>(v: &V) -> Self {
        Self::UnknownVertex(format!("{v:?}"))
    }

    pub(crate) fn duplicate_edge<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        Self::DuplicateEdge {
            from: format!("{u:?}"),
            to: format!("{v:?}"),
        }
    }

    pub(crate) fn not_bipartite<V: std::fmt::Debug>(u: &V, v: &V) -> Self {
        Self::NotBipartite {
            from: format!("{u:?}"),
            to: format!("{v:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_vertices() {
        let err = GraphError::duplicate_edge(&"a", &"b");
        assert_eq!(err.to_string(), "duplicate edge: \"a\" -> \"b\"");

        let err = GraphError::unknown_vertex(&7);
        assert_eq!(err.to_string(), "unknown vertex: 7");

        let err = GraphError::DirectionMismatch {
            expected: Direction::Undirected,
        };
        assert_eq!(err.to_string(), "operation requires a graph that is undirected");
    }
}
