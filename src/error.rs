//! Error types for graph generation and traversal.
//!
//! All errors are caller-induced: they are raised before any work is done and are
//! never retried internally. Generation and traversal either complete or fail fast.

use thiserror::Error;

use crate::node::{Node, NumNodes};

/// Top-level error type of this crate
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("Invalid parameter: {0}")]
    InvalidParameter(#[from] InvalidParameter),
}

/// The individual reasons for rejecting a request
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvalidParameter {
    #[error("size must be positive")]
    EmptyGraph,

    #[error("at least one edge per new node is required")]
    NoAttachments,

    /// The seed core needs `m` nodes and growth needs at least one more
    #[error("{nodes} nodes are too few for {attachments} edges per new node (need more than {attachments})")]
    TooFewNodes {
        nodes: NumNodes,
        attachments: NumNodes,
    },

    #[error("root {root} is not a node of a graph with {nodes} nodes")]
    RootOutOfRange { root: Node, nodes: NumNodes },

    #[error("damping factor {0} is not a probability")]
    InvalidDamping(f64),
}

/// Result-alias used throughout the crate
pub type Result<T> = std::result::Result<T, GraphError>;
