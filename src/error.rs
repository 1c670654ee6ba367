//! Error types for the slideshow engine.
//!
//! Transitions themselves are best-effort and never fail; errors come from
//! addressing nodes that do not exist, loading markup, bad configuration, or
//! driving the stepper out of order.

use thiserror::Error;

use crate::dom::NodeId;

/// Errors raised by fallible engine operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MorphError {
    /// No node with this id exists in the document
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    /// The node exists but is not an element (text or document root)
    #[error("node {0} is not an element")]
    NotAnElement(NodeId),

    /// No slideshow widget with this index was activated
    #[error("unknown slideshow widget: {0}")]
    UnknownWidget(usize),

    /// Markup could not be parsed into a document
    #[error("markup error: {0}")]
    Markup(String),

    /// A configuration value is out of range
    #[error("invalid config: {field}: {reason}")]
    InvalidConfig {
        /// The offending field
        field: &'static str,
        /// Why it was rejected
        reason: &'static str,
    },

    /// An operation was attempted that is not valid in the current state
    #[error("invalid operation '{op}': {reason}")]
    InvalidOperation {
        /// The operation that was attempted
        op: &'static str,
        /// Why the operation failed
        reason: &'static str,
    },
}

/// Result type alias for engine operations
pub type MorphResult<T> = Result<T, MorphError>;
