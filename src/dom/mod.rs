//! A minimal host element tree.
//!
//! The tree stands in for the page the slideshow lives in: element tags,
//! attributes and classes for matching, a natural box per element given by the
//! host layout, and the inline style overrides a transition applies on top.

mod document;
mod node;
mod style;

pub use document::Document;
pub use node::{ElementData, Node, NodeId, NodeKind};
pub use style::{Position, Style};
