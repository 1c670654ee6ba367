//! Finding the elements that morph from one slide into the next.
//!
//! Elements are related by the value of the relation attribute, not by their
//! position in the tree. When one slide carries the same value more than once,
//! only the first element in document order takes part; the others fade with
//! the rest of their slide.

use std::collections::{HashMap, HashSet};

use tracing::trace;

use crate::dom::{Document, NodeId};
use crate::error::MorphResult;
use crate::geometry::GeometrySnapshot;

/// One side of a correspondence: the element and its geometry at transition start
#[derive(Debug, Clone, PartialEq)]
pub struct PairSide {
    pub element: NodeId,
    pub snapshot: GeometrySnapshot,
}

/// A relation-tagged element present in both the source and destination slide
#[derive(Debug, Clone, PartialEq)]
pub struct CorrespondencePair {
    pub tag: String,
    pub source: PairSide,
    pub dest: PairSide,
}

#[derive(Debug, Clone)]
pub struct CorrespondenceMatcher {
    relation_attr: String,
}

impl CorrespondenceMatcher {
    pub fn new(relation_attr: impl Into<String>) -> Self {
        Self { relation_attr: relation_attr.into() }
    }

    /// Relation-tagged elements under `root` in document order, paired with their tag.
    pub fn tagged<'d>(&self, document: &'d Document, root: NodeId) -> Vec<(&'d str, NodeId)> {
        document
            .descendant_elements(root)
            .into_iter()
            .filter_map(|id| document.attribute(id, &self.relation_attr).map(|tag| (tag, id)))
            .collect()
    }

    /// Pairs up the tags present under both roots and snapshots both sides.
    ///
    /// Pairs come out in the destination's document order. Tags present on one
    /// side only are left out.
    pub fn find(
        &self,
        document: &Document,
        source_root: NodeId,
        dest_root: NodeId,
    ) -> MorphResult<Vec<CorrespondencePair>> {
        let mut source_by_tag: HashMap<&str, NodeId> = HashMap::new();
        for (tag, id) in self.tagged(document, source_root) {
            source_by_tag.entry(tag).or_insert(id);
        }

        let mut seen = HashSet::new();
        let mut pairs = Vec::new();
        for (tag, dest) in self.tagged(document, dest_root) {
            if !seen.insert(tag) {
                trace!(tag, element = %dest, "duplicate relation tag ignored");
                continue;
            }
            let Some(&source) = source_by_tag.get(tag) else {
                continue;
            };
            pairs.push(CorrespondencePair {
                tag: tag.to_string(),
                source: PairSide {
                    element: source,
                    snapshot: GeometrySnapshot::capture(document, source)?,
                },
                dest: PairSide {
                    element: dest,
                    snapshot: GeometrySnapshot::capture(document, dest)?,
                },
            });
        }
        Ok(pairs)
    }
}
