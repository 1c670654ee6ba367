//! Pinning elements to their current box for the length of a transition.
//!
//! While a transition runs, slides get hidden and shown and tagged elements
//! move around; pinning every element of both slides to an absolute box keeps
//! that from reflowing anything else.

use tracing::trace;

use crate::dom::{Document, NodeId, Position, Style};
use crate::error::MorphResult;

/// Record of the styles a freeze replaced, used to put them back.
///
/// Undoing twice is harmless: the first undo drains the record.
#[derive(Debug, Default)]
pub struct FreezeToken {
    saved: Vec<(NodeId, Style)>,
}

impl FreezeToken {
    pub fn len(&self) -> usize {
        self.saved.len()
    }

    pub fn is_empty(&self) -> bool {
        self.saved.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.saved.iter().any(|(saved, _)| *saved == id)
    }

    /// Restores every saved style. Nodes that vanished in the meantime are skipped.
    pub fn undo(&mut self, document: &mut Document) {
        let saved = std::mem::take(&mut self.saved);
        if saved.is_empty() {
            return;
        }
        trace!(elements = saved.len(), "unfreezing layout");
        for (id, style) in saved.into_iter().rev() {
            if let Ok(current) = document.style_mut(id) {
                *current = style;
            }
        }
    }
}

pub struct LayoutFreezer;

impl LayoutFreezer {
    /// Pins each element to its rendered box.
    ///
    /// All boxes are measured before any element is pinned, so pinning one
    /// element cannot shift the measurement of the next.
    pub fn freeze(document: &mut Document, elements: &[NodeId]) -> MorphResult<FreezeToken> {
        let boxes = elements
            .iter()
            .map(|&id| Ok((id, document.rendered_box(id)?)))
            .collect::<MorphResult<Vec<_>>>()?;

        let mut token = FreezeToken::default();
        for (id, rect) in boxes {
            let style = document.style_mut(id)?;
            token.saved.push((id, *style));
            style.position = Some(Position::Absolute);
            style.left = Some(rect.left);
            style.top = Some(rect.top);
            style.width = Some(rect.width);
            style.height = Some(rect.height);
        }
        trace!(elements = token.len(), "froze layout");
        Ok(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Rect;

    fn doc_with(rects: &[Rect]) -> (Document, Vec<NodeId>) {
        let mut doc = Document::new();
        let root = doc.root();
        let ids = rects
            .iter()
            .map(|&rect| {
                let id = doc.create_element("div");
                doc.set_natural_box(id, rect).unwrap();
                doc.append_child(root, id).unwrap();
                id
            })
            .collect();
        (doc, ids)
    }

    #[test]
    fn test_freeze_pins_rendered_box() {
        let (mut doc, ids) = doc_with(&[Rect::new(1.0, 2.0, 3.0, 4.0), Rect::new(5.0, 6.0, 7.0, 8.0)]);
        let token = LayoutFreezer::freeze(&mut doc, &ids).unwrap();

        assert_eq!(token.len(), 2);
        for (&id, rect) in ids.iter().zip([Rect::new(1.0, 2.0, 3.0, 4.0), Rect::new(5.0, 6.0, 7.0, 8.0)]) {
            let style = doc.style(id).unwrap();
            assert_eq!(style.position, Some(Position::Absolute));
            assert_eq!(doc.rendered_box(id).unwrap(), rect);
        }
    }

    #[test]
    fn test_undo_restores_prior_styles_and_is_idempotent() {
        let (mut doc, ids) = doc_with(&[Rect::new(0.0, 0.0, 10.0, 10.0), Rect::default()]);
        let prior = Style { opacity: Some(0.5), width: Some(4.0), ..Style::default() };
        *doc.style_mut(ids[1]).unwrap() = prior;

        let mut token = LayoutFreezer::freeze(&mut doc, &ids).unwrap();
        doc.style_mut(ids[0]).unwrap().left = Some(500.0);

        token.undo(&mut doc);
        assert!(doc.style(ids[0]).unwrap().is_empty());
        assert_eq!(*doc.style(ids[1]).unwrap(), prior);
        assert!(token.is_empty());

        // A second undo must not clobber styles set after the first one
        doc.style_mut(ids[0]).unwrap().opacity = Some(0.1);
        token.undo(&mut doc);
        assert_eq!(doc.style(ids[0]).unwrap().opacity, Some(0.1));
    }

    #[test]
    fn test_freeze_unknown_node_fails_without_touching_others() {
        let (mut doc, mut ids) = doc_with(&[Rect::default()]);
        ids.push(NodeId::from_raw(999));
        assert!(LayoutFreezer::freeze(&mut doc, &ids).is_err());
        assert!(doc.style(ids[0]).unwrap().is_empty());
    }
}
