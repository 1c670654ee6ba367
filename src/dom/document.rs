use crate::dom::{ElementData, Node, NodeId, NodeKind, Position, Style};
use crate::error::{MorphError, MorphResult};
use crate::geometry::Rect;

/// Arena-backed element tree.
///
/// Nodes are never freed; detaching a node only unlinks it from its parent.
#[derive(Debug, Clone)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self { nodes: vec![Node::new(NodeKind::Document)] }
    }

    pub fn root(&self) -> NodeId {
        NodeId::from_raw(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.push(NodeKind::Element(ElementData::new(tag)))
    }

    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeKind::Text(text.to_string()))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    pub fn node(&self, id: NodeId) -> MorphResult<&Node> {
        self.nodes.get(id.index()).ok_or(MorphError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> MorphResult<&mut Node> {
        self.nodes.get_mut(id.index()).ok_or(MorphError::UnknownNode(id))
    }

    pub fn element(&self, id: NodeId) -> MorphResult<&ElementData> {
        self.node(id)?.as_element().ok_or(MorphError::NotAnElement(id))
    }

    pub fn element_mut(&mut self, id: NodeId) -> MorphResult<&mut ElementData> {
        self.node_mut(id)?.as_element_mut().ok_or(MorphError::NotAnElement(id))
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id.index()).and_then(|node| node.parent)
    }

    /// Appends `child` as the last child of `parent`, detaching it first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> MorphResult<()> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` into `parent` before `reference`, or last when `reference`
    /// is `None` or not a child of `parent`.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> MorphResult<()> {
        self.node(parent)?;
        self.node(child)?;
        if parent == child || self.ancestors(parent).any(|a| a == child) {
            return Err(MorphError::InvalidOperation {
                op: "insert_before",
                reason: "a node cannot contain itself",
            });
        }
        self.detach(child)?;

        let siblings = &mut self.node_mut(parent)?.children;
        let position = reference
            .and_then(|r| siblings.iter().position(|&c| c == r))
            .unwrap_or(siblings.len());
        siblings.insert(position, child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    pub fn detach(&mut self, id: NodeId) -> MorphResult<()> {
        if let Some(parent) = self.node_mut(id)?.parent.take() {
            self.node_mut(parent)?.children.retain(|&c| c != id);
        }
        Ok(())
    }

    fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&p| self.parent(p))
    }

    /// Direct children, text nodes included.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes
            .get(id.index())
            .map(|node| node.children.as_slice())
            .unwrap_or(&[])
    }

    /// Direct element children in order.
    pub fn element_children(&self, id: NodeId) -> Vec<NodeId> {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.nodes[c.index()].is_element())
            .collect()
    }

    /// Every element below `id` in document order, `id` itself excluded.
    pub fn descendant_elements(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            if self.nodes[current.index()].is_element() {
                out.push(current);
            }
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Elements below `root` (document order) accepted by `predicate`.
    pub fn find_all<F>(&self, root: NodeId, predicate: F) -> Vec<NodeId>
    where
        F: Fn(&ElementData) -> bool,
    {
        self.descendant_elements(root)
            .into_iter()
            .filter(|&id| self.nodes[id.index()].as_element().is_some_and(&predicate))
            .collect()
    }

    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).ok().map(|el| el.tag.as_str())
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).ok().and_then(|el| el.attribute(name))
    }

    pub fn set_attribute(&mut self, id: NodeId, name: &str, value: &str) -> MorphResult<()> {
        self.element_mut(id)?.set_attribute(name, value);
        Ok(())
    }

    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_ok_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) -> MorphResult<()> {
        let el = self.element_mut(id)?;
        if el.has_class(class) {
            return Ok(());
        }
        let value = match el.attribute("class") {
            Some(existing) if !existing.trim().is_empty() => format!("{} {class}", existing.trim()),
            _ => class.to_string(),
        };
        el.set_attribute("class", &value);
        Ok(())
    }

    pub fn remove_class(&mut self, id: NodeId, class: &str) -> MorphResult<()> {
        let el = self.element_mut(id)?;
        if !el.has_class(class) {
            return Ok(());
        }
        let value = el.classes().filter(|&c| c != class).collect::<Vec<_>>().join(" ");
        el.set_attribute("class", &value);
        Ok(())
    }

    pub fn text_content(&self, id: NodeId) -> String {
        let mut text = String::new();
        self.collect_text(id, &mut text);
        text
    }

    fn collect_text(&self, id: NodeId, out: &mut String) {
        let Some(node) = self.nodes.get(id.index()) else {
            return;
        };
        if let NodeKind::Text(t) = &node.kind {
            out.push_str(t);
        }
        for &child in &node.children {
            self.collect_text(child, out);
        }
    }

    pub fn natural_box(&self, id: NodeId) -> MorphResult<Rect> {
        Ok(self.element(id)?.natural_box)
    }

    pub fn set_natural_box(&mut self, id: NodeId, rect: Rect) -> MorphResult<()> {
        self.element_mut(id)?.natural_box = rect;
        Ok(())
    }

    pub fn style(&self, id: NodeId) -> MorphResult<&Style> {
        Ok(&self.element(id)?.style)
    }

    pub fn style_mut(&mut self, id: NodeId) -> MorphResult<&mut Style> {
        Ok(&mut self.element_mut(id)?.style)
    }

    /// The box the element currently occupies: its natural box with the style
    /// overrides applied on top.
    pub fn rendered_box(&self, id: NodeId) -> MorphResult<Rect> {
        let el = self.element(id)?;
        let style = &el.style;
        let mut rect = el.natural_box;
        if let Some(width) = style.width {
            rect.width = width;
        }
        if let Some(height) = style.height {
            rect.height = height;
        }
        if style.position == Some(Position::Absolute) {
            if let Some(left) = style.left {
                rect.left = left;
            }
            if let Some(top) = style.top {
                rect.top = top;
            }
        }
        Ok(rect)
    }

    /// Pins the element's origin to the given document coordinates.
    pub fn set_offset(&mut self, id: NodeId, left: f32, top: f32) -> MorphResult<()> {
        let style = self.style_mut(id)?;
        style.position = Some(Position::Absolute);
        style.left = Some(left);
        style.top = Some(top);
        Ok(())
    }

    /// Opacity the element is drawn with, ancestors' opacity included.
    pub fn effective_opacity(&self, id: NodeId) -> f32 {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .filter_map(|n| self.element(n).ok())
            .filter_map(|el| el.style.opacity)
            .product()
    }
}
