//! The boundary between tree construction and the tree it builds.
//!
//! [§ 13.2.6.1 Creating and inserting nodes](https://html.spec.whatwg.org/multipage/parsing.html#creating-and-inserting-nodes)
//!
//! The tree builder never touches nodes directly. Every creation, insertion
//! and query goes through a [`TreeAdapter`], so the same parser can populate
//! the arena [`DomTree`] or any other tree representation.

use std::fmt::Debug;
use std::hash::Hash;

use tern_dom::{Attribute, DomTree, ElementData, Namespace, NodeId, NodeType, QuirksMode};

/// Coarse node classification used by the serializer and tree dump.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// The Document node.
    Document,
    /// A DocumentFragment (fragment root or template contents).
    DocumentFragment,
    /// A DocumentType node.
    DocumentType,
    /// An element.
    Element,
    /// A Text node.
    Text,
    /// A Comment node.
    Comment,
}

/// Name, public ID and system ID of a DocumentType node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DoctypeView<'a> {
    /// "name"
    pub name: &'a str,
    /// "public ID"
    pub public_id: &'a str,
    /// "system ID"
    pub system_id: &'a str,
}

/// Tree operations the HTML parser needs.
///
/// Handles are cheap references to nodes. Nodes are never destroyed during a
/// parse; a detached node simply has no parent.
pub trait TreeAdapter {
    /// Reference to a node.
    type Handle: Clone + Eq + Hash + Debug;

    /// The root node: the Document, or the DocumentFragment for fragment trees.
    fn document(&self) -> Self::Handle;

    /// "Create an element" with the given local name, namespace and
    /// attributes. HTML `template` elements get their template contents
    /// fragment here.
    fn create_element(
        &mut self,
        tag_name: &str,
        namespace: Namespace,
        attrs: Vec<Attribute>,
    ) -> Self::Handle;

    /// Create a detached Comment node.
    fn create_comment(&mut self, data: &str) -> Self::Handle;

    /// Append `child` as the last child of `parent`, detaching it first.
    fn append_child(&mut self, parent: &Self::Handle, child: &Self::Handle);

    /// Insert `child` into `parent` immediately before `reference`.
    fn insert_before(
        &mut self,
        parent: &Self::Handle,
        child: &Self::Handle,
        reference: &Self::Handle,
    );

    /// Remove `node` from its parent, if any.
    fn detach(&mut self, node: &Self::Handle);

    /// Append text to `parent`, merging with a trailing Text node.
    fn insert_text(&mut self, parent: &Self::Handle, text: &str);

    /// Insert text before `reference`, merging with a Text node right before it.
    fn insert_text_before(&mut self, parent: &Self::Handle, text: &str, reference: &Self::Handle);

    /// Add each attribute the element does not already carry.
    fn adopt_attributes(&mut self, element: &Self::Handle, attrs: &[Attribute]);

    /// Append (or replace) the document's DocumentType node.
    fn set_document_type(&mut self, name: &str, public_id: &str, system_id: &str);

    /// Set the document's quirks mode.
    fn set_quirks_mode(&mut self, mode: QuirksMode);

    /// The document's quirks mode.
    fn quirks_mode(&self) -> QuirksMode;

    /// Classify a node.
    fn node_kind(&self, node: &Self::Handle) -> NodeKind;

    /// Parent of a node.
    fn parent(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// Children of a node, in order.
    fn children(&self, node: &Self::Handle) -> Vec<Self::Handle>;

    /// Local name of an element.
    fn tag_name(&self, node: &Self::Handle) -> Option<&str>;

    /// Namespace of an element.
    fn namespace(&self, node: &Self::Handle) -> Option<Namespace>;

    /// Attributes of an element (empty for other nodes).
    fn attributes(&self, node: &Self::Handle) -> &[Attribute];

    /// Data of a Text node.
    fn text(&self, node: &Self::Handle) -> Option<&str>;

    /// Data of a Comment node.
    fn comment(&self, node: &Self::Handle) -> Option<&str>;

    /// Fields of a DocumentType node.
    fn doctype(&self, node: &Self::Handle) -> Option<DoctypeView<'_>>;

    /// The template contents fragment of an HTML `template` element.
    fn template_contents(&self, node: &Self::Handle) -> Option<Self::Handle>;

    /// First child of a node.
    fn first_child(&self, node: &Self::Handle) -> Option<Self::Handle> {
        self.children(node).into_iter().next()
    }

    /// Last child of a node.
    fn last_child(&self, node: &Self::Handle) -> Option<Self::Handle> {
        self.children(node).pop()
    }

    /// The sibling immediately before `node`.
    fn previous_sibling(&self, node: &Self::Handle) -> Option<Self::Handle> {
        let parent = self.parent(node)?;
        let siblings = self.children(&parent);
        let position = siblings.iter().position(|sibling| sibling == node)?;
        position.checked_sub(1).map(|i| siblings[i].clone())
    }

    /// Move every child of `from` to the end of `to`.
    fn move_children(&mut self, from: &Self::Handle, to: &Self::Handle) {
        for child in self.children(from) {
            self.append_child(to, &child);
        }
    }

    /// True for element nodes.
    fn is_element(&self, node: &Self::Handle) -> bool {
        self.node_kind(node) == NodeKind::Element
    }

    /// True for Text nodes.
    fn is_text(&self, node: &Self::Handle) -> bool {
        self.node_kind(node) == NodeKind::Text
    }

    /// True for Comment nodes.
    fn is_comment(&self, node: &Self::Handle) -> bool {
        self.node_kind(node) == NodeKind::Comment
    }

    /// True for DocumentType nodes.
    fn is_document_type(&self, node: &Self::Handle) -> bool {
        self.node_kind(node) == NodeKind::DocumentType
    }

    /// Value of an attribute by local name.
    fn get_attribute(&self, node: &Self::Handle, name: &str) -> Option<&str> {
        self.attributes(node)
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }
}

impl TreeAdapter for DomTree {
    type Handle = NodeId;

    fn document(&self) -> NodeId {
        self.root()
    }

    fn create_element(
        &mut self,
        tag_name: &str,
        namespace: Namespace,
        attrs: Vec<Attribute>,
    ) -> NodeId {
        self.alloc_element(ElementData::new(tag_name.to_string(), namespace, attrs))
    }

    fn create_comment(&mut self, data: &str) -> NodeId {
        self.alloc(NodeType::Comment(data.to_string()))
    }

    fn append_child(&mut self, parent: &NodeId, child: &NodeId) {
        Self::append_child(self, *parent, *child);
    }

    fn insert_before(&mut self, parent: &NodeId, child: &NodeId, reference: &NodeId) {
        Self::insert_before(self, *parent, *child, *reference);
    }

    fn detach(&mut self, node: &NodeId) {
        Self::detach(self, *node);
    }

    fn insert_text(&mut self, parent: &NodeId, text: &str) {
        Self::insert_text(self, *parent, text);
    }

    fn insert_text_before(&mut self, parent: &NodeId, text: &str, reference: &NodeId) {
        Self::insert_text_before(self, *parent, text, *reference);
    }

    fn adopt_attributes(&mut self, element: &NodeId, attrs: &[Attribute]) {
        Self::adopt_attributes(self, *element, attrs);
    }

    fn set_document_type(&mut self, name: &str, public_id: &str, system_id: &str) {
        Self::set_document_type(self, name, public_id, system_id);
    }

    fn set_quirks_mode(&mut self, mode: QuirksMode) {
        Self::set_quirks_mode(self, mode);
    }

    fn quirks_mode(&self) -> QuirksMode {
        Self::quirks_mode(self)
    }

    fn node_kind(&self, node: &NodeId) -> NodeKind {
        match self.get(*node).map(|n| &n.node_type) {
            Some(NodeType::Document { .. }) | None => NodeKind::Document,
            Some(NodeType::DocumentFragment) => NodeKind::DocumentFragment,
            Some(NodeType::DocumentType(_)) => NodeKind::DocumentType,
            Some(NodeType::Element(_)) => NodeKind::Element,
            Some(NodeType::Text(_)) => NodeKind::Text,
            Some(NodeType::Comment(_)) => NodeKind::Comment,
        }
    }

    fn parent(&self, node: &NodeId) -> Option<NodeId> {
        Self::parent(self, *node)
    }

    fn children(&self, node: &NodeId) -> Vec<NodeId> {
        Self::children(self, *node).to_vec()
    }

    fn tag_name(&self, node: &NodeId) -> Option<&str> {
        self.as_element(*node).map(|e| e.tag_name.as_str())
    }

    fn namespace(&self, node: &NodeId) -> Option<Namespace> {
        self.as_element(*node).map(|e| e.namespace)
    }

    fn attributes(&self, node: &NodeId) -> &[Attribute] {
        self.as_element(*node).map_or(&[], |e| e.attrs.as_slice())
    }

    fn text(&self, node: &NodeId) -> Option<&str> {
        self.as_text(*node)
    }

    fn comment(&self, node: &NodeId) -> Option<&str> {
        self.as_comment(*node)
    }

    fn doctype(&self, node: &NodeId) -> Option<DoctypeView<'_>> {
        self.as_doctype(*node).map(|d| DoctypeView {
            name: &d.name,
            public_id: &d.public_id,
            system_id: &d.system_id,
        })
    }

    fn template_contents(&self, node: &NodeId) -> Option<NodeId> {
        Self::template_contents(self, *node)
    }

    fn first_child(&self, node: &NodeId) -> Option<NodeId> {
        Self::first_child(self, *node)
    }

    fn last_child(&self, node: &NodeId) -> Option<NodeId> {
        Self::last_child(self, *node)
    }

    fn previous_sibling(&self, node: &NodeId) -> Option<NodeId> {
        self.prev_sibling(*node)
    }

    fn move_children(&mut self, from: &NodeId, to: &NodeId) {
        Self::move_children(self, *from, *to);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_tree_adapter_builds_and_queries() {
        let mut tree = DomTree::new();
        let doc = TreeAdapter::document(&tree);
        let div = TreeAdapter::create_element(&mut tree, "div", Namespace::Html, Vec::new());
        TreeAdapter::append_child(&mut tree, &doc, &div);
        TreeAdapter::insert_text(&mut tree, &div, "a");
        TreeAdapter::insert_text(&mut tree, &div, "b");

        let children = TreeAdapter::children(&tree, &div);
        assert_eq!(children.len(), 1);
        assert_eq!(TreeAdapter::text(&tree, &children[0]), Some("ab"));
        assert_eq!(TreeAdapter::tag_name(&tree, &div), Some("div"));
        assert_eq!(tree.node_kind(&doc), NodeKind::Document);
    }

    #[test]
    fn test_template_gets_contents() {
        let mut tree = DomTree::new();
        let template =
            TreeAdapter::create_element(&mut tree, "template", Namespace::Html, Vec::new());
        let contents = TreeAdapter::template_contents(&tree, &template);
        let kind = contents.map(|c| tree.node_kind(&c));
        assert_eq!(kind, Some(NodeKind::DocumentFragment));

        let svg_template =
            TreeAdapter::create_element(&mut tree, "template", Namespace::Svg, Vec::new());
        assert_eq!(TreeAdapter::template_contents(&tree, &svg_template), None);
    }
}
