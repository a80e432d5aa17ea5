//! DOM tree implementation for the Tern HTML parser.
//!
//! This crate provides an arena-based DOM tree structure following the
//! [DOM Living Standard](https://dom.spec.whatwg.org/).
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all relationships,
//! providing O(1) access and traversal without borrow checker issues. Parent
//! and child links are stored as indices, so the cyclic parent/child graph of
//! the DOM never becomes an ownership cycle.

use serde::Serialize;
use strum_macros::{AsRefStr, Display};

/// A type-safe index into the DOM tree.
///
/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
/// "Each node has an associated node document..."
///
/// `NodeId` provides O(1) access to any node in the tree without borrowing issues.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The root document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// [§ 1.2 Namespaces](https://infra.spec.whatwg.org/#namespaces)
///
/// The namespaces the HTML parser can place elements and attributes in.
/// `as_ref()` yields the namespace URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, Serialize)]
pub enum Namespace {
    /// "The HTML namespace is "http://www.w3.org/1999/xhtml"."
    #[strum(serialize = "http://www.w3.org/1999/xhtml")]
    Html,
    /// "The MathML namespace is "http://www.w3.org/1998/Math/MathML"."
    #[strum(serialize = "http://www.w3.org/1998/Math/MathML")]
    MathMl,
    /// "The SVG namespace is "http://www.w3.org/2000/svg"."
    #[strum(serialize = "http://www.w3.org/2000/svg")]
    Svg,
    /// "The XLink namespace is "http://www.w3.org/1999/xlink"."
    #[strum(serialize = "http://www.w3.org/1999/xlink")]
    XLink,
    /// "The XML namespace is "http://www.w3.org/XML/1998/namespace"."
    #[strum(serialize = "http://www.w3.org/XML/1998/namespace")]
    Xml,
    /// "The XMLNS namespace is "http://www.w3.org/2000/xmlns/"."
    #[strum(serialize = "http://www.w3.org/2000/xmlns/")]
    Xmlns,
}

impl Namespace {
    /// Short prefix used by the html5lib tree dump format (`svg`, `math`).
    #[must_use]
    pub const fn dump_prefix(self) -> Option<&'static str> {
        match self {
            Self::Html => None,
            Self::MathMl => Some("math"),
            Self::Svg => Some("svg"),
            Self::XLink => Some("xlink"),
            Self::Xml => Some("xml"),
            Self::Xmlns => Some("xmlns"),
        }
    }
}

/// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#concept-document-mode)
///
/// "Each document has an associated ... mode ("no-quirks", "quirks", or
/// "limited-quirks")."
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize)]
#[strum(serialize_all = "kebab-case")]
pub enum QuirksMode {
    /// "no-quirks"
    #[default]
    NoQuirks,
    /// "quirks"
    Quirks,
    /// "limited-quirks"
    LimitedQuirks,
}

/// [§ 4.9.2 Interface Attr](https://dom.spec.whatwg.org/#interface-attr)
///
/// An attribute on an element (and on start/end tag tokens). Attribute lists
/// are ordered; the tokenizer guarantees names are unique per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Attribute {
    /// "local name"
    pub name: String,
    /// "value"
    pub value: String,
    /// "namespace (null or a non-empty string)"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<Namespace>,
    /// "namespace prefix (null or a non-empty string)"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Attribute {
    /// Create a new un-namespaced attribute with the given name and value.
    #[must_use]
    pub const fn new(name: String, value: String) -> Self {
        Self {
            name,
            value,
            namespace: None,
            prefix: None,
        }
    }

    /// The qualified name: `prefix:name` when a prefix is present.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        match &self.prefix {
            Some(prefix) => format!("{prefix}:{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Node is an abstract interface that is used by all nodes in a tree."
/// "Each node has an associated node document... and parent (null or an element)."
///
/// This node stores indices for parent/child/sibling relationships,
/// enabling O(1) traversal in any direction.
#[derive(Debug, Clone)]
pub struct Node {
    /// "Each node has an associated node type"
    pub node_type: NodeType,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-parent)
    /// "An object that participates in a tree has a parent, which is either
    /// null or an object."
    pub parent: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-child)
    /// "A node has an associated list of children"
    pub children: Vec<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-next-sibling)
    pub next_sibling: Option<NodeId>,

    /// [§ 4.4](https://dom.spec.whatwg.org/#concept-tree-previous-sibling)
    pub prev_sibling: Option<NodeId>,
}

/// [§ 4.4 Interface Node](https://dom.spec.whatwg.org/#interface-node)
///
/// "Each node has an associated node type"
#[derive(Debug, Clone)]
pub enum NodeType {
    /// [§ 4.5 Interface Document](https://dom.spec.whatwg.org/#interface-document)
    Document {
        /// The document's quirks mode, set by the parser from the DOCTYPE.
        quirks_mode: QuirksMode,
    },
    /// [§ 4.7 Interface DocumentFragment](https://dom.spec.whatwg.org/#interface-documentfragment)
    DocumentFragment,
    /// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
    DocumentType(DocumentTypeData),
    /// [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element)
    /// "Element nodes are simply known as elements."
    Element(ElementData),
    /// [§ 4.10 Interface Text](https://dom.spec.whatwg.org/#interface-text)
    /// "Text nodes are known as text."
    Text(String),
    /// [§ 4.7 Interface Comment](https://dom.spec.whatwg.org/#interface-comment)
    /// "Comment nodes are known as comments."
    Comment(String),
}

/// [§ 4.6 Interface DocumentType](https://dom.spec.whatwg.org/#interface-documenttype)
///
/// "Doctypes have an associated name, public ID, and system ID."
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocumentTypeData {
    /// "name"
    pub name: String,
    /// "public ID"
    pub public_id: String,
    /// "system ID"
    pub system_id: String,
}

/// Element-specific data.
///
/// Per [§ 4.9 Interface Element](https://dom.spec.whatwg.org/#interface-element):
/// "Elements have an associated namespace, namespace prefix, local name..."
#[derive(Debug, Clone)]
pub struct ElementData {
    /// "An element's local name"
    pub tag_name: String,
    /// "An element's namespace"
    pub namespace: Namespace,
    /// "An element has an associated attribute list"
    pub attrs: Vec<Attribute>,
    /// [§ 4.12.3 The template element](https://html.spec.whatwg.org/multipage/scripting.html#template-contents)
    ///
    /// "The template contents of a template element... is a DocumentFragment."
    /// Only set for HTML `template` elements.
    pub template_contents: Option<NodeId>,
}

impl ElementData {
    /// Create element data with no template contents.
    #[must_use]
    pub const fn new(tag_name: String, namespace: Namespace, attrs: Vec<Attribute>) -> Self {
        Self {
            tag_name,
            namespace,
            attrs,
            template_contents: None,
        }
    }

    /// Look up an attribute value by (local) name.
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|attr| attr.name == name)
            .map(|attr| attr.value.as_str())
    }

    /// Returns the element's id attribute value if present.
    ///
    /// Per [§ 3.2.6 Global attributes](https://html.spec.whatwg.org/multipage/dom.html#global-attributes):
    /// "The id attribute specifies its element's unique identifier (ID)."
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.get_attribute("id")
    }

    /// True for an element with the given local name in the HTML namespace.
    #[must_use]
    pub fn is_html(&self, tag_name: &str) -> bool {
        self.namespace == Namespace::Html && self.tag_name == tag_name
    }
}

/// Arena-based DOM tree with O(1) node access and traversal.
///
/// [§ 4 Nodes](https://dom.spec.whatwg.org/#nodes)
///
/// "The DOM represents a document as a tree. A tree is a finite hierarchical
/// tree structure."
///
/// Every node lives in a contiguous vector and relationships are indices.
/// Detached nodes stay allocated; they simply have no parent.
#[derive(Debug, Clone)]
pub struct DomTree {
    /// All nodes in the tree, indexed by `NodeId`.
    /// The Document node is always at index 0 (`NodeId::ROOT`).
    nodes: Vec<Node>,
}

impl DomTree {
    /// Create a new DOM tree with just the Document node.
    #[must_use]
    pub fn new() -> Self {
        let document = Node {
            node_type: NodeType::Document {
                quirks_mode: QuirksMode::NoQuirks,
            },
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        };
        Self {
            nodes: vec![document],
        }
    }

    /// Create a DOM tree whose root is a DocumentFragment, as produced by
    /// fragment parsing.
    #[must_use]
    pub fn new_fragment() -> Self {
        let mut tree = Self::new();
        tree.nodes[NodeId::ROOT.0].node_type = NodeType::DocumentFragment;
        tree
    }

    /// True when the root node is a DocumentFragment.
    #[must_use]
    pub fn is_fragment(&self) -> bool {
        matches!(
            self.nodes[NodeId::ROOT.0].node_type,
            NodeType::DocumentFragment
        )
    }

    /// Get the root node ID (the Document, or the fragment for fragment trees).
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Get a mutable reference to a node by its ID.
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0)
    }

    /// Get the number of allocated nodes (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty (should always have at least the Document).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Allocate a new node and return its ID.
    /// The node is not yet attached to the tree.
    pub fn alloc(&mut self, node_type: NodeType) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            node_type,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        });
        id
    }

    /// Allocate an element. HTML `template` elements also get their
    /// template contents fragment allocated here.
    pub fn alloc_element(&mut self, data: ElementData) -> NodeId {
        let is_template = data.is_html("template");
        let id = self.alloc(NodeType::Element(data));
        if is_template {
            let contents = self.alloc(NodeType::DocumentFragment);
            if let Some(NodeType::Element(element)) = self.get_mut(id).map(|n| &mut n.node_type) {
                element.template_contents = Some(contents);
            }
        }
        id
    }

    /// [§ 4.2.2 Append](https://dom.spec.whatwg.org/#concept-node-append)
    ///
    /// "To append a node to a parent, pre-insert node into parent before null."
    ///
    /// Appends `child` as the last child of `parent`, updating all relationships.
    /// A child that is still attached elsewhere is detached first, so every
    /// node keeps exactly one parent.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.detach(child);

        // Get the current last child of parent (if any) to set up sibling links
        let prev_last_child = self.nodes[parent.0].children.last().copied();

        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);
        self.nodes[child.0].next_sibling = None;
        self.nodes[child.0].prev_sibling = prev_last_child;

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
        }
    }

    /// [§ 4.2.3 Pre-insert](https://dom.spec.whatwg.org/#concept-node-pre-insert)
    ///
    /// Inserts `child` into `parent` immediately before `reference`. If
    /// `reference` is not a child of `parent` the node is appended.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: NodeId) {
        self.detach(child);

        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == reference)
        else {
            self.append_child(parent, child);
            return;
        };

        self.nodes[parent.0].children.insert(position, child);
        self.nodes[child.0].parent = Some(parent);
        self.relink_siblings(parent);
    }

    /// [§ 4.2.4 Remove](https://dom.spec.whatwg.org/#concept-node-remove)
    ///
    /// Removes `child` from `parent`'s children. Does nothing if `child` is
    /// not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(position) = self.nodes[parent.0]
            .children
            .iter()
            .position(|&id| id == child)
        else {
            return;
        };

        let _ = self.nodes[parent.0].children.remove(position);
        let node = &mut self.nodes[child.0];
        node.parent = None;
        node.prev_sibling = None;
        node.next_sibling = None;
        self.relink_siblings(parent);
    }

    /// Remove `node` from its parent, if it has one.
    pub fn detach(&mut self, node: NodeId) {
        if let Some(parent) = self.parent(node) {
            self.remove_child(parent, node);
        }
    }

    /// Move every child of `from` to the end of `to`'s children, preserving order.
    pub fn move_children(&mut self, from: NodeId, to: NodeId) {
        let children = std::mem::take(&mut self.nodes[from.0].children);
        for child in children {
            self.nodes[child.0].parent = None;
            self.append_child(to, child);
        }
    }

    /// [§ 13.2.6.1 Insert a character](https://html.spec.whatwg.org/multipage/parsing.html#insert-a-character)
    ///
    /// "If there is a Text node immediately before the adjusted insertion
    /// location, then append data to that Text node's data." Otherwise a new
    /// Text node is appended to `parent`.
    pub fn insert_text(&mut self, parent: NodeId, text: &str) {
        if let Some(last) = self.last_child(parent)
            && let NodeType::Text(data) = &mut self.nodes[last.0].node_type
        {
            data.push_str(text);
            return;
        }
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.append_child(parent, id);
    }

    /// Insert text immediately before `reference`, coalescing with a Text
    /// node that already sits right before it.
    pub fn insert_text_before(&mut self, parent: NodeId, text: &str, reference: NodeId) {
        if self.parent(reference) == Some(parent)
            && let Some(prev) = self.prev_sibling(reference)
            && let NodeType::Text(data) = &mut self.nodes[prev.0].node_type
        {
            data.push_str(text);
            return;
        }
        let id = self.alloc(NodeType::Text(text.to_string()));
        self.insert_before(parent, id, reference);
    }

    /// Add each attribute in `attrs` that `element` does not already carry.
    /// Existing attributes keep their values.
    pub fn adopt_attributes(&mut self, element: NodeId, attrs: &[Attribute]) {
        if let Some(NodeType::Element(data)) = self.get_mut(element).map(|n| &mut n.node_type) {
            for attr in attrs {
                if !data.attrs.iter().any(|existing| existing.name == attr.name) {
                    data.attrs.push(attr.clone());
                }
            }
        }
    }

    /// Set (or replace) the document's DocumentType child.
    pub fn set_document_type(&mut self, name: &str, public_id: &str, system_id: &str) {
        let data = DocumentTypeData {
            name: name.to_string(),
            public_id: public_id.to_string(),
            system_id: system_id.to_string(),
        };
        let existing = self
            .children(NodeId::ROOT)
            .iter()
            .copied()
            .find(|&id| self.as_doctype(id).is_some());
        if let Some(id) = existing {
            self.nodes[id.0].node_type = NodeType::DocumentType(data);
        } else {
            let id = self.alloc(NodeType::DocumentType(data));
            self.append_child(NodeId::ROOT, id);
        }
    }

    /// The document's quirks mode.
    #[must_use]
    pub fn quirks_mode(&self) -> QuirksMode {
        match self.nodes[NodeId::ROOT.0].node_type {
            NodeType::Document { quirks_mode } => quirks_mode,
            _ => QuirksMode::NoQuirks,
        }
    }

    /// Set the document's quirks mode.
    pub fn set_quirks_mode(&mut self, mode: QuirksMode) {
        if let NodeType::Document { quirks_mode } = &mut self.nodes[NodeId::ROOT.0].node_type {
            *quirks_mode = mode;
        }
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Get the first child of a node.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.first().copied())
    }

    /// Get the last child of a node.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.children.last().copied())
    }

    /// Get the next sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Get the previous sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// [§ 4.2.6 Descendant](https://dom.spec.whatwg.org/#concept-tree-descendant)
    ///
    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Get element data if this node is an element.
    #[must_use]
    pub fn as_element(&self, id: NodeId) -> Option<&ElementData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Element(data) => Some(data),
            _ => None,
        })
    }

    /// Get text content if this node is a text node.
    #[must_use]
    pub fn as_text(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Text(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get comment data if this node is a comment.
    #[must_use]
    pub fn as_comment(&self, id: NodeId) -> Option<&str> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::Comment(s) => Some(s.as_str()),
            _ => None,
        })
    }

    /// Get doctype data if this node is a DocumentType.
    #[must_use]
    pub fn as_doctype(&self, id: NodeId) -> Option<&DocumentTypeData> {
        self.get(id).and_then(|n| match &n.node_type {
            NodeType::DocumentType(data) => Some(data),
            _ => None,
        })
    }

    /// The template contents fragment of an HTML `template` element.
    #[must_use]
    pub fn template_contents(&self, id: NodeId) -> Option<NodeId> {
        self.as_element(id).and_then(|e| e.template_contents)
    }

    /// [§ 3.1.1 The document element](https://html.spec.whatwg.org/multipage/dom.html#the-html-element-2)
    ///
    /// "The document element of a document is the element whose parent is that
    /// document, if it exists; otherwise null."
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.children(NodeId::ROOT)
            .iter()
            .find(|&&id| self.as_element(id).is_some())
            .copied()
    }

    /// [§ 3.1.3 The body element](https://html.spec.whatwg.org/multipage/dom.html#the-body-element-2)
    ///
    /// "The body element of a document is the first of the html element's children
    /// that is either a body element or a frameset element, or null if there is
    /// no such element."
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;

        self.children(html)
            .iter()
            .find(|&&id| {
                self.as_element(id)
                    .is_some_and(|e| e.is_html("body") || e.is_html("frameset"))
            })
            .copied()
    }

    /// Concatenated data of all Text descendants of `id`, in tree order.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        let mut result = String::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            match self.as_text(current) {
                Some(text) => result.push_str(text),
                None => stack.extend(self.children(current).iter().rev()),
            }
        }
        result
    }

    fn relink_siblings(&mut self, parent: NodeId) {
        let children = self.nodes[parent.0].children.clone();
        for (i, &child) in children.iter().enumerate() {
            let prev = i.checked_sub(1).map(|p| children[p]);
            let next = children.get(i + 1).copied();
            let node = &mut self.nodes[child.0];
            node.prev_sibling = prev;
            node.next_sibling = next;
        }
    }
}

impl Default for DomTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a DomTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
