//! Markup tree artifacts.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// What a node holds between its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Content {
    /// Child elements, in document order. Empty for `<tag/>`.
    Elements(Vec<Node>),
    /// Character data of a leaf node.
    Text(String),
}

impl Default for Content {
    fn default() -> Self {
        Content::Elements(Vec::new())
    }
}

/// An element in a markup tree.
///
/// Inside a merge, a node is identified by its tag plus its `name`
/// attribute, or by its position among unnamed siblings of the same tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub content: Content,
}

impl Node {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            content: Content::default(),
        }
    }

    /// Set an attribute, keeping the position of an existing key.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Append a child element. A text leaf becomes an element node.
    pub fn child(mut self, node: Node) -> Self {
        match &mut self.content {
            Content::Elements(children) => children.push(node),
            Content::Text(_) => self.content = Content::Elements(vec![node]),
        }
        self
    }

    pub fn children(self, nodes: impl IntoIterator<Item = Node>) -> Self {
        nodes.into_iter().fold(self, Node::child)
    }

    /// Turn this node into a text leaf.
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.content = Content::Text(text.into());
        self
    }

    /// The `name` attribute, used as merge identity.
    pub fn name(&self) -> Option<&str> {
        self.attributes.get("name").map(String::as_str)
    }

    /// Child elements; empty for text leaves.
    pub fn child_nodes(&self) -> &[Node] {
        match &self.content {
            Content::Elements(children) => children,
            Content::Text(_) => &[],
        }
    }

    pub fn text_content(&self) -> Option<&str> {
        match &self.content {
            Content::Text(text) => Some(text),
            Content::Elements(_) => None,
        }
    }

    /// First child with the given tag and `name` attribute.
    pub fn find_child(&self, tag: &str, name: &str) -> Option<&Node> {
        self.child_nodes()
            .iter()
            .find(|n| n.tag == tag && n.name() == Some(name))
    }

    /// Children with the given tag.
    pub fn children_tagged<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Node> + 'a {
        self.child_nodes().iter().filter(move |n| n.tag == tag)
    }
}

/// A markup document at a path relative to the module root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeArtifact {
    pub path: String,
    pub root: Node,
}

impl TreeArtifact {
    pub fn new(path: impl Into<String>, root: Node) -> Self {
        Self {
            path: path.into(),
            root,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_builder() {
        let node = Node::new("xs:element")
            .attr("name", "config")
            .child(Node::new("xs:complexType"));

        assert_eq!(node.name(), Some("config"));
        assert_eq!(node.child_nodes().len(), 1);
        assert!(node.text_content().is_none());
    }

    #[test]
    fn test_attribute_order_preserved() {
        let node = Node::new("xs:element")
            .attr("name", "example")
            .attr("type", "exampleType")
            .attr("maxOccurs", "unbounded");
        let keys: Vec<_> = node.attributes.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", "type", "maxOccurs"]);
    }

    #[test]
    fn test_text_leaf_then_child() {
        let node = Node::new("label").text("Example").child(Node::new("b"));
        assert_eq!(node.child_nodes().len(), 1);
        assert!(node.text_content().is_none());
    }

    #[test]
    fn test_find_child() {
        let root = Node::new("xs:schema")
            .child(Node::new("xs:element").attr("name", "config"))
            .child(Node::new("xs:complexType").attr("name", "exampleType"));

        assert!(root.find_child("xs:element", "config").is_some());
        assert!(root.find_child("xs:element", "exampleType").is_none());
        assert_eq!(root.children_tagged("xs:complexType").count(), 1);
    }
}
