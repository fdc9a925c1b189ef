//! Merging of markup trees registered at the same path.

use weave_ir::{Content, Node};

use super::Merged;
use crate::{Error, Result};

/// How a child is recognised among its siblings.
#[derive(Debug, PartialEq, Eq)]
enum Identity {
    /// Tag plus `name` attribute.
    Named(String, String),
    /// Tag plus position among unnamed siblings with that tag.
    Positional(String, usize),
}

fn identities(children: &[Node]) -> Vec<Identity> {
    let mut seen: Vec<&str> = Vec::new();
    children
        .iter()
        .map(|child| match child.name() {
            Some(name) => Identity::Named(child.tag.clone(), name.to_string()),
            None => {
                let ordinal = seen.iter().filter(|t| **t == child.tag).count();
                seen.push(&child.tag);
                Identity::Positional(child.tag.clone(), ordinal)
            }
        })
        .collect()
}

/// Reject nodes without a tag anywhere in the tree.
pub(crate) fn validate(node: &Node) -> Result<()> {
    if node.tag.trim().is_empty() {
        return Err(Error::structural("markup node has an empty tag"));
    }
    node.child_nodes().iter().try_for_each(validate)
}

/// Merge `incoming` into a copy of `existing`; both are document roots.
pub(crate) fn merge(target: &str, existing: &Node, incoming: Node) -> Result<Merged<Node>> {
    if existing.tag != incoming.tag {
        return Err(Error::conflict(
            target,
            format!(
                "root element is <{}> but <{}> was contributed",
                existing.tag, incoming.tag
            ),
        ));
    }

    let mut merged = existing.clone();
    let mut warnings = Vec::new();
    merge_node(&mut merged, incoming, &existing.tag, &mut warnings);
    Ok(Merged {
        value: merged,
        warnings,
    })
}

/// `at` is a slash separated trail of tags used in warnings.
fn merge_node(current: &mut Node, incoming: Node, at: &str, warnings: &mut Vec<String>) {
    for (key, value) in incoming.attributes {
        match current.attributes.get_mut(&key) {
            Some(old) if *old != value => {
                warnings.push(format!(
                    "attribute '{key}' on {at} changed from '{old}' to '{value}'"
                ));
                *old = value;
            }
            Some(_) => {}
            None => {
                current.attributes.insert(key, value);
            }
        }
    }

    let content = std::mem::take(&mut current.content);
    current.content = merge_content(content, incoming.content, at, warnings);
}

fn merge_content(current: Content, incoming: Content, at: &str, warnings: &mut Vec<String>) -> Content {
    match (current, incoming) {
        (Content::Elements(mut children), Content::Elements(new_children)) => {
            let known = identities(&children);
            let new_ids = identities(&new_children);
            for (child, id) in new_children.into_iter().zip(new_ids) {
                match known.iter().position(|k| *k == id) {
                    Some(i) => {
                        let trail = format!("{at}/{}", child.tag);
                        merge_node(&mut children[i], child, &trail, warnings);
                    }
                    None => children.push(child),
                }
            }
            Content::Elements(children)
        }
        (Content::Text(old), Content::Text(new)) => {
            if old != new {
                warnings.push(format!("text of {at} changed from '{old}' to '{new}'"));
            }
            Content::Text(new)
        }
        (Content::Elements(children), Content::Text(new)) => {
            if !children.is_empty() {
                warnings.push(format!("child elements of {at} replaced by text"));
            }
            Content::Text(new)
        }
        (Content::Text(old), Content::Elements(new_children)) => {
            if new_children.is_empty() {
                Content::Text(old)
            } else {
                warnings.push(format!("text of {at} replaced by child elements"));
                Content::Elements(new_children)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema(node: &str) -> Node {
        Node::new("xs:schema")
            .attr("xmlns:xs", "http://www.w3.org/2001/XMLSchema")
            .child(
                Node::new("xs:element").attr("name", "config").child(
                    Node::new("xs:complexType").child(
                        Node::new("xs:choice")
                            .attr("maxOccurs", "unbounded")
                            .child(Node::new("xs:element").attr("name", node)),
                    ),
                ),
            )
    }

    #[test]
    fn test_identical_tree_is_noop() {
        let merged = merge("etc/a.xsd", &schema("example"), schema("example")).unwrap();
        assert_eq!(merged.value, schema("example"));
        assert!(merged.warnings.is_empty());
    }

    #[test]
    fn test_named_children_merge_recursively() {
        let merged = merge("etc/a.xsd", &schema("example"), schema("other"))
            .unwrap()
            .value;

        assert_eq!(merged.child_nodes().len(), 1);
        let choice = &merged.child_nodes()[0].child_nodes()[0].child_nodes()[0];
        let names: Vec<_> = choice.child_nodes().iter().filter_map(Node::name).collect();
        assert_eq!(names, vec!["example", "other"]);
    }

    #[test]
    fn test_root_tag_mismatch_is_fatal() {
        let err = merge("etc/a.xsd", &schema("example"), Node::new("config")).unwrap_err();
        assert!(matches!(err, Error::MergeConflict { .. }));
    }

    #[test]
    fn test_attribute_last_writer_wins() {
        let a = Node::new("config").attr("version", "1");
        let b = Node::new("config").attr("version", "2").attr("lang", "en");
        let merged = merge("etc/config.xml", &a, b).unwrap();

        assert_eq!(merged.warnings.len(), 1);
        assert_eq!(merged.value.attributes["version"], "2");
        assert_eq!(merged.value.attributes.len(), 2);
    }

    #[test]
    fn test_text_last_writer_wins() {
        let a = Node::new("config").child(Node::new("label").text("One"));
        let b = Node::new("config").child(Node::new("label").text("Two"));
        let merged = merge("etc/config.xml", &a, b).unwrap();

        assert_eq!(merged.warnings.len(), 1);
        assert_eq!(merged.value.child_nodes()[0].text_content(), Some("Two"));
    }

    #[test]
    fn test_unnamed_siblings_match_by_position() {
        let a = Node::new("config")
            .child(Node::new("item").attr("a", "1"))
            .child(Node::new("item").attr("a", "2"));
        let b = Node::new("config")
            .child(Node::new("item").attr("b", "1"))
            .child(Node::new("item").attr("b", "2"))
            .child(Node::new("item").attr("b", "3"));
        let merged = merge("etc/config.xml", &a, b).unwrap().value;

        let items = merged.child_nodes();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].attributes.len(), 2);
        assert_eq!(items[1].attributes.len(), 2);
        assert_eq!(items[2].attributes.len(), 1);
    }

    #[test]
    fn test_text_and_elements() {
        let text = Node::new("config").child(Node::new("label").text("One"));
        let elements = Node::new("config").child(Node::new("label").child(Node::new("b")));
        let empty = Node::new("config").child(Node::new("label"));

        let merged = merge("a.xml", &text, elements).unwrap();
        assert_eq!(merged.warnings.len(), 1);
        assert_eq!(merged.value.child_nodes()[0].child_nodes().len(), 1);

        let merged = merge("a.xml", &text, empty.clone()).unwrap();
        assert!(merged.warnings.is_empty());
        assert_eq!(merged.value.child_nodes()[0].text_content(), Some("One"));

        let merged = merge("a.xml", &empty, text).unwrap();
        assert!(merged.warnings.is_empty());
        assert_eq!(merged.value.child_nodes()[0].text_content(), Some("One"));
    }

    #[test]
    fn test_validate_empty_tag() {
        assert!(validate(&Node::new("config").child(Node::new(""))).is_err());
        assert!(validate(&schema("example")).is_ok());
    }
}
