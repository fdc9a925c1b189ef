use weave_ir::{Content, Node, TreeArtifact};

use crate::builder::{CodeBuilder, CodeFragment, Renderable};

/// Escape a value for use inside a double quoted attribute.
pub fn escape_attribute(value: &str) -> String {
    escape_text(value).replace('"', "&quot;")
}

/// Escape character data.
pub fn escape_text(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

struct Element<'a>(&'a Node);

impl Element<'_> {
    fn open_tag(&self) -> String {
        let attrs: String = self
            .0
            .attributes
            .iter()
            .map(|(k, v)| format!(" {k}=\"{}\"", escape_attribute(v)))
            .collect();
        format!("<{}{attrs}", self.0.tag)
    }
}

impl Renderable for Element<'_> {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        let node = self.0;
        let open = self.open_tag();
        match &node.content {
            Content::Elements(children) if children.is_empty() => {
                vec![CodeFragment::line(format!("{open}/>"))]
            }
            Content::Elements(children) => vec![CodeFragment::block(
                format!("{open}>"),
                children
                    .iter()
                    .flat_map(|child| Element(child).to_fragments())
                    .collect(),
                Some(format!("</{}>", node.tag)),
            )],
            Content::Text(text) => vec![CodeFragment::line(format!(
                "{open}>{}</{}>",
                escape_text(text),
                node.tag
            ))],
        }
    }
}

/// Renders markup trees as XML documents.
///
/// Attributes keep insertion order, children keep merged order and each
/// level is indented by four spaces.
#[derive(Debug, Clone, Copy, Default)]
pub struct XmlRenderer;

impl XmlRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render_tree(&self, tree: &TreeArtifact) -> String {
        self.render_node(&tree.root)
    }

    pub fn render_node(&self, root: &Node) -> String {
        let mut builder = CodeBuilder::xml();
        builder.push_line("<?xml version=\"1.0\"?>").emit(&Element(root));
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_nested() {
        let root = Node::new("config")
            .attr("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance")
            .child(Node::new("module").attr("name", "Experius_Test"));

        assert_eq!(
            XmlRenderer.render_node(&root),
            "<?xml version=\"1.0\"?>\n\
             <config xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">\n    \
             <module name=\"Experius_Test\"/>\n\
             </config>\n"
        );
    }

    #[test]
    fn test_render_text_and_escaping() {
        let root = Node::new("config")
            .child(Node::new("label").attr("title", "a \"b\" & c").text("1 < 2"));

        assert_eq!(
            XmlRenderer.render_node(&root),
            "<?xml version=\"1.0\"?>\n\
             <config>\n    \
             <label title=\"a &quot;b&quot; &amp; c\">1 &lt; 2</label>\n\
             </config>\n"
        );
    }

    #[test]
    fn test_render_is_deterministic() {
        let tree = TreeArtifact::new(
            "etc/example.xsd",
            Node::new("xs:schema").child(Node::new("xs:include").attr("schemaLocation", "x")),
        );
        assert_eq!(XmlRenderer.render_tree(&tree), XmlRenderer.render_tree(&tree));
    }
}
