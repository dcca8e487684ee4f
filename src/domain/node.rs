//! Minimal element tree for the markup the client writes into a page.

use std::fmt::Write;

const VOID_TAGS: [&str; 2] = ["input", "br"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Sets an attribute, replacing any previous value.
    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn text(self, text: impl Into<String>) -> Self {
        self.child(Node::Text(text.into()))
    }

    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.attrs.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    pub fn get_attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn has_attr(&self, name: &str) -> bool {
        self.get_attr(name).is_some()
    }

    /// Depth-first walk over this element and all nested elements.
    pub fn descendants(&self) -> Vec<&Element> {
        let mut out = vec![self];
        for child in &self.children {
            if let Node::Element(el) = child {
                out.extend(el.descendants());
            }
        }
        out
    }

    /// Visits this element and every nested element, parents first.
    pub fn visit_mut(&mut self, f: &mut dyn FnMut(&mut Element)) {
        f(self);
        for child in &mut self.children {
            if let Node::Element(el) = child {
                el.visit_mut(f);
            }
        }
    }

    /// Concatenated text content, like the DOM `textContent` property.
    pub fn text_content(&self) -> String {
        self.children.iter().map(Node::text_content).collect()
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            Node::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        match self {
            Node::Text(t) => t.clone(),
            Node::Element(el) => el.text_content(),
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Text(t) => out.push_str(&escape(t, false)),
            Node::Element(el) => {
                let _ = write!(out, "<{}", el.tag);
                for (name, value) in &el.attrs {
                    if value.is_empty() {
                        let _ = write!(out, " {}", name);
                    } else {
                        let _ = write!(out, " {}=\"{}\"", name, escape(value, true));
                    }
                }
                out.push('>');
                if VOID_TAGS.contains(&el.tag.as_str()) {
                    return;
                }
                for child in &el.children {
                    child.write_html(out);
                }
                let _ = write!(out, "</{}>", el.tag);
            }
        }
    }
}

fn escape(raw: &str, in_attr: bool) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' if in_attr => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_void_and_boolean_attributes() {
        let label = Element::new("label")
            .attr("for", "band_1")
            .child(
                Element::new("input")
                    .attr("type", "checkbox")
                    .attr("checked", ""),
            )
            .text(" A");

        assert_eq!(
            Node::from(label).to_html(),
            r#"<label for="band_1"><input type="checkbox" checked> A</label>"#
        );
    }

    #[test]
    fn test_escapes_text_and_attributes() {
        let p = Element::new("p").attr("title", "\"x\" & y").text("<AC/DC>");
        assert_eq!(
            Node::from(p).to_html(),
            r#"<p title="&quot;x&quot; &amp; y">&lt;AC/DC&gt;</p>"#
        );
    }

    #[test]
    fn test_text_content_flattens_nested_text() {
        let label = Node::from(
            Element::new("label")
                .child(Element::new("input"))
                .text(" Led ")
                .child(Element::new("b").text("Zeppelin")),
        );
        assert_eq!(label.text_content(), " Led Zeppelin");
        assert_eq!(Node::text("plain").text_content(), "plain");
    }

    #[test]
    fn test_visit_mut_reaches_nested_elements() {
        let mut root = Element::new("div").child(Element::new("label").child(Element::new("input")));
        root.visit_mut(&mut |el: &mut Element| el.set_attr("seen", "1"));

        assert_eq!(root.descendants().len(), 3);
        assert!(root.descendants().iter().all(|el| el.get_attr("seen") == Some("1")));
    }
}
