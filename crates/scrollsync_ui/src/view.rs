//! Host-independent view tree.
//!
//! The widget describes its markup as a small tree of elements with classes
//! and inline style declarations. Hosts turn it into real elements; nodes
//! tagged with a [`NodeRole`] must be handed back to the widget once created.

/// Inline style declarations, in order.
pub type Declarations = Vec<(&'static str, String)>;

/// Elements the widget needs references to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeRole {
    /// The natively scrolling content panel
    Scroller,
    /// The synthetic track/thumb
    Track,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ElementNode {
    pub tag: &'static str,
    pub class: Option<String>,
    pub style: Declarations,
    pub role: Option<NodeRole>,
    pub children: Vec<ViewNode>,
}

impl ElementNode {
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            class: None,
            style: Vec::new(),
            role: None,
            children: Vec::new(),
        }
    }

    pub fn class(mut self, class: impl Into<String>) -> Self {
        self.class = Some(class.into());
        self
    }

    pub fn style(mut self, declarations: Declarations) -> Self {
        self.style = declarations;
        self
    }

    pub fn role(mut self, role: NodeRole) -> Self {
        self.role = Some(role);
        self
    }

    pub fn child(mut self, child: impl Into<ViewNode>) -> Self {
        self.children.push(child.into());
        self
    }

    /// Replace all children.
    pub fn with_children(mut self, children: Vec<ViewNode>) -> Self {
        self.children = children;
        self
    }

    /// Value of an inline style property.
    pub fn style_value(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(name, _)| *name == property)
            .map(|(_, value)| value.as_str())
    }

    /// Serialized `style` attribute.
    pub fn style_attribute(&self) -> String {
        self.style
            .iter()
            .map(|(name, value)| format!("{name}: {value};"))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// `<div>` element.
pub fn div() -> ElementNode {
    ElementNode::new("div")
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewNode {
    Element(ElementNode),
    Text(String),
    /// Children rendered in place without an element of their own
    Fragment(Vec<ViewNode>),
    /// Content owned by the host, inserted by the renderer as-is
    Slot,
}

impl ViewNode {
    pub fn text(text: impl Into<String>) -> Self {
        ViewNode::Text(text.into())
    }

    pub fn as_element(&self) -> Option<&ElementNode> {
        match self {
            ViewNode::Element(element) => Some(element),
            _ => None,
        }
    }

    /// First element carrying `role`, depth first.
    pub fn find_role(&self, role: NodeRole) -> Option<&ElementNode> {
        match self {
            ViewNode::Element(element) => {
                if element.role == Some(role) {
                    return Some(element);
                }
                element.children.iter().find_map(|child| child.find_role(role))
            }
            ViewNode::Fragment(children) => children.iter().find_map(|child| child.find_role(role)),
            ViewNode::Text(_) | ViewNode::Slot => None,
        }
    }

    /// First element with class `class`, depth first.
    pub fn find_class(&self, class: &str) -> Option<&ElementNode> {
        match self {
            ViewNode::Element(element) => {
                if element.class.as_deref() == Some(class) {
                    return Some(element);
                }
                element.children.iter().find_map(|child| child.find_class(class))
            }
            ViewNode::Fragment(children) => children.iter().find_map(|child| child.find_class(class)),
            ViewNode::Text(_) | ViewNode::Slot => None,
        }
    }

    /// Serialize to markup; a slot becomes an HTML comment.
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        match self {
            ViewNode::Element(element) => {
                out.push('<');
                out.push_str(element.tag);
                if let Some(class) = &element.class {
                    out.push_str(&format!(" class=\"{}\"", escape(class)));
                }
                if !element.style.is_empty() {
                    out.push_str(&format!(" style=\"{}\"", escape(&element.style_attribute())));
                }
                out.push('>');
                for child in &element.children {
                    child.write_html(out);
                }
                out.push_str(&format!("</{}>", element.tag));
            }
            ViewNode::Text(text) => out.push_str(&escape(text)),
            ViewNode::Fragment(children) => {
                for child in children {
                    child.write_html(out);
                }
            }
            ViewNode::Slot => out.push_str("<!-- content -->"),
        }
    }
}

fn escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

impl From<ElementNode> for ViewNode {
    fn from(element: ElementNode) -> Self {
        ViewNode::Element(element)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_role_descends_fragments() {
        let tree: ViewNode = div()
            .child(ViewNode::Fragment(vec![div().role(NodeRole::Track).into()]))
            .into();
        assert!(tree.find_role(NodeRole::Track).is_some());
        assert!(tree.find_role(NodeRole::Scroller).is_none());
    }

    #[test]
    fn test_to_html() {
        let tree: ViewNode = div()
            .class("scrollbar")
            .child(div().style(vec![("height", "25%".to_string())]))
            .child(ViewNode::text("a < b"))
            .child(ViewNode::Slot)
            .into();
        assert_eq!(
            tree.to_html(),
            "<div class=\"scrollbar\"><div style=\"height: 25%;\"></div>a &lt; b<!-- content --></div>"
        );
    }

    #[test]
    fn test_style_attribute() {
        let element = div().style(vec![("height", "50%".to_string()), ("opacity", "0".to_string())]);
        assert_eq!(element.style_attribute(), "height: 50%; opacity: 0;");
        assert_eq!(element.style_value("opacity"), Some("0"));
        assert_eq!(element.style_value("display"), None);
    }
}
