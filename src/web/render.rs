//! Turns the widget's view tree into DOM elements and keeps them patched.

use scrollsync_ui::{ElementNode, NodeRole, ROOT_ATTRIBUTE, ViewNode};
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Node};

use super::error::WebError;

/// DOM built from one view tree.
pub struct Rendered {
    pub view: ViewNode,
    pub root: HtmlElement,
    pub scroller: Option<HtmlElement>,
    pub track: Option<HtmlElement>,
    /// One entry per view element, in document order
    elements: Vec<HtmlElement>,
}

/// Build the DOM for `view`, moving `content` into its slot.
pub fn build(document: &Document, view: ViewNode, content: &[Node]) -> Result<Rendered, WebError> {
    let ViewNode::Element(root_view) = &view else {
        return Err(WebError::RootNotElement);
    };

    let mut elements = Vec::new();
    let root = build_element(document, root_view, content, &mut elements)?;
    root.set_attribute(ROOT_ATTRIBUTE, "")?;

    let role_element = |role: NodeRole| {
        element_nodes(&view)
            .iter()
            .position(|element| element.role == Some(role))
            .and_then(|index| elements.get(index).cloned())
    };
    let scroller = role_element(NodeRole::Scroller);
    let track = role_element(NodeRole::Track);

    Ok(Rendered {
        view,
        root,
        scroller,
        track,
        elements,
    })
}

fn build_element(
    document: &Document,
    view: &ElementNode,
    content: &[Node],
    elements: &mut Vec<HtmlElement>,
) -> Result<HtmlElement, WebError> {
    let element = document
        .create_element(view.tag)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| WebError::NotHtmlElement(view.tag.to_string()))?;
    if let Some(class) = &view.class {
        element.set_class_name(class);
    }
    let style = element.style();
    for (name, value) in &view.style {
        style.set_property(name, value)?;
    }
    elements.push(element.clone());

    for child in &view.children {
        append_child(document, child, content, &element, elements)?;
    }
    Ok(element)
}

fn append_child(
    document: &Document,
    view: &ViewNode,
    content: &[Node],
    parent: &HtmlElement,
    elements: &mut Vec<HtmlElement>,
) -> Result<(), WebError> {
    match view {
        ViewNode::Element(child) => {
            let element = build_element(document, child, content, elements)?;
            parent.append_child(&element)?;
        }
        ViewNode::Text(text) => {
            parent.append_child(&document.create_text_node(text))?;
        }
        ViewNode::Fragment(children) => {
            for child in children {
                append_child(document, child, content, parent, elements)?;
            }
        }
        ViewNode::Slot => {
            for node in content {
                parent.append_child(node)?;
            }
        }
    }
    Ok(())
}

/// Elements of a view in document order.
fn element_nodes(view: &ViewNode) -> Vec<&ElementNode> {
    fn collect<'a>(view: &'a ViewNode, out: &mut Vec<&'a ElementNode>) {
        match view {
            ViewNode::Element(element) => {
                out.push(element);
                for child in &element.children {
                    collect(child, out);
                }
            }
            ViewNode::Fragment(children) => {
                for child in children {
                    collect(child, out);
                }
            }
            ViewNode::Text(_) | ViewNode::Slot => {}
        }
    }

    let mut out = Vec::new();
    collect(view, &mut out);
    out
}

/// True when `next` can be applied to the DOM of `prev` by patching
/// attributes alone.
pub fn same_shape(prev: &ViewNode, next: &ViewNode) -> bool {
    let prev = element_nodes(prev);
    let next = element_nodes(next);
    prev.len() == next.len()
        && prev.iter().zip(&next).all(|(a, b)| {
            a.tag == b.tag && a.role == b.role && a.children.len() == b.children.len()
        })
}

impl Rendered {
    /// Apply class and inline style changes from `next`.
    ///
    /// Only declarations the view manages are touched, so properties set
    /// directly on an element (the track's transform) survive.
    pub fn patch(&mut self, next: ViewNode) -> Result<(), WebError> {
        {
            let prev = element_nodes(&self.view);
            let updated = element_nodes(&next);
            for ((old, new), element) in prev.iter().zip(&updated).zip(&self.elements) {
                patch_element(old, new, element)?;
            }
        }
        self.view = next;
        Ok(())
    }
}

fn patch_element(prev: &ElementNode, next: &ElementNode, element: &HtmlElement) -> Result<(), WebError> {
    if prev.class != next.class {
        element.set_class_name(next.class.as_deref().unwrap_or_default());
    }
    let style = element.style();
    for (name, _) in &prev.style {
        if next.style_value(name).is_none() {
            style.remove_property(name)?;
        }
    }
    for (name, value) in &next.style {
        if prev.style_value(name) != Some(value.as_str()) {
            style.set_property(name, value)?;
        }
    }
    Ok(())
}
