//! The outline as a plain tree of named elements and text.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A child-index path from the root, e.g. `[2, 0]` is the first child of
/// the root's third child.
pub type Position = [usize];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlineNode {
    Element(OutlineElement),
    Text(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OutlineElement {
    pub name: String,
    #[serde(default)]
    pub attributes: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<OutlineNode>,
}

impl OutlineElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.attributes.insert(name.to_string(), value.into());
        self
    }

    pub fn with_child(mut self, child: impl Into<OutlineNode>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    pub fn elements(&self) -> impl Iterator<Item = &OutlineElement> {
        self.children.iter().filter_map(|child| match child {
            OutlineNode::Element(el) => Some(el),
            OutlineNode::Text(_) => None,
        })
    }

    /// Every descendant element named `name`, in document order. The
    /// element itself is not included.
    pub fn query_all<'a>(&'a self, name: &str) -> Vec<&'a OutlineElement> {
        let mut out = Vec::new();
        let mut stack: Vec<&OutlineElement> = self.elements().collect();
        stack.reverse();
        while let Some(el) = stack.pop() {
            if el.name == name {
                out.push(el);
            }
            let len = stack.len();
            stack.extend(el.elements());
            stack[len..].reverse();
        }
        out
    }

    /// The highest element below `self` on the way to `position`.
    ///
    /// `None` when the position is empty, out of range, or its top step
    /// lands on text: callers then work on the whole outline.
    pub fn subtree(&self, position: &Position) -> Option<&OutlineElement> {
        let first = *position.first()?;
        match self.children.get(first)? {
            OutlineNode::Element(el) => Some(el),
            OutlineNode::Text(_) => None,
        }
    }

    pub fn text_content(&self) -> String {
        let mut out = String::new();
        for child in &self.children {
            match child {
                OutlineNode::Text(text) => out.push_str(text),
                OutlineNode::Element(el) => out.push_str(&el.text_content()),
            }
        }
        out
    }
}

impl From<OutlineElement> for OutlineNode {
    fn from(el: OutlineElement) -> Self {
        OutlineNode::Element(el)
    }
}

impl From<&str> for OutlineNode {
    fn from(text: &str) -> Self {
        OutlineNode::Text(text.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> OutlineElement {
        OutlineElement::new("outline")
            .with_child(
                OutlineElement::new("paragraph")
                    .with_child("Visit ")
                    .with_child(OutlineElement::new("place").with_attribute("name", "a")),
            )
            .with_child("loose text")
            .with_child(
                OutlineElement::new("bullet_list")
                    .with_child(OutlineElement::new("place").with_attribute("name", "b")),
            )
    }

    #[test]
    fn query_all_is_in_document_order() {
        let outline = sample();
        let names: Vec<_> = outline
            .query_all("place")
            .into_iter()
            .filter_map(|el| el.attribute("name"))
            .collect();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn subtree_is_the_top_level_ancestor() {
        let outline = sample();
        assert_eq!(outline.subtree(&[0, 1]).map(|el| el.name.as_str()), Some("paragraph"));
        assert_eq!(outline.subtree(&[2]).map(|el| el.name.as_str()), Some("bullet_list"));
        assert_eq!(outline.subtree(&[1]), None);
        assert_eq!(outline.subtree(&[]), None);
        assert_eq!(outline.subtree(&[9]), None);
    }

    #[test]
    fn text_content_concatenates() {
        assert_eq!(sample().text_content(), "Visit loose text");
    }
}
