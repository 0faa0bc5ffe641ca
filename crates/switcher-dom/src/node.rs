//! # Element Nodes
//!
//! An [`Element`] carries the parts of a DOM element the switcher touches:
//! tag name, class list, attributes, inline style properties, text content
//! and parent/child links. Nodes live in a [`crate::Document`] arena and are
//! addressed by [`NodeId`].

use std::fmt;

use switcher_core::prelude::*;

/// Handle to an element inside a [`crate::Document`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A single element in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: String,
    classes: Vec<String>,
    attributes: Vec<(String, String)>,
    style: Vec<(String, String)>,
    text: String,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            classes: Vec::new(),
            attributes: Vec::new(),
            style: Vec::new(),
            text: String::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    // ─────────────────────────────────────────────────────────────
    // Class list
    // ─────────────────────────────────────────────────────────────

    /// Add a class token.
    ///
    /// Follows `DOMTokenList.add`: empty tokens and tokens containing ASCII
    /// whitespace are rejected. Adding a present token is a no-op.
    pub fn add_class(&mut self, token: &str) -> Result<()> {
        validate_token(token)?;
        if !self.has_class(token) {
            self.classes.push(token.to_string());
        }
        Ok(())
    }

    /// Remove a class token; returns whether it was present
    pub fn remove_class(&mut self, token: &str) -> bool {
        let before = self.classes.len();
        self.classes.retain(|c| c != token);
        before != self.classes.len()
    }

    pub fn has_class(&self, token: &str) -> bool {
        self.classes.iter().any(|c| c == token)
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Space-joined class list, as `Element.className` reports it
    pub fn class_name(&self) -> String {
        self.classes.join(" ")
    }

    // ─────────────────────────────────────────────────────────────
    // Attributes
    // ─────────────────────────────────────────────────────────────

    /// Set an attribute, replacing any existing value in place
    pub fn set_attribute(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.attributes.iter_mut().find(|(n, _)| n == name) {
            Some((_, existing)) => *existing = value,
            None => self.attributes.push((name.to_string(), value)),
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Attributes in insertion order
    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    // ─────────────────────────────────────────────────────────────
    // Inline style
    // ─────────────────────────────────────────────────────────────

    pub fn set_style_property(&mut self, property: &str, value: impl Into<String>) {
        let value = value.into();
        match self.style.iter_mut().find(|(p, _)| p == property) {
            Some((_, existing)) => *existing = value,
            None => self.style.push((property.to_string(), value)),
        }
    }

    pub fn style_property(&self, property: &str) -> Option<&str> {
        self.style
            .iter()
            .find(|(p, _)| p == property)
            .map(|(_, v)| v.as_str())
    }

    /// Serialised inline style, e.g. `display: none;`
    pub fn style_text(&self) -> String {
        self.style
            .iter()
            .map(|(p, v)| format!("{}: {};", p, v))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// False only when inline `display` is `none`
    pub fn is_displayed(&self) -> bool {
        self.style_property("display") != Some("none")
    }

    // ─────────────────────────────────────────────────────────────
    // Text and tree links
    // ─────────────────────────────────────────────────────────────

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }
}

fn validate_token(token: &str) -> Result<()> {
    if token.is_empty() || token.chars().any(|c| c.is_ascii_whitespace()) {
        return Err(Error::invalid_token(token));
    }
    Ok(())
}
