//! # Style Domain Types
//!
//! A [`StyleDefinition`] pairs a human-readable title with the opaque URI the
//! host map understands. A [`StyleSet`] is the ordered list of definitions the
//! switcher offers; when none is supplied the five built-in Mapbox styles are
//! used.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title used as the default style when none is configured
pub const FALLBACK_DEFAULT_STYLE: &str = "Streets";

/// Built-in styles as `(title, uri)` pairs, in display order
pub const BUILTIN_STYLES: &[(&str, &str)] = &[
    ("Dark", "mapbox://styles/mapbox/dark-v10"),
    ("Light", "mapbox://styles/mapbox/light-v10"),
    ("Outdoors", "mapbox://styles/mapbox/outdoors-v11"),
    ("Satellite", "mapbox://styles/mapbox/satellite-streets-v11"),
    ("Streets", "mapbox://styles/mapbox/streets-v11"),
];

// ============================================================================
// StyleDefinition
// ============================================================================

/// A named, addressable visual theme the host map can render.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StyleDefinition {
    title: String,
    uri: String,
}

impl StyleDefinition {
    pub fn new(title: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            uri: uri.into(),
        }
    }

    /// Visible title, also used to derive the option's class name
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Opaque identifier handed to the host map
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// Class name derived from the title, safe for use as a CSS class
    pub fn css_class(&self) -> String {
        css_safe_class(&self.title)
    }
}

impl fmt::Display for StyleDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.uri)
    }
}

// ============================================================================
// StyleSet
// ============================================================================

/// Ordered sequence of style definitions.
///
/// Duplicate titles are accepted; lookups return the first match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyleSet {
    styles: Vec<StyleDefinition>,
}

impl StyleSet {
    pub fn new(styles: Vec<StyleDefinition>) -> Self {
        Self { styles }
    }

    /// The five built-in styles: Dark, Light, Outdoors, Satellite, Streets
    pub fn builtin() -> Self {
        Self::new(
            BUILTIN_STYLES
                .iter()
                .map(|(title, uri)| StyleDefinition::new(*title, *uri))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&StyleDefinition> {
        self.styles.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, StyleDefinition> {
        self.styles.iter()
    }

    /// Index of the first style with the given title
    pub fn position_of(&self, title: &str) -> Option<usize> {
        self.styles.iter().position(|s| s.title == title)
    }

    /// First style with the given title
    pub fn find(&self, title: &str) -> Option<&StyleDefinition> {
        self.position_of(title).and_then(|i| self.styles.get(i))
    }
}

impl Default for StyleSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl From<Vec<StyleDefinition>> for StyleSet {
    fn from(styles: Vec<StyleDefinition>) -> Self {
        Self::new(styles)
    }
}

impl FromIterator<StyleDefinition> for StyleSet {
    fn from_iter<I: IntoIterator<Item = StyleDefinition>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StyleSet {
    type Item = &'a StyleDefinition;
    type IntoIter = std::slice::Iter<'a, StyleDefinition>;

    fn into_iter(self) -> Self::IntoIter {
        self.styles.iter()
    }
}

// ============================================================================
// Class name sanitising
// ============================================================================

/// Matches any character that may not appear in a generated class name
static UNSAFE_CLASS_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9-]").expect("Class-name regex pattern is valid"));

/// Replace every character outside `[A-Za-z0-9-]` with `_`.
///
/// Each non-matching `char` becomes exactly one underscore, so multi-byte
/// characters do not expand.
pub fn css_safe_class(title: &str) -> String {
    UNSAFE_CLASS_CHARS.replace_all(title, "_").into_owned()
}
