//! Attached-state of the control: the built element subtree, the host map
//! reference and the document-level click subscription.

use std::fmt;
use std::rc::Rc;

use switcher_core::prelude::*;
use switcher_core::{StyleDefinition, StyleSet};
use switcher_dom::{Document, DocumentHandle, EventKind, ListenerGuard, NodeId};

use crate::host::HostMap;

// ─────────────────────────────────────────────────────────────────
// Markup constants
// ─────────────────────────────────────────────────────────────────

pub const CONTROL_CLASS: &str = "mapboxgl-ctrl";
pub const CONTROL_GROUP_CLASS: &str = "mapboxgl-ctrl-group";
pub const STYLE_LIST_CLASS: &str = "mapboxgl-style-list";
pub const TOGGLE_ICON_CLASS: &str = "mapboxgl-ctrl-icon";
pub const TOGGLE_CLASS: &str = "mapboxgl-style-switcher";
pub const ACTIVE_CLASS: &str = "active";
pub const TOGGLE_LABEL: &str = "Switch map style";

/// Attribute holding the JSON-encoded style URI on each option
pub const URI_ATTRIBUTE: &str = "data-uri";

pub(crate) struct Attachment {
    pub(crate) document: DocumentHandle,
    pub(crate) map: Rc<dyn HostMap>,
    pub(crate) container: NodeId,
    pub(crate) dropdown: NodeId,
    pub(crate) toggle: NodeId,
    /// Option node per style index; `None` where the build failed
    pub(crate) options: Vec<Option<NodeId>>,
    pub(crate) open: bool,
    pub(crate) dismiss: ListenerGuard,
}

impl fmt::Debug for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attachment")
            .field("container", &self.container)
            .field("dropdown", &self.dropdown)
            .field("toggle", &self.toggle)
            .field("options", &self.options)
            .field("open", &self.open)
            .field("dismiss", &self.dismiss.id())
            .finish_non_exhaustive()
    }
}

impl Attachment {
    /// Build the control subtree and subscribe to document clicks.
    ///
    /// The returned container is detached; the host places it.
    pub(crate) fn build(
        document: &DocumentHandle,
        map: Rc<dyn HostMap>,
        styles: &StyleSet,
    ) -> Result<Self> {
        let (container, dropdown, toggle, options) = {
            let mut doc = document.borrow_mut();

            let container = doc.create_element("div");
            let el = doc.element_mut(container)?;
            el.add_class(CONTROL_CLASS)?;
            el.add_class(CONTROL_GROUP_CLASS)?;

            let dropdown = doc.create_element("div");
            let el = doc.element_mut(dropdown)?;
            el.add_class(STYLE_LIST_CLASS)?;
            el.set_attribute("role", "menu");
            el.set_style_property("display", "none");

            let toggle = doc.create_element("button");
            let el = doc.element_mut(toggle)?;
            el.add_class(TOGGLE_ICON_CLASS)?;
            el.add_class(TOGGLE_CLASS)?;
            el.set_attribute("type", "button");
            el.set_attribute("aria-label", TOGGLE_LABEL);
            el.set_attribute("aria-haspopup", "true");
            el.set_attribute("aria-expanded", "false");
            el.set_style_property("display", "block");

            let options = styles
                .iter()
                .map(|style| match build_option(&mut doc, dropdown, style) {
                    Ok(node) => Some(node),
                    Err(e) => {
                        error!("{}", e);
                        None
                    }
                })
                .collect::<Vec<_>>();

            doc.append_child(container, toggle)?;
            doc.append_child(container, dropdown)?;

            (container, dropdown, toggle, options)
        };

        let dismiss = ListenerGuard::register(document, EventKind::Click);

        Ok(Self {
            document: document.clone(),
            map,
            container,
            dropdown,
            toggle,
            options,
            open: false,
            dismiss,
        })
    }

    /// Option nodes that rendered, in style order
    pub(crate) fn rendered_options(&self) -> Vec<NodeId> {
        self.options.iter().flatten().copied().collect()
    }

    /// Style index of the option containing `node`
    pub(crate) fn option_index_of(&self, doc: &Document, node: NodeId) -> Option<usize> {
        self.options
            .iter()
            .position(|option| option.is_some_and(|id| doc.contains(id, node)))
    }

    /// Put `active` on the option for `current` and nowhere else
    pub(crate) fn sync_active_marker(&self, current: Option<usize>) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        for (index, option) in self.options.iter().enumerate() {
            let Some(node) = option else {
                continue;
            };
            let el = doc.element_mut(*node)?;
            if current == Some(index) {
                el.add_class(ACTIVE_CLASS)?;
            } else {
                el.remove_class(ACTIVE_CLASS);
            }
        }
        Ok(())
    }

    /// Show or hide the dropdown, toggling the button the opposite way.
    ///
    /// Closing drops focus held by any option.
    pub(crate) fn set_open(&mut self, open: bool) -> Result<()> {
        let mut doc = self.document.borrow_mut();
        let (list_display, toggle_display) = if open {
            ("block", "none")
        } else {
            ("none", "block")
        };

        doc.element_mut(self.dropdown)?
            .set_style_property("display", list_display);
        let toggle = doc.element_mut(self.toggle)?;
        toggle.set_style_property("display", toggle_display);
        toggle.set_attribute("aria-expanded", if open { "true" } else { "false" });

        // A hidden option cannot keep focus
        if !open && doc.focused().is_some_and(|node| doc.contains(self.dropdown, node)) {
            doc.blur();
        }

        self.open = open;
        Ok(())
    }

    pub(crate) fn focus(&self, node: NodeId) -> Result<()> {
        self.document.borrow_mut().focus(node)
    }
}

/// Build one option button and append it to the dropdown.
///
/// Nothing is appended when any step fails.
fn build_option(doc: &mut Document, dropdown: NodeId, style: &StyleDefinition) -> Result<NodeId> {
    let encoded_uri = serde_json::to_string(style.uri())
        .map_err(|e| Error::option_build(style.title(), e.to_string()))?;

    let node = doc.create_element("button");
    let el = doc.element_mut(node)?;
    el.add_class(&style.css_class())
        .map_err(|e| Error::option_build(style.title(), e.to_string()))?;
    el.set_attribute("type", "button");
    el.set_attribute("role", "menuitem");
    el.set_attribute("tabindex", "-1");
    el.set_attribute(URI_ATTRIBUTE, encoded_uri);
    el.set_text(style.title());

    doc.append_child(dropdown, node)?;
    Ok(node)
}
