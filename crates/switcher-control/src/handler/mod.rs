//! Handler module - routes interaction events to the control's protocols
//!
//! Organized into submodules:
//! - `click`: option selection, toggle and outside-click dismissal
//! - `keys`: keyboard navigation inside the open dropdown

pub(crate) mod click;
pub(crate) mod keys;

use switcher_core::prelude::*;
use switcher_dom::{DomEvent, EventKind};

use crate::control::StyleSwitcherControl;

/// What the control did in response to an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Event was not meant for this control, or the control is detached
    Ignored,
    /// Toggle clicked and the dropdown opened
    Opened,
    /// `on_open` returned true; the dropdown stays closed
    OpenVetoed,
    /// A new style was applied
    Selected { index: usize },
    /// The clicked option was already active
    AlreadyActive,
    /// `on_select` returned true; nothing was applied
    SelectVetoed,
    /// The host map refused the style change
    SelectFailed,
    /// Arrow key moved focus between options
    FocusMoved,
    /// Escape closed the dropdown
    Closed,
    /// A click outside the control closed the dropdown
    Dismissed,
}

/// Where a click landed relative to the control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ClickTarget {
    Option(usize),
    Toggle,
    Inside,
    Outside,
}

impl StyleSwitcherControl {
    /// Dispatch a click or key press from the host page.
    ///
    /// The host forwards every document event here; the control decides
    /// whether it concerns the toggle, an option, the open dropdown or the
    /// document-level dismiss subscription.
    pub fn handle_event(&mut self, event: &mut DomEvent) -> EventOutcome {
        if self.attachment.is_none() {
            trace!("Ignoring {:?} while detached", event.kind());
            return EventOutcome::Ignored;
        }

        match event.kind() {
            EventKind::Click => match self.classify_click(event) {
                Some(ClickTarget::Option(index)) => self.select_option(index, event),
                Some(ClickTarget::Toggle) => self.toggle_dropdown(event),
                Some(ClickTarget::Outside) => self.dismiss(),
                Some(ClickTarget::Inside) | None => EventOutcome::Ignored,
            },
            EventKind::KeyDown => self.handle_dropdown_key(event),
        }
    }

    fn classify_click(&self, event: &DomEvent) -> Option<ClickTarget> {
        let attachment = self.attachment.as_ref()?;
        let doc = attachment.document.borrow();
        let target = event.target();

        let kind = if let Some(index) = attachment.option_index_of(&doc, target) {
            ClickTarget::Option(index)
        } else if doc.contains(attachment.toggle, target) {
            ClickTarget::Toggle
        } else if doc.contains(attachment.container, target) {
            ClickTarget::Inside
        } else {
            ClickTarget::Outside
        };
        Some(kind)
    }
}

#[cfg(test)]
mod tests;
