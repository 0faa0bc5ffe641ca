//! Click handlers: option selection, toggle, outside-click dismissal

use switcher_core::prelude::*;
use switcher_dom::DomEvent;

use super::EventOutcome;
use crate::control::StyleSwitcherControl;

impl StyleSwitcherControl {
    /// Selection protocol for a click on the option at `index`
    pub(crate) fn select_option(&mut self, index: usize, event: &DomEvent) -> EventOutcome {
        self.close_dropdown();

        if self.current_style == Some(index) {
            return EventOutcome::AlreadyActive;
        }

        if self.listeners.select_vetoed(event) {
            debug!("on_select vetoed style #{}", index);
            return EventOutcome::SelectVetoed;
        }

        if let Err(e) = self.apply_style(index) {
            if e.is_recoverable() {
                warn!("Failed to switch map style: {}", e);
            } else {
                error!("Failed to switch map style: {}", e);
            }
            return EventOutcome::SelectFailed;
        }

        if let Some(style) = self.styles.get(index) {
            info!("Map style changed to '{}'", style.title());
            self.listeners.notify_change(event, style.uri());
        }
        EventOutcome::Selected { index }
    }

    /// Toggle protocol for a click on the toggle button
    pub(crate) fn toggle_dropdown(&mut self, event: &DomEvent) -> EventOutcome {
        if self.listeners.open_vetoed(event) {
            debug!("on_open vetoed opening the style list");
            return EventOutcome::OpenVetoed;
        }

        let current = self.current_style;
        let Some(attachment) = self.attachment.as_mut() else {
            return EventOutcome::Ignored;
        };

        if let Err(e) = attachment.set_open(true) {
            error!("Failed to open style list: {}", e);
            return EventOutcome::Ignored;
        }

        let target = current
            .and_then(|i| attachment.options.get(i).copied().flatten())
            .or_else(|| attachment.rendered_options().first().copied());
        if let Some(node) = target {
            if let Err(e) = attachment.focus(node) {
                warn!("Failed to focus style option: {}", e);
            }
        }
        EventOutcome::Opened
    }

    /// Document-level click outside the container
    pub(crate) fn dismiss(&mut self) -> EventOutcome {
        let subscribed = self
            .attachment
            .as_ref()
            .is_some_and(|attachment| attachment.dismiss.is_registered());
        if !subscribed {
            debug!("Outside click without a document subscription");
            return EventOutcome::Ignored;
        }
        if !self.is_open() {
            return EventOutcome::Ignored;
        }
        self.close_dropdown();
        EventOutcome::Dismissed
    }

    /// Hide the dropdown and show the toggle again
    pub(crate) fn close_dropdown(&mut self) {
        if let Some(attachment) = self.attachment.as_mut() {
            if let Err(e) = attachment.set_open(false) {
                error!("Failed to close style list: {}", e);
            }
        }
    }
}
