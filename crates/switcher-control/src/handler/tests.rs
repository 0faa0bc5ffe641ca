//! Tests for event handling

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use switcher_core::prelude::*;
use switcher_core::{StyleDefinition, StyleSet};
use switcher_dom::{Document, DocumentHandle, DomEvent, Key, NodeId};

use super::EventOutcome;
use crate::attachment::ACTIVE_CLASS;
use crate::control::StyleSwitcherControl;
use crate::host::HostMap;
use crate::options::{ControlOptions, EventListeners, SwitcherOptions};

// ─────────────────────────────────────────────────────────
// Test Helpers
// ─────────────────────────────────────────────────────────

#[derive(Debug, Default)]
struct RecordingMap {
    calls: RefCell<Vec<String>>,
    fail: Cell<bool>,
}

impl HostMap for RecordingMap {
    fn set_style(&self, uri: &str) -> Result<()> {
        if self.fail.get() {
            return Err(Error::host_map("style server unreachable"));
        }
        self.calls.borrow_mut().push(uri.to_string());
        Ok(())
    }
}

struct Harness {
    doc: DocumentHandle,
    map: Rc<RecordingMap>,
    control: StyleSwitcherControl,
}

impl Harness {
    fn new(options: Option<SwitcherOptions>) -> Self {
        Self::with_styles(None, options)
    }

    fn with_styles(styles: Option<StyleSet>, options: Option<SwitcherOptions>) -> Self {
        let doc = Document::new_handle();
        let map = Rc::new(RecordingMap::default());
        let mut control = StyleSwitcherControl::new(styles, options);

        let host: Rc<dyn HostMap> = map.clone();
        let container = control.on_add(&doc, Some(host)).unwrap();
        let body = doc.borrow().body();
        doc.borrow_mut().append_child(body, container).unwrap();

        Self { doc, map, control }
    }

    fn option(&self, index: usize) -> NodeId {
        self.control.option_node(index).unwrap()
    }

    fn toggle(&self) -> NodeId {
        self.control.toggle_button().unwrap()
    }

    fn click(&mut self, target: NodeId) -> EventOutcome {
        self.control.handle_event(&mut DomEvent::click(target))
    }

    fn press(&mut self, target: NodeId, key: Key) -> EventOutcome {
        self.control.handle_event(&mut DomEvent::key_down(target, key))
    }

    fn focused(&self) -> Option<NodeId> {
        self.doc.borrow().focused()
    }

    fn active_indices(&self) -> Vec<usize> {
        let doc = self.doc.borrow();
        (0..self.control.styles().len())
            .filter(|i| {
                self.control
                    .option_node(*i)
                    .and_then(|n| doc.get(n))
                    .is_some_and(|el| el.has_class(ACTIVE_CLASS))
            })
            .collect()
    }

    fn dropdown_visible(&self) -> bool {
        let dropdown = self.control.dropdown().unwrap();
        self.doc.borrow().get(dropdown).unwrap().is_displayed()
    }

    fn toggle_attribute(&self, name: &str) -> Option<String> {
        self.doc
            .borrow()
            .get(self.toggle())
            .unwrap()
            .attribute(name)
            .map(str::to_string)
    }

    fn outside_node(&self) -> NodeId {
        let mut doc = self.doc.borrow_mut();
        let body = doc.body();
        let node = doc.create_element("div");
        doc.append_child(body, node).unwrap();
        node
    }
}

fn counting_listeners(
    open_veto: bool,
    select_veto: bool,
) -> (EventListeners, Rc<Cell<usize>>, Rc<RefCell<Vec<String>>>) {
    let select_calls = Rc::new(Cell::new(0));
    let changes = Rc::new(RefCell::new(Vec::new()));

    let select_counter = select_calls.clone();
    let change_sink = changes.clone();
    let listeners = EventListeners::new()
        .on_open(move |_| open_veto)
        .on_select(move |_| {
            select_counter.set(select_counter.get() + 1);
            select_veto
        })
        .on_change(move |_, uri| change_sink.borrow_mut().push(uri.to_string()));

    (listeners, select_calls, changes)
}

// ─────────────────────────────────────────────────────────
// Selection
// ─────────────────────────────────────────────────────────

#[test]
fn test_click_inactive_option_switches_style() {
    let (listeners, _, changes) = counting_listeners(false, false);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));

    let outcome = h.click(h.option(0));

    assert_eq!(outcome, EventOutcome::Selected { index: 0 });
    assert_eq!(
        *h.map.calls.borrow(),
        vec!["mapbox://styles/mapbox/dark-v10".to_string()]
    );
    assert_eq!(h.active_indices(), vec![0]);
    assert_eq!(
        *changes.borrow(),
        vec!["mapbox://styles/mapbox/dark-v10".to_string()]
    );
    assert_eq!(h.control.current_style().unwrap().title(), "Dark");
}

#[test]
fn test_click_active_option_does_nothing() {
    let (listeners, select_calls, changes) = counting_listeners(false, false);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));

    let outcome = h.click(h.option(4));

    assert_eq!(outcome, EventOutcome::AlreadyActive);
    assert!(h.map.calls.borrow().is_empty());
    assert_eq!(select_calls.get(), 0);
    assert!(changes.borrow().is_empty());
    assert_eq!(h.active_indices(), vec![4]);
}

#[test]
fn test_select_veto_blocks_change() {
    let (listeners, select_calls, changes) = counting_listeners(false, true);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));
    h.click(h.toggle());

    let outcome = h.click(h.option(1));

    assert_eq!(outcome, EventOutcome::SelectVetoed);
    assert_eq!(select_calls.get(), 1);
    assert!(h.map.calls.borrow().is_empty());
    assert!(changes.borrow().is_empty());
    assert_eq!(h.active_indices(), vec![4]);
    assert!(!h.dropdown_visible());
}

#[test]
fn test_selection_closes_dropdown() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    assert!(h.dropdown_visible());

    h.click(h.option(2));

    assert!(!h.dropdown_visible());
    assert!(!h.control.is_open());
    assert_eq!(h.toggle_attribute("aria-expanded").as_deref(), Some("false"));
}

#[test]
fn test_host_failure_keeps_ui_usable() {
    let (listeners, _, changes) = counting_listeners(false, false);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));
    h.map.fail.set(true);

    assert_eq!(h.click(h.option(1)), EventOutcome::SelectFailed);
    assert_eq!(h.active_indices(), vec![4]);
    assert!(changes.borrow().is_empty());

    h.map.fail.set(false);
    assert_eq!(h.click(h.option(1)), EventOutcome::Selected { index: 1 });
    assert_eq!(h.active_indices(), vec![1]);
    assert_eq!(changes.borrow().len(), 1);
}

#[test]
fn test_set_style_does_not_fire_listeners() {
    let (listeners, select_calls, changes) = counting_listeners(false, false);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));

    h.control.set_style("Satellite").unwrap();

    assert_eq!(select_calls.get(), 0);
    assert!(changes.borrow().is_empty());
    assert_eq!(h.active_indices(), vec![3]);
    assert_eq!(
        *h.map.calls.borrow(),
        vec!["mapbox://styles/mapbox/satellite-streets-v11".to_string()]
    );
}

#[test]
fn test_click_after_set_style_uses_tracked_state() {
    let mut h = Harness::new(None);
    h.control.set_style("Dark").unwrap();

    assert_eq!(h.click(h.option(0)), EventOutcome::AlreadyActive);
    assert_eq!(h.click(h.option(4)), EventOutcome::Selected { index: 4 });
    assert_eq!(h.map.calls.borrow().len(), 2);
}

// ─────────────────────────────────────────────────────────
// Toggle
// ─────────────────────────────────────────────────────────

#[test]
fn test_toggle_opens_and_focuses_active_option() {
    let mut h = Harness::new(Some("Light".into()));

    assert_eq!(h.click(h.toggle()), EventOutcome::Opened);

    assert!(h.dropdown_visible());
    assert!(h.control.is_open());
    assert_eq!(h.toggle_attribute("aria-expanded").as_deref(), Some("true"));
    let doc = h.doc.borrow();
    assert!(!doc.get(h.toggle()).unwrap().is_displayed());
    drop(doc);
    assert_eq!(h.focused(), Some(h.option(1)));
}

#[test]
fn test_toggle_focuses_first_option_without_active() {
    let mut h = Harness::new(Some("Moon".into()));
    h.click(h.toggle());
    assert_eq!(h.focused(), Some(h.option(0)));
}

#[test]
fn test_open_veto_keeps_dropdown_hidden() {
    let (listeners, _, _) = counting_listeners(true, false);
    let mut h = Harness::new(Some(
        ControlOptions::new().event_listeners(listeners).into(),
    ));

    assert_eq!(h.click(h.toggle()), EventOutcome::OpenVetoed);
    assert!(!h.dropdown_visible());
    assert_eq!(h.toggle_attribute("aria-expanded").as_deref(), Some("false"));
}

// ─────────────────────────────────────────────────────────
// Dismissal
// ─────────────────────────────────────────────────────────

#[test]
fn test_outside_click_dismisses() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let outside = h.outside_node();

    assert_eq!(h.click(outside), EventOutcome::Dismissed);
    assert!(!h.dropdown_visible());
    assert!(h.map.calls.borrow().is_empty());
}

#[test]
fn test_outside_click_needs_document_subscription() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let listener = h.control.attachment.as_ref().unwrap().dismiss.id();
    assert!(h.doc.borrow_mut().remove_listener(listener));
    let outside = h.outside_node();

    assert_eq!(h.click(outside), EventOutcome::Ignored);
    assert!(h.dropdown_visible());
}

#[test]
fn test_outside_click_while_closed_is_ignored() {
    let mut h = Harness::new(None);
    let outside = h.outside_node();
    assert_eq!(h.click(outside), EventOutcome::Ignored);
}

#[test]
fn test_click_inside_container_does_not_dismiss() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let dropdown = h.control.dropdown().unwrap();

    assert_eq!(h.click(dropdown), EventOutcome::Ignored);
    assert!(h.dropdown_visible());
}

// ─────────────────────────────────────────────────────────
// Keyboard
// ─────────────────────────────────────────────────────────

#[test]
fn test_escape_closes_and_focuses_toggle() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let focused = h.focused().unwrap();

    assert_eq!(h.press(focused, Key::Escape), EventOutcome::Closed);

    assert!(!h.dropdown_visible());
    assert_eq!(h.focused(), Some(h.toggle()));
    assert_eq!(h.toggle_attribute("aria-expanded").as_deref(), Some("false"));
    let doc = h.doc.borrow();
    assert!(doc.get(h.toggle()).unwrap().is_displayed());
}

#[test]
fn test_arrow_keys_cycle_with_wrap_around() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    assert_eq!(h.focused(), Some(h.option(4)));

    let mut event = DomEvent::key_down(h.option(4), Key::ArrowDown);
    assert_eq!(h.control.handle_event(&mut event), EventOutcome::FocusMoved);
    assert!(event.is_default_prevented());
    assert_eq!(h.focused(), Some(h.option(0)));

    h.press(h.option(0), Key::ArrowUp);
    assert_eq!(h.focused(), Some(h.option(4)));

    h.press(h.option(4), Key::ArrowUp);
    assert_eq!(h.focused(), Some(h.option(3)));
}

#[test]
fn test_arrow_keys_skip_unrendered_options() {
    let styles = StyleSet::new(vec![
        StyleDefinition::new("Dark", "uri:dark"),
        StyleDefinition::new("", "uri:blank"),
        StyleDefinition::new("Light", "uri:light"),
    ]);
    let mut h = Harness::with_styles(Some(styles), Some("Dark".into()));
    h.click(h.toggle());

    h.press(h.option(0), Key::ArrowDown);
    assert_eq!(h.focused(), Some(h.option(2)));
    h.press(h.option(2), Key::ArrowDown);
    assert_eq!(h.focused(), Some(h.option(0)));
}

#[test]
fn test_keys_after_selection_are_ignored() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    h.press(h.option(4), Key::ArrowDown);
    let focused = h.focused().unwrap();

    assert_eq!(h.click(focused), EventOutcome::Selected { index: 0 });
    assert_eq!(h.focused(), None);

    let mut arrow = DomEvent::key_down(focused, Key::ArrowDown);
    assert_eq!(h.control.handle_event(&mut arrow), EventOutcome::Ignored);
    assert!(!arrow.is_default_prevented());
    assert_eq!(h.focused(), None);

    assert_eq!(h.press(focused, Key::Escape), EventOutcome::Ignored);
    assert!(!h.dropdown_visible());
}

#[test]
fn test_keys_after_dismiss_are_ignored() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let focused = h.focused().unwrap();
    let outside = h.outside_node();

    assert_eq!(h.click(outside), EventOutcome::Dismissed);
    assert_eq!(h.focused(), None);

    let mut arrow = DomEvent::key_down(focused, Key::ArrowUp);
    assert_eq!(h.control.handle_event(&mut arrow), EventOutcome::Ignored);
    assert!(!arrow.is_default_prevented());
}

#[test]
fn test_keys_outside_dropdown_are_ignored() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let outside = h.outside_node();

    assert_eq!(h.press(outside, Key::Escape), EventOutcome::Ignored);
    assert!(h.dropdown_visible());
}

#[test]
fn test_other_keys_are_ignored() {
    let mut h = Harness::new(None);
    h.click(h.toggle());
    let mut event = DomEvent::key_down(h.option(4), Key::Enter);
    assert_eq!(h.control.handle_event(&mut event), EventOutcome::Ignored);
    assert!(!event.is_default_prevented());
}

// ─────────────────────────────────────────────────────────
// Lifecycle interaction
// ─────────────────────────────────────────────────────────

#[test]
fn test_events_after_remove_are_ignored() {
    let mut h = Harness::new(None);
    let option = h.option(0);
    h.control.on_remove();

    assert_eq!(h.click(option), EventOutcome::Ignored);
    assert!(h.map.calls.borrow().is_empty());
}

#[test]
fn test_two_controls_share_a_document() {
    let doc = Document::new_handle();
    let mut first = StyleSwitcherControl::default();
    let mut second = StyleSwitcherControl::default();
    let map: Rc<dyn HostMap> = Rc::new(RecordingMap::default());

    first.on_add(&doc, Some(map.clone())).unwrap();
    second.on_add(&doc, Some(map)).unwrap();
    assert_eq!(doc.borrow().listener_count(), 2);

    first.on_remove();
    assert_eq!(doc.borrow().listener_count(), 1);
    second.on_remove();
    assert_eq!(doc.borrow().listener_count(), 0);
}
