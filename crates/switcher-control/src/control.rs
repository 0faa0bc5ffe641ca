//! The style switcher control: construction, lifecycle and programmatic API.
//!
//! Event handling lives in [`crate::handler`].

use std::fmt;
use std::rc::Rc;

use switcher_core::prelude::*;
use switcher_core::{StyleDefinition, StyleSet, FALLBACK_DEFAULT_STYLE};
use switcher_dom::{DocumentHandle, NodeId};

use crate::attachment::Attachment;
use crate::config::SwitcherConfig;
use crate::host::HostMap;
use crate::options::{ControlOptions, EventListeners, SwitcherOptions};

/// Placement hint for the host's control layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ControlPosition {
    TopLeft,
    #[default]
    TopRight,
    BottomLeft,
    BottomRight,
}

impl ControlPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlPosition::TopLeft => "top-left",
            ControlPosition::TopRight => "top-right",
            ControlPosition::BottomLeft => "bottom-left",
            ControlPosition::BottomRight => "bottom-right",
        }
    }
}

impl fmt::Display for ControlPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Dropdown control that switches the host map between named styles.
///
/// Lifecycle: construct, [`on_add`](Self::on_add) to build the markup and
/// bind the host map, route events through
/// [`handle_event`](Self::handle_event), then [`on_remove`](Self::on_remove).
#[derive(Debug)]
pub struct StyleSwitcherControl {
    pub(crate) styles: StyleSet,
    default_style: String,
    default_index: Option<usize>,
    pub(crate) listeners: EventListeners,
    /// Index of the active style; the rendered `active` class follows it
    pub(crate) current_style: Option<usize>,
    pub(crate) attachment: Option<Attachment>,
}

impl Default for StyleSwitcherControl {
    fn default() -> Self {
        Self::new(None, None)
    }
}

impl StyleSwitcherControl {
    /// Create a control offering `styles` (the built-ins when `None`).
    ///
    /// A default style missing from the set is logged as a warning; no option
    /// starts active in that case.
    pub fn new(styles: Option<StyleSet>, options: Option<SwitcherOptions>) -> Self {
        let styles = styles.unwrap_or_default();
        let (configured, listeners) = options.map(SwitcherOptions::resolve).unwrap_or_default();
        let default_style = configured.unwrap_or_else(|| FALLBACK_DEFAULT_STYLE.to_string());

        let default_index = styles.position_of(&default_style);
        if default_index.is_none() {
            warn!(
                "Default style '{}' is not one of the {} configured styles; no option will start active",
                default_style,
                styles.len()
            );
        }

        Self {
            styles,
            default_style,
            default_index,
            listeners,
            current_style: None,
            attachment: None,
        }
    }

    /// Create a control from a loaded configuration file
    pub fn from_config(config: SwitcherConfig, listeners: EventListeners) -> Self {
        let styles = config.style_set();
        let options = ControlOptions {
            default_style: config.default_style,
            event_listeners: listeners,
        };
        Self::new(styles, Some(options.into()))
    }

    // ─────────────────────────────────────────────────────────────
    // Lifecycle
    // ─────────────────────────────────────────────────────────────

    /// Build the control inside `document` and bind it to `map`.
    ///
    /// Returns the detached container node for the host to place. Fails
    /// without a host map or when already attached.
    pub fn on_add(
        &mut self,
        document: &DocumentHandle,
        map: Option<Rc<dyn HostMap>>,
    ) -> Result<NodeId> {
        let map = map.ok_or(Error::HostMapMissing)?;
        if self.attachment.is_some() {
            return Err(Error::AlreadyAttached);
        }

        let attachment = Attachment::build(document, map, &self.styles)?;
        let container = attachment.container;

        // The default only counts when its option actually rendered
        self.current_style = self
            .default_index
            .filter(|i| attachment.options.get(*i).is_some_and(Option::is_some));
        attachment.sync_active_marker(self.current_style)?;
        self.attachment = Some(attachment);

        info!(
            "Style switcher attached with {} styles (active: {:?})",
            self.styles.len(),
            self.current_style().map(StyleDefinition::title)
        );
        Ok(container)
    }

    /// Remove the control from the page and release the host map.
    ///
    /// Safe to call when never attached and safe to repeat.
    pub fn on_remove(&mut self) {
        let Some(attachment) = self.attachment.take() else {
            debug!("Style switcher on_remove called while detached");
            return;
        };

        let Attachment {
            document,
            container,
            dismiss,
            ..
        } = attachment;

        drop(dismiss);
        if !document.borrow_mut().remove(container) {
            debug!("Style switcher container was not in the page");
        }
        self.current_style = None;
        info!("Style switcher detached");
    }

    pub fn is_attached(&self) -> bool {
        self.attachment.is_some()
    }

    // ─────────────────────────────────────────────────────────────
    // Programmatic API
    // ─────────────────────────────────────────────────────────────

    /// The active style, or `None` when detached or nothing is active
    pub fn current_style(&self) -> Option<&StyleDefinition> {
        self.attachment.as_ref()?;
        self.current_style.and_then(|i| self.styles.get(i))
    }

    /// Switch to the style titled `title`.
    ///
    /// Calls the host map and moves the active marker. Event listeners are
    /// not invoked.
    pub fn set_style(&mut self, title: &str) -> Result<()> {
        let result = self.try_set_style(title);
        match &result {
            Err(e) if e.is_fatal() => error!("Cannot set style '{}': {}", title, e),
            Err(e) => warn!("Failed to set style '{}': {}", title, e),
            Ok(()) => {}
        }
        result
    }

    fn try_set_style(&mut self, title: &str) -> Result<()> {
        if self.attachment.is_none() {
            return Err(Error::not_attached("set_style"));
        }
        let index = self
            .styles
            .position_of(title)
            .ok_or_else(|| Error::style_not_found(title))?;
        self.apply_style(index)
    }

    /// Ask the host map for the style at `index`, then mark it active
    pub(crate) fn apply_style(&mut self, index: usize) -> Result<()> {
        let attachment = self
            .attachment
            .as_ref()
            .ok_or_else(|| Error::not_attached("apply_style"))?;
        let style = self
            .styles
            .get(index)
            .ok_or_else(|| Error::style_not_found(format!("#{}", index)))?;

        attachment.map.set_style(style.uri())?;
        debug!("Host map switched to '{}'", style.title());

        self.current_style = Some(index);
        attachment.sync_active_marker(self.current_style)
    }

    /// All offered styles, in display order
    pub fn styles(&self) -> &StyleSet {
        &self.styles
    }

    /// Title marked active on attach (the configured default or `"Streets"`)
    pub fn default_style(&self) -> &str {
        &self.default_style
    }

    pub fn default_position(&self) -> ControlPosition {
        ControlPosition::TopRight
    }

    /// Whether the dropdown is currently open
    pub fn is_open(&self) -> bool {
        self.attachment.as_ref().is_some_and(|a| a.open)
    }

    /// Root node of the control while attached
    pub fn container(&self) -> Option<NodeId> {
        self.attachment.as_ref().map(|a| a.container)
    }

    /// Toggle button node while attached
    pub fn toggle_button(&self) -> Option<NodeId> {
        self.attachment.as_ref().map(|a| a.toggle)
    }

    /// Dropdown list node while attached
    pub fn dropdown(&self) -> Option<NodeId> {
        self.attachment.as_ref().map(|a| a.dropdown)
    }

    /// Option node for the style at `index`, if it rendered
    pub fn option_node(&self, index: usize) -> Option<NodeId> {
        self.attachment
            .as_ref()
            .and_then(|a| a.options.get(index).copied().flatten())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attachment::ACTIVE_CLASS;
    use crate::host::MockHostMap;
    use mockall::predicate::eq;
    use std::io;
    use std::sync::{Arc, Mutex};
    use switcher_dom::Document;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
        type Writer = CapturedLogs;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    impl CapturedLogs {
        fn contents(&self) -> String {
            String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
        }
    }

    fn host(mock: MockHostMap) -> Option<Rc<dyn HostMap>> {
        let map: Rc<dyn HostMap> = Rc::new(mock);
        Some(map)
    }

    fn active_indices(control: &StyleSwitcherControl, doc: &DocumentHandle) -> Vec<usize> {
        let doc = doc.borrow();
        (0..control.styles().len())
            .filter(|i| {
                control
                    .option_node(*i)
                    .and_then(|n| doc.get(n))
                    .is_some_and(|el| el.has_class(ACTIVE_CLASS))
            })
            .collect()
    }

    #[test]
    fn test_defaults() {
        let control = StyleSwitcherControl::default();
        assert_eq!(control.styles(), &StyleSet::builtin());
        assert_eq!(control.default_style(), "Streets");
        assert_eq!(control.default_position().to_string(), "top-right");
        assert!(!control.is_attached());
        assert!(control.current_style().is_none());
    }

    #[test]
    fn test_styles_returns_supplied_set_in_order() {
        let supplied = StyleSet::new(vec![
            StyleDefinition::new("Terrain", "uri:terrain"),
            StyleDefinition::new("Blueprint", "uri:blueprint"),
            StyleDefinition::new("Ink", "uri:ink"),
        ]);
        let mut control = StyleSwitcherControl::new(Some(supplied.clone()), Some("Ink".into()));
        assert_eq!(control.styles(), &supplied);

        let doc = Document::new_handle();
        control.on_add(&doc, host(MockHostMap::new())).unwrap();
        assert_eq!(control.styles(), &supplied);
        assert_eq!(active_indices(&control, &doc), vec![2]);
    }

    #[test]
    fn test_unknown_default_warns_without_failing() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        let control = tracing::subscriber::with_default(subscriber, || {
            StyleSwitcherControl::new(None, Some("Moon".into()))
        });

        let output = logs.contents();
        assert!(output.contains("WARN"));
        assert!(output.contains("'Moon'"));
        assert_eq!(control.default_style(), "Moon");
    }

    #[test]
    fn test_attach_requires_host_map() {
        let doc = Document::new_handle();
        let mut control = StyleSwitcherControl::default();
        let err = control.on_add(&doc, None).unwrap_err();
        assert!(matches!(err, Error::HostMapMissing));
        assert!(!control.is_attached());
        assert_eq!(doc.borrow().listener_count(), 0);
    }

    #[test]
    fn test_attach_twice_is_rejected() {
        let doc = Document::new_handle();
        let mut control = StyleSwitcherControl::default();
        control.on_add(&doc, host(MockHostMap::new())).unwrap();
        let err = control.on_add(&doc, host(MockHostMap::new())).unwrap_err();
        assert!(matches!(err, Error::AlreadyAttached));
        assert_eq!(doc.borrow().listener_count(), 1);
    }

    #[test]
    fn test_attach_marks_default_active() {
        let doc = Document::new_handle();
        let mut control = StyleSwitcherControl::new(None, Some("Outdoors".into()));
        control.on_add(&doc, host(MockHostMap::new())).unwrap();

        assert_eq!(active_indices(&control, &doc), vec![2]);
        assert_eq!(control.current_style().unwrap().title(), "Outdoors");
    }

    #[test]
    fn test_attach_with_unknown_default_has_no_active_option() {
        let doc = Document::new_handle();
        let mut control = StyleSwitcherControl::new(None, Some("Moon".into()));
        control.on_add(&doc, host(MockHostMap::new())).unwrap();

        assert!(active_indices(&control, &doc).is_empty());
        assert!(control.current_style().is_none());
    }

    #[test]
    fn test_set_style_before_attach_fails() {
        let mut control = StyleSwitcherControl::default();
        let err = control.set_style("Dark").unwrap_err();
        assert!(matches!(err, Error::NotAttached { .. }));
    }

    #[test]
    fn test_set_style_logs_by_severity() {
        let logs = CapturedLogs::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(logs.clone())
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let doc = Document::new_handle();
            let mut control = StyleSwitcherControl::default();
            assert!(control.set_style("Dark").is_err());

            control.on_add(&doc, host(MockHostMap::new())).unwrap();
            assert!(control.set_style("Moon").is_err());
        });

        let output = logs.contents();
        assert!(output.contains("ERROR") && output.contains("Cannot set style 'Dark'"));
        assert!(output.contains("WARN") && output.contains("Failed to set style 'Moon'"));
    }

    #[test]
    fn test_set_style_calls_host_and_moves_marker() {
        let doc = Document::new_handle();
        let mut mock = MockHostMap::new();
        mock.expect_set_style()
            .with(eq("mapbox://styles/mapbox/dark-v10"))
            .times(1)
            .returning(|_| Ok(()));

        let mut control = StyleSwitcherControl::default();
        control.on_add(&doc, host(mock)).unwrap();
        control.set_style("Dark").unwrap();

        assert_eq!(control.current_style().unwrap().title(), "Dark");
        assert_eq!(active_indices(&control, &doc), vec![0]);
    }

    #[test]
    fn test_set_style_unknown_title_skips_host() {
        let doc = Document::new_handle();
        let mut mock = MockHostMap::new();
        mock.expect_set_style().never();

        let mut control = StyleSwitcherControl::default();
        control.on_add(&doc, host(mock)).unwrap();
        let err = control.set_style("Moon").unwrap_err();

        assert!(matches!(err, Error::StyleNotFound { .. }));
        assert_eq!(control.current_style().unwrap().title(), "Streets");
    }

    #[test]
    fn test_set_style_host_failure_keeps_marker() {
        let doc = Document::new_handle();
        let mut mock = MockHostMap::new();
        mock.expect_set_style()
            .returning(|_| Err(Error::host_map("style server unreachable")));

        let mut control = StyleSwitcherControl::default();
        control.on_add(&doc, host(mock)).unwrap();
        let err = control.set_style("Light").unwrap_err();

        assert!(matches!(err, Error::HostMap { .. }));
        assert_eq!(control.current_style().unwrap().title(), "Streets");
        assert_eq!(active_indices(&control, &doc), vec![4]);
    }

    #[test]
    fn test_remove_detaches_and_releases() {
        let doc = Document::new_handle();
        let mut control = StyleSwitcherControl::default();
        let container = control.on_add(&doc, host(MockHostMap::new())).unwrap();
        let body = doc.borrow().body();
        doc.borrow_mut().append_child(body, container).unwrap();

        control.on_remove();

        assert!(!doc.borrow().is_connected(container));
        assert_eq!(doc.borrow().listener_count(), 0);
        assert!(control.container().is_none());
        assert!(control.current_style().is_none());

        control.on_remove();
    }

    #[test]
    fn test_remove_without_attach_is_safe() {
        let mut control = StyleSwitcherControl::default();
        control.on_remove();
        assert!(!control.is_attached());
    }

    #[test]
    fn test_reattach_after_remove_restores_default() {
        let doc = Document::new_handle();
        let mut mock = MockHostMap::new();
        mock.expect_set_style().returning(|_| Ok(()));

        let mut control = StyleSwitcherControl::default();
        control.on_add(&doc, host(mock)).unwrap();
        control.set_style("Dark").unwrap();
        control.on_remove();

        control.on_add(&doc, host(MockHostMap::new())).unwrap();
        assert_eq!(control.current_style().unwrap().title(), "Streets");
        assert_eq!(doc.borrow().listener_count(), 1);
    }

    #[test]
    fn test_from_config() {
        let config = crate::config::parse_config(
            r#"
default_style = "Night"

[[styles]]
title = "Day"
uri = "uri:day"

[[styles]]
title = "Night"
uri = "uri:night"
"#,
        )
        .unwrap();
        let control = StyleSwitcherControl::from_config(config, EventListeners::new());
        let expected = StyleSet::new(vec![
            StyleDefinition::new("Day", "uri:day"),
            StyleDefinition::new("Night", "uri:night"),
        ]);
        assert_eq!(control.styles(), &expected);
        assert_eq!(control.default_style(), "Night");
    }
}
