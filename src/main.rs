//! Switcher Preview - render the style switcher markup from the command line
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::PathBuf;
use std::rc::Rc;

use clap::Parser;
use color_eyre::eyre::{eyre, Result};
use map_style_switcher::core::logging;
use map_style_switcher::{
    load_config, Document, DomEvent, EventListeners, EventOutcome, HostMap, Key,
    StyleSwitcherControl, SwitcherConfig,
};
use tracing::{debug, info};

/// Switcher Preview - render the map style switcher as HTML
#[derive(Parser, Debug)]
#[command(name = "switcher-preview")]
#[command(about = "Render the map style switcher control as HTML", long_about = None)]
struct Args {
    /// Path to a TOML style configuration
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Click the option with this title before rendering
    #[arg(long, value_name = "TITLE")]
    select: Option<String>,

    /// Click the toggle so the dropdown renders open
    #[arg(long)]
    open: bool,

    /// Key to press on the focused element after opening (repeatable)
    #[arg(long = "key", value_name = "KEY")]
    keys: Vec<String>,
}

/// Host map that only records style changes in the log
struct LoggingHostMap;

impl HostMap for LoggingHostMap {
    fn set_style(&self, uri: &str) -> map_style_switcher::Result<()> {
        info!("Host map received style {}", uri);
        Ok(())
    }
}

fn main() -> Result<()> {
    color_eyre::install()?;
    logging::init()?;
    debug!("Log file: {}", logging::get_current_log_file().display());

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => load_config(path)?,
        None => SwitcherConfig::default(),
    };

    let listeners = EventListeners::new().on_change(|_, uri| eprintln!("style changed: {uri}"));
    let mut control = StyleSwitcherControl::from_config(config, listeners);

    let document = Document::new_handle();
    let map: Rc<dyn HostMap> = Rc::new(LoggingHostMap);
    let container = control.on_add(&document, Some(map))?;
    {
        let mut doc = document.borrow_mut();
        let body = doc.body();
        doc.append_child(body, container)?;
    }

    if let Some(title) = &args.select {
        let style = control
            .styles()
            .find(title)
            .ok_or_else(|| eyre!("No style titled '{}'", title))?;
        debug!("Selecting {}", style);
        let option = control
            .styles()
            .position_of(title)
            .and_then(|index| control.option_node(index))
            .ok_or_else(|| eyre!("Style '{}' has no rendered option", title))?;
        let outcome = control.handle_event(&mut DomEvent::click(option));
        info!("Selecting '{}': {:?}", title, outcome);
        if outcome == EventOutcome::SelectFailed {
            return Err(eyre!("Host map rejected style '{}'", title));
        }
    }

    if args.open {
        if let Some(toggle) = control.toggle_button() {
            let outcome = control.handle_event(&mut DomEvent::click(toggle));
            info!("Opening style list: {:?}", outcome);
        }
    }

    for name in &args.keys {
        let target = document.borrow().focused();
        let Some(target) = target.or(control.toggle_button()) else {
            break;
        };
        let mut event = DomEvent::key_down(target, Key::from_name(name));
        let outcome = control.handle_event(&mut event);
        info!("Key '{}': {:?}", name, outcome);
    }

    println!("{}", document.borrow().outer_html(container));

    control.on_remove();
    Ok(())
}
