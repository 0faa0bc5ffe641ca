//! # switcher-dom - Owned Element Tree
//!
//! A small, single-threaded stand-in for the browser DOM: just enough tree,
//! class list, attribute, focus and listener behaviour for the style switcher
//! to build and maintain its markup. Hosts bridge it onto a real page.
//!
//! ## Key Types
//!
//! - [`Document`] / [`DocumentHandle`] - Element arena rooted at `<body>`
//! - [`Element`] / [`NodeId`] - Individual elements and their handles
//! - [`ListenerGuard`] - Document-level listener removed on drop
//! - [`DomEvent`] / [`Key`] - Click and key-press events

pub mod document;
pub mod event;
pub mod html;
pub mod node;

pub use document::{Document, DocumentHandle, ListenerGuard, ListenerId};
pub use event::{DomEvent, EventKind, Key};
pub use node::{Element, NodeId};
