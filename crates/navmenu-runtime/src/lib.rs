#![forbid(unsafe_code)]

//! Runtime: the [`MenuController`] and the [`View`] capability trait.
//!
//! The controller owns the core state machines and timer slots and drives
//! an abstract view — the embedder supplies the document. No live
//! rendering surface is ever required; see `navmenu-harness` for a fake
//! implementation used in tests.

pub mod controller;
pub mod view;

pub use controller::{MenuController, Outcome};
pub use view::{ElementId, View};
