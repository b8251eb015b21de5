#![forbid(unsafe_code)]

//! Core: input events, viewport mode detection, timing, and the menu
//! state machines (desktop dropdowns, hover intent, mobile panel).
//!
//! Everything here is pure and time-explicit: APIs that depend on time
//! take `Instant`/`Duration` parameters, so tests never sleep and the
//! machines can run against any clock the embedder provides.

pub mod dropdown;
pub mod event;
pub mod hover;
pub mod mobile;
pub mod mode;
pub mod timer;
pub mod timing;
