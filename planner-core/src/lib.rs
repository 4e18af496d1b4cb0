//! Core types for the event planner.
//!
//! This crate provides everything the `planner` CLI and the `planner-shell`
//! bridge binary share:
//! - `Event` and the form-side `NewEvent`
//! - `store` for the slot-backed in-memory event list
//! - `views` for the render models derived from that list
//! - `bridge` and `protocol` for the JSON-file shell bridge

pub mod app;
pub mod bridge;
pub mod config;
pub mod error;
pub mod event;
pub mod form;
pub mod protocol;
pub mod store;
pub mod views;

pub use error::{PlannerError, PlannerResult};
pub use event::*;
