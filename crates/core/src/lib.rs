//! Domain core for the Clear & Care conversation coach.
//!
//! Holds everything that does not touch a socket or a database directly:
//! the static framework catalog, tone calibration, the conversation data
//! model, the record-store and text-completion seams, the two coaching
//! services built on top of them, and the lifecycle controller that walks a
//! conversation from preparation through to the archive.

pub mod coaching;
pub mod completion;
pub mod conversation;
pub mod error;
pub mod framework;
pub mod lifecycle;
pub mod store;
pub mod tone;
pub mod types;
