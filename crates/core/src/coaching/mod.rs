//! Coaching services backed by the text-completion capability.
//!
//! Neither service can fail from the caller's point of view: a completion
//! error is replaced by a fixed fallback line.

pub mod opener;
pub mod practice;

pub use opener::{OpenerContext, OpenerService, OPENER_FALLBACK};
pub use practice::{PracticeMessage, PracticeRole, PracticeService, PRACTICE_FALLBACK};
