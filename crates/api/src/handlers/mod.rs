pub mod catalog;
pub mod coaching;
pub mod conversations;
