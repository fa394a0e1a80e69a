#![forbid(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod constants;
pub mod coordinator;
pub mod document;
pub mod errors;
pub mod event_handler;
pub mod geometry;
pub mod registry;
pub mod types;
pub mod window;

#[cfg(test)]
mod testing;

pub use coordinator::{CloseOutcome, OpenOutcome, SessionCoordinator, SessionNotification};
pub use errors::{SessionError, SessionResult};
pub use types::WindowId;
