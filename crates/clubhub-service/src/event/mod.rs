//! Club events.

pub mod service;

pub use service::{EventService, EventWhen, NewEvent};
