//! Event domain entities.

pub mod model;

pub use model::{CreateEvent, Event, EventWindow, UpdateEvent};
