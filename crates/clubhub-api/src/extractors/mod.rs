//! Custom Axum extractors.

pub mod actor;
pub mod json;
pub mod path;

pub use actor::{CurrentActor, session_token};
pub use json::ValidatedJson;
pub use path::IdPath;
