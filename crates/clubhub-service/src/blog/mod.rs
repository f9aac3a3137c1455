//! Member blogs and their moderation.

pub mod moderation;
pub mod service;

pub use moderation::ModerationService;
pub use service::{BlogService, NewBlog};
