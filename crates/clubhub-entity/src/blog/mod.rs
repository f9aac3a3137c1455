//! Blog domain entities.

pub mod model;
pub mod status;

pub use model::{Blog, CreateBlog, UpdateBlog};
pub use status::{BlogStatus, ModerationVerdict};
