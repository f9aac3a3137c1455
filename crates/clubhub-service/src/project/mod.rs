//! Member projects.

pub mod service;

pub use service::{NewProject, ProjectService};
