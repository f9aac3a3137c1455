//! Core type definitions used across the ClubHub workspace.

pub mod id;
pub mod scope;

pub use id::*;
pub use scope::ListScope;
