//! Route handlers organized by domain.

pub mod auth;
pub mod blog;
pub mod dashboard;
pub mod event;
pub mod health;
pub mod invitation;
pub mod member;
pub mod project;
