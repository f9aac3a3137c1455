//! # clubhub-entity
//!
//! Domain entity models for ClubHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod blog;
pub mod event;
pub mod invitation;
pub mod member;
pub mod project;
pub mod session;
