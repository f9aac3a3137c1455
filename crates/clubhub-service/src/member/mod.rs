//! Member profiles and member administration.

pub mod admin;
pub mod service;

pub use admin::AdminMemberService;
pub use service::{MemberService, MemberView};
