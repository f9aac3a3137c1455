//! Member domain entities.

pub mod model;
pub mod profile;
pub mod role;
pub mod status;

pub use model::{CreateMember, Member};
pub use profile::{CreateProfile, Profile, UpdateProfile};
pub use role::MemberRole;
pub use status::MemberStatus;
