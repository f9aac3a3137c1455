//! Invitations: the only way to join the club.

pub mod service;

pub use service::{InvitationService, IssuedInvitation, NewInvitation, RedeemInvitation};
