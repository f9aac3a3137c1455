//! The request-level session gate and the sign-in lifecycle.

pub mod gate;
pub mod manager;

pub use gate::{GateDecision, SessionGate};
pub use manager::{SessionManager, SignIn};
