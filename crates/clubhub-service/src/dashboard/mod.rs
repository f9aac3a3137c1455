//! The signed-in landing overview.

pub mod service;

pub use service::{DashboardOverview, DashboardService, Section};
