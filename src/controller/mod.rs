//! Dashboard controller
//!
//! The state store ([`DashboardState`], named fields plus pure reducer
//! methods) and the orchestrator ([`DashboardController`]) that sequences
//! wallet, encryption, and registry calls over it.

mod config;
mod dashboard;
mod state;


pub use config::ControllerConfig;
pub use dashboard::DashboardController;
pub use state::DashboardState;
