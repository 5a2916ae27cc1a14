//! The startup aggregate, its per-startup shares row, and the service exposing
//! cap table views and manual recalculation.

mod model;
mod repository;
mod service;

pub use model::{ComplianceStatus, NewStartup, Startup, StartupShares};
pub use repository::StartupRepositoryTrait;
pub use service::StartupService;
