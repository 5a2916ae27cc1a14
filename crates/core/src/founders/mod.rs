//! Founder records and the founder-list replacement service.

mod model;
mod repository;
mod service;

pub use model::{Founder, NewFounder};
pub use repository::FounderRepositoryTrait;
pub use service::FounderService;
