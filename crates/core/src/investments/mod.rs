//! Investment records: models, entry validation, and the service that keeps
//! the startup's funding totals consistent with the rows.

mod model;
mod repository;
mod service;
pub mod validation;

pub use model::{InvestmentRecord, InvestmentRoundType, InvestorType, NewInvestment};
pub use repository::InvestmentRepositoryTrait;
pub use service::InvestmentService;
