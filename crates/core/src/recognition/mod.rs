//! Recognition and incubation records. Programs charge Free/Fees/Equity/Hybrid;
//! only the equity-bearing fee types contribute shares to the cap table.

mod model;
mod repository;
mod service;

pub use model::{FeeType, NewRecognition, RecognitionRecord};
pub use repository::RecognitionRepositoryTrait;
pub use service::RecognitionService;
