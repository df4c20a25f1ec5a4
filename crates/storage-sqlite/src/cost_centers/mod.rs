//! SQLite storage implementation for cost centers.

mod model;
mod repository;

pub use model::CostCenterDB;
pub use repository::CostCenterRepository;
