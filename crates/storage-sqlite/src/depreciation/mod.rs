//! SQLite storage implementation for depreciation lines.

mod model;
mod repository;

pub use model::DepreciationLineDB;
pub use repository::DepreciationRepository;
