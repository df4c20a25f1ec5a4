//! SQLite storage implementation for the fixed-asset register.

mod model;
mod repository;

pub use model::AssetDB;
pub use repository::AssetRepository;
