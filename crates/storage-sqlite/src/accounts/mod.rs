//! SQLite storage implementation for the chart of accounts.

mod model;
mod repository;

pub use model::AccountDB;
pub use repository::AccountRepository;
