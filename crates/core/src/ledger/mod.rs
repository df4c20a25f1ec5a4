//! General ledger - posting of source documents and ledger queries.

mod ledger_model;
mod ledger_traits;
mod posting_service;


pub use ledger_model::*;
pub use ledger_traits::{LedgerRepositoryTrait, PostingServiceTrait};
pub use posting_service::PostingService;
