//! Balance sheet ("neraca") computed from the general ledger.

mod balance_sheet_calculator;
mod balance_sheet_model;
mod balance_sheet_service;
mod balance_sheet_traits;


pub use balance_sheet_calculator::aggregate;
pub use balance_sheet_model::{BalanceSheet, BalanceSheetRow, BalanceSheetSection};
pub use balance_sheet_service::BalanceSheetService;
pub use balance_sheet_traits::BalanceSheetServiceTrait;
