//! Cost centers ("Unit Biaya") used to segment journal and ledger lines.

mod cost_centers_model;
mod cost_centers_service;
mod cost_centers_traits;

pub use cost_centers_model::{CostCenter, NewCostCenter};
pub use cost_centers_service::CostCenterService;
pub use cost_centers_traits::{CostCenterRepositoryTrait, CostCenterServiceTrait};
