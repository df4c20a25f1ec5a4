//! Depreciation - pure calculator, stored depreciation lines, runs and reports.

pub mod depreciation_calculator;
mod depreciation_model;
mod depreciation_report;
mod depreciation_service;
mod depreciation_traits;

#[cfg(test)]
mod depreciation_service_tests;

pub use depreciation_model::*;
pub use depreciation_report::{build_report, render_csv};
pub use depreciation_service::DepreciationService;
pub use depreciation_traits::{DepreciationRepositoryTrait, DepreciationServiceTrait};
