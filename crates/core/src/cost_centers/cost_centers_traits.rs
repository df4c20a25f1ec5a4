use async_trait::async_trait;

use super::cost_centers_model::{CostCenter, NewCostCenter};
use crate::errors::Result;

#[async_trait]
pub trait CostCenterRepositoryTrait: Send + Sync {
    fn list(&self) -> Result<Vec<CostCenter>>;
    fn get_by_id(&self, cost_center_id: &str) -> Result<CostCenter>;
    async fn create(&self, new_cost_center: NewCostCenter) -> Result<CostCenter>;
    async fn delete(&self, cost_center_id: &str) -> Result<usize>;
}

#[async_trait]
pub trait CostCenterServiceTrait: Send + Sync {
    fn get_cost_centers(&self) -> Result<Vec<CostCenter>>;
    async fn create_cost_center(&self, new_cost_center: NewCostCenter) -> Result<CostCenter>;
    async fn delete_cost_center(&self, cost_center_id: &str) -> Result<()>;
}
