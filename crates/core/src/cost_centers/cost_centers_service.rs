use std::sync::Arc;

use async_trait::async_trait;

use super::cost_centers_model::{CostCenter, NewCostCenter};
use super::cost_centers_traits::{CostCenterRepositoryTrait, CostCenterServiceTrait};
use crate::errors::{Error, Result};

pub struct CostCenterService {
    repository: Arc<dyn CostCenterRepositoryTrait>,
}

impl CostCenterService {
    pub fn new(repository: Arc<dyn CostCenterRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CostCenterServiceTrait for CostCenterService {
    fn get_cost_centers(&self) -> Result<Vec<CostCenter>> {
        self.repository.list()
    }

    async fn create_cost_center(&self, new_cost_center: NewCostCenter) -> Result<CostCenter> {
        new_cost_center.validate()?;
        self.repository.create(new_cost_center).await.map_err(|e| {
            if e.is_unique_violation() {
                Error::ConstraintViolation("Cost center code already exists".to_string())
            } else {
                e
            }
        })
    }

    async fn delete_cost_center(&self, cost_center_id: &str) -> Result<()> {
        // Ledger lines keep their segment; the foreign key refuses the delete.
        let deleted = self.repository.delete(cost_center_id).await.map_err(|e| match e {
            Error::Database(crate::errors::DatabaseError::ForeignKeyViolation(_)) => {
                Error::ConstraintViolation("Cost center is still in use".to_string())
            }
            other => other,
        })?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Cost center {}", cost_center_id)));
        }
        Ok(())
    }
}
