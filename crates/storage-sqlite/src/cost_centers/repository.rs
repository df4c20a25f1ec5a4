use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::cost_centers;

use super::model::CostCenterDB;
use tirta_core::cost_centers::{CostCenter, CostCenterRepositoryTrait, NewCostCenter};
use tirta_core::errors::{Error, Result};

pub struct CostCenterRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CostCenterRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

#[async_trait]
impl CostCenterRepositoryTrait for CostCenterRepository {
    fn list(&self) -> Result<Vec<CostCenter>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = cost_centers::table
            .select(CostCenterDB::as_select())
            .order(cost_centers::code.asc())
            .load::<CostCenterDB>(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(CostCenter::from).collect())
    }

    fn get_by_id(&self, cost_center_id: &str) -> Result<CostCenter> {
        let mut conn = get_connection(&self.pool)?;
        cost_centers::table
            .find(cost_center_id)
            .select(CostCenterDB::as_select())
            .first::<CostCenterDB>(&mut conn)
            .optional()
            .into_core()?
            .map(CostCenter::from)
            .ok_or_else(|| Error::NotFound(format!("Cost center {}", cost_center_id)))
    }

    async fn create(&self, new_cost_center: NewCostCenter) -> Result<CostCenter> {
        self.writer
            .exec(move |conn| {
                let row: CostCenterDB = new_cost_center.into();
                diesel::insert_into(cost_centers::table)
                    .values(&row)
                    .execute(conn)
                    .into_core()?;
                Ok(row.into())
            })
            .await
    }

    async fn delete(&self, cost_center_id: &str) -> Result<usize> {
        let cost_center_id = cost_center_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(cost_centers::table.find(cost_center_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
