use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use tirta_core::cost_centers::{CostCenter, NewCostCenter};

#[derive(
    Queryable, Identifiable, Insertable, Selectable, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(table_name = crate::schema::cost_centers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CostCenterDB {
    pub id: String,
    pub code: String,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl From<CostCenterDB> for CostCenter {
    fn from(db: CostCenterDB) -> Self {
        Self {
            id: db.id,
            code: db.code,
            name: db.name,
            created_at: db.created_at,
        }
    }
}

impl From<NewCostCenter> for CostCenterDB {
    fn from(domain: NewCostCenter) -> Self {
        Self {
            id: domain
                .id
                .unwrap_or_else(|| uuid::Uuid::new_v4().to_string()),
            code: domain.code.trim().to_string(),
            name: domain.name.trim().to_string(),
            created_at: chrono::Utc::now().naive_utc(),
        }
    }
}
