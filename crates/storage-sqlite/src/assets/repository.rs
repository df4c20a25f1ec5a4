use async_trait::async_trait;
use diesel::prelude::*;
use std::sync::Arc;

use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::assets;

use super::model::AssetDB;
use tirta_core::assets::{Asset, AssetRepositoryTrait, AssetUpdate, NewAsset};
use tirta_core::errors::{Error, Result};

/// Repository for managing the asset register in the database
pub struct AssetRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl AssetRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }

    fn load(&self, active_only: bool) -> Result<Vec<Asset>> {
        let mut conn = get_connection(&self.pool)?;

        let mut query = assets::table.into_boxed();
        if active_only {
            query = query.filter(assets::is_active.eq(true));
        }

        query
            .select(AssetDB::as_select())
            .order(assets::code.asc())
            .load::<AssetDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Asset::try_from)
            .collect()
    }
}

#[async_trait]
impl AssetRepositoryTrait for AssetRepository {
    async fn create(&self, new_asset: NewAsset) -> Result<Asset> {
        self.writer
            .exec(move |conn| {
                let asset_db: AssetDB = new_asset.into();
                diesel::insert_into(assets::table)
                    .values(&asset_db)
                    .execute(conn)
                    .into_core()?;
                Asset::try_from(asset_db)
            })
            .await
    }

    async fn update(&self, asset_update: AssetUpdate) -> Result<Asset> {
        self.writer
            .exec(move |conn| {
                let mut asset_db: AssetDB = asset_update.into();

                let created_at = assets::table
                    .find(&asset_db.id)
                    .select(assets::created_at)
                    .first::<chrono::NaiveDateTime>(conn)
                    .optional()
                    .into_core()?
                    .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_db.id)))?;
                asset_db.created_at = created_at;

                diesel::update(assets::table.find(&asset_db.id))
                    .set(&asset_db)
                    .execute(conn)
                    .into_core()?;

                Asset::try_from(asset_db)
            })
            .await
    }

    fn get_by_id(&self, asset_id: &str) -> Result<Asset> {
        let mut conn = get_connection(&self.pool)?;

        assets::table
            .find(asset_id)
            .select(AssetDB::as_select())
            .first::<AssetDB>(&mut conn)
            .optional()
            .into_core()?
            .ok_or_else(|| Error::NotFound(format!("Asset {}", asset_id)))?
            .try_into()
    }

    fn list(&self) -> Result<Vec<Asset>> {
        self.load(false)
    }

    fn list_active(&self) -> Result<Vec<Asset>> {
        self.load(true)
    }

    async fn delete(&self, asset_id: &str) -> Result<usize> {
        let asset_id = asset_id.to_string();
        self.writer
            .exec(move |conn| {
                diesel::delete(assets::table.find(asset_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
