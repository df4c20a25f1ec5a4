use std::sync::Arc;

use log::{debug, info};

use super::assets_model::{Asset, AssetUpdate, NewAsset};
use super::assets_traits::{AssetRepositoryTrait, AssetServiceTrait};
use crate::depreciation::{depreciation_calculator, DepreciationAmounts, DepreciationRepositoryTrait};
use crate::errors::{Error, Result};
use crate::utils::Period;

/// Service for managing the fixed-asset register.
pub struct AssetService {
    repository: Arc<dyn AssetRepositoryTrait>,
    depreciation_repository: Arc<dyn DepreciationRepositoryTrait>,
}

impl AssetService {
    pub fn new(
        repository: Arc<dyn AssetRepositoryTrait>,
        depreciation_repository: Arc<dyn DepreciationRepositoryTrait>,
    ) -> Self {
        Self {
            repository,
            depreciation_repository,
        }
    }

    fn map_unique(e: Error) -> Error {
        if e.is_unique_violation() {
            Error::ConstraintViolation("Asset code already exists".to_string())
        } else {
            e
        }
    }
}

#[async_trait::async_trait]
impl AssetServiceTrait for AssetService {
    fn get_assets(&self) -> Result<Vec<Asset>> {
        self.repository.list()
    }

    fn get_asset(&self, asset_id: &str) -> Result<Asset> {
        self.repository.get_by_id(asset_id)
    }

    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset> {
        new_asset.validate()?;
        debug!("Registering asset {} ({})", new_asset.code, new_asset.name);
        self.repository
            .create(new_asset)
            .await
            .map_err(Self::map_unique)
    }

    async fn update_asset(&self, asset_update: AssetUpdate) -> Result<Asset> {
        asset_update.validate()?;
        let asset_id = asset_update.id.clone().unwrap_or_default();
        let existing = self.repository.get_by_id(&asset_id)?;

        if existing.valuation_differs(&asset_update) {
            if self.depreciation_repository.has_posted_lines(&asset_id)? {
                return Err(Error::ConstraintViolation(format!(
                    "Asset {} has posted depreciation; unpost it before changing its valuation",
                    existing.code
                )));
            }
            let discarded = self
                .depreciation_repository
                .delete_unposted_for_asset(&asset_id)
                .await?;
            if discarded > 0 {
                info!(
                    "Discarded {} unposted depreciation lines of asset {} after correction",
                    discarded, existing.code
                );
            }
        }

        self.repository
            .update(asset_update)
            .await
            .map_err(Self::map_unique)
    }

    async fn delete_asset(&self, asset_id: &str) -> Result<()> {
        if self.depreciation_repository.has_posted_lines(asset_id)? {
            return Err(Error::ConstraintViolation(
                "Asset has posted depreciation lines".to_string(),
            ));
        }
        self.depreciation_repository
            .delete_unposted_for_asset(asset_id)
            .await?;
        let deleted = self.repository.delete(asset_id).await?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Asset {}", asset_id)));
        }
        Ok(())
    }

    fn get_schedule(&self, asset_id: &str, through: Period) -> Result<Vec<DepreciationAmounts>> {
        let asset = self.repository.get_by_id(asset_id)?;
        depreciation_calculator::schedule(&asset.depreciation_params(), through)
    }
}
