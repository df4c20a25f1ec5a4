use super::assets_model::{Asset, AssetUpdate, NewAsset};
use crate::depreciation::DepreciationAmounts;
use crate::errors::Result;
use crate::utils::Period;

/// Trait defining the contract for Asset repository operations.
#[async_trait::async_trait]
pub trait AssetRepositoryTrait: Send + Sync {
    async fn create(&self, new_asset: NewAsset) -> Result<Asset>;
    async fn update(&self, asset_update: AssetUpdate) -> Result<Asset>;
    fn get_by_id(&self, asset_id: &str) -> Result<Asset>;
    fn list(&self) -> Result<Vec<Asset>>;
    fn list_active(&self) -> Result<Vec<Asset>>;
    async fn delete(&self, asset_id: &str) -> Result<usize>;
}

/// Trait defining the contract for Asset service operations.
#[async_trait::async_trait]
pub trait AssetServiceTrait: Send + Sync {
    fn get_assets(&self) -> Result<Vec<Asset>>;
    fn get_asset(&self, asset_id: &str) -> Result<Asset>;
    async fn create_asset(&self, new_asset: NewAsset) -> Result<Asset>;
    /// Applies a correction. Valuation changes are refused once any of the
    /// asset's depreciation lines is posted; unposted lines are discarded so
    /// the next run recomputes them.
    async fn update_asset(&self, asset_update: AssetUpdate) -> Result<Asset>;
    async fn delete_asset(&self, asset_id: &str) -> Result<()>;
    /// Month-by-month schedule from the depreciation start through `through`.
    fn get_schedule(&self, asset_id: &str, through: Period) -> Result<Vec<DepreciationAmounts>>;
}
