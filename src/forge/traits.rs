//! Traits related to the remote hosting platform
use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreateTagRequest, ReleaseAsset, RemoteRelease, RemoteTag,
            TagObject, UpdateReleaseRequest,
        },
    },
};

/// Release and tag operations the reconciler needs from the platform.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Forge: Send + Sync {
    fn remote_config(&self) -> RemoteConfig;
    async fn list_release_assets(
        &self,
        release_id: u64,
    ) -> Result<Vec<ReleaseAsset>>;
    async fn delete_release_asset(&self, asset_id: u64) -> Result<()>;
    async fn list_tags(&self) -> Result<Vec<RemoteTag>>;
    /// Delete a reference given relative to `refs/`, e.g. `tags/v1.0.0`.
    async fn delete_ref(&self, reference: &str) -> Result<()>;
    async fn create_tag(&self, req: CreateTagRequest) -> Result<TagObject>;
    /// Create a fully-qualified reference, e.g. `refs/tags/v1.0.0`.
    async fn create_ref(&self, reference: &str, sha: &str) -> Result<()>;
    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<RemoteRelease>;
    async fn get_release(&self, release_id: u64) -> Result<RemoteRelease>;
}
