//! Manager that wraps forge implementations
use log::*;

use crate::{
    Result,
    forge::{
        config::RemoteConfig,
        request::{
            CreateTagRequest, ReleaseAsset, RemoteRelease, RemoteTag,
            TagObject, UpdateReleaseRequest,
        },
        traits::Forge,
    },
};

pub struct ForgeManager {
    forge: Box<dyn Forge>,
    remote_config: RemoteConfig,
}

impl ForgeManager {
    pub fn new(forge: Box<dyn Forge>) -> Self {
        let remote_config = forge.remote_config();
        Self {
            forge,
            remote_config,
        }
    }

    pub fn remote_config(&self) -> RemoteConfig {
        self.remote_config.clone()
    }

    pub async fn list_release_assets(
        &self,
        release_id: u64,
    ) -> Result<Vec<ReleaseAsset>> {
        debug!("listing assets for release {release_id}");
        self.forge.list_release_assets(release_id).await
    }

    pub async fn delete_release_asset(&self, asset: &ReleaseAsset) -> Result<()> {
        if self.remote_config.dry_run {
            warn!(
                "dry_run: would delete asset: id: {}, name: {}",
                asset.id, asset.name
            );
            return Ok(());
        }

        self.forge.delete_release_asset(asset.id).await
    }

    pub async fn list_tags(&self) -> Result<Vec<RemoteTag>> {
        debug!("listing tags for {}", self.remote_config.path());
        self.forge.list_tags().await
    }

    pub async fn delete_ref(&self, reference: &str) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would delete ref: {reference}");
            return Ok(());
        }

        self.forge.delete_ref(reference).await
    }

    pub async fn create_tag(&self, req: CreateTagRequest) -> Result<TagObject> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create tag: req: {:#?}", req);
            return Ok(TagObject { sha: "fff".into() });
        }

        self.forge.create_tag(req).await
    }

    pub async fn create_ref(&self, reference: &str, sha: &str) -> Result<()> {
        if self.remote_config.dry_run {
            warn!("dry_run: would create ref: {reference}, sha: {sha}");
            return Ok(());
        }

        self.forge.create_ref(reference, sha).await
    }

    /// Patch the release. In dry-run mode the current release is fetched
    /// instead so callers still get real identity and URLs.
    pub async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<RemoteRelease> {
        if self.remote_config.dry_run {
            warn!("dry_run: would update release: req: {:#?}", req);
            return self.forge.get_release(req.release_id).await;
        }

        self.forge.update_release(req).await
    }

    pub async fn get_release(&self, release_id: u64) -> Result<RemoteRelease> {
        debug!("fetching release {release_id}");
        self.forge.get_release(release_id).await
    }
}
