//! Implements the Forge trait for Github
use async_trait::async_trait;
use log::*;
use octocrab::{Octocrab, params::repos::Reference};
use serde::Serialize;

use crate::{
    Result, StewardError,
    forge::{
        config::{DEFAULT_PAGE_SIZE, RemoteConfig},
        request::{
            CreateTagRequest, ReleaseAsset, RemoteRelease, RemoteTag,
            TagCommit, TagObject, UpdateReleaseRequest,
        },
        traits::Forge,
    },
};

#[derive(Debug, Serialize)]
struct PageParams {
    per_page: u8,
    page: u32,
}

/// Convert `refs/tags/x`, `tags/x`, `refs/heads/x` or `heads/x` into an
/// octocrab reference.
fn parse_reference(reference: &str) -> Result<Reference> {
    let stripped = reference.strip_prefix("refs/").unwrap_or(reference);

    if let Some(tag) = stripped.strip_prefix("tags/") {
        return Ok(Reference::Tag(tag.to_string()));
    }

    if let Some(branch) = stripped.strip_prefix("heads/") {
        return Ok(Reference::Branch(branch.to_string()));
    }

    Err(StewardError::forge(format!(
        "unsupported reference: {reference}"
    )))
}

/// GitHub forge implementation using Octocrab for release, asset and tag
/// API interactions.
pub struct Github {
    config: RemoteConfig,
    base_uri: String,
    instance: Octocrab,
}

impl Github {
    /// Create GitHub client with personal access token authentication and
    /// API base URL configuration. No request is sent.
    pub async fn new(config: RemoteConfig) -> Result<Self> {
        let base_uri = config.api_url.trim_end_matches('/').to_string();
        let builder = Octocrab::builder()
            .personal_token(config.token.clone())
            .base_uri(base_uri.clone())?;
        let instance = builder.build()?;

        Ok(Self {
            config,
            base_uri,
            instance,
        })
    }

    fn repo_route(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.base_uri, self.config.owner, self.config.repo, path
        )
    }
}

#[async_trait]
impl Forge for Github {
    fn remote_config(&self) -> RemoteConfig {
        self.config.clone()
    }

    async fn list_release_assets(
        &self,
        release_id: u64,
    ) -> Result<Vec<ReleaseAsset>> {
        let route = self.repo_route(&format!("releases/{release_id}/assets"));
        let mut assets = vec![];
        let mut page = 1;

        loop {
            let params = PageParams {
                per_page: DEFAULT_PAGE_SIZE,
                page,
            };

            let batch: Vec<ReleaseAsset> =
                self.instance.get(&route, Some(&params)).await?;

            let done = batch.len() < DEFAULT_PAGE_SIZE as usize;

            assets.extend(batch);

            if done {
                break;
            }

            page += 1;
        }

        debug!("found {} assets for release {release_id}", assets.len());

        Ok(assets)
    }

    async fn delete_release_asset(&self, asset_id: u64) -> Result<()> {
        let route = self.repo_route(&format!("releases/assets/{asset_id}"));
        let response = self.instance._delete(route, None::<&()>).await?;
        octocrab::map_github_error(response).await?;
        Ok(())
    }

    async fn list_tags(&self) -> Result<Vec<RemoteTag>> {
        let page = self
            .instance
            .repos(&self.config.owner, &self.config.repo)
            .list_tags()
            .per_page(DEFAULT_PAGE_SIZE)
            .send()
            .await?;

        let tags = self.instance.all_pages(page).await?;

        Ok(tags
            .into_iter()
            .map(|tag| RemoteTag {
                name: tag.name,
                commit: TagCommit {
                    sha: tag.commit.sha,
                    url: tag.commit.url.to_string(),
                },
            })
            .collect())
    }

    async fn delete_ref(&self, reference: &str) -> Result<()> {
        let reference = parse_reference(reference)?;

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .delete_ref(&reference)
            .await?;

        Ok(())
    }

    async fn create_tag(&self, req: CreateTagRequest) -> Result<TagObject> {
        let route = self.repo_route("git/tags");

        info!("creating tag object {} for {}", req.tag, req.object);

        let tag: TagObject = self.instance.post(route, Some(&req)).await?;

        Ok(tag)
    }

    async fn create_ref(&self, reference: &str, sha: &str) -> Result<()> {
        let reference = parse_reference(reference)?;

        self.instance
            .repos(&self.config.owner, &self.config.repo)
            .create_ref(&reference, sha)
            .await?;

        Ok(())
    }

    async fn update_release(
        &self,
        req: UpdateReleaseRequest,
    ) -> Result<RemoteRelease> {
        let route = self.repo_route(&format!("releases/{}", req.release_id));
        let release: RemoteRelease =
            self.instance.patch(route, Some(&req)).await?;
        Ok(release)
    }

    async fn get_release(&self, release_id: u64) -> Result<RemoteRelease> {
        let route = self.repo_route(&format!("releases/{release_id}"));
        let release: RemoteRelease =
            self.instance.get(route, None::<&()>).await?;
        Ok(release)
    }
}
