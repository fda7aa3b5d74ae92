//! Reconciles a release and its tags with the requested changes.
//!
//! Stages run strictly in order, each only when its triggering input is
//! present:
//!
//! 1. asset pruning (`delete_assets`)
//! 2. tag pruning (`delete_tags_prefix`, protecting `new_tag`)
//! 3. tag creation (`new_tag`)
//! 4. release update, or a plain fetch when no field changed
//!
//! The first failure stops the run. Nothing already done is rolled back.
use log::*;
use serde::Serialize;
use strum::Display;

use crate::{
    Result,
    forge::{manager::ForgeManager, request::RemoteRelease},
};

pub mod assets;
pub mod release;
pub mod request;
pub mod tags;

use release::ReleaseChanges;
use request::{CleanupRequest, ReconcileRequest};

/// Pipeline stage, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum Stage {
    #[strum(to_string = "asset pruner")]
    AssetPruner,
    #[strum(to_string = "tag pruner")]
    TagPruner,
    #[strum(to_string = "tag creator")]
    TagCreator,
    #[strum(to_string = "release updater")]
    ReleaseUpdater,
    #[strum(to_string = "result reporter")]
    ResultReporter,
}

/// Release identity reported back to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReconcileResult {
    pub id: u64,
    pub html_url: Option<String>,
    pub upload_url: Option<String>,
}

impl From<RemoteRelease> for ReconcileResult {
    fn from(release: RemoteRelease) -> Self {
        Self {
            id: release.id,
            html_url: release.html_url,
            upload_url: release.upload_url,
        }
    }
}

pub struct Reconciler {
    forge: ForgeManager,
}

impl Reconciler {
    pub fn new(forge: ForgeManager) -> Self {
        Self { forge }
    }

    /// Main phase: prune assets, prune tags, create tag, update or fetch
    /// the release.
    pub async fn run_main(
        &self,
        request: &ReconcileRequest,
    ) -> Result<ReconcileResult> {
        info!("arguments: {}", serde_json::to_string(request)?);

        if request.delete_assets {
            assets::prune_assets(&self.forge, request.release_id)
                .await
                .map_err(|e| e.in_stage(Stage::AssetPruner))?;
        }

        if let Some(prefix) = &request.delete_tags_prefix {
            tags::prune_tags(&self.forge, prefix, request.new_tag.as_deref())
                .await
                .map_err(|e| e.in_stage(Stage::TagPruner))?;
        }

        if let Some(tag) = &request.new_tag {
            tags::create_tag(&self.forge, tag, &request.commitish)
                .await
                .map_err(|e| e.in_stage(Stage::TagCreator))?;
        }

        let release = release::update_or_fetch(
            &self.forge,
            request.release_id,
            ReleaseChanges::from(request),
        )
        .await
        .map_err(|e| e.in_stage(Stage::ReleaseUpdater))?;

        Ok(ReconcileResult::from(release))
    }

    /// Post/cleanup phase: apply the draft status, then prune tags. Produces
    /// no outputs.
    pub async fn run_post(&self, request: &CleanupRequest) -> Result<()> {
        info!("arguments: {}", serde_json::to_string(request)?);

        release::update_if_changed(
            &self.forge,
            request.release_id,
            ReleaseChanges::from(request),
        )
        .await
        .map_err(|e| e.in_stage(Stage::ReleaseUpdater))?;

        if let Some(prefix) = &request.delete_tags_prefix {
            tags::prune_tags(&self.forge, prefix, Some(request.new_tag.as_str()))
                .await
                .map_err(|e| e.in_stage(Stage::TagPruner))?;
        }

        Ok(())
    }
}
