//! Release field merging and update-or-fetch.
use log::*;

use crate::{
    Result,
    forge::{
        manager::ForgeManager,
        request::{RemoteRelease, UpdateReleaseRequest},
    },
    reconcile::request::{CleanupRequest, ReconcileRequest},
};

/// Mutable release fields a caller asked to change. `target_commitish` is
/// carried along with an update but does not trigger one by itself.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReleaseChanges {
    pub tag_name: Option<String>,
    pub name: Option<String>,
    pub body: Option<String>,
    pub draft: Option<bool>,
    pub target_commitish: Option<String>,
}

impl ReleaseChanges {
    pub fn has_changes(&self) -> bool {
        self.tag_name.is_some()
            || self.name.is_some()
            || self.body.is_some()
            || self.draft.is_some()
    }

    /// Build the update payload, or `None` when nothing was requested.
    pub fn into_update(self, release_id: u64) -> Option<UpdateReleaseRequest> {
        if !self.has_changes() {
            return None;
        }

        Some(UpdateReleaseRequest {
            release_id,
            tag_name: self.tag_name,
            target_commitish: self.target_commitish,
            name: self.name,
            body: self.body,
            draft: self.draft,
        })
    }
}

impl From<&ReconcileRequest> for ReleaseChanges {
    fn from(request: &ReconcileRequest) -> Self {
        Self {
            tag_name: request.new_tag.clone(),
            name: request.new_name.clone(),
            body: request.new_body.clone(),
            draft: request.new_draft_status,
            target_commitish: Some(request.commitish.clone()),
        }
    }
}

impl From<&CleanupRequest> for ReleaseChanges {
    fn from(request: &CleanupRequest) -> Self {
        Self {
            draft: request.new_draft_status,
            ..Default::default()
        }
    }
}

/// Patch the release when any field changed; otherwise read it as-is.
pub async fn update_or_fetch(
    forge: &ForgeManager,
    release_id: u64,
    changes: ReleaseChanges,
) -> Result<RemoteRelease> {
    match changes.into_update(release_id) {
        Some(req) => update(forge, req).await,
        None => {
            info!("no release changes requested: fetching release {release_id}");
            forge.get_release(release_id).await
        }
    }
}

/// Patch the release only when a field changed. Returns `None` otherwise.
pub async fn update_if_changed(
    forge: &ForgeManager,
    release_id: u64,
    changes: ReleaseChanges,
) -> Result<Option<RemoteRelease>> {
    match changes.into_update(release_id) {
        Some(req) => Ok(Some(update(forge, req).await?)),
        None => Ok(None),
    }
}

async fn update(
    forge: &ForgeManager,
    req: UpdateReleaseRequest,
) -> Result<RemoteRelease> {
    let release_id = req.release_id;
    let summary = format!(
        "- tag_name: {:?}\n- name: {:?}\n- body: {:?}\n- target_commitish: {:?}\n- draft: {:?}",
        req.tag_name, req.name, req.body, req.target_commitish, req.draft
    );

    let release = forge.update_release(req).await?;

    info!(
        "Release {release_id} was successfully updated, with the following changes:\n{summary}"
    );

    Ok(release)
}
