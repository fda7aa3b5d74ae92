//! Tag pruning and creation.
use log::*;

use crate::{
    Result,
    forge::{
        manager::ForgeManager,
        request::{CreateTagRequest, RemoteTag, TagObject},
    },
};

/// Tags whose name starts with `prefix` (case-sensitive, literal), minus the
/// protected tag when one is given.
pub fn tags_to_delete<'a>(
    tags: &'a [RemoteTag],
    prefix: &str,
    protected: Option<&str>,
) -> Vec<&'a RemoteTag> {
    tags.iter()
        .filter(|tag| tag.name.starts_with(prefix))
        .filter(|tag| Some(tag.name.as_str()) != protected)
        .collect()
}

/// Delete every tag matching `prefix` except `protected`, sequentially.
pub async fn prune_tags(
    forge: &ForgeManager,
    prefix: &str,
    protected: Option<&str>,
) -> Result<usize> {
    let tags = forge.list_tags().await?;
    let doomed = tags_to_delete(&tags, prefix, protected);

    debug!(
        "pruning {} of {} tags with prefix '{prefix}', protected: {:?}",
        doomed.len(),
        tags.len(),
        protected
    );

    for tag in doomed.iter() {
        forge.delete_ref(&tag.ref_path()).await?;
        info!("Tag '{}' was successfully deleted", tag.name);
    }

    info!("{} tag(s) have been deleted", doomed.len());

    Ok(doomed.len())
}

/// Create an annotated tag object for `commitish`, then the
/// `refs/tags/<tag>` reference pointing at it.
pub async fn create_tag(
    forge: &ForgeManager,
    tag: &str,
    commitish: &str,
) -> Result<TagObject> {
    info!("Creating tag '{tag}' from commit '{commitish}'");

    let object = forge
        .create_tag(CreateTagRequest::for_commit(tag, commitish))
        .await?;

    forge
        .create_ref(&format!("refs/tags/{tag}"), &object.sha)
        .await?;

    info!("Tag '{tag}' was successfully created");

    Ok(object)
}
