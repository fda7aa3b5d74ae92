use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Asset attached to a release.
pub struct ReleaseAsset {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Commit a repository tag points at.
pub struct TagCommit {
    pub sha: String,
    pub url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Lightweight view of a repository tag.
pub struct RemoteTag {
    pub name: String,
    pub commit: TagCommit,
}

impl RemoteTag {
    /// Reference path used to delete this tag, relative to `refs/`.
    pub fn ref_path(&self) -> String {
        format!("tags/{}", self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Request to create an annotated tag object.
pub struct CreateTagRequest {
    pub tag: String,
    pub message: String,
    /// SHA of the object being tagged.
    pub object: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl CreateTagRequest {
    /// Annotated tag of `sha` carrying the standard release message.
    pub fn for_commit(tag: &str, sha: &str) -> Self {
        Self {
            tag: tag.to_string(),
            message: format!("release {tag}"),
            object: sha.to_string(),
            kind: "commit".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Tag object returned after creation.
pub struct TagObject {
    pub sha: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
/// Partial update of a release. Absent fields are left out of the payload
/// entirely; the API treats an explicit null as "clear".
pub struct UpdateReleaseRequest {
    #[serde(skip)]
    pub release_id: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tag_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_commitish: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
/// Release resource as returned by get/update calls.
pub struct RemoteRelease {
    pub id: u64,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default)]
    pub upload_url: Option<String>,
    #[serde(default)]
    pub target_commitish: Option<String>,
}
