//! Validated desired-state inputs for the two invocation phases.
use derive_builder::Builder;
use serde::Serialize;

use crate::{Result, StewardError};

/// Desired state for the main phase. Every `Option` is "leave unchanged"
/// when `None`; an explicit empty string never reaches this type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Builder)]
#[builder(build_fn(private, name = "_build"))]
pub struct ReconcileRequest {
    pub release_id: u64,
    #[builder(default, setter(into, strip_option))]
    pub new_name: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub new_body: Option<String>,
    #[builder(default, setter(into, strip_option))]
    pub new_tag: Option<String>,
    /// Commit the pipeline runs against.
    #[builder(setter(into))]
    pub commitish: String,
    #[builder(default)]
    pub delete_assets: bool,
    #[builder(default, setter(into, strip_option))]
    pub delete_tags_prefix: Option<String>,
    #[builder(default, setter(strip_option))]
    pub new_draft_status: Option<bool>,
}

impl ReconcileRequest {
    pub fn builder() -> ReconcileRequestBuilder {
        ReconcileRequestBuilder::default()
    }
}

impl ReconcileRequestBuilder {
    pub fn build(&self) -> Result<ReconcileRequest> {
        self._build().map_err(|e| {
            StewardError::invalid_config(format!(
                "Failed to build reconcile request: {}",
                e
            ))
        })
    }
}

/// Desired state for the post/cleanup phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CleanupRequest {
    pub release_id: u64,
    /// Tag protected from pruning.
    pub new_tag: String,
    pub delete_tags_prefix: Option<String>,
    pub new_draft_status: Option<bool>,
}

/// Treat an empty input as absent. Automation runners export every declared
/// input, defaulting to `""`.
pub fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(String::from)
}

/// Parse an optional `"true"` / `"false"` literal. Absent or empty yields
/// `None`; anything else is rejected.
pub fn parse_bool_literal(name: &str, value: Option<&str>) -> Result<Option<bool>> {
    match value {
        None | Some("") => Ok(None),
        Some("true") => Ok(Some(true)),
        Some("false") => Ok(Some(false)),
        Some(other) => Err(StewardError::invalid_config(format!(
            "{name} must be either 'true' or 'false', got '{other}'"
        ))),
    }
}
