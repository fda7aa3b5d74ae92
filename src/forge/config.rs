//! Configuration for the hosting-platform connection.
use secrecy::SecretString;

/// Asset name reserved for releases that have no real artifact yet. Never
/// deleted by asset pruning.
pub const PLACEHOLDER_ASSET_NAME: &str = "placeholder";
/// Public GitHub host.
pub const DEFAULT_HOST: &str = "github.com";
/// API base URL for the public GitHub host.
pub const DEFAULT_API_URL: &str = "https://api.github.com";
/// Page size used when listing tags and assets.
pub const DEFAULT_PAGE_SIZE: u8 = 100;

/// Remote repository connection configuration for authenticating and
/// interacting with the hosting platform.
#[derive(Debug, Clone)]
pub struct RemoteConfig {
    /// Remote host (e.g., "github.com").
    pub host: String,
    /// URL scheme (http or https).
    pub scheme: String,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Base URL of the REST API.
    pub api_url: String,
    /// Bearer token for authentication.
    pub token: SecretString,
    /// Log mutating calls instead of performing them.
    pub dry_run: bool,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            host: "".to_string(),
            scheme: "".to_string(),
            owner: "".to_string(),
            repo: "".to_string(),
            api_url: "".to_string(),
            token: SecretString::from("".to_string()),
            dry_run: false,
        }
    }
}

impl RemoteConfig {
    /// `owner/repo` form used in log messages.
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }
}

/// Derive the REST API base URL from the repository host: the public host
/// uses `api.github.com`, enterprise hosts serve the API under `/api/v3`.
pub fn default_api_url(scheme: &str, host: &str) -> String {
    if host == DEFAULT_HOST {
        return DEFAULT_API_URL.to_string();
    }

    format!("{scheme}://{host}/api/v3")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_remote_config() {
        let remote = RemoteConfig::default();
        assert!(!remote.dry_run);
        assert!(remote.api_url.is_empty());
    }

    #[test]
    fn derives_api_url_for_public_and_enterprise_hosts() {
        assert_eq!(
            default_api_url("https", "github.com"),
            "https://api.github.com"
        );
        assert_eq!(
            default_api_url("https", "git.example.com"),
            "https://git.example.com/api/v3"
        );
    }
}
