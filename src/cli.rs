//! CLI argument parsing and remote configuration.
use clap::{Parser, Subcommand};
use git_url_parse::GitUrl;
use secrecy::{ExposeSecret, SecretString};

use crate::{
    Result, StewardError,
    forge::config::{DEFAULT_HOST, RemoteConfig, default_api_url},
    reconcile::request::{
        CleanupRequest, ReconcileRequest, non_empty, parse_bool_literal,
    },
};

/// Reconcile a GitHub release and its tags with the requested changes.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[arg(long, env = "GITHUB_REPOSITORY", default_value = "", global = true)]
    /// Repository as owner/repo or https URL.
    pub repo: String,

    #[arg(
        long,
        env = "GITHUB_TOKEN",
        default_value = "",
        hide_env_values = true,
        global = true
    )]
    /// Access token used as the API bearer credential.
    pub token: String,

    #[arg(long, env = "GITHUB_API_URL", global = true)]
    /// REST API base URL. Derived from the repository host when unset.
    pub api_url: Option<String>,

    #[arg(long, default_value_t = false, global = true)]
    /// Log mutating calls instead of performing them.
    pub dry_run: bool,

    #[arg(long, default_value_t = false, global = true)]
    /// Enable debug logging.
    pub debug: bool,

    /// Lifecycle phase to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Lifecycle phases.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prune assets and tags, create the new tag, update the release and
    /// publish its identity.
    Main(MainArgs),

    /// Apply the requested draft status and prune tags.
    Post(PostArgs),
}

#[derive(clap::Args, Debug, Clone)]
pub struct MainArgs {
    #[arg(long, env = "INPUT_ID")]
    /// Release id.
    pub id: u64,

    #[arg(long, env = "INPUT_NEW_NAME")]
    /// New release name.
    pub new_name: Option<String>,

    #[arg(long, env = "INPUT_NEW_BODY")]
    /// New release body.
    pub new_body: Option<String>,

    #[arg(long, env = "INPUT_NEW_TAG")]
    /// Tag to create and attach to the release.
    pub new_tag: Option<String>,

    #[arg(long, env = "INPUT_DELETE_ASSETS")]
    /// "true" deletes every asset except the placeholder.
    pub delete_assets: Option<String>,

    #[arg(long, env = "INPUT_DELETE_TAGS_PREFIX")]
    /// Delete tags starting with this prefix, except the new tag.
    pub delete_tags_prefix: Option<String>,

    #[arg(long, env = "INPUT_NEW_DRAFT_STATUS")]
    /// "true" or "false".
    pub new_draft_status: Option<String>,

    #[arg(long, env = "GITHUB_SHA")]
    /// Commit the pipeline is running against.
    pub commitish: String,
}

#[derive(clap::Args, Debug, Clone)]
pub struct PostArgs {
    #[arg(long, env = "INPUT_ID")]
    /// Release id.
    pub id: u64,

    #[arg(long, env = "INPUT_NEW_TAG")]
    /// Tag protected from pruning.
    pub new_tag: String,

    #[arg(long, env = "INPUT_DELETE_TAGS_PREFIX")]
    /// Delete tags starting with this prefix, except the new tag.
    pub delete_tags_prefix: Option<String>,

    #[arg(long, env = "INPUT_NEW_DRAFT_STATUS")]
    /// "true" or "false".
    pub new_draft_status: Option<String>,
}

impl MainArgs {
    /// Validate raw inputs into a request. No remote call is made.
    pub fn to_request(&self) -> Result<ReconcileRequest> {
        let delete_assets =
            parse_bool_literal("delete_assets", self.delete_assets.as_deref())?
                .unwrap_or(false);

        let new_draft_status = parse_bool_literal(
            "new_draft_status",
            self.new_draft_status.as_deref(),
        )?;

        if self.commitish.is_empty() {
            return Err(StewardError::invalid_config(
                "commitish must be set: pass --commitish or set GITHUB_SHA",
            ));
        }

        Ok(ReconcileRequest {
            release_id: self.id,
            new_name: non_empty(self.new_name.as_deref()),
            new_body: non_empty(self.new_body.as_deref()),
            new_tag: non_empty(self.new_tag.as_deref()),
            commitish: self.commitish.clone(),
            delete_assets,
            delete_tags_prefix: non_empty(self.delete_tags_prefix.as_deref()),
            new_draft_status,
        })
    }
}

impl PostArgs {
    /// Validate raw inputs into a cleanup request. No remote call is made.
    pub fn to_request(&self) -> Result<CleanupRequest> {
        let new_tag = non_empty(Some(self.new_tag.as_str())).ok_or_else(|| {
            StewardError::invalid_config("new_tag is required for the post phase")
        })?;

        let new_draft_status = parse_bool_literal(
            "new_draft_status",
            self.new_draft_status.as_deref(),
        )?;

        Ok(CleanupRequest {
            release_id: self.id,
            new_tag,
            delete_tags_prefix: non_empty(self.delete_tags_prefix.as_deref()),
            new_draft_status,
        })
    }
}

impl Cli {
    /// Configure remote repository connection from CLI arguments.
    pub fn get_remote_config(&self) -> Result<RemoteConfig> {
        if self.repo.is_empty() {
            return Err(StewardError::invalid_config(
                "repository must be set: pass --repo or set GITHUB_REPOSITORY",
            ));
        }

        let mut remote = if self.repo.contains("://") {
            parse_repo_url(&self.repo)?
        } else {
            parse_repo_shorthand(&self.repo)?
        };

        if !self.token.is_empty() {
            remote.token = SecretString::from(self.token.clone());
        } else if !has_token(&remote) {
            return Err(StewardError::invalid_config(
                "Environment variable 'GITHUB_TOKEN' is not set",
            ));
        }

        remote.api_url = match non_empty(self.api_url.as_deref()) {
            Some(url) => url,
            None => default_api_url(&remote.scheme, &remote.host),
        };

        remote.dry_run = self.dry_run;

        Ok(remote)
    }
}

fn has_token(remote: &RemoteConfig) -> bool {
    !remote.token.expose_secret().is_empty()
}

/// Parse `owner/repo` against the public host.
fn parse_repo_shorthand(repo: &str) -> Result<RemoteConfig> {
    let (owner, name) = repo
        .split_once('/')
        .filter(|(owner, name)| {
            !owner.is_empty() && !name.is_empty() && !name.contains('/')
        })
        .ok_or_else(|| {
            StewardError::invalid_config(format!(
                "repository must be owner/repo, got '{repo}'"
            ))
        })?;

    Ok(RemoteConfig {
        host: DEFAULT_HOST.to_string(),
        scheme: "https".to_string(),
        owner: owner.to_string(),
        repo: name.to_string(),
        ..Default::default()
    })
}

/// Validate repository URL uses HTTP or HTTPS scheme.
fn validate_scheme(scheme: git_url_parse::Scheme) -> Result<()> {
    match scheme {
        git_url_parse::Scheme::Http => Ok(()),
        git_url_parse::Scheme::Https => Ok(()),
        _ => Err(StewardError::invalid_config(
            "only http and https schemes are supported for repo urls",
        )),
    }
}

/// Parse a repository URL, picking up an embedded token if present.
fn parse_repo_url(repo: &str) -> Result<RemoteConfig> {
    let parsed = GitUrl::parse(repo)?;

    validate_scheme(parsed.scheme)?;

    let host = parsed.host.ok_or_else(|| {
        StewardError::invalid_config("unable to parse host from github repo")
    })?;

    let owner = parsed.owner.ok_or_else(|| {
        StewardError::invalid_config("unable to parse owner from github repo")
    })?;

    Ok(RemoteConfig {
        host,
        scheme: parsed.scheme.to_string(),
        owner,
        repo: parsed.name,
        token: SecretString::from(parsed.token.unwrap_or_default()),
        ..Default::default()
    })
}

#[cfg(test)]
mod tests {
    //! Unit tests for CLI argument parsing and input validation.
    use super::*;

    fn main_args() -> MainArgs {
        MainArgs {
            id: 42,
            new_name: None,
            new_body: None,
            new_tag: None,
            delete_assets: None,
            delete_tags_prefix: None,
            new_draft_status: None,
            commitish: "abc123".into(),
        }
    }

    fn cli(repo: &str, token: &str) -> Cli {
        Cli {
            repo: repo.into(),
            token: token.into(),
            api_url: None,
            dry_run: false,
            debug: false,
            command: Command::Main(main_args()),
        }
    }

    #[test]
    fn parses_main_phase_flags() {
        let cli = Cli::try_parse_from([
            "release-steward",
            "--repo",
            "octo/widgets",
            "--token",
            "secret",
            "main",
            "--id",
            "42",
            "--new-name",
            "v2",
            "--delete-assets",
            "true",
            "--commitish",
            "abc123",
        ])
        .unwrap();

        let Command::Main(args) = &cli.command else {
            panic!("expected main phase");
        };
        let request = args.to_request().unwrap();

        assert_eq!(request.release_id, 42);
        assert_eq!(request.new_name.as_deref(), Some("v2"));
        assert!(request.delete_assets);
        assert_eq!(request.commitish, "abc123");
    }

    #[test]
    fn reads_inputs_from_runner_environment() {
        temp_env::with_vars(
            [
                ("INPUT_ID", Some("9")),
                ("INPUT_NEW_TAG", Some("rc-5")),
                ("INPUT_DELETE_TAGS_PREFIX", Some("rc-")),
                ("INPUT_NEW_DRAFT_STATUS", Some("false")),
                ("INPUT_NEW_NAME", Some("")),
                ("GITHUB_SHA", Some("feedface")),
            ],
            || {
                let cli = Cli::try_parse_from(["release-steward", "main"])
                    .unwrap();
                let Command::Main(args) = &cli.command else {
                    panic!("expected main phase");
                };
                let request = args.to_request().unwrap();

                assert_eq!(request.release_id, 9);
                assert_eq!(request.new_tag.as_deref(), Some("rc-5"));
                assert_eq!(request.delete_tags_prefix.as_deref(), Some("rc-"));
                assert_eq!(request.new_draft_status, Some(false));
                assert!(request.new_name.is_none());
                assert_eq!(request.commitish, "feedface");
            },
        );
    }

    #[test]
    fn empty_inputs_mean_absent() {
        let args = MainArgs {
            new_name: Some("".into()),
            new_body: Some("".into()),
            new_tag: Some("".into()),
            delete_assets: Some("".into()),
            delete_tags_prefix: Some("".into()),
            new_draft_status: Some("".into()),
            ..main_args()
        };

        let request = args.to_request().unwrap();

        assert_eq!(
            request,
            ReconcileRequest::builder()
                .release_id(42)
                .commitish("abc123")
                .build()
                .unwrap()
        );
    }

    #[test]
    fn rejects_malformed_draft_status() {
        let args = MainArgs {
            new_draft_status: Some("yes".into()),
            ..main_args()
        };

        let err = args.to_request().unwrap_err();

        assert!(matches!(err, StewardError::InvalidConfig(_)));
        assert!(err.to_string().contains("new_draft_status"));
    }

    #[test]
    fn rejects_truthy_delete_assets() {
        let args = MainArgs {
            delete_assets: Some("1".into()),
            ..main_args()
        };

        assert!(matches!(
            args.to_request(),
            Err(StewardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn post_requires_new_tag() {
        let args = PostArgs {
            id: 1,
            new_tag: "".into(),
            delete_tags_prefix: Some("rc-".into()),
            new_draft_status: None,
        };

        assert!(matches!(
            args.to_request(),
            Err(StewardError::InvalidConfig(_))
        ));
    }

    #[test]
    fn post_request_from_args() {
        let args = PostArgs {
            id: 1,
            new_tag: "rc-5".into(),
            delete_tags_prefix: Some("rc-".into()),
            new_draft_status: Some("false".into()),
        };

        let request = args.to_request().unwrap();

        assert_eq!(
            request,
            CleanupRequest {
                release_id: 1,
                new_tag: "rc-5".into(),
                delete_tags_prefix: Some("rc-".into()),
                new_draft_status: Some(false),
            }
        );
    }

    #[test]
    fn gets_remote_from_shorthand() {
        let remote = cli("octo/widgets", "token").get_remote_config().unwrap();

        assert_eq!(remote.owner, "octo");
        assert_eq!(remote.repo, "widgets");
        assert_eq!(remote.api_url, "https://api.github.com");
        assert_eq!(remote.token.expose_secret(), "token");
    }

    #[test]
    fn gets_enterprise_remote_from_url() {
        let remote = cli("https://git.example.com/octo/widgets", "token")
            .get_remote_config()
            .unwrap();

        assert_eq!(remote.host, "git.example.com");
        assert_eq!(remote.owner, "octo");
        assert_eq!(remote.repo, "widgets");
        assert_eq!(remote.api_url, "https://git.example.com/api/v3");
    }

    #[test]
    fn explicit_api_url_wins() {
        let mut cli = cli("octo/widgets", "token");
        cli.api_url = Some("http://localhost:8080".into());

        let remote = cli.get_remote_config().unwrap();

        assert_eq!(remote.api_url, "http://localhost:8080");
    }

    #[test]
    fn missing_token_is_a_configuration_error() {
        let err = cli("octo/widgets", "").get_remote_config().unwrap_err();

        assert!(matches!(err, StewardError::InvalidConfig(_)));
        assert!(err.to_string().contains("GITHUB_TOKEN"));
    }

    #[test]
    fn rejects_malformed_shorthand() {
        for repo in ["octo", "/widgets", "octo/", "a/b/c"] {
            assert!(cli(repo, "token").get_remote_config().is_err());
        }
    }

    #[test]
    fn only_supports_http_and_https_schemes() {
        let result = cli("ssh://git@github.com/octo/widgets.git", "token")
            .get_remote_config();

        assert!(result.is_err());
    }
}
