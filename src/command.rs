//! Phase execution: validate inputs, connect to the forge, reconcile and
//! report.
use log::*;

use crate::{
    Result,
    cli::{Cli, Command, MainArgs, PostArgs},
    forge::{
        config::RemoteConfig, github::Github, manager::ForgeManager,
    },
    output,
    reconcile::{ReconcileResult, Reconciler, Stage},
};

/// Run the phase selected on the command line. Configuration and input
/// errors surface before the forge client is built.
pub async fn execute(cli: &Cli) -> Result<()> {
    let remote_config = cli.get_remote_config()?;

    match &cli.command {
        Command::Main(args) => {
            let result = main_phase(remote_config, args).await?;
            output::publish(&result)
                .map_err(|e| e.in_stage(Stage::ResultReporter))
        }
        Command::Post(args) => post_phase(remote_config, args).await,
    }
}

async fn create_reconciler(remote_config: RemoteConfig) -> Result<Reconciler> {
    info!(
        "connecting to {} for {}",
        remote_config.api_url,
        remote_config.path()
    );

    let forge = Github::new(remote_config).await?;

    Ok(Reconciler::new(ForgeManager::new(Box::new(forge))))
}

async fn main_phase(
    remote_config: RemoteConfig,
    args: &MainArgs,
) -> Result<ReconcileResult> {
    let request = args.to_request()?;
    let reconciler = create_reconciler(remote_config).await?;
    reconciler.run_main(&request).await
}

async fn post_phase(remote_config: RemoteConfig, args: &PostArgs) -> Result<()> {
    let request = args.to_request()?;
    let reconciler = create_reconciler(remote_config).await?;
    reconciler.run_post(&request).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StewardError;

    fn cli(token: &str, draft: &str) -> Cli {
        Cli {
            repo: "octo/widgets".into(),
            token: token.into(),
            api_url: Some("http://127.0.0.1:9".into()),
            dry_run: false,
            debug: false,
            command: Command::Main(MainArgs {
                id: 42,
                new_name: None,
                new_body: None,
                new_tag: None,
                delete_assets: None,
                delete_tags_prefix: None,
                new_draft_status: Some(draft.into()),
                commitish: "abc123".into(),
            }),
        }
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let err = execute(&cli("", "true")).await.unwrap_err();

        assert!(matches!(err, StewardError::InvalidConfig(_)));
    }

    #[tokio::test]
    async fn malformed_draft_status_fails_before_any_request() {
        let err = execute(&cli("token", "maybe")).await.unwrap_err();

        assert!(matches!(err, StewardError::InvalidConfig(_)));
        assert!(err.stage().is_none());
    }
}
