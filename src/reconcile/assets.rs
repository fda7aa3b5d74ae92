//! Release asset pruning.
use log::*;

use crate::{
    Result,
    forge::{
        config::PLACEHOLDER_ASSET_NAME, manager::ForgeManager,
        request::ReleaseAsset,
    },
};

/// Every asset except the placeholder.
pub fn assets_to_delete(assets: &[ReleaseAsset]) -> Vec<&ReleaseAsset> {
    assets
        .iter()
        .filter(|asset| asset.name != PLACEHOLDER_ASSET_NAME)
        .collect()
}

/// Delete all non-placeholder assets of a release, one at a time. The first
/// failed delete aborts the rest.
pub async fn prune_assets(
    forge: &ForgeManager,
    release_id: u64,
) -> Result<usize> {
    let assets = forge.list_release_assets(release_id).await?;
    let doomed = assets_to_delete(&assets);

    for asset in doomed.iter() {
        forge.delete_release_asset(asset).await?;
        info!("Asset '{}' was successfully deleted", asset.name);
    }

    info!(
        "{} asset(s) have been deleted from release {release_id}",
        doomed.len()
    );

    Ok(doomed.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        StewardError,
        forge::{config::RemoteConfig, traits::MockForge},
    };

    fn asset(id: u64, name: &str) -> ReleaseAsset {
        ReleaseAsset {
            id,
            name: name.to_string(),
        }
    }

    fn mock_forge() -> MockForge {
        let mut mock_forge = MockForge::new();
        mock_forge
            .expect_remote_config()
            .returning(RemoteConfig::default);
        mock_forge
    }

    #[test]
    fn placeholder_is_never_selected() {
        let assets = vec![
            asset(1, "placeholder"),
            asset(2, "bin.tar.gz"),
            asset(3, "placeholder.txt"),
        ];

        let ids: Vec<u64> =
            assets_to_delete(&assets).iter().map(|a| a.id).collect();

        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn deletes_everything_but_placeholder() {
        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_release_assets()
            .withf(|id| *id == 42)
            .times(1)
            .returning(|_| {
                Ok(vec![asset(1, "placeholder"), asset(2, "bin.tar.gz")])
            });
        mock_forge
            .expect_delete_release_asset()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|_| Ok(()));

        let forge = ForgeManager::new(Box::new(mock_forge));
        let deleted = prune_assets(&forge, 42).await.unwrap();

        assert_eq!(deleted, 1);
    }

    #[tokio::test]
    async fn only_placeholder_means_no_deletes() {
        let mut mock_forge = mock_forge();
        mock_forge
            .expect_list_release_assets()
            .returning(|_| Ok(vec![asset(1, "placeholder")]));
        mock_forge.expect_delete_release_asset().never();

        let forge = ForgeManager::new(Box::new(mock_forge));

        assert_eq!(prune_assets(&forge, 42).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn first_failed_delete_aborts() {
        let mut mock_forge = mock_forge();
        mock_forge.expect_list_release_assets().returning(|_| {
            Ok(vec![asset(1, "a.zip"), asset(2, "b.zip"), asset(3, "c.zip")])
        });
        mock_forge
            .expect_delete_release_asset()
            .withf(|id| *id == 1)
            .times(1)
            .returning(|_| Ok(()));
        mock_forge
            .expect_delete_release_asset()
            .withf(|id| *id == 2)
            .times(1)
            .returning(|_| Err(StewardError::forge("404 Not Found")));

        let forge = ForgeManager::new(Box::new(mock_forge));
        let result = prune_assets(&forge, 42).await;

        assert!(matches!(result, Err(StewardError::ForgeError(_))));
    }
}
