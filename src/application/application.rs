use snafu::Snafu;
use snafu::prelude::*;
use tracing::{debug, info};

use crate::application::RuntimeConfig;
use crate::panel::PanelController;
use crate::snapshot::{PanelSnapshot, SnapshotPersistError};
use crate::workspace::{ManifestError, PanelManifest, demo_edit_session, demo_mutations, seed_tree};

pub struct Application;

impl Application {
    pub async fn run(app_config: impl Into<RuntimeConfig>) -> Result<(), ApplicationError> {
        let app_config: RuntimeConfig = app_config.into();
        debug!("Running with config: {:?}", app_config);

        let snapshot = if app_config.restore {
            PanelSnapshot::read(&app_config.root).await
        } else {
            PanelSnapshot::default()
        };

        let mut controller = Self::load_panel(&app_config, &snapshot).await?;

        if app_config.demo {
            demo_mutations(&mut controller);
            let edited = demo_edit_session();
            info!("Demo edit session produced:\n{}", edited.text());
        }

        for row in controller.rows(app_config.flat) {
            println!("{row}");
        }

        PanelSnapshot::capture(&controller)
            .write(&app_config.root)
            .await
            .context(SnapshotSnafu)?;

        Ok(())
    }

    /// Picks the panel content source: the manifest when one exists, a
    /// restored previous session when one was persisted, and the built-in
    /// sample content as the last resort. Expansion state comes from the
    /// snapshot in every case.
    async fn load_panel(
        config: &RuntimeConfig,
        snapshot: &PanelSnapshot,
    ) -> Result<PanelController, ApplicationError> {
        match PanelManifest::read(&config.root).await {
            Ok(manifest) => {
                let tree = manifest.build_tree();
                info!(
                    "Loaded panel manifest with {} top-level directories",
                    tree.child_count(),
                );
                let mut controller = PanelController::from_root(tree);
                let (_, state) = snapshot.restore();
                controller.set_state(state);
                Ok(controller)
            }
            Err(ManifestError::ReadError { .. }) if !snapshot.is_empty() => {
                info!("No panel manifest found, restoring previous session");
                let (tree, state) = snapshot.restore();
                let mut controller = PanelController::from_root(tree);
                controller.set_state(state);
                Ok(controller)
            }
            Err(ManifestError::ReadError { .. }) => {
                info!("No panel manifest found, seeding sample content");
                Ok(PanelController::from_root(seed_tree()))
            }
            Err(error) => Err(error).context(ManifestSnafu),
        }
    }
}

#[derive(Debug, Snafu)]
pub enum ApplicationError {
    #[snafu(display("Critical failure encountered while loading the panel manifest"))]
    ManifestError { source: ManifestError },
    #[snafu(display("Critical failure encountered while persisting the panel snapshot"))]
    SnapshotError { source: SnapshotPersistError },
}
