//! Scene presets and launch glue shared by the demo binaries.

pub mod scenes;

use tessera_engine::logging::{init_logging, LoggingConfig};
use tessera_engine::SceneDesc;

/// Initializes logging and runs `scene` until its window closes.
pub fn launch(scene: SceneDesc) -> anyhow::Result<()> {
    init_logging(LoggingConfig::default());
    log::info!("starting `{}`", scene.label);

    tessera_engine::run(scene).inspect_err(|e| log::error!("{e:#}"))
}
