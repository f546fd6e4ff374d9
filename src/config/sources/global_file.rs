//! Global config file source: <config_dir>/global.yaml

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::{File, FileFormat};
use std::path::{Path, PathBuf};
use tracing::debug;

pub const GLOBAL_CONFIG_FILE: &str = "global.yaml";

/// Path to the global config file.
pub fn global_config_path(config_dir: &Path) -> PathBuf {
    config_dir.join(GLOBAL_CONFIG_FILE)
}

/// Add the global config file source to builder if it exists.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    config_dir: &Path,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let path = global_config_path(config_dir);
    if !path.exists() {
        debug!(
            config_path = %path.display(),
            "No global config file; using built-in defaults"
        );
        return Ok(builder);
    }

    Ok(builder.add_source(
        File::from(path.as_path())
            .format(FileFormat::Yaml)
            .required(false),
    ))
}
