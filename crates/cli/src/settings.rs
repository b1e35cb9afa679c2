//! Settings for the `locanda` binary. Configuration is written in
//! `settings.toml`; every key has a default so the file is optional.

use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Settings {
    /// Directory holding the JSON snapshot files.
    pub data_dir: String,
    /// Log level passed to the tracing env filter.
    pub level: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("data_dir", "./locanda_data")?
            .set_default("level", "info")?
            .add_source(File::with_name("settings").required(false))
            .build()?
            .try_deserialize()
    }
}
