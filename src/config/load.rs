use std::{env, path::PathBuf};

use super::schema::Settings;

impl Settings {
    /// Defaults, then the config file if there is one, then `MOBILIZE__*`
    /// variables (`MOBILIZE__WORKERS__COUNT=4`).
    pub fn load() -> Result<Self, ::config::ConfigError> {
        let config_path = resolve_config_path();

        let mut builder = ::config::Config::builder();

        if let Some(path) = &config_path {
            builder = builder.add_source(::config::File::from(path.as_path()).required(false));
        }

        builder = builder.add_source(
            ::config::Environment::with_prefix("MOBILIZE")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    /// Reject values the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), String> {
        if self.workers.count == Some(0) {
            return Err("workers.count must be >= 1".to_string());
        }
        if self.workers.queue_bound == Some(0) {
            return Err("workers.queue_bound must be >= 1".to_string());
        }
        if !self.transcode.quality.is_finite() {
            return Err("transcode.quality must be a number".to_string());
        }
        Ok(())
    }
}

/// `MOBILIZE_CONFIG_PATH` when set, otherwise [`default_config_path`].
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Some(p) = env::var_os("MOBILIZE_CONFIG_PATH") {
        return Some(PathBuf::from(p));
    }
    default_config_path()
}

/// `$XDG_CONFIG_HOME/mobilize/config.toml`, or under `~/.config`.
pub fn default_config_path() -> Option<PathBuf> {
    env::var_os("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .or_else(|| env::var_os("HOME").map(|home| PathBuf::from(home).join(".config")))
        .map(|dir| dir.join("mobilize").join("config.toml"))
}
