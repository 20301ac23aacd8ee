use crate::config::Settings;

/// Settings for this run. A broken or invalid config file is reported and
/// replaced by the defaults; the command line still applies on top.
pub fn load_settings() -> Settings {
    let loaded = Settings::load()
        .map_err(|e| format!("cannot read config: {e}"))
        .and_then(|s| s.validate().map(|()| s).map_err(|e| format!("invalid config: {e}")));

    loaded.unwrap_or_else(|msg| {
        tracing::warn!("{msg}; using defaults");
        Settings::default()
    })
}
