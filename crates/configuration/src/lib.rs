use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use error::ConfigError;
pub use settings::{ExportSettings, Settings, ViewSettings};

/// Environment variables with this prefix override file values,
/// e.g. `STOCKCAST__EXPORT__DATE_FORMAT`.
pub const ENV_PREFIX: &str = "STOCKCAST";

/// Loads the application settings.
///
/// Built-in defaults are overlaid by the optional TOML file at `path` and then by
/// `STOCKCAST__*` environment variables. The result is validated before it is returned.
pub fn load_settings(path: &Path) -> Result<Settings, ConfigError> {
    load_with(path, environment())
}

fn environment() -> config::Environment {
    config::Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}

fn load_with(path: &Path, env: config::Environment) -> Result<Settings, ConfigError> {
    let builder = config::Config::builder()
        // The file is optional; every field has a default.
        .add_source(config::File::from(path).required(false))
        .add_source(env)
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    tracing::debug!(?settings, "Loaded settings.");
    Ok(settings)
}
