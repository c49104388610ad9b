use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use nimbus_domain::ScrapeConfig;
use nimbus_ports::ServiceRegistry;

use crate::diagnostics::diagnose;
use crate::error::ConfigError;
use crate::resolver::{Resolution, resolve};

pub fn load_from_path(
    path: impl AsRef<Path>,
    registry: &dyn ServiceRegistry,
) -> Result<Resolution, ConfigError> {
    let path = path.as_ref();
    debug!(target: "config", path = %path.display(), "loading configuration");
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&raw, registry)
}

/// Parses, diagnoses and resolves a YAML configuration.
///
/// Jobs without roles get a single ambient-credentials role before resolution.
pub fn load_from_str(
    raw: &str,
    registry: &dyn ServiceRegistry,
) -> Result<Resolution, ConfigError> {
    let mut config = ScrapeConfig::from_yaml_str(raw)?;

    let findings = diagnose(raw);
    for finding in &findings {
        warn!(target: "config", "{finding}");
    }

    config.default_empty_roles();
    let mut resolution = resolve(&config, registry)?;
    resolution.warnings.splice(0..0, findings);
    Ok(resolution)
}
