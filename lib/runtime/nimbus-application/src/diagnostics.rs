//! Strict re-read of a raw configuration.
//!
//! The pass only produces warnings. It never decides whether a load succeeds.

use nimbus_domain::ScrapeConfig;
use serde_ignored::Path;

use crate::warning::ConfigWarning;

/// Reports unknown fields and a missing `apiVersion` in `raw`.
pub fn diagnose(raw: &str) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();
    let config: ScrapeConfig = match serde_ignored::deserialize(
        serde_yaml::Deserializer::from_str(raw),
        |path| {
            warnings.push(ConfigWarning::UnknownField {
                path: field_path(&path),
            })
        },
    ) {
        Ok(config) => config,
        Err(err) => {
            return vec![ConfigWarning::Syntax {
                message: err.to_string(),
            }];
        }
    };

    if config.api_version.as_deref().unwrap_or_default().is_empty() {
        warnings.push(ConfigWarning::MissingApiVersion);
    }
    warnings
}

/// Renders `path` as `discovery.jobs[0].metrics[1].stat`.
fn field_path(path: &Path<'_>) -> String {
    match path {
        Path::Root => String::new(),
        Path::Seq { parent, index } => format!("{}[{index}]", field_path(parent)),
        Path::Map { parent, key } => {
            let parent = field_path(parent);
            if parent.is_empty() {
                key.clone()
            } else {
                format!("{parent}.{key}")
            }
        }
        Path::Some { parent }
        | Path::NewtypeStruct { parent }
        | Path::NewtypeVariant { parent } => field_path(parent),
    }
}
