//! Host configuration (JSON).
//!
//! Every field has a default, so an empty object `{}` is a valid configuration.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::HostError;
use crate::names;

/// Components treated as chromatic when the effect does not say otherwise.
pub const DEFAULT_CHROMATIC_COMPONENTS: [&str; 2] = [names::COMPONENT_RGBA, names::COMPONENT_ALPHA];

pub fn is_default_chromatic_component(comp: &str) -> bool {
    DEFAULT_CHROMATIC_COMPONENTS.contains(&comp)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostConfig {
    /// Components the negotiation step may substitute for one another.
    #[serde(default = "default_chromatic_components")]
    pub chromatic_components: Vec<String>,

    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_chromatic_components() -> Vec<String> {
    DEFAULT_CHROMATIC_COMPONENTS
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            chromatic_components: default_chromatic_components(),
            log_filter: default_log_filter(),
        }
    }
}

impl HostConfig {
    pub fn is_chromatic_component(&self, comp: &str) -> bool {
        self.chromatic_components.iter().any(|c| c == comp)
    }

    fn validate(&self, path: &Path) -> Result<(), HostError> {
        if self.chromatic_components.is_empty() {
            return Err(HostError::InvalidConfig {
                path: path.to_path_buf(),
                msg: "chromatic_components must not be empty".to_string(),
            });
        }
        if let Some(bad) = self.chromatic_components.iter().find(|c| c.trim().is_empty()) {
            return Err(HostError::InvalidConfig {
                path: path.to_path_buf(),
                msg: format!("chromatic_components contains a blank entry: {bad:?}"),
            });
        }
        Ok(())
    }
}

/// Read and deserialize any JSON document, keeping the path in every error.
pub fn load_typed_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T, HostError> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|source| HostError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_slice(&bytes).map_err(|source| HostError::Json {
        path: path.to_path_buf(),
        source,
    })
}

pub fn load_host_config_from(path: impl AsRef<Path>) -> Result<HostConfig, HostError> {
    let path = path.as_ref();
    let cfg: HostConfig = load_typed_json(path)?;
    cfg.validate(path)?;
    Ok(cfg)
}

/// Parse a configuration held in memory (embedded in a session file, for instance).
pub fn parse_host_config(text: &str) -> Result<HostConfig, HostError> {
    let origin = Path::new("<memory>");
    let cfg: HostConfig = serde_json::from_str(text).map_err(|source| HostError::Json {
        path: origin.to_path_buf(),
        source,
    })?;
    cfg.validate(origin)?;
    Ok(cfg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_takes_defaults() {
        let cfg = parse_host_config("{}").unwrap();
        assert_eq!(cfg, HostConfig::default());
        assert!(cfg.is_chromatic_component(names::COMPONENT_RGBA));
        assert!(cfg.is_chromatic_component(names::COMPONENT_ALPHA));
        assert!(!cfg.is_chromatic_component(names::COMPONENT_XY));
        assert_eq!(cfg.log_filter, "info");
    }

    #[test]
    fn chromatic_set_can_be_widened() {
        let cfg = parse_host_config(
            r#"{ "chromatic_components": ["OfxImageComponentRGBA", "OfxImageComponentAlpha", "OfxImageComponentRGB"] }"#,
        )
        .unwrap();
        assert!(cfg.is_chromatic_component(names::COMPONENT_RGB));
    }

    #[test]
    fn empty_chromatic_set_is_rejected() {
        let err = parse_host_config(r#"{ "chromatic_components": [] }"#).unwrap_err();
        assert!(matches!(err, HostError::InvalidConfig { .. }), "got {err}");
    }

    #[test]
    fn missing_file_reports_path() {
        let err = load_host_config_from("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, HostError::Io { .. }));
        assert!(err.to_string().contains("/definitely/not/here.json"));
    }

    #[test]
    fn default_chromatic_set_is_rgba_and_alpha() {
        assert!(is_default_chromatic_component(names::COMPONENT_RGBA));
        assert!(is_default_chromatic_component(names::COMPONENT_ALPHA));
        assert!(!is_default_chromatic_component(names::COMPONENT_RGB));
        assert!(!is_default_chromatic_component("CustomXYZ"));
    }
}
