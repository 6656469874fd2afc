use std::fmt;
use std::path::PathBuf;

/// Host-level errors for configuration and file loading.
///
/// Property and clip operations report `ofxh_property::PropertyError` instead; this type
/// only covers the parts of the host that touch the filesystem.
#[derive(Debug)]
pub enum HostError {
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    InvalidConfig {
        path: PathBuf,
        msg: String,
    },

    Other(String),
}

impl HostError {
    pub fn other<T: Into<String>>(s: T) -> Self {
        HostError::Other(s.into())
    }
}

impl fmt::Display for HostError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostError::Io { path, source } => {
                write!(f, "io error at {}: {}", path.display(), source)
            }
            HostError::Json { path, source } => {
                write!(f, "json parse error at {}: {}", path.display(), source)
            }
            HostError::InvalidConfig { path, msg } => {
                write!(f, "invalid config at {}: {}", path.display(), msg)
            }
            HostError::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for HostError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            HostError::Io { source, .. } => Some(source),
            HostError::Json { source, .. } => Some(source),
            _ => None,
        }
    }
}
