use ofxh_core::Status;
use thiserror::Error;

use crate::spec::PropertyType;

/// Errors raised by property reads, writes and declarations.
///
/// Every variant maps onto one boundary [`Status`]; see [`PropertyError::status`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PropertyError {
    #[error("unknown property '{0}'")]
    Unknown(String),

    #[error("property '{0}' is already declared")]
    Exists(String),

    #[error("property '{name}' holds {found} values, not {requested}")]
    WrongType {
        name: String,
        requested: PropertyType,
        found: PropertyType,
    },

    #[error("index {index} out of range for property '{name}' (dimension {dimension})")]
    BadIndex {
        name: String,
        index: usize,
        dimension: usize,
    },

    #[error("property '{0}' is read only")]
    ReadOnly(String),

    #[error("property '{0}' is resolved by the host and holds no stored value")]
    ResolvedByHost(String),

    #[error("'{0}' is not a property the host can resolve")]
    NotResolvable(String),

    #[error("missing host feature: {0}")]
    MissingHostFeature(String),

    #[error("stale or unknown handle")]
    BadHandle,

    #[error("{0}")]
    Failed(String),
}

impl PropertyError {
    pub fn failed<T: Into<String>>(s: T) -> Self {
        PropertyError::Failed(s.into())
    }

    pub fn status(&self) -> Status {
        match self {
            PropertyError::Unknown(_) => Status::ErrUnknown,
            PropertyError::Exists(_) => Status::ErrExists,
            PropertyError::WrongType { .. }
            | PropertyError::BadIndex { .. }
            | PropertyError::ReadOnly(_)
            | PropertyError::ResolvedByHost(_)
            | PropertyError::NotResolvable(_) => Status::ErrValue,
            PropertyError::MissingHostFeature(_) => Status::ErrMissingHostFeature,
            PropertyError::BadHandle => Status::ErrBadHandle,
            PropertyError::Failed(_) => Status::Failed,
        }
    }
}

impl From<PropertyError> for Status {
    fn from(e: PropertyError) -> Self {
        e.status()
    }
}
