#![forbid(unsafe_code)]

//! Shared vocabulary for the clip/image host layer.
//!
//! This crate is **contract-only**: wire-level property names, boundary status codes,
//! geometry value types and host configuration. It knows nothing about property storage
//! or clip semantics; those live in `ofxh-property` and `ofxh-clip`.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod geom;
pub mod names;
pub mod status;

pub use error::HostError;
pub use geom::{PointD, RectD, RectI};
pub use status::Status;

pub use config::{
    is_default_chromatic_component, load_host_config_from, load_typed_json, parse_host_config,
    HostConfig, DEFAULT_CHROMATIC_COMPONENTS,
};
