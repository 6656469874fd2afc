#![forbid(unsafe_code)]

//! Typed property container shared by clip descriptors, clip instances and images.
//!
//! A [`PropertySet`] is an ordered collection of named slots. Each slot has a fixed type
//! and dimension chosen at declaration time (from a static [`PropSpec`] table), a
//! plugin-read-only flag, and either stored values or an override hook that resolves the
//! value on every read. Hooked reads go through a [`PropertyView`], which pairs the set
//! with the [`GetHook`] that owns the live values.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod error;
pub mod hook;
pub mod set;
pub mod spec;
pub mod value;

pub use error::PropertyError;
pub use hook::{GetHook, HookTag, PropertyView};
pub use set::{Property, PropertySet};
pub use spec::{PropDefault, PropSpec, PropertyType};
pub use value::{PropValue, RawPointer, Scalar, Values};

pub type Result<T> = std::result::Result<T, PropertyError>;
