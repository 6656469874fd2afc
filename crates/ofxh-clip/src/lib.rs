#![forbid(unsafe_code)]

//! Clips and images: the negotiation and data-exchange layer between a host and an
//! image-processing plugin.
//!
//! - [`ClipDescriptor`]: what the plugin declared at description time.
//! - [`ClipInstance`]: a descriptor bound to one effect instance. Live properties are not
//!   stored; every read is answered by the host through [`ClipHost`].
//! - [`Image`]: a frozen snapshot of one frame's buffer and format, reference counted
//!   through an [`ImageTable`].
//! - [`suite`]: the status-returning boundary the plugin sees, addressed by
//!   generation-checked handles.
//!
//! Nothing here is internally synchronized. One clip instance serves one query at a time;
//! independent instances may be driven from different threads.
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(missing_debug_implementations)]

pub mod base;
pub mod descriptor;
pub mod format;
pub mod handle;
pub mod host;
pub mod image;
pub mod instance;
pub mod live;
pub mod negotiate;
pub mod props;
pub mod suite;
pub mod table;

pub use base::ClipBase;
pub use descriptor::{ClipDeclaration, ClipDescriptor};
pub use handle::{Arena, Handle};
pub use host::{ClipHost, EffectInstance, FrameBuffer, FrameLayout, StaticClipHost};
pub use image::Image;
pub use instance::ClipInstance;
pub use live::LiveProperty;
pub use negotiate::find_supported_comp;
pub use suite::{ClipSuite, PropertySetHandle};
pub use table::{ClipEntry, ClipHandle, ClipTable, ImageHandle, ImageTable};

pub use ofxh_property::{PropertyError, PropertySet, PropertyView, RawPointer, Scalar};
