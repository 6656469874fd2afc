//! Owning tables behind the handle boundary.

use ofxh_property::{PropertyError, PropertyView};
use tracing::trace;

use crate::base::ClipBase;
use crate::descriptor::ClipDescriptor;
use crate::handle::{Arena, Handle};
use crate::image::Image;
use crate::instance::ClipInstance;

pub type ClipHandle = Handle<ClipEntry>;
pub type ImageHandle = Handle<Image>;

/// A clip in either of its two roles.
#[derive(Debug)]
pub enum ClipEntry {
    Descriptor(ClipDescriptor),
    Instance(ClipInstance),
}

impl ClipEntry {
    pub fn base(&self) -> &ClipBase {
        match self {
            ClipEntry::Descriptor(d) => d.base(),
            ClipEntry::Instance(c) => c.base(),
        }
    }

    pub fn name(&self) -> &str {
        self.base().name()
    }

    /// Properties as the plugin reads them. Descriptors have no hooked slots.
    pub fn props(&self) -> PropertyView<'_> {
        match self {
            ClipEntry::Descriptor(d) => PropertyView::stored(d.base().props()),
            ClipEntry::Instance(c) => c.props(),
        }
    }

    pub fn as_instance(&self) -> Option<&ClipInstance> {
        match self {
            ClipEntry::Instance(c) => Some(c),
            ClipEntry::Descriptor(_) => None,
        }
    }

    pub fn as_instance_mut(&mut self) -> Option<&mut ClipInstance> {
        match self {
            ClipEntry::Instance(c) => Some(c),
            ClipEntry::Descriptor(_) => None,
        }
    }

    pub fn as_descriptor(&self) -> Option<&ClipDescriptor> {
        match self {
            ClipEntry::Descriptor(d) => Some(d),
            ClipEntry::Instance(_) => None,
        }
    }
}

/// Descriptors and instances of one effect, addressed by [`ClipHandle`].
#[derive(Debug, Default)]
pub struct ClipTable {
    clips: Arena<ClipEntry>,
}

impl ClipTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_descriptor(&mut self, desc: ClipDescriptor) -> Result<ClipHandle, PropertyError> {
        self.clips.insert(ClipEntry::Descriptor(desc))
    }

    pub fn insert_instance(&mut self, clip: ClipInstance) -> Result<ClipHandle, PropertyError> {
        self.clips.insert(ClipEntry::Instance(clip))
    }

    pub fn remove(&mut self, h: ClipHandle) -> Option<ClipEntry> {
        self.clips.remove(h)
    }

    pub fn get(&self, h: ClipHandle) -> Option<&ClipEntry> {
        self.clips.get(h)
    }

    pub fn get_mut(&mut self, h: ClipHandle) -> Option<&mut ClipEntry> {
        self.clips.get_mut(h)
    }

    pub fn len(&self) -> usize {
        self.clips.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clips.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClipHandle, &ClipEntry)> {
        self.clips.iter()
    }

    /// Handle of the clip called `name`. Instances win over descriptors of the same name.
    pub fn clip_get_handle(&self, name: &str) -> Option<ClipHandle> {
        let mut found = None;
        for (h, entry) in self.clips.iter().filter(|(_, e)| e.name() == name) {
            if entry.as_instance().is_some() {
                return Some(h);
            }
            found.get_or_insert(h);
        }
        found
    }

    pub fn clip_get_property_set(&self, h: ClipHandle) -> Result<PropertyView<'_>, PropertyError> {
        self.get(h).map(ClipEntry::props).ok_or(PropertyError::BadHandle)
    }
}

/// Live images and their reference counts.
///
/// An image enters with one reference and is dropped when the last one is released.
/// Handles to a dropped image go stale.
#[derive(Debug, Default)]
pub struct ImageTable {
    images: Arena<Image>,
}

impl ImageTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, image: Image) -> Result<ImageHandle, PropertyError> {
        let h = self.images.insert(image)?;
        trace!(handle = ?h, "image registered");
        Ok(h)
    }

    pub fn get(&self, h: ImageHandle) -> Option<&Image> {
        self.images.get(h)
    }

    pub fn add_reference(&mut self, h: ImageHandle) -> Result<(), PropertyError> {
        self.images
            .get_mut(h)
            .map(Image::add_reference)
            .ok_or(PropertyError::BadHandle)
    }

    /// Drop one reference; returns true when that destroyed the image.
    pub fn release_reference(&mut self, h: ImageHandle) -> Result<bool, PropertyError> {
        let image = self.images.get_mut(h).ok_or(PropertyError::BadHandle)?;
        if !image.release_reference() {
            return Ok(false);
        }
        drop(self.images.remove(h));
        Ok(true)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
