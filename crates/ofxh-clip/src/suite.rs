//! The status-returning surface a plugin calls through.
//!
//! Everything here takes handles, never references, and reports failures as a boundary
//! [`Status`]. Library errors are converted at this layer and nowhere else.

use ofxh_core::{RectD, Status};
use ofxh_property::{GetHook, PropValue, PropertyError, PropertySet, PropertyView, RawPointer};
use tracing::warn;

use crate::instance::ClipInstance;
use crate::table::{ClipEntry, ClipHandle, ClipTable, ImageHandle, ImageTable};

/// Opaque property-set handle: the properties of a clip or of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertySetHandle {
    Clip(ClipHandle),
    Image(ImageHandle),
}

/// The clips and images of one effect instance, seen from the plugin side.
#[derive(Debug, Default)]
pub struct ClipSuite {
    pub clips: ClipTable,
    pub images: ImageTable,
}

impl ClipSuite {
    pub fn new() -> Self {
        Self::default()
    }

    fn view(&self, h: PropertySetHandle) -> Result<PropertyView<'_>, PropertyError> {
        match h {
            PropertySetHandle::Clip(c) => self.clips.clip_get_property_set(c),
            PropertySetHandle::Image(i) => self
                .images
                .get(i)
                .map(|img| PropertyView::stored(img.props()))
                .ok_or(PropertyError::BadHandle),
        }
    }

    // ---- property suite ----

    pub fn prop_get<T: PropValue>(&self, h: PropertySetHandle, name: &str, index: usize) -> Result<T, Status> {
        Ok(self.view(h)?.get::<T>(name, index)?)
    }

    pub fn prop_get_n<T: PropValue>(&self, h: PropertySetHandle, name: &str, count: usize) -> Result<Vec<T>, Status> {
        Ok(self.view(h)?.get_n::<T>(name, count)?)
    }

    pub fn prop_get_string(&self, h: PropertySetHandle, name: &str, index: usize) -> Result<String, Status> {
        self.prop_get::<String>(h, name, index)
    }

    pub fn prop_get_int(&self, h: PropertySetHandle, name: &str, index: usize) -> Result<i32, Status> {
        self.prop_get::<i32>(h, name, index)
    }

    pub fn prop_get_double(&self, h: PropertySetHandle, name: &str, index: usize) -> Result<f64, Status> {
        self.prop_get::<f64>(h, name, index)
    }

    pub fn prop_get_pointer(&self, h: PropertySetHandle, name: &str, index: usize) -> Result<RawPointer, Status> {
        self.prop_get::<RawPointer>(h, name, index)
    }

    pub fn prop_get_dimension(&self, h: PropertySetHandle, name: &str) -> Result<usize, Status> {
        Ok(self.view(h)?.get_dimension(name)?)
    }

    /// Plugin write. Read-only and host-resolved slots are refused, as is anything on an image.
    pub fn prop_set<T: PropValue>(
        &mut self,
        h: PropertySetHandle,
        name: &str,
        index: usize,
        value: T,
    ) -> Result<(), Status> {
        self.write(h, name, |set| set.set::<T>(name, index, value))?;
        self.notify(h, name, true, index);
        Ok(())
    }

    pub fn prop_set_n<T: PropValue>(&mut self, h: PropertySetHandle, name: &str, values: &[T]) -> Result<(), Status> {
        self.write(h, name, |set| set.set_n::<T>(name, values))?;
        self.notify(h, name, false, values.len());
        Ok(())
    }

    pub fn prop_set_string(&mut self, h: PropertySetHandle, name: &str, index: usize, value: &str) -> Result<(), Status> {
        self.prop_set::<String>(h, name, index, value.to_string())
    }

    pub fn prop_set_int(&mut self, h: PropertySetHandle, name: &str, index: usize, value: i32) -> Result<(), Status> {
        self.prop_set::<i32>(h, name, index, value)
    }

    pub fn prop_set_double(&mut self, h: PropertySetHandle, name: &str, index: usize, value: f64) -> Result<(), Status> {
        self.prop_set::<f64>(h, name, index, value)
    }

    pub fn prop_set_pointer(
        &mut self,
        h: PropertySetHandle,
        name: &str,
        index: usize,
        value: RawPointer,
    ) -> Result<(), Status> {
        self.prop_set::<RawPointer>(h, name, index, value)
    }

    /// Restore a declared default. Clip instances refuse every reset.
    pub fn prop_reset(&mut self, h: PropertySetHandle, name: &str) -> Result<(), Status> {
        if let PropertySetHandle::Clip(c) = h {
            if let Some(ClipEntry::Instance(inst)) = self.clips.get(c) {
                return inst.reset(name).map_err(Status::from);
            }
        }
        self.write(h, name, |set| set.reset(name))
    }

    fn write(
        &mut self,
        h: PropertySetHandle,
        name: &str,
        f: impl FnOnce(&mut PropertySet) -> Result<(), PropertyError>,
    ) -> Result<(), Status> {
        let set = match h {
            PropertySetHandle::Image(i) => {
                if self.images.get(i).is_none() {
                    return Err(Status::ErrBadHandle);
                }
                warn!(property = name, "plugin write to an image refused");
                return Err(PropertyError::ReadOnly(name.to_string()).status());
            }
            PropertySetHandle::Clip(c) => match self.clips.get_mut(c) {
                Some(ClipEntry::Descriptor(d)) => d.base_mut().props_mut(),
                Some(ClipEntry::Instance(inst)) => inst.props_mut(),
                None => return Err(Status::ErrBadHandle),
            },
        };
        let p = set.property(name)?;
        if p.hook_tag().is_some() {
            warn!(property = name, "plugin write to a host-resolved property refused");
            return Err(PropertyError::ResolvedByHost(name.to_string()).status());
        }
        if p.is_plugin_read_only() {
            return Err(PropertyError::ReadOnly(name.to_string()).status());
        }
        Ok(f(set)?)
    }

    fn notify(&self, h: PropertySetHandle, name: &str, single: bool, index_or_count: usize) {
        if let PropertySetHandle::Clip(c) = h {
            if let Some(ClipEntry::Instance(inst)) = self.clips.get(c) {
                inst.notify(name, single, index_or_count);
            }
        }
    }

    // ---- clip suite ----

    /// Handle of the named clip and of its property set.
    pub fn clip_get_handle(&self, name: &str) -> Result<(ClipHandle, PropertySetHandle), Status> {
        let h = self
            .clips
            .clip_get_handle(name)
            .ok_or(Status::ErrUnknown)?;
        Ok((h, PropertySetHandle::Clip(h)))
    }

    pub fn clip_get_property_set(&self, clip: ClipHandle) -> Result<PropertySetHandle, Status> {
        if self.clips.get(clip).is_none() {
            return Err(Status::ErrBadHandle);
        }
        Ok(PropertySetHandle::Clip(clip))
    }

    /// Fetch a frame as a new image holding one reference.
    pub fn clip_get_image(&mut self, clip: ClipHandle, time: f64, bounds: Option<RectD>) -> Result<ImageHandle, Status> {
        let inst = self.instance(clip)?;
        match inst.get_image(time, bounds)? {
            Some(image) => Ok(self.images.insert(image)?),
            None => Err(Status::Failed),
        }
    }

    pub fn clip_release_image(&mut self, image: ImageHandle) -> Result<(), Status> {
        self.images.release_reference(image)?;
        Ok(())
    }

    pub fn clip_get_region_of_definition(&self, clip: ClipHandle, time: f64) -> Result<RectD, Status> {
        Ok(self.instance(clip)?.region_of_definition(time))
    }

    fn instance(&self, clip: ClipHandle) -> Result<&ClipInstance, Status> {
        match self.clips.get(clip) {
            Some(ClipEntry::Instance(inst)) => Ok(inst),
            // descriptors carry no images
            Some(ClipEntry::Descriptor(_)) | None => Err(Status::ErrBadHandle),
        }
    }
}
