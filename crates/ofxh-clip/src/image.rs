use std::fmt;

use ofxh_core::{names, PointD, RectI};
use ofxh_property::{PropertyError, PropertySet, PropertyView, RawPointer};
use tracing::trace;

use crate::format;
use crate::host::FrameBuffer;
use crate::instance::ClipInstance;
use crate::props::IMAGE_PROPS;

/// A frozen snapshot of one frame: format copied from the clip at construction plus the
/// buffer description handed out by the host.
///
/// The pixel memory is borrowed from the host and never freed here. The reference count
/// is a plain integer: an image belongs to one thread at a time and is handed over, not
/// shared. [`ImageTable`](crate::ImageTable) drives the count and drops the image when it
/// reaches zero.
pub struct Image {
    props: PropertySet,
    reference_count: usize,
    on_destroy: Vec<Box<dyn FnOnce() + Send>>,
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("props", &self.props)
            .field("reference_count", &self.reference_count)
            .field("on_destroy", &self.on_destroy.len())
            .finish()
    }
}

impl Default for Image {
    fn default() -> Self {
        Self::new()
    }
}

impl Image {
    /// An image holding only defaults.
    pub fn new() -> Self {
        Self {
            props: PropertySet::new(&IMAGE_PROPS),
            reference_count: 1,
            on_destroy: Vec::new(),
        }
    }

    /// Format fields only, copied from `clip`. Used for placeholder images.
    pub fn from_clip(clip: &ClipInstance) -> Result<Self, PropertyError> {
        let mut image = Self::new();
        image.copy_clip_format(clip.props())?;
        Ok(image)
    }

    /// Format from `clip` and buffer description from `frame`.
    pub fn with_frame(clip: &ClipInstance, frame: FrameBuffer) -> Result<Self, PropertyError> {
        let mut image = Self::from_clip(clip)?;
        let p = &mut image.props;
        p.set_n::<f64>(names::RENDER_SCALE, &[frame.render_scale.x, frame.render_scale.y])?;
        p.set_pointer(names::IMAGE_DATA, 0, frame.data)?;
        p.set_n::<i32>(names::IMAGE_BOUNDS, &frame.bounds.to_array())?;
        p.set_n::<i32>(
            names::IMAGE_REGION_OF_DEFINITION,
            &frame.region_of_definition.to_array(),
        )?;
        p.set_int(names::IMAGE_ROW_BYTES, 0, frame.row_bytes)?;
        p.set_string(names::IMAGE_FIELD, 0, frame.field)?;
        p.set_string(names::IMAGE_UNIQUE_IDENTIFIER, 0, frame.unique_identifier)?;
        Ok(image)
    }

    fn copy_clip_format(&mut self, clip: PropertyView<'_>) -> Result<(), PropertyError> {
        for name in [names::PIXEL_DEPTH, names::COMPONENTS, names::PREMULTIPLICATION] {
            let v = clip.get_string(name, 0)?;
            self.props.set_string(name, 0, v.into_owned())?;
        }
        let par = clip.get_double(names::PIXEL_ASPECT_RATIO, 0)?;
        self.props.set_double(names::PIXEL_ASPECT_RATIO, 0, par)
    }

    pub fn props(&self) -> &PropertySet {
        &self.props
    }

    /// Run `f` when the image is destroyed.
    pub fn on_destroy(&mut self, f: impl FnOnce() + Send + 'static) {
        self.on_destroy.push(Box::new(f));
    }

    // ---- typed reads ----

    pub fn pixel_depth(&self) -> &str {
        self.props.get_string(names::PIXEL_DEPTH, 0).unwrap_or(names::BIT_DEPTH_NONE)
    }

    pub fn components(&self) -> &str {
        self.props.get_string(names::COMPONENTS, 0).unwrap_or(names::COMPONENT_NONE)
    }

    pub fn premultiplication(&self) -> &str {
        self.props
            .get_string(names::PREMULTIPLICATION, 0)
            .unwrap_or(names::IMAGE_OPAQUE)
    }

    pub fn render_scale(&self) -> PointD {
        match self.props.get_all::<f64>(names::RENDER_SCALE) {
            Ok([x, y]) => PointD::new(*x, *y),
            _ => PointD::default(),
        }
    }

    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.props.get_double(names::PIXEL_ASPECT_RATIO, 0).unwrap_or(1.0)
    }

    pub fn data(&self) -> RawPointer {
        self.props.get_pointer(names::IMAGE_DATA, 0).unwrap_or(RawPointer::NULL)
    }

    pub fn bounds(&self) -> RectI {
        self.rect(names::IMAGE_BOUNDS)
    }

    pub fn region_of_definition(&self) -> RectI {
        self.rect(names::IMAGE_REGION_OF_DEFINITION)
    }

    fn rect(&self, name: &str) -> RectI {
        match self.props.get_all::<i32>(name) {
            Ok(&[x1, y1, x2, y2]) => RectI::new(x1, y1, x2, y2),
            _ => RectI::default(),
        }
    }

    /// Negative when rows run bottom-up in memory.
    pub fn row_bytes(&self) -> i32 {
        self.props.get_int(names::IMAGE_ROW_BYTES, 0).unwrap_or(0)
    }

    pub fn field(&self) -> &str {
        self.props.get_string(names::IMAGE_FIELD, 0).unwrap_or("")
    }

    pub fn unique_identifier(&self) -> &str {
        self.props.get_string(names::IMAGE_UNIQUE_IDENTIFIER, 0).unwrap_or("")
    }

    pub fn bytes_per_pixel(&self) -> Option<usize> {
        format::bytes_per_pixel(self.pixel_depth(), self.components())
    }

    /// Address of pixel `(x, y)`, or `None` outside the bounds or with no data.
    pub fn pixel_address(&self, x: i32, y: i32) -> Option<usize> {
        let bounds = self.bounds();
        let data = self.data();
        if data.is_null() || !bounds.contains(x, y) {
            return None;
        }
        let bpp = i64::try_from(self.bytes_per_pixel()?).ok()?;
        let row = (i64::from(y) - i64::from(bounds.y1)).checked_mul(i64::from(self.row_bytes()))?;
        let col = (i64::from(x) - i64::from(bounds.x1)).checked_mul(bpp)?;
        let offset = isize::try_from(row.checked_add(col)?).ok()?;
        data.addr().checked_add_signed(offset)
    }

    // ---- reference counting, driven by the image table ----

    pub(crate) fn add_reference(&mut self) {
        self.reference_count += 1;
        trace!(image = %self.unique_identifier(), count = self.reference_count, "image reference added");
    }

    /// Returns true when the last reference is gone.
    pub(crate) fn release_reference(&mut self) -> bool {
        self.reference_count = self.reference_count.saturating_sub(1);
        trace!(image = %self.unique_identifier(), count = self.reference_count, "image reference released");
        self.reference_count == 0
    }
}

impl Drop for Image {
    fn drop(&mut self) {
        trace!(image = %self.unique_identifier(), "image destroyed");
        for f in self.on_destroy.drain(..) {
            f();
        }
    }
}
