//! Collaborators supplied by the host: the effect instance that owns the clips, and the
//! per-clip resolver that answers live property queries.

use ofxh_core::{is_default_chromatic_component, names, HostError, PointD, RectD, RectI, Status};
use ofxh_property::{PropertySet, RawPointer};
use serde::{Deserialize, Serialize};

/// The effect instance a clip instance belongs to.
///
/// Instances of different effects may be driven from different threads (one tracker
/// instance per tracked entity, for example), hence `Send + Sync`. The host serializes
/// calls into any single instance.
pub trait EffectInstance: Send + Sync {
    /// Dispatch an action to the plugin's main entry point.
    fn main_entry(&self, action: &str, in_args: &PropertySet) -> Status;

    /// Whether `comp` is a colour layout that negotiation may substitute.
    fn is_chromatic_component(&self, comp: &str) -> bool {
        is_default_chromatic_component(comp)
    }
}

/// Host-side answers for one connected clip.
///
/// Called synchronously from property reads; a slow implementation blocks the reader.
pub trait ClipHost: Send {
    fn unmapped_bit_depth(&self) -> String;
    fn unmapped_components(&self) -> String;
    fn premult(&self) -> String;
    fn aspect_ratio(&self) -> f64;
    fn frame_rate(&self) -> f64;
    /// `(start, end)`.
    fn frame_range(&self) -> (f64, f64);
    fn field_order(&self) -> String;
    fn connected(&self) -> bool;
    fn unmapped_frame_rate(&self) -> f64;
    fn unmapped_frame_range(&self) -> (f64, f64);
    fn continuous_samples(&self) -> bool;

    fn region_of_definition(&self, time: f64) -> RectD;

    /// The pixel buffer for `time`, or `None` when there is nothing to fetch.
    ///
    /// With `bounds` set, only that part of the canonical image plane is wanted; a host may
    /// still return more.
    fn fetch_frame(&self, time: f64, bounds: Option<RectD>) -> Option<FrameBuffer>;
}

/// One frame's buffer as handed out by the host. The memory stays host-owned.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    pub render_scale: PointD,
    pub data: RawPointer,
    pub bounds: RectI,
    pub region_of_definition: RectI,
    pub row_bytes: i32,
    pub field: String,
    pub unique_identifier: String,
}

/// Largest pixel buffer a [`StaticClipHost`] will allocate.
pub const MAX_FRAME_BYTES: usize = 1 << 30;

/// Buffer geometry a [`StaticClipHost`] serves for every frame.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameLayout {
    pub bounds: RectI,
    /// Defaults to `bounds`.
    #[serde(default)]
    pub region_of_definition: Option<RectI>,
    pub row_bytes: i32,
    #[serde(default = "default_field")]
    pub field: String,
    #[serde(default)]
    pub render_scale: PointD,
}

fn default_field() -> String {
    names::FIELD_NONE.to_string()
}

impl FrameLayout {
    pub fn rod(&self) -> RectI {
        self.region_of_definition.unwrap_or(self.bounds)
    }

    /// Bytes covered by `bounds` rows of `row_bytes` each.
    pub fn byte_len(&self) -> Result<usize, HostError> {
        let rows = usize::try_from(self.bounds.height()).unwrap_or(0);
        let stride = usize::try_from(self.row_bytes.unsigned_abs())
            .map_err(|_| HostError::other(format!("row_bytes {} does not fit in memory", self.row_bytes)))?;
        match rows.checked_mul(stride) {
            Some(len) if len <= MAX_FRAME_BYTES => Ok(len),
            _ => Err(HostError::other(format!(
                "frame of {rows} rows x {stride} bytes exceeds the {MAX_FRAME_BYTES} byte limit"
            ))),
        }
    }
}

/// A clip host whose answers are fixed values, with an owned pixel buffer.
///
/// Backs session files and tests. Missing fields take the values an unconnected clip
/// reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaticClipHost {
    pub unmapped_pixel_depth: String,
    pub unmapped_components: String,
    pub premultiplication: String,
    pub pixel_aspect_ratio: f64,
    pub frame_rate: f64,
    pub frame_range: (f64, f64),
    pub field_order: String,
    pub connected: bool,
    pub unmapped_frame_rate: f64,
    pub unmapped_frame_range: (f64, f64),
    pub continuous_samples: bool,
    pub frame: Option<FrameLayout>,
    #[serde(skip)]
    pixels: Vec<u8>,
}

impl Default for StaticClipHost {
    fn default() -> Self {
        Self {
            unmapped_pixel_depth: names::BIT_DEPTH_NONE.to_string(),
            unmapped_components: names::COMPONENT_NONE.to_string(),
            premultiplication: names::IMAGE_OPAQUE.to_string(),
            pixel_aspect_ratio: 1.0,
            frame_rate: 25.0,
            frame_range: (0.0, 0.0),
            field_order: names::FIELD_NONE.to_string(),
            connected: false,
            unmapped_frame_rate: 25.0,
            unmapped_frame_range: (0.0, 0.0),
            continuous_samples: false,
            frame: None,
            pixels: Vec::new(),
        }
    }
}

impl StaticClipHost {
    /// A connected clip delivering `components` at `depth`.
    pub fn delivering(depth: &str, components: &str) -> Self {
        Self {
            unmapped_pixel_depth: depth.to_string(),
            unmapped_components: components.to_string(),
            connected: true,
            ..Self::default()
        }
    }

    pub fn with_frame(mut self, layout: FrameLayout) -> Result<Self, HostError> {
        self.frame = Some(layout);
        self.allocate_pixels()?;
        Ok(self)
    }

    /// Size the owned buffer for the current layout (after deserializing, say).
    ///
    /// Fails without touching the current buffer when the layout is too large.
    pub fn allocate_pixels(&mut self) -> Result<(), HostError> {
        let len = match &self.frame {
            Some(layout) => layout.byte_len()?,
            None => 0,
        };
        self.pixels = vec![0; len];
        Ok(())
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }
}

impl ClipHost for StaticClipHost {
    fn unmapped_bit_depth(&self) -> String {
        self.unmapped_pixel_depth.clone()
    }

    fn unmapped_components(&self) -> String {
        self.unmapped_components.clone()
    }

    fn premult(&self) -> String {
        self.premultiplication.clone()
    }

    fn aspect_ratio(&self) -> f64 {
        self.pixel_aspect_ratio
    }

    fn frame_rate(&self) -> f64 {
        self.frame_rate
    }

    fn frame_range(&self) -> (f64, f64) {
        self.frame_range
    }

    fn field_order(&self) -> String {
        self.field_order.clone()
    }

    fn connected(&self) -> bool {
        self.connected
    }

    fn unmapped_frame_rate(&self) -> f64 {
        self.unmapped_frame_rate
    }

    fn unmapped_frame_range(&self) -> (f64, f64) {
        self.unmapped_frame_range
    }

    fn continuous_samples(&self) -> bool {
        self.continuous_samples
    }

    fn region_of_definition(&self, _time: f64) -> RectD {
        match &self.frame {
            Some(layout) => {
                let r = layout.rod();
                RectD::new(f64::from(r.x1), f64::from(r.y1), f64::from(r.x2), f64::from(r.y2))
            }
            None => RectD::default(),
        }
    }

    fn fetch_frame(&self, time: f64, _bounds: Option<RectD>) -> Option<FrameBuffer> {
        if !self.connected {
            return None;
        }
        let layout = self.frame.as_ref()?;
        let data = if self.pixels.is_empty() {
            RawPointer::NULL
        } else {
            RawPointer::from_ptr(self.pixels.as_ptr())
        };
        Some(FrameBuffer {
            render_scale: layout.render_scale,
            data,
            bounds: layout.bounds,
            region_of_definition: layout.rod(),
            row_bytes: layout.row_bytes,
            field: layout.field.clone(),
            unique_identifier: format!("frame@{time}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> FrameLayout {
        FrameLayout {
            bounds: RectI::new(0, 0, 4, 2),
            region_of_definition: None,
            row_bytes: 16,
            field: names::FIELD_NONE.to_string(),
            render_scale: PointD::default(),
        }
    }

    #[test]
    fn unconnected_defaults() {
        let h = StaticClipHost::default();
        assert!(!h.connected());
        assert_eq!(h.unmapped_bit_depth(), names::BIT_DEPTH_NONE);
        assert_eq!(h.premult(), names::IMAGE_OPAQUE);
        assert_eq!(h.frame_rate(), 25.0);
        assert!(h.fetch_frame(0.0, None).is_none());
    }

    #[test]
    fn frame_buffer_points_at_owned_pixels() {
        let h = StaticClipHost::delivering(names::BIT_DEPTH_BYTE, names::COMPONENT_RGBA).with_frame(layout()).unwrap();
        assert_eq!(h.pixels().len(), 32);
        let fb = h.fetch_frame(3.0, None).unwrap();
        assert_eq!(fb.data.addr(), h.pixels().as_ptr() as usize);
        assert_eq!(fb.region_of_definition, fb.bounds);
        assert_eq!(fb.unique_identifier, "frame@3");
        assert_eq!(h.region_of_definition(3.0), RectD::new(0.0, 0.0, 4.0, 2.0));
    }

    #[test]
    fn deserialized_host_takes_defaults() {
        let mut h: StaticClipHost = serde_json::from_str(
            r#"{ "connected": true, "frame_range": [1.0, 50.0],
                 "frame": { "bounds": { "x1": 0, "y1": 0, "x2": 2, "y2": 2 }, "row_bytes": -8 } }"#,
        )
        .unwrap();
        h.allocate_pixels().unwrap();
        assert_eq!(h.frame_range(), (1.0, 50.0));
        assert_eq!(h.frame_rate(), 25.0);
        assert_eq!(h.pixels().len(), 16);
    }

    #[test]
    fn full_range_bounds_fail_cleanly() {
        let layout: FrameLayout = serde_json::from_str(
            r#"{ "bounds": { "x1": 0, "y1": -2147483648, "x2": 1, "y2": 2147483647 }, "row_bytes": 4 }"#,
        )
        .unwrap();
        assert!(layout.byte_len().is_err());
        let err = StaticClipHost::delivering(names::BIT_DEPTH_BYTE, names::COMPONENT_RGBA)
            .with_frame(layout)
            .unwrap_err();
        assert!(err.to_string().contains("limit"), "got: {err}");
    }

    #[test]
    fn failed_allocation_keeps_the_old_buffer() {
        let mut h = StaticClipHost::delivering(names::BIT_DEPTH_BYTE, names::COMPONENT_RGBA)
            .with_frame(layout())
            .unwrap();
        h.frame = Some(FrameLayout {
            row_bytes: i32::MIN,
            bounds: RectI::new(0, i32::MIN, 1, i32::MAX),
            ..layout()
        });
        assert!(h.allocate_pixels().is_err());
        assert_eq!(h.pixels().len(), 32);
    }
}
