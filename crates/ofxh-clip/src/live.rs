use ofxh_core::names;
use ofxh_property::{HookTag, PropSpec};

/// The closed set of clip-instance properties whose values come from the host.
///
/// Names are mapped to a variant once, when the instance installs its hook; reads then
/// dispatch on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiveProperty {
    PixelDepth,
    Components,
    UnmappedPixelDepth,
    UnmappedComponents,
    Premultiplication,
    PixelAspectRatio,
    FrameRate,
    FrameRange,
    FieldOrder,
    Connected,
    UnmappedFrameRange,
    UnmappedFrameRate,
    ContinuousSamples,
}

impl LiveProperty {
    /// In discriminant order, so `ALL[p as usize] == p`.
    pub const ALL: [LiveProperty; 13] = [
        LiveProperty::PixelDepth,
        LiveProperty::Components,
        LiveProperty::UnmappedPixelDepth,
        LiveProperty::UnmappedComponents,
        LiveProperty::Premultiplication,
        LiveProperty::PixelAspectRatio,
        LiveProperty::FrameRate,
        LiveProperty::FrameRange,
        LiveProperty::FieldOrder,
        LiveProperty::Connected,
        LiveProperty::UnmappedFrameRange,
        LiveProperty::UnmappedFrameRate,
        LiveProperty::ContinuousSamples,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LiveProperty::PixelDepth => names::PIXEL_DEPTH,
            LiveProperty::Components => names::COMPONENTS,
            LiveProperty::UnmappedPixelDepth => names::UNMAPPED_PIXEL_DEPTH,
            LiveProperty::UnmappedComponents => names::UNMAPPED_COMPONENTS,
            LiveProperty::Premultiplication => names::PREMULTIPLICATION,
            LiveProperty::PixelAspectRatio => names::PIXEL_ASPECT_RATIO,
            LiveProperty::FrameRate => names::FRAME_RATE,
            LiveProperty::FrameRange => names::FRAME_RANGE,
            LiveProperty::FieldOrder => names::FIELD_ORDER,
            LiveProperty::Connected => names::CONNECTED,
            LiveProperty::UnmappedFrameRange => names::UNMAPPED_FRAME_RANGE,
            LiveProperty::UnmappedFrameRate => names::UNMAPPED_FRAME_RATE,
            LiveProperty::ContinuousSamples => names::CONTINUOUS_SAMPLES,
        }
    }

    pub fn from_name(name: &str) -> Option<LiveProperty> {
        LiveProperty::ALL.iter().copied().find(|p| p.name() == name)
    }

    pub fn tag(self) -> HookTag {
        HookTag(self as u16)
    }

    pub fn from_tag(tag: HookTag) -> Option<LiveProperty> {
        LiveProperty::ALL.get(usize::from(tag.0)).copied()
    }

    /// Fixed number of values: 2 for the frame-range pairs, 1 otherwise.
    pub fn dimension(self) -> usize {
        match self {
            LiveProperty::FrameRange | LiveProperty::UnmappedFrameRange => 2,
            _ => 1,
        }
    }

    /// Declaration row. The defaults are what an unconnected clip reports.
    pub fn spec(self) -> PropSpec {
        let name = self.name();
        match self {
            LiveProperty::PixelDepth | LiveProperty::UnmappedPixelDepth => {
                PropSpec::string(name, 1, true, names::BIT_DEPTH_NONE)
            }
            LiveProperty::Components | LiveProperty::UnmappedComponents => {
                PropSpec::string(name, 1, true, names::COMPONENT_NONE)
            }
            LiveProperty::Premultiplication => PropSpec::string(name, 1, true, names::IMAGE_OPAQUE),
            LiveProperty::FieldOrder => PropSpec::string(name, 1, true, names::FIELD_NONE),
            LiveProperty::PixelAspectRatio => PropSpec::double(name, 1, true, 1.0),
            LiveProperty::FrameRate | LiveProperty::UnmappedFrameRate => {
                PropSpec::double(name, 1, true, 25.0)
            }
            LiveProperty::FrameRange | LiveProperty::UnmappedFrameRange => {
                PropSpec::double(name, 2, true, 0.0)
            }
            LiveProperty::Connected | LiveProperty::ContinuousSamples => PropSpec::int(name, 1, true, 0),
        }
    }

    pub fn specs() -> Vec<PropSpec> {
        LiveProperty::ALL.iter().map(|p| p.spec()).collect()
    }
}
