//! Fixed property names and values that form the wire-level contract.
//!
//! Adding names is additive; renaming or removing one breaks every plugin built against it.

// -------------------------------------------------------------------------------------------------
// Generic properties
// -------------------------------------------------------------------------------------------------

pub const PROP_TYPE: &str = "OfxPropType";
pub const PROP_NAME: &str = "OfxPropName";
pub const PROP_LABEL: &str = "OfxPropLabel";
pub const PROP_SHORT_LABEL: &str = "OfxPropShortLabel";
pub const PROP_LONG_LABEL: &str = "OfxPropLongLabel";
pub const PROP_CHANGE_REASON: &str = "OfxPropChangeReason";
pub const PROP_TIME: &str = "OfxPropTime";

pub const TYPE_CLIP: &str = "OfxTypeClip";
pub const TYPE_IMAGE: &str = "OfxTypeImage";

// -------------------------------------------------------------------------------------------------
// Clip descriptor properties
// -------------------------------------------------------------------------------------------------

pub const SUPPORTED_COMPONENTS: &str = "OfxImageEffectPropSupportedComponents";
pub const TEMPORAL_CLIP_ACCESS: &str = "OfxImageEffectPropTemporalClipAccess";
pub const CLIP_OPTIONAL: &str = "OfxImageClipPropOptional";
pub const CLIP_IS_MASK: &str = "OfxImageClipPropIsMask";
pub const CLIP_FIELD_EXTRACTION: &str = "OfxImageClipPropFieldExtraction";
pub const SUPPORTS_TILES: &str = "OfxImageEffectPropSupportsTiles";

/// Reserved name of the single output clip.
pub const OUTPUT_CLIP_NAME: &str = "Output";
/// Conventional name of the main input clip.
pub const SOURCE_CLIP_NAME: &str = "Source";

// -------------------------------------------------------------------------------------------------
// Clip instance (live) properties
// -------------------------------------------------------------------------------------------------

pub const PIXEL_DEPTH: &str = "OfxImageEffectPropPixelDepth";
pub const COMPONENTS: &str = "OfxImageEffectPropComponents";
pub const UNMAPPED_PIXEL_DEPTH: &str = "OfxImageClipPropUnmappedPixelDepth";
pub const UNMAPPED_COMPONENTS: &str = "OfxImageClipPropUnmappedComponents";
pub const PREMULTIPLICATION: &str = "OfxImageEffectPropPreMultiplication";
pub const PIXEL_ASPECT_RATIO: &str = "OfxImagePropPixelAspectRatio";
pub const FRAME_RATE: &str = "OfxImageEffectPropFrameRate";
pub const FRAME_RANGE: &str = "OfxImageEffectPropFrameRange";
pub const FIELD_ORDER: &str = "OfxImageClipPropFieldOrder";
pub const CONNECTED: &str = "OfxImageClipPropConnected";
pub const UNMAPPED_FRAME_RANGE: &str = "OfxImageEffectPropUnmappedFrameRange";
pub const UNMAPPED_FRAME_RATE: &str = "OfxImageEffectPropUnmappedFrameRate";
pub const CONTINUOUS_SAMPLES: &str = "OfxImageClipPropContinuousSamples";

// -------------------------------------------------------------------------------------------------
// Image properties
// -------------------------------------------------------------------------------------------------

pub const RENDER_SCALE: &str = "OfxImageEffectPropRenderScale";
pub const IMAGE_DATA: &str = "OfxImagePropData";
pub const IMAGE_BOUNDS: &str = "OfxImagePropBounds";
pub const IMAGE_REGION_OF_DEFINITION: &str = "OfxImagePropRegionOfDefinition";
pub const IMAGE_ROW_BYTES: &str = "OfxImagePropRowBytes";
pub const IMAGE_FIELD: &str = "OfxImagePropField";
pub const IMAGE_UNIQUE_IDENTIFIER: &str = "OfxImagePropUniqueIdentifier";

// -------------------------------------------------------------------------------------------------
// Values
// -------------------------------------------------------------------------------------------------

pub const BIT_DEPTH_NONE: &str = "OfxBitDepthNone";
pub const BIT_DEPTH_BYTE: &str = "OfxBitDepthByte";
pub const BIT_DEPTH_SHORT: &str = "OfxBitDepthShort";
pub const BIT_DEPTH_FLOAT: &str = "OfxBitDepthFloat";

pub const COMPONENT_NONE: &str = "OfxImageComponentNone";
pub const COMPONENT_RGBA: &str = "OfxImageComponentRGBA";
pub const COMPONENT_RGB: &str = "OfxImageComponentRGB";
pub const COMPONENT_ALPHA: &str = "OfxImageComponentAlpha";
/// Two-channel component extension (motion vectors, disparity).
pub const COMPONENT_XY: &str = "NatronOfxImageComponentXY";

pub const IMAGE_OPAQUE: &str = "OfxImageOpaque";
pub const IMAGE_PREMULTIPLIED: &str = "OfxImageAlphaPremultiplied";
pub const IMAGE_UNPREMULTIPLIED: &str = "OfxImageAlphaUnPremultiplied";

pub const FIELD_NONE: &str = "OfxImageFieldNone";
pub const FIELD_BOTH: &str = "OfxImageFieldBoth";
pub const FIELD_LOWER: &str = "OfxImageFieldLower";
pub const FIELD_UPPER: &str = "OfxImageFieldUpper";
pub const FIELD_SINGLE: &str = "OfxImageFieldSingle";
pub const FIELD_DOUBLED: &str = "OfxImageFieldDoubled";

// -------------------------------------------------------------------------------------------------
// Actions and change reasons
// -------------------------------------------------------------------------------------------------

pub const ACTION_BEGIN_INSTANCE_CHANGED: &str = "OfxActionBeginInstanceChanged";
pub const ACTION_INSTANCE_CHANGED: &str = "OfxActionInstanceChanged";
pub const ACTION_END_INSTANCE_CHANGED: &str = "OfxActionEndInstanceChanged";

pub const CHANGE_USER_EDITED: &str = "OfxChangeUserEdited";
pub const CHANGE_PLUGIN_EDITED: &str = "OfxChangePluginEdited";
pub const CHANGE_TIME: &str = "OfxChangeTime";
