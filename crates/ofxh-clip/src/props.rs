//! Static declaration tables.

use ofxh_core::names;
use ofxh_property::PropSpec;

/// Properties common to descriptors and instances. The plugin may set everything except
/// the type and name on a descriptor.
pub static CLIP_DESCRIPTOR_PROPS: [PropSpec; 11] = [
    PropSpec::string(names::PROP_TYPE, 1, true, names::TYPE_CLIP),
    PropSpec::string(names::PROP_NAME, 1, true, ""),
    PropSpec::string(names::PROP_LABEL, 1, false, ""),
    PropSpec::string(names::PROP_SHORT_LABEL, 1, false, ""),
    PropSpec::string(names::PROP_LONG_LABEL, 1, false, ""),
    PropSpec::string(names::SUPPORTED_COMPONENTS, 0, false, ""),
    PropSpec::int(names::TEMPORAL_CLIP_ACCESS, 1, false, 0),
    PropSpec::int(names::CLIP_OPTIONAL, 1, false, 0),
    PropSpec::int(names::CLIP_IS_MASK, 1, false, 0),
    PropSpec::string(names::CLIP_FIELD_EXTRACTION, 1, false, names::FIELD_DOUBLED),
    PropSpec::int(names::SUPPORTS_TILES, 1, false, 1),
];

/// Arguments of the begin-instance-changed action raised by a clip.
pub static INSTANCE_CHANGED_ARGS: [PropSpec; 5] = [
    PropSpec::string(names::PROP_TYPE, 1, true, names::TYPE_CLIP),
    PropSpec::string(names::PROP_NAME, 1, true, ""),
    PropSpec::string(names::PROP_CHANGE_REASON, 1, true, ""),
    PropSpec::double(names::PROP_TIME, 1, true, 0.0),
    PropSpec::double(names::RENDER_SCALE, 2, true, 0.0),
];

/// Properties of an image. All of them are read only to the plugin.
pub static IMAGE_PROPS: [PropSpec; 12] = [
    PropSpec::string(names::PROP_TYPE, 1, true, names::TYPE_IMAGE),
    PropSpec::string(names::PIXEL_DEPTH, 1, true, names::BIT_DEPTH_NONE),
    PropSpec::string(names::COMPONENTS, 1, true, names::COMPONENT_NONE),
    PropSpec::string(names::PREMULTIPLICATION, 1, true, names::IMAGE_OPAQUE),
    PropSpec::double(names::RENDER_SCALE, 2, true, 1.0),
    PropSpec::double(names::PIXEL_ASPECT_RATIO, 1, true, 1.0),
    PropSpec::pointer(names::IMAGE_DATA, 1, true),
    PropSpec::int(names::IMAGE_BOUNDS, 4, true, 0),
    PropSpec::int(names::IMAGE_REGION_OF_DEFINITION, 4, true, 0),
    PropSpec::int(names::IMAGE_ROW_BYTES, 1, true, 0),
    PropSpec::string(names::IMAGE_FIELD, 1, true, ""),
    PropSpec::string(names::IMAGE_UNIQUE_IDENTIFIER, 1, true, ""),
];
