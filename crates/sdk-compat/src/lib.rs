//! Compile-only compatibility crate.
//!
//! This crate exists to ensure the public host surface remains usable by third-party
//! consumers. It is not shipped or run; it must only build.

use std::sync::Arc;

use ofxh_clip::{
    find_supported_comp, ClipDeclaration, ClipDescriptor, ClipHost, ClipInstance, ClipSuite,
    EffectInstance, FrameBuffer, Image, PropertySetHandle, StaticClipHost,
};
use ofxh_core::{names, PointD, RectD, Status};
use ofxh_property::{PropSpec, PropertySet, PropertyView};

struct NullEffect;

impl EffectInstance for NullEffect {
    fn main_entry(&self, _action: &str, _in_args: &PropertySet) -> Status {
        Status::ReplyDefault
    }
}

/// A host resolver written outside the workspace must be able to implement the trait.
struct ConstHost;

impl ClipHost for ConstHost {
    fn unmapped_bit_depth(&self) -> String {
        names::BIT_DEPTH_BYTE.to_string()
    }
    fn unmapped_components(&self) -> String {
        names::COMPONENT_RGBA.to_string()
    }
    fn premult(&self) -> String {
        names::IMAGE_OPAQUE.to_string()
    }
    fn aspect_ratio(&self) -> f64 {
        1.0
    }
    fn frame_rate(&self) -> f64 {
        25.0
    }
    fn frame_range(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
    fn field_order(&self) -> String {
        names::FIELD_NONE.to_string()
    }
    fn connected(&self) -> bool {
        true
    }
    fn unmapped_frame_rate(&self) -> f64 {
        25.0
    }
    fn unmapped_frame_range(&self) -> (f64, f64) {
        (0.0, 0.0)
    }
    fn continuous_samples(&self) -> bool {
        false
    }
    fn region_of_definition(&self, _time: f64) -> RectD {
        RectD::default()
    }
    fn fetch_frame(&self, _time: f64, _bounds: Option<RectD>) -> Option<FrameBuffer> {
        None
    }
}

#[allow(dead_code)]
pub fn _compile_witness() {
    // Plugin-side declaration tables stay constructible.
    static EXTRA: [PropSpec; 1] = [PropSpec::int("com.example.Flag", 1, false, 0)];
    let mut set = PropertySet::new(&EXTRA);
    let _ = set.set_int("com.example.Flag", 0, 1);
    let _view: PropertyView<'_> = PropertyView::stored(&set);

    // Descriptors build from declarations or setters.
    let decl = ClipDeclaration {
        name: names::SOURCE_CLIP_NAME.to_string(),
        label: String::new(),
        short_label: String::new(),
        long_label: String::new(),
        supported_components: vec![names::COMPONENT_RGBA.to_string()],
        temporal_access: false,
        optional: false,
        is_mask: false,
        field_extraction: names::FIELD_DOUBLED.to_string(),
        supports_tiles: true,
    };
    let Ok(desc) = decl.to_descriptor() else {
        return;
    };
    let mut out = ClipDescriptor::new(names::OUTPUT_CLIP_NAME);
    let _ = out.add_supported_component(names::COMPONENT_RGBA);

    // Instances bind to an effect and to either host flavour.
    let effect: Arc<dyn EffectInstance> = Arc::new(NullEffect);
    let Ok(mut clip) = ClipInstance::new(&effect, &desc, Box::new(ConstHost)) else {
        return;
    };
    clip.set_pixel_depth(names::BIT_DEPTH_FLOAT);
    let _ = clip.find_supported_comp(names::COMPONENT_ALPHA);
    let _ = clip.instance_changed_action(names::CHANGE_USER_EDITED, 0.0, PointD::default());
    let _ = find_supported_comp(desc.base().supported_components(), names::COMPONENT_RGBA, |_| true);
    let _ = ClipInstance::unbound(&out, Box::new(StaticClipHost::default()));
    let _placeholder = Image::from_clip(&clip);

    // Boundary calls go through handles and statuses.
    let mut suite = ClipSuite::new();
    let Ok(h) = suite.clips.insert_instance(clip) else {
        return;
    };
    let _ = suite.prop_get_double(PropertySetHandle::Clip(h), names::FRAME_RATE, 0);
    if let Ok(img) = suite.clip_get_image(h, 0.0, None) {
        let _ = suite.clip_release_image(img);
    }
}
