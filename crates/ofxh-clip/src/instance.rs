use std::fmt;
use std::sync::{Arc, Weak};

use ofxh_core::{names, HostConfig, PointD, RectD, Status};
use ofxh_property::{GetHook, HookTag, PropertyError, PropertySet, PropertyView, Scalar};
use tracing::{debug, warn};

use crate::base::ClipBase;
use crate::descriptor::ClipDescriptor;
use crate::host::{ClipHost, EffectInstance};
use crate::image::Image;
use crate::live::LiveProperty;
use crate::negotiate;
use crate::props::INSTANCE_CHANGED_ARGS;

/// A clip descriptor bound to one effect instance.
///
/// The live properties hold no stored value: each read goes through the [`GetHook`] impl
/// below, which either answers from the negotiated format (pixel depth and components) or
/// asks the [`ClipHost`]. Read them through [`ClipInstance::props`].
pub struct ClipInstance {
    base: ClipBase,
    effect: Option<Weak<dyn EffectInstance>>,
    host: Box<dyn ClipHost>,
    pixel_depth: String,
    components: String,
    /// Chromatic set used for negotiation while no effect is bound.
    chromatic: Vec<String>,
}

impl fmt::Debug for ClipInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClipInstance")
            .field("name", &self.name())
            .field("bound", &self.effect().is_some())
            .field("pixel_depth", &self.pixel_depth)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

impl ClipInstance {
    /// Instantiate `desc` for `effect`. The instance keeps a weak back-reference only.
    pub fn new(
        effect: &Arc<dyn EffectInstance>,
        desc: &ClipDescriptor,
        host: Box<dyn ClipHost>,
    ) -> Result<Self, PropertyError> {
        let mut clip = Self::unbound(desc, host)?;
        clip.effect = Some(Arc::downgrade(effect));
        Ok(clip)
    }

    /// An instance with no owning effect. Actions forwarded from it report failure.
    pub fn unbound(desc: &ClipDescriptor, host: Box<dyn ClipHost>) -> Result<Self, PropertyError> {
        let mut base = desc.base().instance_copy();
        let props = base.props_mut();
        props.add_properties(&LiveProperty::specs())?;
        for p in LiveProperty::ALL {
            props.set_get_hook(p.name(), p.tag())?;
        }
        Ok(Self {
            base,
            effect: None,
            host,
            pixel_depth: names::BIT_DEPTH_NONE.to_string(),
            components: names::COMPONENT_NONE.to_string(),
            chromatic: HostConfig::default().chromatic_components,
        })
    }

    pub fn base(&self) -> &ClipBase {
        &self.base
    }

    pub fn name(&self) -> &str {
        self.base.name()
    }

    pub fn is_output(&self) -> bool {
        self.name() == names::OUTPUT_CLIP_NAME
    }

    /// The owning effect, if it is still alive.
    pub fn effect(&self) -> Option<Arc<dyn EffectInstance>> {
        self.effect.as_ref().and_then(Weak::upgrade)
    }

    /// All properties, with the live ones resolved on read.
    pub fn props(&self) -> PropertyView<'_> {
        PropertyView::new(self.base.props(), Some(self))
    }

    pub(crate) fn props_mut(&mut self) -> &mut PropertySet {
        self.base.props_mut()
    }

    // ---- negotiated format ----

    pub fn pixel_depth(&self) -> &str {
        &self.pixel_depth
    }

    pub fn components(&self) -> &str {
        &self.components
    }

    /// Called by the clip-preferences step. The plugin cannot write this slot.
    pub fn set_pixel_depth(&mut self, depth: &str) {
        self.pixel_depth = depth.to_string();
    }

    pub fn set_components(&mut self, components: &str) {
        self.components = components.to_string();
    }

    // ---- live reads ----

    pub fn unmapped_pixel_depth(&self) -> String {
        self.host.unmapped_bit_depth()
    }

    pub fn unmapped_components(&self) -> String {
        self.host.unmapped_components()
    }

    pub fn premultiplication(&self) -> String {
        self.host.premult()
    }

    pub fn pixel_aspect_ratio(&self) -> f64 {
        self.host.aspect_ratio()
    }

    pub fn frame_rate(&self) -> f64 {
        self.host.frame_rate()
    }

    pub fn frame_range(&self) -> (f64, f64) {
        self.host.frame_range()
    }

    pub fn field_order(&self) -> String {
        self.host.field_order()
    }

    pub fn connected(&self) -> bool {
        self.host.connected()
    }

    pub fn unmapped_frame_rate(&self) -> f64 {
        self.host.unmapped_frame_rate()
    }

    pub fn unmapped_frame_range(&self) -> (f64, f64) {
        self.host.unmapped_frame_range()
    }

    pub fn continuous_samples(&self) -> bool {
        self.host.continuous_samples()
    }

    pub fn region_of_definition(&self, time: f64) -> RectD {
        self.host.region_of_definition(time)
    }

    /// Clearing an override is not something a clip instance supports, whatever the name.
    pub fn reset(&self, name: &str) -> Result<(), PropertyError> {
        warn!(clip = %self.name(), property = name, "reset is not supported on clip instances");
        Err(PropertyError::MissingHostFeature(format!(
            "reset of '{name}' on clip '{}'",
            self.name()
        )))
    }

    // ---- negotiation ----

    /// Take the chromatic set from the host configuration. A bound effect still decides
    /// for itself.
    pub fn use_host_config(&mut self, config: &HostConfig) {
        self.chromatic = config.chromatic_components.clone();
    }

    /// Best component this clip supports for `requested`; see [`negotiate::find_supported_comp`].
    pub fn find_supported_comp<'a>(&'a self, requested: &'a str) -> &'a str {
        let supported = self.base.supported_components();
        let found = match self.effect() {
            Some(effect) => {
                negotiate::find_supported_comp(supported, requested, |c| effect.is_chromatic_component(c))
            }
            None => negotiate::find_supported_comp(supported, requested, |c| {
                self.chromatic.iter().any(|s| s == c)
            }),
        };
        if found != requested {
            debug!(clip = %self.name(), requested, found, "component substituted");
        }
        found
    }

    // ---- actions ----

    pub fn instance_changed_args(
        &self,
        why: &str,
        time: f64,
        render_scale: PointD,
    ) -> Result<PropertySet, PropertyError> {
        let mut args = PropertySet::new(&INSTANCE_CHANGED_ARGS);
        args.set_string(names::PROP_TYPE, 0, names::TYPE_CLIP)?;
        args.set_string(names::PROP_NAME, 0, self.name())?;
        args.set_string(names::PROP_CHANGE_REASON, 0, why)?;
        args.set_double(names::PROP_TIME, 0, time)?;
        args.set_n::<f64>(names::RENDER_SCALE, &[render_scale.x, render_scale.y])?;
        Ok(args)
    }

    /// Tell the owning effect this clip changed. With no live effect this is a failure
    /// status, not an error.
    pub fn instance_changed_action(&self, why: &str, time: f64, render_scale: PointD) -> Status {
        let Some(effect) = self.effect() else {
            debug!(clip = %self.name(), "instance changed with no bound effect");
            return Status::Failed;
        };
        match self.instance_changed_args(why, time, render_scale) {
            Ok(args) => effect.main_entry(names::ACTION_BEGIN_INSTANCE_CHANGED, &args),
            Err(e) => e.status(),
        }
    }

    // ---- images ----

    /// The frame at `time`, frozen into an image with a single reference.
    ///
    /// `Ok(None)` when the host has nothing to deliver (unconnected, say).
    pub fn get_image(&self, time: f64, bounds: Option<RectD>) -> Result<Option<Image>, PropertyError> {
        match self.host.fetch_frame(time, bounds) {
            Some(frame) => Image::with_frame(self, frame).map(Some),
            None => Ok(None),
        }
    }

    fn live(&self, tag: HookTag, name: &str) -> Result<LiveProperty, PropertyError> {
        LiveProperty::from_tag(tag)
            .filter(|p| p.name() == name)
            .ok_or_else(|| PropertyError::NotResolvable(name.to_string()))
    }
}

fn pick(pair: (f64, f64), index: usize) -> f64 {
    if index == 0 {
        pair.0
    } else {
        pair.1
    }
}

impl GetHook for ClipInstance {
    fn resolve(&self, tag: HookTag, name: &str, index: usize) -> Result<Scalar, PropertyError> {
        let p = self.live(tag, name)?;
        let dimension = p.dimension();
        if index >= dimension {
            return Err(PropertyError::BadIndex {
                name: name.to_string(),
                index,
                dimension,
            });
        }
        Ok(match p {
            LiveProperty::PixelDepth => Scalar::from(self.pixel_depth.as_str()),
            LiveProperty::Components => Scalar::from(self.components.as_str()),
            LiveProperty::UnmappedPixelDepth => Scalar::from(self.host.unmapped_bit_depth()),
            LiveProperty::UnmappedComponents => Scalar::from(self.host.unmapped_components()),
            LiveProperty::Premultiplication => Scalar::from(self.host.premult()),
            LiveProperty::PixelAspectRatio => Scalar::from(self.host.aspect_ratio()),
            LiveProperty::FrameRate => Scalar::from(self.host.frame_rate()),
            LiveProperty::FrameRange => Scalar::from(pick(self.host.frame_range(), index)),
            LiveProperty::FieldOrder => Scalar::from(self.host.field_order()),
            LiveProperty::Connected => Scalar::from(self.host.connected()),
            LiveProperty::UnmappedFrameRange => {
                Scalar::from(pick(self.host.unmapped_frame_range(), index))
            }
            LiveProperty::UnmappedFrameRate => Scalar::from(self.host.unmapped_frame_rate()),
            LiveProperty::ContinuousSamples => Scalar::from(self.host.continuous_samples()),
        })
    }

    fn dimension(&self, tag: HookTag, name: &str) -> Result<usize, PropertyError> {
        self.live(tag, name).map(LiveProperty::dimension)
    }

    fn reset(&self, _tag: HookTag, name: &str) -> Result<(), PropertyError> {
        ClipInstance::reset(self, name)
    }
}
