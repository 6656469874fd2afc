use ofxh_core::names;
use ofxh_property::PropertyError;
use serde::{Deserialize, Serialize};

use crate::base::ClipBase;

/// A clip as declared by the plugin during description.
#[derive(Debug, Clone)]
pub struct ClipDescriptor {
    base: ClipBase,
}

impl ClipDescriptor {
    pub fn new(name: &str) -> Self {
        let mut base = ClipBase::new();
        let named = base.props_mut().set_string(names::PROP_NAME, 0, name);
        debug_assert!(named.is_ok(), "the base table declares the name slot: {named:?}");
        Self { base }
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

    pub(crate) fn base_mut(&mut self) -> &mut ClipBase {
        &mut self.base
    }

    pub fn set_label(&mut self, label: &str) -> Result<(), PropertyError> {
        self.base.props_mut().set_string(names::PROP_LABEL, 0, label)
    }

    pub fn set_short_label(&mut self, label: &str) -> Result<(), PropertyError> {
        self.base.props_mut().set_string(names::PROP_SHORT_LABEL, 0, label)
    }

    pub fn set_long_label(&mut self, label: &str) -> Result<(), PropertyError> {
        self.base.props_mut().set_string(names::PROP_LONG_LABEL, 0, label)
    }

    /// Append to the supported components. Duplicates are ignored.
    pub fn add_supported_component(&mut self, comp: &str) -> Result<(), PropertyError> {
        if self.base.is_supported_component(comp) {
            return Ok(());
        }
        let next = self.base.supported_components().len();
        self.base
            .props_mut()
            .set_string(names::SUPPORTED_COMPONENTS, next, comp)
    }

    pub fn set_temporal_access(&mut self, on: bool) -> Result<(), PropertyError> {
        self.base
            .props_mut()
            .set_int(names::TEMPORAL_CLIP_ACCESS, 0, i32::from(on))
    }

    pub fn set_optional(&mut self, on: bool) -> Result<(), PropertyError> {
        self.base.props_mut().set_int(names::CLIP_OPTIONAL, 0, i32::from(on))
    }

    pub fn set_is_mask(&mut self, on: bool) -> Result<(), PropertyError> {
        self.base.props_mut().set_int(names::CLIP_IS_MASK, 0, i32::from(on))
    }

    pub fn set_field_extraction(&mut self, field: &str) -> Result<(), PropertyError> {
        self.base
            .props_mut()
            .set_string(names::CLIP_FIELD_EXTRACTION, 0, field)
    }

    pub fn set_supports_tiles(&mut self, on: bool) -> Result<(), PropertyError> {
        self.base.props_mut().set_int(names::SUPPORTS_TILES, 0, i32::from(on))
    }
}

/// Declarative form of a descriptor, as found in session files and fixtures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClipDeclaration {
    pub name: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub short_label: String,
    #[serde(default)]
    pub long_label: String,
    #[serde(default)]
    pub supported_components: Vec<String>,
    #[serde(default)]
    pub temporal_access: bool,
    #[serde(default)]
    pub optional: bool,
    #[serde(default)]
    pub is_mask: bool,
    #[serde(default = "default_field_extraction")]
    pub field_extraction: String,
    #[serde(default = "default_supports_tiles")]
    pub supports_tiles: bool,
}

fn default_field_extraction() -> String {
    names::FIELD_DOUBLED.to_string()
}

fn default_supports_tiles() -> bool {
    true
}

impl ClipDeclaration {
    pub fn to_descriptor(&self) -> Result<ClipDescriptor, PropertyError> {
        if self.name.trim().is_empty() {
            return Err(PropertyError::failed("clip declaration has an empty name"));
        }
        let mut d = ClipDescriptor::new(&self.name);
        d.set_label(&self.label)?;
        d.set_short_label(&self.short_label)?;
        d.set_long_label(&self.long_label)?;
        for comp in &self.supported_components {
            d.add_supported_component(comp)?;
        }
        d.set_temporal_access(self.temporal_access)?;
        d.set_optional(self.optional)?;
        d.set_is_mask(self.is_mask)?;
        d.set_field_extraction(&self.field_extraction)?;
        d.set_supports_tiles(self.supports_tiles)?;
        Ok(d)
    }

    /// Read a descriptor back. Labels are taken raw, without fallback.
    pub fn from_descriptor(d: &ClipDescriptor) -> Self {
        let props = d.base().props();
        let raw = |name: &str| props.get_string(name, 0).unwrap_or("").to_string();
        Self {
            name: d.name().to_string(),
            label: raw(names::PROP_LABEL),
            short_label: raw(names::PROP_SHORT_LABEL),
            long_label: raw(names::PROP_LONG_LABEL),
            supported_components: d.base().supported_components().to_vec(),
            temporal_access: d.base().temporal_access(),
            optional: d.base().is_optional(),
            is_mask: d.base().is_mask(),
            field_extraction: d.base().field_extraction().to_string(),
            supports_tiles: d.base().supports_tiles(),
        }
    }
}
