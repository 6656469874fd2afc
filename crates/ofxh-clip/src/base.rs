use ofxh_core::names;
use ofxh_property::PropertySet;

use crate::props::CLIP_DESCRIPTOR_PROPS;

/// Property bag and typed accessors shared by descriptors and instances.
///
/// Invariant: the set always declares every row of [`CLIP_DESCRIPTOR_PROPS`], so the
/// accessors below only fall back to their defaults if that invariant is broken.
#[derive(Debug, Clone)]
pub struct ClipBase {
    props: PropertySet,
}

impl Default for ClipBase {
    fn default() -> Self {
        Self::new()
    }
}

impl ClipBase {
    pub fn new() -> Self {
        Self {
            props: PropertySet::new(&CLIP_DESCRIPTOR_PROPS),
        }
    }

    /// Copy for a live instance: every slot becomes writable again.
    pub fn instance_copy(&self) -> Self {
        let mut props = self.props.clone();
        props.set_all_plugin_read_only(false);
        Self { props }
    }

    pub fn props(&self) -> &PropertySet {
        &self.props
    }

    pub(crate) fn props_mut(&mut self) -> &mut PropertySet {
        &mut self.props
    }

    fn string(&self, name: &str) -> &str {
        self.props.get_string(name, 0).unwrap_or("")
    }

    fn flag(&self, name: &str) -> bool {
        self.props.get_int(name, 0).map(|v| v != 0).unwrap_or(false)
    }

    pub fn name(&self) -> &str {
        self.string(names::PROP_NAME)
    }

    /// Label, or the name when the label is empty.
    pub fn label(&self) -> &str {
        match self.string(names::PROP_LABEL) {
            "" => self.name(),
            s => s,
        }
    }

    /// Short label, falling back through the label to the name.
    pub fn short_label(&self) -> &str {
        match self.string(names::PROP_SHORT_LABEL) {
            "" => self.label(),
            s => s,
        }
    }

    /// Long label, falling back through the label to the name.
    pub fn long_label(&self) -> &str {
        match self.string(names::PROP_LONG_LABEL) {
            "" => self.label(),
            s => s,
        }
    }

    pub fn supported_components(&self) -> &[String] {
        self.props
            .get_strings(names::SUPPORTED_COMPONENTS)
            .unwrap_or(&[])
    }

    pub fn is_supported_component(&self, comp: &str) -> bool {
        self.supported_components().iter().any(|c| c == comp)
    }

    pub fn temporal_access(&self) -> bool {
        self.flag(names::TEMPORAL_CLIP_ACCESS)
    }

    pub fn is_optional(&self) -> bool {
        self.flag(names::CLIP_OPTIONAL)
    }

    pub fn is_mask(&self) -> bool {
        self.flag(names::CLIP_IS_MASK)
    }

    /// How fielded images should be presented to this clip.
    pub fn field_extraction(&self) -> &str {
        match self.string(names::CLIP_FIELD_EXTRACTION) {
            "" => names::FIELD_DOUBLED,
            s => s,
        }
    }

    pub fn supports_tiles(&self) -> bool {
        self.flag(names::SUPPORTS_TILES)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> ClipBase {
        let mut b = ClipBase::new();
        b.props_mut().set_string(names::PROP_NAME, 0, name).unwrap();
        b
    }

    #[test]
    fn fresh_base_has_defaults() {
        let b = ClipBase::new();
        assert_eq!(b.props().get_string(names::PROP_TYPE, 0).unwrap(), names::TYPE_CLIP);
        assert!(b.supported_components().is_empty());
        assert!(!b.temporal_access());
        assert!(!b.is_optional());
        assert!(!b.is_mask());
        assert!(b.supports_tiles());
        assert_eq!(b.field_extraction(), names::FIELD_DOUBLED);
    }

    #[test]
    fn labels_fall_back_at_query_time() {
        let mut b = named("Source");
        assert_eq!(b.label(), "Source");
        assert_eq!(b.short_label(), "Source");
        assert_eq!(b.long_label(), "Source");

        b.props_mut().set_string(names::PROP_LABEL, 0, "L").unwrap();
        assert_eq!(b.short_label(), "L");
        assert_eq!(b.long_label(), "L");

        b.props_mut().set_string(names::PROP_SHORT_LABEL, 0, "S").unwrap();
        assert_eq!(b.short_label(), "S");
        assert_eq!(b.long_label(), "L");

        b.props_mut().set_string(names::PROP_LABEL, 0, "").unwrap();
        assert_eq!(b.long_label(), "Source");
    }

    #[test]
    fn instance_copy_clears_read_only_flags() {
        let b = named("Source");
        assert!(b.props().is_plugin_read_only(names::PROP_NAME).unwrap());
        let c = b.instance_copy();
        assert!(c.props().properties().all(|p| !p.is_plugin_read_only()));
        assert_eq!(c.name(), "Source");
        // the original keeps its flags
        assert!(b.props().is_plugin_read_only(names::PROP_TYPE).unwrap());
    }
}
