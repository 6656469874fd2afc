use std::borrow::Cow;
use std::fmt;

use crate::error::PropertyError;
use crate::set::PropertySet;
use crate::spec::PropertyType;
use crate::value::{PropValue, RawPointer, Scalar};
use crate::Result;

/// Identifier the hook owner attaches to a slot when it installs itself.
///
/// The container never interprets it; the owner maps it back to its own closed set of
/// resolvable properties, so reads dispatch without re-matching on names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HookTag(pub u16);

/// Resolves the values of hooked slots.
///
/// The container has already checked that the slot exists, is hooked and has the requested
/// type; the hook validates `index` against the property's dimension.
pub trait GetHook {
    fn resolve(&self, tag: HookTag, name: &str, index: usize) -> Result<Scalar>;

    fn dimension(&self, tag: HookTag, name: &str) -> Result<usize>;

    fn reset(&self, _tag: HookTag, name: &str) -> Result<()> {
        Err(PropertyError::MissingHostFeature(format!("reset of '{name}'")))
    }

    /// Called after the plugin writes a slot.
    fn notify(&self, _name: &str, _single: bool, _index_or_count: usize) {}
}

/// Read access to a property set together with the hook that owns its live slots.
#[derive(Clone, Copy)]
pub struct PropertyView<'a> {
    set: &'a PropertySet,
    hook: Option<&'a dyn GetHook>,
}

impl fmt::Debug for PropertyView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyView")
            .field("set", &self.set)
            .field("hook", &self.hook.map(|_| "<get hook>"))
            .finish()
    }
}

impl<'a> PropertyView<'a> {
    pub fn new(set: &'a PropertySet, hook: Option<&'a dyn GetHook>) -> Self {
        Self { set, hook }
    }

    /// A view with no hook; hooked slots fail with [`PropertyError::ResolvedByHost`].
    pub fn stored(set: &'a PropertySet) -> Self {
        Self { set, hook: None }
    }

    pub fn set(&self) -> &'a PropertySet {
        self.set
    }

    fn hooked(&self, name: &str, requested: PropertyType) -> Result<Option<(&'a dyn GetHook, crate::HookTag)>> {
        let p = self.set.property(name)?;
        if p.kind() != requested {
            return Err(PropertyError::WrongType {
                name: name.to_string(),
                requested,
                found: p.kind(),
            });
        }
        match (p.hook_tag(), self.hook) {
            (Some(tag), Some(hook)) => Ok(Some((hook, tag))),
            (Some(_), None) => Err(PropertyError::ResolvedByHost(name.to_string())),
            (None, _) => Ok(None),
        }
    }

    fn resolve_as<T: PropValue>(hook: &dyn GetHook, tag: HookTag, name: &str, index: usize) -> Result<T> {
        let s = hook.resolve(tag, name, index)?;
        let found = s.kind();
        T::from_scalar(s).ok_or_else(|| {
            PropertyError::failed(format!(
                "hook resolved '{name}' as {found}, expected {}",
                T::KIND
            ))
        })
    }

    pub fn get_dimension(&self, name: &str) -> Result<usize> {
        let p = self.set.property(name)?;
        match (p.hook_tag(), self.hook) {
            (Some(tag), Some(hook)) => hook.dimension(tag, name),
            _ => self.set.get_dimension(name),
        }
    }

    /// Typed read of one index, resolving hooked slots.
    pub fn get<T: PropValue>(&self, name: &str, index: usize) -> Result<T> {
        match self.hooked(name, T::KIND)? {
            Some((hook, tag)) => Self::resolve_as(hook, tag, name, index),
            None => self.set.get::<T>(name, index).cloned(),
        }
    }

    /// The first `count` values; `count` beyond the dimension fails.
    pub fn get_n<T: PropValue>(&self, name: &str, count: usize) -> Result<Vec<T>> {
        match self.hooked(name, T::KIND)? {
            Some((hook, tag)) => {
                let dimension = hook.dimension(tag, name)?;
                if count > dimension {
                    return Err(PropertyError::BadIndex {
                        name: name.to_string(),
                        index: count - 1,
                        dimension,
                    });
                }
                (0..count)
                    .map(|i| Self::resolve_as::<T>(hook, tag, name, i))
                    .collect()
            }
            None => self.set.get_n::<T>(name, count).map(<[T]>::to_vec),
        }
    }

    pub fn get_string(&self, name: &str, index: usize) -> Result<Cow<'a, str>> {
        match self.hooked(name, PropertyType::String)? {
            Some((hook, tag)) => Self::resolve_as::<String>(hook, tag, name, index).map(Cow::Owned),
            None => self.set.get_string(name, index).map(Cow::Borrowed),
        }
    }

    pub fn get_int(&self, name: &str, index: usize) -> Result<i32> {
        self.get::<i32>(name, index)
    }

    pub fn get_double(&self, name: &str, index: usize) -> Result<f64> {
        self.get::<f64>(name, index)
    }

    pub fn get_pointer(&self, name: &str, index: usize) -> Result<RawPointer> {
        self.get::<RawPointer>(name, index)
    }

    /// Untyped read, for callers that only know the name.
    pub fn get_scalar(&self, name: &str, index: usize) -> Result<Scalar> {
        let kind = self.set.property(name)?.kind();
        Ok(match kind {
            PropertyType::String => Scalar::String(self.get::<String>(name, index)?),
            PropertyType::Int => Scalar::Int(self.get::<i32>(name, index)?),
            PropertyType::Double => Scalar::Double(self.get::<f64>(name, index)?),
            PropertyType::Pointer => Scalar::Pointer(self.get::<RawPointer>(name, index)?),
        })
    }

    /// Reset is only meaningful for hooked slots here; stored slots need `&mut PropertySet`.
    pub fn reset_hooked(&self, name: &str) -> Result<()> {
        let p = self.set.property(name)?;
        match (p.hook_tag(), self.hook) {
            (Some(tag), Some(hook)) => hook.reset(tag, name),
            _ => Err(PropertyError::failed(format!("'{name}' is not a hooked property"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::spec::PropSpec;

    static TABLE: &[PropSpec] = &[
        PropSpec::string("label", 1, false, "plain"),
        PropSpec::double("rate", 1, true, 0.0),
        PropSpec::double("range", 2, true, 0.0),
    ];

    struct Fixed;

    impl GetHook for Fixed {
        fn resolve(&self, tag: HookTag, name: &str, index: usize) -> Result<Scalar> {
            let dim = self.dimension(tag, name)?;
            if index >= dim {
                return Err(PropertyError::BadIndex {
                    name: name.to_string(),
                    index,
                    dimension: dim,
                });
            }
            match tag {
                HookTag(0) => Ok(Scalar::Double(24.0)),
                HookTag(1) => Ok(Scalar::Double([1.0, 100.0][index])),
                _ => Err(PropertyError::NotResolvable(name.to_string())),
            }
        }

        fn dimension(&self, tag: HookTag, _name: &str) -> Result<usize> {
            Ok(if tag == HookTag(1) { 2 } else { 1 })
        }
    }

    fn hooked_set() -> PropertySet {
        let mut set = PropertySet::new(TABLE);
        set.set_get_hook("rate", HookTag(0)).unwrap();
        set.set_get_hook("range", HookTag(1)).unwrap();
        set
    }

    #[test]
    fn hooked_reads_go_to_the_hook() {
        let set = hooked_set();
        let view = PropertyView::new(&set, Some(&Fixed));
        assert_eq!(view.get_double("rate", 0).unwrap(), 24.0);
        assert_eq!(view.get_double("range", 1).unwrap(), 100.0);
        assert_eq!(view.get_n::<f64>("range", 2).unwrap(), vec![1.0, 100.0]);
        assert_eq!(view.get_string("label", 0).unwrap(), "plain");
        assert_eq!(view.get_dimension("range").unwrap(), 2);
    }

    #[test]
    fn hook_checks_index_and_container_checks_type() {
        let set = hooked_set();
        let view = PropertyView::new(&set, Some(&Fixed));
        assert!(matches!(
            view.get_double("range", 2).unwrap_err(),
            PropertyError::BadIndex { index: 2, .. }
        ));
        assert!(view.get_n::<f64>("range", 3).is_err());
        assert!(matches!(
            view.get_int("rate", 0).unwrap_err(),
            PropertyError::WrongType { .. }
        ));
    }

    #[test]
    fn hookless_view_refuses_hooked_slots() {
        let set = hooked_set();
        let view = PropertyView::stored(&set);
        assert_eq!(
            view.get_double("rate", 0).unwrap_err(),
            PropertyError::ResolvedByHost("rate".into())
        );
        assert_eq!(view.get_string("label", 0).unwrap(), "plain");
    }

    #[test]
    fn default_reset_is_a_missing_feature() {
        let set = hooked_set();
        let view = PropertyView::new(&set, Some(&Fixed));
        assert_eq!(
            view.reset_hooked("rate").unwrap_err().status(),
            ofxh_core::Status::ErrMissingHostFeature
        );
    }

    #[test]
    fn scalar_reads_follow_declared_type() {
        let set = hooked_set();
        let view = PropertyView::new(&set, Some(&Fixed));
        assert_eq!(view.get_scalar("rate", 0).unwrap(), Scalar::Double(24.0));
        assert_eq!(
            view.get_scalar("label", 0).unwrap(),
            Scalar::String("plain".into())
        );
    }
}
