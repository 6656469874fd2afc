use std::collections::HashMap;

use crate::error::PropertyError;
use crate::hook::HookTag;
use crate::spec::{PropDefault, PropSpec, PropertyType};
use crate::value::{PropValue, RawPointer, Values};
use crate::Result;

/// One declared slot.
#[derive(Debug, Clone)]
pub struct Property {
    name: &'static str,
    dimension: usize,
    plugin_read_only: bool,
    default: PropDefault,
    values: Values,
    hook: Option<HookTag>,
}

impl Property {
    fn from_spec(spec: &PropSpec) -> Self {
        Self {
            name: spec.name,
            dimension: spec.dimension,
            plugin_read_only: spec.plugin_read_only,
            default: spec.default,
            values: Values::filled(spec.default, spec.dimension),
            hook: None,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn kind(&self) -> PropertyType {
        self.default.kind()
    }

    /// Declared dimension; `0` for unbounded slots.
    pub fn declared_dimension(&self) -> usize {
        self.dimension
    }

    pub fn is_unbounded(&self) -> bool {
        self.dimension == 0
    }

    pub fn is_plugin_read_only(&self) -> bool {
        self.plugin_read_only
    }

    pub fn hook_tag(&self) -> Option<HookTag> {
        self.hook
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    fn check_kind(&self, requested: PropertyType) -> Result<()> {
        if self.kind() != requested {
            return Err(PropertyError::WrongType {
                name: self.name.to_string(),
                requested,
                found: self.kind(),
            });
        }
        Ok(())
    }

    fn check_stored(&self) -> Result<()> {
        if self.hook.is_some() {
            return Err(PropertyError::ResolvedByHost(self.name.to_string()));
        }
        Ok(())
    }

    fn bad_index(&self, index: usize) -> PropertyError {
        PropertyError::BadIndex {
            name: self.name.to_string(),
            index,
            dimension: self.values.len().max(self.dimension),
        }
    }
}

/// Ordered name → slot container.
///
/// Slots keep their declaration order; lookups go through a name index. Host-side writes
/// (`set_*`) ignore the plugin-read-only flag; enforcing it is the boundary's job.
#[derive(Debug, Clone, Default)]
pub struct PropertySet {
    props: Vec<Property>,
    index: HashMap<&'static str, usize>,
}

impl PropertySet {
    /// Declare every row of `table`. Later duplicates of a name are ignored.
    pub fn new(table: &[PropSpec]) -> Self {
        let mut set = Self::default();
        for spec in table {
            debug_assert!(
                !set.index.contains_key(spec.name),
                "duplicate property '{}' in declaration table",
                spec.name
            );
            if !set.index.contains_key(spec.name) {
                set.push(spec);
            }
        }
        set
    }

    fn push(&mut self, spec: &PropSpec) {
        self.index.insert(spec.name, self.props.len());
        self.props.push(Property::from_spec(spec));
    }

    /// Declare additional slots. Fails without declaring anything if a name already exists.
    pub fn add_properties(&mut self, table: &[PropSpec]) -> Result<()> {
        for (i, spec) in table.iter().enumerate() {
            let repeated = table[..i].iter().any(|s| s.name == spec.name);
            if repeated || self.index.contains_key(spec.name) {
                return Err(PropertyError::Exists(spec.name.to_string()));
            }
        }
        for spec in table {
            self.push(spec);
        }
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.props.len()
    }

    pub fn is_empty(&self) -> bool {
        self.props.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All slots in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &Property> {
        self.props.iter()
    }

    pub fn property(&self, name: &str) -> Result<&Property> {
        self.index
            .get(name)
            .map(|&i| &self.props[i])
            .ok_or_else(|| PropertyError::Unknown(name.to_string()))
    }

    fn property_mut(&mut self, name: &str) -> Result<&mut Property> {
        match self.index.get(name) {
            Some(&i) => Ok(&mut self.props[i]),
            None => Err(PropertyError::Unknown(name.to_string())),
        }
    }

    // ---- flags and hooks ----

    pub fn is_plugin_read_only(&self, name: &str) -> Result<bool> {
        Ok(self.property(name)?.plugin_read_only)
    }

    pub fn set_plugin_read_only(&mut self, name: &str, read_only: bool) -> Result<()> {
        self.property_mut(name)?.plugin_read_only = read_only;
        Ok(())
    }

    pub fn set_all_plugin_read_only(&mut self, read_only: bool) {
        for p in &mut self.props {
            p.plugin_read_only = read_only;
        }
    }

    /// Route every read of `name` to a hook. The slot's stored values are dropped.
    pub fn set_get_hook(&mut self, name: &str, tag: HookTag) -> Result<()> {
        let p = self.property_mut(name)?;
        p.hook = Some(tag);
        p.values.clear();
        Ok(())
    }

    pub fn hook_tag(&self, name: &str) -> Result<Option<HookTag>> {
        Ok(self.property(name)?.hook)
    }

    // ---- generic access ----

    /// Current number of values: the declared dimension, or the length of an unbounded slot.
    pub fn get_dimension(&self, name: &str) -> Result<usize> {
        let p = self.property(name)?;
        if p.is_unbounded() {
            p.check_stored()?;
            Ok(p.values.len())
        } else {
            Ok(p.dimension)
        }
    }

    pub fn get<T: PropValue>(&self, name: &str, index: usize) -> Result<&T> {
        let all = self.get_all::<T>(name)?;
        all.get(index).ok_or_else(|| match self.property(name) {
            Ok(p) => p.bad_index(index),
            Err(e) => e,
        })
    }

    pub fn get_all<T: PropValue>(&self, name: &str) -> Result<&[T]> {
        let p = self.property(name)?;
        p.check_kind(T::KIND)?;
        p.check_stored()?;
        T::slice(&p.values).ok_or_else(|| PropertyError::failed("slot storage does not match its type"))
    }

    /// The first `count` values.
    pub fn get_n<T: PropValue>(&self, name: &str, count: usize) -> Result<&[T]> {
        let all = self.get_all::<T>(name)?;
        if count > all.len() {
            return Err(self.property(name)?.bad_index(count.saturating_sub(1)));
        }
        Ok(&all[..count])
    }

    /// Write one value. On an unbounded slot, `index == len` appends.
    pub fn set<T: PropValue>(&mut self, name: &str, index: usize, value: T) -> Result<()> {
        let p = self.property_mut(name)?;
        p.check_kind(T::KIND)?;
        p.check_stored()?;
        let unbounded = p.is_unbounded();
        let err = p.bad_index(index);
        let vals = T::vec_mut(&mut p.values)
            .ok_or_else(|| PropertyError::failed("slot storage does not match its type"))?;
        if index < vals.len() {
            vals[index] = value;
        } else if unbounded && index == vals.len() {
            vals.push(value);
        } else {
            return Err(err);
        }
        Ok(())
    }

    /// Write several values at once. Fixed slots take a prefix; unbounded slots are replaced.
    pub fn set_n<T: PropValue>(&mut self, name: &str, values: &[T]) -> Result<()> {
        let p = self.property_mut(name)?;
        p.check_kind(T::KIND)?;
        p.check_stored()?;
        if !p.is_unbounded() && values.len() > p.dimension {
            return Err(p.bad_index(values.len() - 1));
        }
        let unbounded = p.is_unbounded();
        let vals = T::vec_mut(&mut p.values)
            .ok_or_else(|| PropertyError::failed("slot storage does not match its type"))?;
        if unbounded {
            *vals = values.to_vec();
        } else {
            vals[..values.len()].clone_from_slice(values);
        }
        Ok(())
    }

    /// Restore the declared defaults.
    pub fn reset(&mut self, name: &str) -> Result<()> {
        let p = self.property_mut(name)?;
        p.check_stored()?;
        p.values = Values::filled(p.default, p.dimension);
        Ok(())
    }

    // ---- typed convenience ----

    pub fn get_string(&self, name: &str, index: usize) -> Result<&str> {
        self.get::<String>(name, index).map(String::as_str)
    }

    pub fn get_strings(&self, name: &str) -> Result<&[String]> {
        self.get_all::<String>(name)
    }

    pub fn get_int(&self, name: &str, index: usize) -> Result<i32> {
        self.get::<i32>(name, index).copied()
    }

    pub fn get_double(&self, name: &str, index: usize) -> Result<f64> {
        self.get::<f64>(name, index).copied()
    }

    pub fn get_pointer(&self, name: &str, index: usize) -> Result<RawPointer> {
        self.get::<RawPointer>(name, index).copied()
    }

    pub fn set_string(&mut self, name: &str, index: usize, value: impl Into<String>) -> Result<()> {
        self.set::<String>(name, index, value.into())
    }

    pub fn set_int(&mut self, name: &str, index: usize, value: i32) -> Result<()> {
        self.set::<i32>(name, index, value)
    }

    pub fn set_double(&mut self, name: &str, index: usize, value: f64) -> Result<()> {
        self.set::<f64>(name, index, value)
    }

    pub fn set_pointer(&mut self, name: &str, index: usize, value: RawPointer) -> Result<()> {
        self.set::<RawPointer>(name, index, value)
    }

    /// Position of `value` in a string slot, if present.
    pub fn find_string_index(&self, name: &str, value: &str) -> Result<Option<usize>> {
        Ok(self.get_strings(name)?.iter().position(|s| s == value))
    }
}
