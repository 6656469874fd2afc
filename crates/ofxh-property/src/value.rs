use std::ffi::c_void;

use crate::spec::{PropDefault, PropertyType};

/// Address of host-owned memory, stored as an integer.
///
/// Pointer slots never own what they point at. Keeping the address as a plain integer
/// means property sets stay `Send`; dereferencing is the caller's business.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct RawPointer(usize);

impl RawPointer {
    pub const NULL: RawPointer = RawPointer(0);

    pub fn from_ptr<T>(ptr: *const T) -> Self {
        RawPointer(ptr as usize)
    }

    pub fn from_addr(addr: usize) -> Self {
        RawPointer(addr)
    }

    pub fn addr(self) -> usize {
        self.0
    }

    pub fn as_ptr(self) -> *mut c_void {
        self.0 as *mut c_void
    }

    pub fn is_null(self) -> bool {
        self.0 == 0
    }
}

/// A single value read out of (or resolved for) one index of a slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    String(String),
    Int(i32),
    Double(f64),
    Pointer(RawPointer),
}

impl Scalar {
    pub fn kind(&self) -> PropertyType {
        match self {
            Scalar::String(_) => PropertyType::String,
            Scalar::Int(_) => PropertyType::Int,
            Scalar::Double(_) => PropertyType::Double,
            Scalar::Pointer(_) => PropertyType::Pointer,
        }
    }
}

impl From<bool> for Scalar {
    fn from(b: bool) -> Self {
        Scalar::Int(i32::from(b))
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        Scalar::String(s.to_string())
    }
}

impl From<String> for Scalar {
    fn from(s: String) -> Self {
        Scalar::String(s)
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Scalar::Double(v)
    }
}

/// Stored values of one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Values {
    String(Vec<String>),
    Int(Vec<i32>),
    Double(Vec<f64>),
    Pointer(Vec<RawPointer>),
}

impl Values {
    /// `dimension` copies of `default` (none for unbounded slots).
    pub(crate) fn filled(default: PropDefault, dimension: usize) -> Self {
        match default {
            PropDefault::Str(s) => Values::String(vec![s.to_string(); dimension]),
            PropDefault::Int(v) => Values::Int(vec![v; dimension]),
            PropDefault::Double(v) => Values::Double(vec![v; dimension]),
            PropDefault::Pointer => Values::Pointer(vec![RawPointer::NULL; dimension]),
        }
    }

    pub fn kind(&self) -> PropertyType {
        match self {
            Values::String(_) => PropertyType::String,
            Values::Int(_) => PropertyType::Int,
            Values::Double(_) => PropertyType::Double,
            Values::Pointer(_) => PropertyType::Pointer,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Values::String(v) => v.len(),
            Values::Int(v) => v.len(),
            Values::Double(v) => v.len(),
            Values::Pointer(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn clear(&mut self) {
        match self {
            Values::String(v) => v.clear(),
            Values::Int(v) => v.clear(),
            Values::Double(v) => v.clear(),
            Values::Pointer(v) => v.clear(),
        }
    }
}

/// Rust types that can live in a slot.
pub trait PropValue: Clone + Sized {
    const KIND: PropertyType;

    fn slice(values: &Values) -> Option<&[Self]>;
    fn vec_mut(values: &mut Values) -> Option<&mut Vec<Self>>;
    fn from_default(default: PropDefault) -> Option<Self>;
    fn from_scalar(s: Scalar) -> Option<Self>;
}

impl PropValue for String {
    const KIND: PropertyType = PropertyType::String;

    fn slice(values: &Values) -> Option<&[Self]> {
        match values {
            Values::String(v) => Some(v),
            _ => None,
        }
    }

    fn vec_mut(values: &mut Values) -> Option<&mut Vec<Self>> {
        match values {
            Values::String(v) => Some(v),
            _ => None,
        }
    }

    fn from_default(default: PropDefault) -> Option<Self> {
        match default {
            PropDefault::Str(s) => Some(s.to_string()),
            _ => None,
        }
    }

    fn from_scalar(s: Scalar) -> Option<Self> {
        match s {
            Scalar::String(v) => Some(v),
            _ => None,
        }
    }
}

impl PropValue for i32 {
    const KIND: PropertyType = PropertyType::Int;

    fn slice(values: &Values) -> Option<&[Self]> {
        match values {
            Values::Int(v) => Some(v),
            _ => None,
        }
    }

    fn vec_mut(values: &mut Values) -> Option<&mut Vec<Self>> {
        match values {
            Values::Int(v) => Some(v),
            _ => None,
        }
    }

    fn from_default(default: PropDefault) -> Option<Self> {
        match default {
            PropDefault::Int(v) => Some(v),
            _ => None,
        }
    }

    fn from_scalar(s: Scalar) -> Option<Self> {
        match s {
            Scalar::Int(v) => Some(v),
            _ => None,
        }
    }
}

impl PropValue for f64 {
    const KIND: PropertyType = PropertyType::Double;

    fn slice(values: &Values) -> Option<&[Self]> {
        match values {
            Values::Double(v) => Some(v),
            _ => None,
        }
    }

    fn vec_mut(values: &mut Values) -> Option<&mut Vec<Self>> {
        match values {
            Values::Double(v) => Some(v),
            _ => None,
        }
    }

    fn from_default(default: PropDefault) -> Option<Self> {
        match default {
            PropDefault::Double(v) => Some(v),
            _ => None,
        }
    }

    fn from_scalar(s: Scalar) -> Option<Self> {
        match s {
            Scalar::Double(v) => Some(v),
            _ => None,
        }
    }
}

impl PropValue for RawPointer {
    const KIND: PropertyType = PropertyType::Pointer;

    fn slice(values: &Values) -> Option<&[Self]> {
        match values {
            Values::Pointer(v) => Some(v),
            _ => None,
        }
    }

    fn vec_mut(values: &mut Values) -> Option<&mut Vec<Self>> {
        match values {
            Values::Pointer(v) => Some(v),
            _ => None,
        }
    }

    fn from_default(default: PropDefault) -> Option<Self> {
        match default {
            PropDefault::Pointer => Some(RawPointer::NULL),
            _ => None,
        }
    }

    fn from_scalar(s: Scalar) -> Option<Self> {
        match s {
            Scalar::Pointer(v) => Some(v),
            _ => None,
        }
    }
}
