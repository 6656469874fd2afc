use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyType {
    String,
    Int,
    Double,
    Pointer,
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PropertyType::String => "string",
            PropertyType::Int => "int",
            PropertyType::Double => "double",
            PropertyType::Pointer => "pointer",
        };
        f.write_str(s)
    }
}

/// Declared default of a slot. Its variant fixes the slot's type.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropDefault {
    Str(&'static str),
    Int(i32),
    Double(f64),
    /// Null pointer.
    Pointer,
}

impl PropDefault {
    pub fn kind(&self) -> PropertyType {
        match self {
            PropDefault::Str(_) => PropertyType::String,
            PropDefault::Int(_) => PropertyType::Int,
            PropDefault::Double(_) => PropertyType::Double,
            PropDefault::Pointer => PropertyType::Pointer,
        }
    }
}

/// One row of a static declaration table.
///
/// `dimension == 0` declares an unbounded slot that starts empty and grows on append.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropSpec {
    pub name: &'static str,
    pub dimension: usize,
    pub plugin_read_only: bool,
    pub default: PropDefault,
}

impl PropSpec {
    pub const fn string(
        name: &'static str,
        dimension: usize,
        plugin_read_only: bool,
        default: &'static str,
    ) -> Self {
        Self {
            name,
            dimension,
            plugin_read_only,
            default: PropDefault::Str(default),
        }
    }

    pub const fn int(name: &'static str, dimension: usize, plugin_read_only: bool, default: i32) -> Self {
        Self {
            name,
            dimension,
            plugin_read_only,
            default: PropDefault::Int(default),
        }
    }

    pub const fn double(
        name: &'static str,
        dimension: usize,
        plugin_read_only: bool,
        default: f64,
    ) -> Self {
        Self {
            name,
            dimension,
            plugin_read_only,
            default: PropDefault::Double(default),
        }
    }

    pub const fn pointer(name: &'static str, dimension: usize, plugin_read_only: bool) -> Self {
        Self {
            name,
            dimension,
            plugin_read_only,
            default: PropDefault::Pointer,
        }
    }

    pub fn kind(&self) -> PropertyType {
        self.default.kind()
    }
}
