//! Sizes implied by pixel depth and component names.

use ofxh_core::names;

/// Channels per pixel for the known component layouts.
pub fn component_count(comp: &str) -> Option<usize> {
    match comp {
        names::COMPONENT_RGBA => Some(4),
        names::COMPONENT_RGB => Some(3),
        names::COMPONENT_XY => Some(2),
        names::COMPONENT_ALPHA => Some(1),
        _ => None,
    }
}

/// Bytes per channel for the known pixel depths.
pub fn bit_depth_bytes(depth: &str) -> Option<usize> {
    match depth {
        names::BIT_DEPTH_BYTE => Some(1),
        names::BIT_DEPTH_SHORT => Some(2),
        names::BIT_DEPTH_FLOAT => Some(4),
        _ => None,
    }
}

pub fn bytes_per_pixel(depth: &str, comp: &str) -> Option<usize> {
    Some(bit_depth_bytes(depth)? * component_count(comp)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_rgba_is_sixteen_bytes() {
        assert_eq!(bytes_per_pixel(names::BIT_DEPTH_FLOAT, names::COMPONENT_RGBA), Some(16));
        assert_eq!(bytes_per_pixel(names::BIT_DEPTH_BYTE, names::COMPONENT_ALPHA), Some(1));
        assert_eq!(bytes_per_pixel(names::BIT_DEPTH_SHORT, names::COMPONENT_XY), Some(4));
    }

    #[test]
    fn none_and_custom_have_no_size() {
        assert_eq!(bytes_per_pixel(names::BIT_DEPTH_NONE, names::COMPONENT_RGBA), None);
        assert_eq!(bytes_per_pixel(names::BIT_DEPTH_FLOAT, names::COMPONENT_NONE), None);
        assert_eq!(component_count("CustomXYZ"), None);
    }
}
