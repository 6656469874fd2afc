use ofxh_core::names;

/// Pick the component layout a clip should be given when `requested` is asked for.
///
/// Precedence, first match wins:
/// 1. `requested` is supported: keep it.
/// 2. `requested` is not chromatic (a custom layout): keep it, the caller knows best.
/// 3. RGBA requested and Alpha supported gives Alpha; Alpha requested and RGBA supported
///    gives RGBA.
/// 4. exactly one supported layout: use it.
/// 5. otherwise `OfxImageComponentNone`.
///
/// Step 4 only runs for chromatic requests.
pub fn find_supported_comp<'a>(
    supported: &'a [String],
    requested: &'a str,
    is_chromatic: impl Fn(&str) -> bool,
) -> &'a str {
    let has = |c: &str| supported.iter().any(|s| s == c);

    if has(requested) {
        return requested;
    }
    if !is_chromatic(requested) {
        return requested;
    }
    if requested == names::COMPONENT_RGBA && has(names::COMPONENT_ALPHA) {
        return names::COMPONENT_ALPHA;
    }
    if requested == names::COMPONENT_ALPHA && has(names::COMPONENT_RGBA) {
        return names::COMPONENT_RGBA;
    }
    if let [only] = supported {
        return only;
    }
    names::COMPONENT_NONE
}
