#![forbid(unsafe_code)]

mod concurrency;

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{SystemTime, UNIX_EPOCH};

    use ofxh_clip::{
        ClipDeclaration, ClipDescriptor, ClipInstance, ClipSuite, Image, ImageTable,
        PropertySetHandle, StaticClipHost,
    };
    use ofxh_core::{load_host_config_from, load_typed_json, names, HostError, Status};

    // ---- Golden fixtures (JSON contracts) ----
    const CLIPS_FILTER_JSON: &str = include_str!("../fixtures/clips_filter.json");
    const CLIPS_BLANK_NAME_JSON: &str = include_str!("../fixtures/clips_blank_name.json");
    const CLIPS_MISSING_NAME_JSON: &str = include_str!("../fixtures/clips_missing_name.json");
    const HOST_CONFIG_JSON: &str = include_str!("../fixtures/host_config.json");
    const HOST_CONFIG_EMPTY_JSON: &str = include_str!("../fixtures/host_config_empty_chromatic.json");
    const HOST_STATE_JSON: &str = include_str!("../fixtures/host_state_connected.json");

    fn write_temp_fixture(name: &str, contents: &str) -> PathBuf {
        let mut p = std::env::temp_dir();
        let ts = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        p.push(format!("ofxh_contract_tests_{name}_{ts}.json"));
        fs::write(&p, contents).expect("write fixture");
        p
    }

    fn filter_clips() -> Vec<ClipDescriptor> {
        let decls: Vec<ClipDeclaration> =
            serde_json::from_str(CLIPS_FILTER_JSON).expect("clips_filter.json should parse");
        decls
            .iter()
            .map(|d| d.to_descriptor().expect("valid declaration"))
            .collect()
    }

    fn connected_host() -> StaticClipHost {
        let mut host: StaticClipHost =
            serde_json::from_str(HOST_STATE_JSON).expect("host_state_connected.json should parse");
        host.allocate_pixels().expect("fixture frame fits");
        host
    }

    #[test]
    fn golden_clip_declarations_build_descriptors() {
        let path = write_temp_fixture("clips_filter", CLIPS_FILTER_JSON);
        let decls: Vec<ClipDeclaration> = load_typed_json(&path).expect("load declarations");
        let clips: Vec<ClipDescriptor> = decls.iter().map(|d| d.to_descriptor().unwrap()).collect();

        let clip_names: Vec<&str> = clips.iter().map(ClipDescriptor::name).collect();
        assert_eq!(clip_names, ["Source", "Mask", "Output"]);

        let mask = clips[1].base();
        assert!(mask.is_optional() && mask.is_mask());
        assert!(!mask.supports_tiles());
        assert_eq!(mask.field_extraction(), names::FIELD_DOUBLED);
        assert!(clips[2].is_output());
        assert_eq!(clips[2].base().field_extraction(), names::FIELD_SINGLE);

        // Declarations survive a trip through the descriptor unchanged.
        let back: Vec<ClipDeclaration> = clips.iter().map(ClipDeclaration::from_descriptor).collect();
        assert_eq!(back, decls);

        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_blank_clip_name_is_rejected() {
        let decls: Vec<ClipDeclaration> = serde_json::from_str(CLIPS_BLANK_NAME_JSON).unwrap();
        let err = decls[0].to_descriptor().expect_err("blank name must fail");
        assert!(err.to_string().contains("name"), "got: {err}");
    }

    #[test]
    fn golden_missing_clip_name_is_a_json_error() {
        let path = write_temp_fixture("clips_missing_name", CLIPS_MISSING_NAME_JSON);
        let err = load_typed_json::<Vec<ClipDeclaration>>(&path)
            .expect_err("clips_missing_name.json must fail");
        assert!(matches!(err, HostError::Json { .. }), "got: {err}");
        assert!(err.to_string().contains("name"), "got: {err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_host_config_loads() {
        let path = write_temp_fixture("host_config", HOST_CONFIG_JSON);
        let cfg = load_host_config_from(&path).expect("host_config.json should load");
        assert!(cfg.is_chromatic_component(names::COMPONENT_RGB));
        assert_eq!(cfg.log_filter, "ofxh_clip=debug");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn golden_empty_chromatic_set_is_rejected() {
        let path = write_temp_fixture("host_config_empty", HOST_CONFIG_EMPTY_JSON);
        let err = load_host_config_from(&path).expect_err("empty chromatic set must fail");
        assert!(matches!(err, HostError::InvalidConfig { .. }), "got: {err}");
        assert!(err.to_string().to_lowercase().contains("chromatic"), "got: {err}");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn missing_config_file_reports_its_path() {
        let path = std::env::temp_dir().join("ofxh_contract_tests_does_not_exist.json");
        let err = load_host_config_from(&path).expect_err("missing file must fail");
        assert!(matches!(err, HostError::Io { .. }));
        assert!(err.to_string().contains("ofxh_contract_tests_does_not_exist"));
    }

    // ---- Clip contracts ----

    #[test]
    fn label_falls_back_to_name_until_set() {
        let mut d = ClipDescriptor::new("Source");
        assert_eq!(d.base().short_label(), "Source");
        assert_eq!(d.base().long_label(), "Source");
        d.set_label("L").unwrap();
        assert_eq!(d.base().short_label(), "L");
        assert_eq!(d.base().long_label(), "L");
        d.set_short_label("S").unwrap();
        assert_eq!(d.base().short_label(), "S");
        assert_eq!(d.base().label(), "L");
    }

    #[test]
    fn frame_range_index_two_is_invalid_value() {
        let src = &filter_clips()[0];
        let clip = ClipInstance::unbound(src, Box::new(connected_host())).unwrap();
        let props = clip.props();
        assert_eq!(props.get_double(names::FRAME_RANGE, 0).unwrap(), 1.0);
        assert_eq!(props.get_double(names::FRAME_RANGE, 1).unwrap(), 100.0);
        for _ in 0..3 {
            let err = props.get_double(names::FRAME_RANGE, 2).unwrap_err();
            assert_eq!(err.status(), Status::ErrValue);
        }
    }

    #[test]
    fn negotiation_table() {
        fn clip_supporting(comps: &[&str]) -> ClipInstance {
            let mut d = ClipDescriptor::new("Source");
            for c in comps {
                d.add_supported_component(c).unwrap();
            }
            ClipInstance::unbound(&d, Box::new(StaticClipHost::default())).unwrap()
        }
        let rgba = names::COMPONENT_RGBA;
        let alpha = names::COMPONENT_ALPHA;

        assert_eq!(clip_supporting(&[rgba]).find_supported_comp(rgba), rgba);
        assert_eq!(clip_supporting(&[alpha]).find_supported_comp(rgba), alpha);
        assert_eq!(clip_supporting(&[rgba]).find_supported_comp(alpha), rgba);
        assert_eq!(
            clip_supporting(&["CustomXYZ"]).find_supported_comp("CustomXYZ"),
            "CustomXYZ"
        );
        assert_eq!(clip_supporting(&[rgba, alpha]).find_supported_comp(alpha), alpha);
        assert_eq!(
            clip_supporting(&[names::COMPONENT_RGB]).find_supported_comp(rgba),
            names::COMPONENT_RGB
        );
        assert_eq!(
            clip_supporting(&[names::COMPONENT_RGB, names::COMPONENT_XY]).find_supported_comp(rgba),
            names::COMPONENT_NONE
        );
    }

    #[test]
    fn image_reference_counting_destroys_exactly_once() {
        let alive = Arc::new(AtomicBool::new(true));
        let destroyed = Arc::new(AtomicUsize::new(0));
        let mut img = Image::new();
        {
            let alive = alive.clone();
            let destroyed = destroyed.clone();
            img.on_destroy(move || {
                alive.store(false, Ordering::SeqCst);
                destroyed.fetch_add(1, Ordering::SeqCst);
            });
        }
        let mut images = ImageTable::new();
        let h = images.insert(img).unwrap();

        images.add_reference(h).unwrap();
        assert!(!images.release_reference(h).unwrap());
        assert!(alive.load(Ordering::SeqCst));

        images.add_reference(h).unwrap();
        assert!(!images.release_reference(h).unwrap());
        assert!(images.release_reference(h).unwrap());
        assert!(!alive.load(Ordering::SeqCst));
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);

        assert!(images.release_reference(h).is_err());
        assert_eq!(destroyed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn reset_on_instance_is_missing_host_feature_for_any_name() {
        let clip = ClipInstance::unbound(&filter_clips()[0], Box::new(connected_host())).unwrap();
        for name in [
            names::PIXEL_DEPTH,
            names::FRAME_RANGE,
            names::PROP_LABEL,
            names::SUPPORTED_COMPONENTS,
            "",
            "made.up",
        ] {
            assert_eq!(
                clip.reset(name).unwrap_err().status(),
                Status::ErrMissingHostFeature,
                "reset({name:?})"
            );
        }
    }

    #[test]
    fn source_instance_end_to_end() {
        let desc = ClipDescriptor::new("Source");
        let mut clip = ClipInstance::unbound(&desc, Box::new(connected_host())).unwrap();
        assert_eq!(clip.pixel_depth(), names::BIT_DEPTH_NONE);

        clip.set_pixel_depth(names::BIT_DEPTH_FLOAT);
        clip.set_components(names::COMPONENT_RGBA);
        assert_eq!(clip.pixel_depth(), names::BIT_DEPTH_FLOAT);
        assert_eq!(clip.components(), names::COMPONENT_RGBA);

        let mut suite = ClipSuite::new();
        let h = suite.clips.insert_instance(clip).unwrap();
        let ps = PropertySetHandle::Clip(h);
        assert_eq!(
            suite.prop_get_string(ps, names::PIXEL_DEPTH, 0).unwrap(),
            names::BIT_DEPTH_FLOAT
        );
        assert_eq!(
            suite.prop_get_string(ps, names::COMPONENTS, 0).unwrap(),
            names::COMPONENT_RGBA
        );
        assert_eq!(
            suite.prop_set_string(ps, names::PIXEL_DEPTH, 0, names::BIT_DEPTH_BYTE),
            Err(Status::ErrValue)
        );

        let img = suite.clip_get_image(h, 12.0, None).unwrap();
        let ips = PropertySetHandle::Image(img);
        assert_eq!(
            suite.prop_get_string(ips, names::PIXEL_DEPTH, 0).unwrap(),
            names::BIT_DEPTH_FLOAT
        );
        assert_eq!(
            suite.prop_get_string(ips, names::PREMULTIPLICATION, 0).unwrap(),
            names::IMAGE_PREMULTIPLIED
        );
        assert_eq!(
            suite.prop_get_n::<i32>(ips, names::IMAGE_REGION_OF_DEFINITION, 4).unwrap(),
            vec![0, 0, 1920, 1080]
        );
        suite.clip_release_image(img).unwrap();
        assert!(suite.images.is_empty());
    }

    #[test]
    fn fetched_image_is_a_frozen_snapshot() {
        let mut clip = ClipInstance::unbound(&filter_clips()[0], Box::new(connected_host())).unwrap();
        clip.set_pixel_depth(names::BIT_DEPTH_BYTE);
        clip.set_components(names::COMPONENT_RGBA);
        let img = clip.get_image(3.0, None).unwrap().expect("connected clip has a frame");

        clip.set_pixel_depth(names::BIT_DEPTH_FLOAT);
        clip.set_components(names::COMPONENT_ALPHA);

        assert_eq!(img.pixel_depth(), names::BIT_DEPTH_BYTE);
        assert_eq!(img.components(), names::COMPONENT_RGBA);
        assert_eq!(
            img.props().get_string(names::PIXEL_DEPTH, 0).unwrap(),
            names::BIT_DEPTH_BYTE
        );
        assert_eq!(clip.pixel_depth(), names::BIT_DEPTH_FLOAT);
    }

    #[test]
    fn stale_clip_handle_fails_loudly() {
        let mut suite = ClipSuite::new();
        let h = suite.clips.insert_descriptor(ClipDescriptor::new("Source")).unwrap();
        let ps = suite.clip_get_property_set(h).unwrap();
        suite.clips.remove(h);
        let again = suite.clips.insert_descriptor(ClipDescriptor::new("Output")).unwrap();
        assert_eq!(h.index(), again.index());
        assert_eq!(suite.prop_get_string(ps, names::PROP_NAME, 0), Err(Status::ErrBadHandle));
        assert_eq!(suite.clip_get_property_set(h), Err(Status::ErrBadHandle));
    }
}
