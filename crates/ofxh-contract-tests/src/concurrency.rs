#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::thread;

    use ofxh_clip::{ClipDescriptor, ClipInstance, EffectInstance, StaticClipHost};
    use ofxh_core::{names, PointD, Status};
    use ofxh_property::PropertySet;

    /// One tracked entity: an effect that records the times it was notified at.
    #[derive(Default)]
    struct Tracker {
        seen: Mutex<Vec<(String, f64, f64)>>,
    }

    impl EffectInstance for Tracker {
        fn main_entry(&self, action: &str, in_args: &PropertySet) -> Status {
            if action != names::ACTION_BEGIN_INSTANCE_CHANGED {
                return Status::ReplyDefault;
            }
            let (Ok(reason), Ok(time), Ok(scale)) = (
                in_args.get_string(names::PROP_CHANGE_REASON, 0),
                in_args.get_double(names::PROP_TIME, 0),
                in_args.get_double(names::RENDER_SCALE, 1),
            ) else {
                return Status::Failed;
            };
            self.seen
                .lock()
                .unwrap()
                .push((reason.to_string(), time, scale));
            Status::Ok
        }
    }

    /// Independent instances may be notified from different threads at once, each with
    /// its own time; every notification reaches its own effect and nothing else.
    #[test]
    fn independent_instances_notify_concurrently() {
        const ENTITIES: usize = 8;
        const STEPS: usize = 50;

        let desc = ClipDescriptor::new(names::SOURCE_CLIP_NAME);
        let trackers: Vec<Arc<Tracker>> = (0..ENTITIES).map(|_| Arc::new(Tracker::default())).collect();

        let handles: Vec<_> = trackers
            .iter()
            .enumerate()
            .map(|(i, tracker)| {
                let effect: Arc<dyn EffectInstance> = tracker.clone();
                let host = StaticClipHost::delivering(names::BIT_DEPTH_FLOAT, names::COMPONENT_RGBA);
                let clip = ClipInstance::new(&effect, &desc, Box::new(host)).unwrap();
                thread::spawn(move || {
                    // the clip only holds a weak reference
                    let _effect = effect;
                    for step in 0..STEPS {
                        let time = (i * 1000 + step) as f64;
                        let st = clip.instance_changed_action(
                            names::CHANGE_PLUGIN_EDITED,
                            time,
                            PointD::new(1.0, 0.5),
                        );
                        assert_eq!(st, Status::Ok);
                    }
                })
            })
            .collect();

        for h in handles {
            h.join().expect("tracker thread panicked");
        }

        for (i, tracker) in trackers.iter().enumerate() {
            let seen = tracker.seen.lock().unwrap();
            let times: Vec<f64> = seen.iter().map(|(_, t, _)| *t).collect();
            let expected: Vec<f64> = (0..STEPS).map(|s| (i * 1000 + s) as f64).collect();
            assert_eq!(times, expected, "tracker {i}");
            assert!(seen
                .iter()
                .all(|(r, _, s)| r == names::CHANGE_PLUGIN_EDITED && *s == 0.5));
        }
    }
}
