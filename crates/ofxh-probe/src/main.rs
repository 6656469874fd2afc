use std::env;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{bail, Context, Result};
use ofxh_clip::{
    ClipInstance, ClipSuite, EffectInstance, PropertySet, PropertySetHandle,
};
use ofxh_core::{load_typed_json, names, parse_host_config, HostConfig, PointD, Status};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod session;

use session::{ClipReport, ImageReport, Report, Session};

/// Stand-in effect: answers chromatic queries from the host configuration and records the
/// actions it receives.
struct ProbeEffect {
    config: HostConfig,
    actions: Mutex<Vec<String>>,
}

impl EffectInstance for ProbeEffect {
    fn main_entry(&self, action: &str, in_args: &PropertySet) -> Status {
        let clip = in_args.get_string(names::PROP_NAME, 0).unwrap_or("?");
        info!(action, clip, "effect action");
        match self.actions.lock() {
            Ok(mut actions) => {
                actions.push(format!("{action}:{clip}"));
                Status::Ok
            }
            Err(_) => Status::Failed,
        }
    }

    fn is_chromatic_component(&self, comp: &str) -> bool {
        self.config.is_chromatic_component(comp)
    }
}

fn init_tracing(config: &HostConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let Some(path) = env::args_os().nth(1).map(PathBuf::from) else {
        bail!("usage: ofxh-probe <session.json>");
    };

    let session: Session = load_typed_json(&path)?;
    let config = match &session.config {
        Some(v) => parse_host_config(&v.to_string()).context("embedded host config")?,
        None => HostConfig::default(),
    };
    init_tracing(&config);

    let report = run(session, config)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn run(mut session: Session, config: HostConfig) -> Result<Report> {
    let host_config = config.clone();
    let effect: Arc<dyn EffectInstance> = Arc::new(ProbeEffect {
        config,
        actions: Mutex::new(Vec::new()),
    });
    let mut suite = ClipSuite::new();
    let mut clips = Vec::new();

    for decl in &session.clips {
        let desc = decl
            .to_descriptor()
            .with_context(|| format!("clip declaration '{}'", decl.name))?;
        let mut host = session.hosts.remove(&decl.name).unwrap_or_default();
        host.allocate_pixels().with_context(|| format!("host frame for clip '{}'", decl.name))?;
        let mut clip = ClipInstance::new(&effect, &desc, Box::new(host))
            .with_context(|| format!("instantiating clip '{}'", decl.name))?;
        clip.use_host_config(&host_config);

        // clip preferences
        let request = session.requests.remove(&decl.name).unwrap_or_default();
        let requested = request
            .components
            .unwrap_or_else(|| clip.unmapped_components());
        let chosen = clip.find_supported_comp(&requested).to_string();
        if chosen == names::COMPONENT_NONE && clip.connected() {
            warn!(clip = %decl.name, requested = %requested, "no usable component");
        }
        let depth = request
            .pixel_depth
            .unwrap_or_else(|| clip.unmapped_pixel_depth());
        clip.set_components(&chosen);
        clip.set_pixel_depth(&depth);

        clips.push((suite.clips.insert_instance(clip)?, requested));
    }

    if !session.hosts.is_empty() {
        let unknown: Vec<&str> = session.hosts.keys().map(String::as_str).collect();
        warn!(?unknown, "host state for undeclared clips ignored");
    }

    let time = session.time;
    let mut reports = Vec::with_capacity(clips.len());
    for (h, requested) in clips {
        let image = match suite.clip_get_image(h, time, None) {
            Ok(img) => {
                let report = image_report(&suite, img)?;
                suite
                    .clip_release_image(img)
                    .map_err(|st| anyhow::anyhow!("releasing image: {st}"))?;
                Some(report)
            }
            Err(Status::Failed) => None,
            Err(st) => bail!("fetching image: {st}"),
        };

        let Some(clip) = suite.clips.get(h).and_then(|e| e.as_instance()) else {
            bail!("clip handle went stale");
        };
        let instance_changed = clip.instance_changed_action(names::CHANGE_TIME, time, PointD::default());
        let (start, end) = clip.frame_range();
        reports.push(ClipReport {
            name: clip.name().to_string(),
            label: clip.base().label().to_string(),
            is_output: clip.is_output(),
            connected: clip.connected(),
            requested_components: requested,
            components: clip.components().to_string(),
            pixel_depth: clip.pixel_depth().to_string(),
            unmapped_components: clip.unmapped_components(),
            unmapped_pixel_depth: clip.unmapped_pixel_depth(),
            frame_rate: clip.frame_rate(),
            frame_range: [start, end],
            instance_changed: instance_changed.name().to_string(),
            image,
        });
    }

    Ok(Report { time, clips: reports })
}

fn image_report(suite: &ClipSuite, img: ofxh_clip::ImageHandle) -> Result<ImageReport> {
    let ps = PropertySetHandle::Image(img);
    let rect = |name: &str| -> Result<[i32; 4]> {
        let v = suite
            .prop_get_n::<i32>(ps, name, 4)
            .map_err(|st| anyhow::anyhow!("reading {name}: {st}"))?;
        Ok([v[0], v[1], v[2], v[3]])
    };
    let Some(image) = suite.images.get(img) else {
        bail!("image handle went stale");
    };
    Ok(ImageReport {
        bounds: rect(names::IMAGE_BOUNDS)?,
        region_of_definition: rect(names::IMAGE_REGION_OF_DEFINITION)?,
        row_bytes: image.row_bytes(),
        bytes_per_pixel: image.bytes_per_pixel(),
        unique_identifier: image.unique_identifier().to_string(),
    })
}
