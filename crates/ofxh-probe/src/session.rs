//! Session file: the clips a plugin declared and what the host has connected to them.

use std::collections::BTreeMap;

use ofxh_clip::{ClipDeclaration, StaticClipHost};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize)]
pub struct Session {
    /// Embedded host configuration; validated separately.
    #[serde(default)]
    pub config: Option<serde_json::Value>,

    #[serde(default)]
    pub time: f64,

    pub clips: Vec<ClipDeclaration>,

    /// Host state per clip name. Clips without an entry are unconnected.
    #[serde(default)]
    pub hosts: BTreeMap<String, StaticClipHost>,

    /// What the plugin asks for in its clip preferences, per clip name.
    #[serde(default)]
    pub requests: BTreeMap<String, FormatRequest>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormatRequest {
    pub components: Option<String>,
    pub pixel_depth: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub time: f64,
    pub clips: Vec<ClipReport>,
}

#[derive(Debug, Serialize)]
pub struct ClipReport {
    pub name: String,
    pub label: String,
    pub is_output: bool,
    pub connected: bool,
    pub requested_components: String,
    pub components: String,
    pub pixel_depth: String,
    pub unmapped_components: String,
    pub unmapped_pixel_depth: String,
    pub frame_rate: f64,
    pub frame_range: [f64; 2],
    pub instance_changed: String,
    pub image: Option<ImageReport>,
}

#[derive(Debug, Serialize)]
pub struct ImageReport {
    pub bounds: [i32; 4],
    pub region_of_definition: [i32; 4],
    pub row_bytes: i32,
    pub bytes_per_pixel: Option<usize>,
    pub unique_identifier: String,
}
