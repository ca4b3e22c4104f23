use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Column order of `jobs.csv`. Consumers rely on positional as well as named
/// access, so this order must never change across writes.
pub const FIELD_NAMES: [&str; 23] = [
    "project_code",
    "client",
    "address",
    "project_description",
    "location_lat",
    "location_lon",
    "arcgis_link",
    "task_number",
    "attempt_number",
    "directory_name",
    "data_type",
    "asset_id",
    "asset_designation",
    "asset_type",
    "deployment_platform",
    "entry_point",
    "exit_point",
    "pipe_length",
    "date_start",
    "date_stop",
    "run_quality",
    "observation_summary",
    "other_comments",
];

/// Timestamp format for `date_start` / `date_stop`.
pub const TIMESTAMP_FORMAT: &str = "%m-%d-%Y %H:%M:%S";

pub const ASSET_TYPES: [&str; 3] = ["Manhole", "Tunnel", "Culvert"];
pub const PLATFORMS: [&str; 2] = ["ROGER", "MANITOR"];
pub const QUALITIES: [&str; 5] = [
    "1 - Excellent",
    "2 - Good",
    "3 - Fair",
    "4 - Poor",
    "5 - Failed",
];

/// Project-level fields shared by every run of a project. On update these
/// only fill blanks; they never clobber a value already present on the row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectMeta {
    pub client: String,
    pub address: String,
    pub project_description: String,
    pub location_lat: String,
    pub location_lon: String,
    pub arcgis_link: String,
}

/// Run-scoped fields. On update these overwrite unconditionally.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunData {
    pub task_number: String,
    pub attempt_number: String,
    pub directory_name: String,
    pub data_type: String,
    pub asset_id: String,
    pub asset_designation: String,
    pub asset_type: String,
    pub deployment_platform: String,
    pub entry_point: String,
    pub exit_point: String,
    pub pipe_length: String,
    pub date_start: String,
    pub date_stop: String,
    pub run_quality: String,
    pub observation_summary: String,
    pub other_comments: String,
}

/// One row of a project's `jobs.csv`. Field declaration order matches
/// [`FIELD_NAMES`]; everything is stored as text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunRecord {
    pub project_code: String,
    pub client: String,
    pub address: String,
    pub project_description: String,
    pub location_lat: String,
    pub location_lon: String,
    pub arcgis_link: String,
    pub task_number: String,
    pub attempt_number: String,
    pub directory_name: String,
    pub data_type: String,
    pub asset_id: String,
    pub asset_designation: String,
    pub asset_type: String,
    pub deployment_platform: String,
    pub entry_point: String,
    pub exit_point: String,
    pub pipe_length: String,
    pub date_start: String,
    pub date_stop: String,
    pub run_quality: String,
    pub observation_summary: String,
    pub other_comments: String,
}

impl RunRecord {
    /// The composite identity of a row within its project's table.
    pub fn key(&self) -> (&str, &str) {
        (&self.task_number, &self.attempt_number)
    }

    pub fn matches(&self, task_number: &str, attempt_number: &str) -> bool {
        self.task_number == task_number && self.attempt_number == attempt_number
    }

    /// Build a fresh row for insertion: defaults, then meta, then run fields.
    pub fn from_parts(project_code: &str, meta: &ProjectMeta, run: &RunData) -> Self {
        let mut record = RunRecord {
            project_code: project_code.to_string(),
            ..Default::default()
        };
        record.set_meta(meta);
        record.set_run(run);
        record
    }

    /// Apply an update to an existing row. Run fields overwrite
    /// unconditionally; meta fields only land where the row is still blank
    /// after the run fields have been applied.
    pub fn apply_update(&mut self, meta: &ProjectMeta, run: &RunData) {
        self.set_run(run);
        fill_if_empty(&mut self.client, &meta.client);
        fill_if_empty(&mut self.address, &meta.address);
        fill_if_empty(&mut self.project_description, &meta.project_description);
        fill_if_empty(&mut self.location_lat, &meta.location_lat);
        fill_if_empty(&mut self.location_lon, &meta.location_lon);
        fill_if_empty(&mut self.arcgis_link, &meta.arcgis_link);
    }

    fn set_meta(&mut self, meta: &ProjectMeta) {
        self.client = meta.client.clone();
        self.address = meta.address.clone();
        self.project_description = meta.project_description.clone();
        self.location_lat = meta.location_lat.clone();
        self.location_lon = meta.location_lon.clone();
        self.arcgis_link = meta.arcgis_link.clone();
    }

    fn set_run(&mut self, run: &RunData) {
        self.task_number = run.task_number.clone();
        self.attempt_number = run.attempt_number.clone();
        self.directory_name = run.directory_name.clone();
        self.data_type = run.data_type.clone();
        self.asset_id = run.asset_id.clone();
        self.asset_designation = run.asset_designation.clone();
        self.asset_type = run.asset_type.clone();
        self.deployment_platform = run.deployment_platform.clone();
        self.entry_point = run.entry_point.clone();
        self.exit_point = run.exit_point.clone();
        self.pipe_length = run.pipe_length.clone();
        self.date_start = run.date_start.clone();
        self.date_stop = run.date_stop.clone();
        self.run_quality = run.run_quality.clone();
        self.observation_summary = run.observation_summary.clone();
        self.other_comments = run.other_comments.clone();
    }

    /// The run-scoped portion of this row, for pre-filling an edit.
    pub fn to_run_data(&self) -> RunData {
        RunData {
            task_number: self.task_number.clone(),
            attempt_number: self.attempt_number.clone(),
            directory_name: self.directory_name.clone(),
            data_type: self.data_type.clone(),
            asset_id: self.asset_id.clone(),
            asset_designation: self.asset_designation.clone(),
            asset_type: self.asset_type.clone(),
            deployment_platform: self.deployment_platform.clone(),
            entry_point: self.entry_point.clone(),
            exit_point: self.exit_point.clone(),
            pipe_length: self.pipe_length.clone(),
            date_start: self.date_start.clone(),
            date_stop: self.date_stop.clone(),
            run_quality: self.run_quality.clone(),
            observation_summary: self.observation_summary.clone(),
            other_comments: self.other_comments.clone(),
        }
    }
}

fn fill_if_empty(slot: &mut String, value: &str) {
    if slot.is_empty() && !value.is_empty() {
        *slot = value.to_string();
    }
}

/// Sensor payloads carried on a run. Serialized into the `data_type` column
/// as an ampersand-joined token list, e.g. `Lidar&CSV&360_Camera`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sensors {
    pub lidar: bool,
    pub csv: bool,
    pub camera_360: bool,
    pub ptz: bool,
}

impl Sensors {
    pub fn to_data_type(&self) -> String {
        let mut tokens = Vec::new();
        if self.lidar {
            tokens.push("Lidar");
        }
        if self.csv {
            tokens.push("CSV");
        }
        if self.camera_360 {
            tokens.push("360_Camera");
        }
        if self.ptz {
            tokens.push("PTZ");
        }
        tokens.join("&")
    }

    pub fn from_data_type(data_type: &str) -> Self {
        let tokens: Vec<&str> = data_type.split('&').collect();
        Sensors {
            lidar: tokens.contains(&"Lidar"),
            csv: tokens.contains(&"CSV"),
            camera_360: tokens.contains(&"360_Camera"),
            ptz: tokens.contains(&"PTZ"),
        }
    }
}

/// Reduce a quality choice like `"2 - Good"` to its leading code token `"2"`.
/// Free-text values without the separator pass through unchanged.
pub fn quality_code(quality: &str) -> String {
    quality
        .split(" - ")
        .next()
        .unwrap_or(quality)
        .trim()
        .to_string()
}

/// Append the ` ft` unit to a bare pipe-length figure. Empty stays empty.
pub fn format_pipe_length(length: &str) -> String {
    let trimmed = length.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("{} ft", trimmed)
    }
}

pub fn format_timestamp(stamp: NaiveDateTime) -> String {
    stamp.format(TIMESTAMP_FORMAT).to_string()
}
