use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "fieldlog")]
#[command(about = "Per-project field-data logger for robotic inspection runs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Storage root override for this invocation (not persisted)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Open a project, creating its dated folder and table if needed
    Open {
        /// Project code, e.g. PROJ-001
        project_code: String,
    },

    /// Record a run entry (appends, or updates when the task/attempt pair exists)
    #[command(alias = "add")]
    Log {
        /// Project code, e.g. PROJ-001
        project_code: String,

        /// Task number grouping this run's attempts
        #[arg(short, long)]
        task: u32,

        /// Attempt number (auto-filled to max+1 for the task when omitted)
        #[arg(short, long)]
        attempt: Option<u32>,

        #[command(flatten)]
        fields: RunArgs,
    },

    /// Edit an existing run entry; refuses when the task/attempt pair does not exist
    Edit {
        /// Project code, e.g. PROJ-001
        project_code: String,

        /// Task number of the entry to edit
        #[arg(short, long)]
        task: u32,

        /// Attempt number of the entry to edit
        #[arg(short, long)]
        attempt: u32,

        #[command(flatten)]
        fields: RunArgs,
    },

    /// Print the next attempt number for a task
    NextAttempt {
        /// Project code, e.g. PROJ-001
        project_code: String,

        /// Task number to scan
        task: u32,
    },

    /// List the run entries of a project
    #[command(alias = "ls")]
    Show {
        /// Project code, e.g. PROJ-001
        project_code: String,
    },

    /// List known project codes under the storage root
    Projects,

    /// Remove the most recently appended entry of a project
    DeleteLast {
        /// Project code, e.g. PROJ-001
        project_code: String,
    },

    /// Remove every entry of a project, keeping the table header
    Clear {
        /// Project code, e.g. PROJ-001
        project_code: String,
    },

    /// Delete every project folder under the storage root
    ClearAll {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },

    /// Write the project table as CSV (stdout, or a file with --out)
    Export {
        /// Project code, e.g. PROJ-001
        project_code: String,

        /// Destination file (defaults to stdout)
        #[arg(short, long)]
        out: Option<PathBuf>,
    },

    /// Extract coordinates from a pasted ArcGIS map link
    Locate {
        /// ArcGIS web-map URL with ?center= or marker= parameters
        url: String,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g., storage-root)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

/// Run-entry fields shared by `log` and `edit`. Everything is optional; for
/// `edit`, omitted fields keep their stored values.
#[derive(Args, Debug, Default)]
pub struct RunArgs {
    /// Client name (project metadata)
    #[arg(long)]
    pub client: Option<String>,

    /// Site address (project metadata)
    #[arg(long)]
    pub address: Option<String>,

    /// Project description (project metadata)
    #[arg(long)]
    pub description: Option<String>,

    /// Site latitude (project metadata)
    #[arg(long)]
    pub lat: Option<String>,

    /// Site longitude (project metadata)
    #[arg(long)]
    pub lon: Option<String>,

    /// ArcGIS structure link (project metadata; coordinates are extracted
    /// into lat/lon when they are not given explicitly)
    #[arg(long)]
    pub arcgis_link: Option<String>,

    /// Directory holding the run's sensor data (defaults to the project folder)
    #[arg(long)]
    pub directory: Option<String>,

    /// Run carried a lidar payload
    #[arg(long)]
    pub lidar: bool,

    /// Run produced CSV sensor logs
    #[arg(long = "csv")]
    pub csv_data: bool,

    /// Run carried a 360 camera
    #[arg(long = "camera")]
    pub camera_360: bool,

    /// Run carried a PTZ camera
    #[arg(long)]
    pub ptz: bool,

    /// Asset identifier, e.g. MH-042
    #[arg(long)]
    pub asset_id: Option<String>,

    /// Asset designation, e.g. "Section A North"
    #[arg(long)]
    pub asset_designation: Option<String>,

    /// Asset type: Manhole, Tunnel, Culvert, or free text
    #[arg(long)]
    pub asset_type: Option<String>,

    /// Deployment platform: ROGER, MANITOR, or free text
    #[arg(long)]
    pub platform: Option<String>,

    /// Entry point, e.g. MH-001
    #[arg(long)]
    pub entry: Option<String>,

    /// Exit point (mirrors the entry point on MANITOR)
    #[arg(long)]
    pub exit: Option<String>,

    /// Pipe length in feet (bare number; the unit is appended)
    #[arg(long)]
    pub pipe_length: Option<String>,

    /// Start timestamp, MM-DD-YYYY HH:MM:SS, or "now"
    #[arg(long)]
    pub start: Option<String>,

    /// Stop timestamp, MM-DD-YYYY HH:MM:SS, or "now"
    #[arg(long)]
    pub stop: Option<String>,

    /// Run quality, e.g. "2 - Good" (stored as its leading code)
    #[arg(long)]
    pub quality: Option<String>,

    /// Observation summary
    #[arg(long)]
    pub observation: Option<String>,

    /// Other comments
    #[arg(long)]
    pub comments: Option<String>,
}

impl RunArgs {
    /// Whether any sensor flag was given. On edit, no flags means "keep the
    /// stored sensor set".
    pub fn any_sensor(&self) -> bool {
        self.lidar || self.csv_data || self.camera_360 || self.ptz
    }
}
