// src/constants.rs

/// Absolute tolerance used when comparing compass points
pub const POINT_TOLERANCE: f64 = 1e-9;

/// Smallest marker radius, as a fraction of `base_size`, in variable size mode
pub const MIN_SIZE_FRACTION: f64 = 0.25;

/// Span used for an axis whose points all share one coordinate
pub const DEGENERATE_SPAN: f64 = 1.0;

/// Width of the colorbar strip in pixels
pub const COLORBAR_WIDTH: u32 = 40;

/// Gap between plot area and colorbar in pixels
pub const COLORBAR_GAP: u32 = 10;

/// Periods of the calendar fields
pub mod periods {
    pub const MONTHS_PER_YEAR: i64 = 12;
    /// Fixed at 31 so short months leave empty slots on the day wheel
    pub const DAYS_PER_MONTH: i64 = 31;
    pub const HOURS_PER_DAY: i64 = 24;
    pub const MINUTES_PER_HOUR: i64 = 60;
    pub const SECONDS_PER_MINUTE: i64 = 60;
}

/// Rendering defaults (10x10 inch figure at 100 dpi)
pub mod render {
    pub const DEFAULT_WIDTH: u32 = 1000;
    pub const DEFAULT_HEIGHT: u32 = 1000;
    pub const DEFAULT_FPS: u32 = 1;
    pub const DEFAULT_ALPHA: f64 = 0.3;
    pub const DEFAULT_BASE_SIZE: f64 = 12.0;
    pub const DEFAULT_TEXT_SIZE: f64 = 10.0;
    pub const DEFAULT_PADDING: f64 = 0.2;
    pub const FONT_FAMILY: &str = "sans-serif";
}

/// Default filenames for the demo binaries
pub mod filenames {
    pub const DEFAULT_EXPERIMENT_FILE: &str = "atlas_config.toml";
    pub const DEFAULT_OUTPUT_DIR: &str = "readme";
    pub const FRAME_PREFIX: &str = "frame_";
}
