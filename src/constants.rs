pub const STEP_TOTAL: u32 = 10;                // Interpolation steps per transition
pub const STEP_INTERVAL_MS: u64 = 100;        // Wall-clock time between steps (ms)
pub const AUTORUN_INTERVAL_MS: u64 = 2000;    // Time between autorun ticks (ms)

pub const RELATION_ATTR: &str = "data-ss-id"; // Relates elements across slides
pub const BOX_ATTR: &str = "data-box";        // Natural box given by markup: "left top width height"

pub const SLIDESHOW_TAG: &str = "ol";
pub const SLIDE_TAG: &str = "li";
pub const SLIDESHOW_CLASS: &str = "slideshow";
pub const ACTIVE_CLASS: &str = "active-slideshow";
pub const SELECTED_CLASS: &str = "selected";

pub const REV_CLASS: &str = "rev";
pub const FWD_CLASS: &str = "fwd";
pub const REV_LABEL: &str = "\u{ab}";        // «
pub const FWD_LABEL: &str = "\u{bb}";        // »
