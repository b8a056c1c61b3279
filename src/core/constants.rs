// Default tuning for the scroll choreography. Every value here can be
// overridden per page through `PageConfig`.

// Bio text
pub const THRESHOLD_VIEWPORT_FRACTION: f64 = 0.5; // scroll distance, as a share of viewport height
pub const TEXT_SHRINK_FACTOR: f64 = 0.9; // scale lost at full progress

// Spring easing
pub const SPRING_DAMPING_RATIO: f64 = 0.8;
pub const SPRING_FREQUENCY: f64 = 0.3; // period of the undamped response, in progress units
pub const SPRING_SETTLE_TOLERANCE: f64 = 1e-3; // max distance from 1 at the end of the scroll

// Panels
pub const PANEL_COUNT: usize = 4;
pub const PANEL_REVEAL_START_PX: f64 = 0.0; // distance from bottom at which panels are fully shown
pub const PANEL_REVEAL_END_PX: f64 = 800.0; // distance from bottom at which panels start to appear
pub const PANEL_STAGGER: f64 = 0.1; // per-panel delay in reveal progress
pub const PANEL_MIN_SCALE: f64 = 0.85;
pub const PANEL_PRESSED_SCALE: f64 = 0.95;
pub const PANEL_RELEASE_MS: u32 = 350;

// Engine loader
pub const ENGINE_RETRY_INTERVAL_MS: u32 = 100;
pub const ENGINE_SCRIPT_SETTLE_MS: u32 = 200;
pub const EXISTING_SCRIPT_POLL_LIMIT: u32 = 100; // 10 s at the retry interval
pub const LOADED_SCRIPT_POLL_LIMIT: u32 = 30;

// Viewport corrector
pub const VIEWPORT_POLL_MS: u32 = 500;
pub const VIEWPORT_EPSILON_PX: f64 = 1.0;
