// DOM contract and engine wiring shared by the web glue.

// Engine
pub const ENGINE_GLOBAL: &str = "UnicornStudio";
pub const ENGINE_SCRIPT_URL: &str =
    "https://cdn.jsdelivr.net/gh/hiunicornstudio/unicornstudio.js@v1.4.36/dist/unicornStudio.umd.js";
pub const ENGINE_SCRIPT_MARKER: &str = "unicornStudio.umd.js"; // matched against existing <script src>
pub const ENGINE_PROJECT_ID: &str = "lHYBB7eHby32vZtR9jsO";

// Element ids and classes
pub const ROOT_ID: &str = "app";
pub const EMBED_ID: &str = "embed";
pub const EMBED_CLASS: &str = "unicorn-embed";
pub const BIO_ID: &str = "bio-text";
pub const BIO_CLASS: &str = "bio-text";
pub const PANEL_GRID_CLASS: &str = "panel-grid";
pub const PANEL_CLASS: &str = "glass-panel";
pub const PRESSED_CLASS: &str = "pressed";
pub const RELEASING_CLASS: &str = "releasing";
pub const STYLE_ID: &str = "folio-style";

// CSS custom property holding 1% of the visible viewport height
pub const VH_PROPERTY: &str = "--vh";

// Timings (ms)
pub const DOM_SETTLE_MS: i32 = 100;
pub const ORIENTATION_SETTLE_MS: i32 = 150;
