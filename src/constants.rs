/// DOM hooks and page-level timings.
///
/// The page markup owns these names; keeping them here keeps string
/// literals out of the wiring code.
// Elements
pub const CANVAS_ID: &str = "canvas";
pub const LOGO_ID: &str = "logo";
pub const FPS_ID: &str = "fps";
pub const THEME_TOGGLE_ID: &str = "theme-toggle";
pub const THEME_VALUE_SELECTOR: &str = ".value";
pub const PAGE_SELECTOR: &str = ".page";
pub const LOGO_LINKS_SELECTOR: &str = ".logo-links";

// Classes
pub const SHADER_READY_CLASS: &str = "shader-ready";
pub const THEME_NIGHT_CLASS: &str = "theme-night";
pub const VISIBLE_CLASS: &str = "visible";
pub const LOADED_CLASS: &str = "loaded";
pub const SKIP_INTRO_CLASS: &str = "skip-intro";

// Updates overlay
pub const OVERLAY_SELECTOR: &str = ".updates-overlay";
pub const OPEN_OVERLAY_SELECTOR: &str = ".updates-overlay.is-open";
pub const OVERLAY_LETTER_SELECTOR: &str = ".updates-letter";
pub const DISMISS_SELECTOR: &str = ".updates-dismiss";
pub const OVERLAY_OPEN_CLASS: &str = "is-open";
pub const OVERLAY_CLOSING_CLASS: &str = "is-closing";
pub const HAS_OVERLAY_CLASS: &str = "has-overlay";
pub const DISMISS_URL_ATTR: &str = "data-dismiss-url";
pub const DEFAULT_DISMISS_URL: &str = "/";
pub const OVERLAY_CLOSE_MS: i32 = 350; // matches the CSS transition
pub const ROUTER_TARGET: &str = "div.page";

// Elements that keep their own pointer behaviour and never start a paint stroke
pub const INTERACTIVE_UI_SELECTOR: &str =
    ".logo-links a, #theme-toggle, .updates-overlay, .updates-dismiss";

// Newsletter form
pub const SUBSCRIBE_FORM_SELECTOR: &str = "[data-subscribe-form]";
pub const SUBSCRIBE_ENDPOINT_ATTR: &str = "data-endpoint";
pub const SUBSCRIBE_INITIALIZED_ATTR: &str = "data-initialized";
pub const EMAIL_INPUT_ID: &str = "updates-email";
pub const ENTER_BUTTON_ID: &str = "updates-enter";
pub const MESSAGE_ID: &str = "updates-message";
pub const INPUT_WRAPPER_SELECTOR: &str = ".updates-input-wrapper";
pub const MEASURE_CLASS: &str = "updates-measure";
pub const PLACEHOLDER_CLASS: &str = "placeholder-text";
pub const VALID_GLOW_CLASS: &str = "valid-glow";
pub const MESSAGE_VALID_CLASS: &str = "valid";

// Router events
pub const AFTER_SETTLE_EVENT: &str = "htmx:afterSettle";

// Persistence and media
pub const THEME_STORAGE_KEY: &str = "earendil-theme-mode";
pub const DARK_SCHEME_QUERY: &str = "(prefers-color-scheme: dark)";

// Logo raster
pub const LOGO_SVG_URL: &str = "/static/earendil-logo.svg";
pub const LOGO_RASTER_WIDTH: u32 = 512;

// Corner text
pub const CORNER_TEXT_SELECTOR: &str = ".corner-text";
pub const ELVEN_TEXT_SELECTOR: &str = ".text-version.elven";
pub const ENGLISH_TEXT_SELECTOR: &str = ".text-version.english";
pub const MORPH_INITIALIZED_ATTR: &str = "data-morph-ready";
pub const NARROW_SCREEN_QUERY: &str = "(max-width: 768px)";

// Cursor ripple trail
pub const RIPPLE_CONTAINER_SELECTOR: &str = ".ripple-container";
pub const TRAIL_RIPPLE_CLASS: &str = "ripple";
pub const TRAIL_RIPPLE_SELECTOR: &str = ".ripple";
pub const REDUCED_MOTION_QUERY: &str = "(prefers-reduced-motion: reduce)";
