// Page wiring for the browser front-end.

// Element ids expected in index.html
pub const CANVAS_ID: &str = "app-canvas";
pub const FILE_INPUT_ID: &str = "file-input";

// Static assets fetched once at start-up, relative to the page
pub const GLOW_URL: &str = "./glow.png";
pub const PICTURE_URL: &str = "./picture.png";

// Edge of the procedural picture used when PICTURE_URL is unavailable
pub const PLACEHOLDER_PICTURE_SIZE: u32 = 256;
