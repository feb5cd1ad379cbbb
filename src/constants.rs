pub const WINDOW_WIDTH: i32 = 1280;            // Initial window width
pub const WINDOW_HEIGHT: i32 = 800;            // Initial window height
pub const FPS: u32 = 60;                       // Frames per second

pub const INTRO_START_DELAY: f32 = 0.75;       // Delay before the intro starts stepping (seconds)
pub const INTRO_STEP_INTERVAL: f32 = 0.4;      // Time between intro frame steps (seconds)
pub const HINT_DURATION: f32 = 3.0;            // How long the "drag to explore" hint stays up (seconds)

pub const SCROLL_WINDOW_RATIO: f32 = 0.14;     // Scroll scrub maps [0, ratio * viewport height] to the sequence
pub const SCROLL_WHEEL_STEP: f32 = 24.0;       // Virtual scroll pixels per wheel notch
pub const TRACK_ROUTE_MARGIN: f32 = 24.0;      // Slack when routing a drag move to the other track (px)
