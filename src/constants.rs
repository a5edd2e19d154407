use std::time::Duration;

pub const DEFAULT_DELAY: Duration = Duration::from_millis(5000);   // Time between automatic transitions
pub const DEFAULT_SPEED: Duration = Duration::from_millis(1000);   // Fade duration of one transition
pub const DEFAULT_AUTOPLAY: bool = true;
pub const DEFAULT_START_INDEX: usize = 0;
pub const DEFAULT_CYCLE_COUNT: usize = 0;                          // 0 = rotate forever
pub const DEFAULT_CYCLE_END_INDEX: usize = 0;

pub const MIN_ELEMENTS: usize = 2;                                 // Below this there is nothing to rotate

pub const FPS: u32 = 60;                                           // Frames per second of the host loop
pub const FRAME_TIME: Duration = Duration::from_micros(1_000_000 / FPS as u64);

pub const RENDER_WIDTH: i32 = 1920;                                // Width of the viewer window
pub const RENDER_HEIGHT: i32 = 1080;                               // Height of the viewer window

pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];
