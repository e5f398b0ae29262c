pub const RENDER_WIDTH: u32 = 640;            // Default width of the render target
pub const RENDER_HEIGHT: u32 = 480;           // Default height of the render target
pub const FPS: u32 = 60;                      // Frames per second

pub const PROGRESS_BAR_HEIGHT: f32 = 4.0;     // Height of the slide progress bar (pixels)

pub const ITEMS_PER_PAGE: usize = 6;          // Events listed per event slide page
pub const PAGE_DURATION: f32 = 5.0;           // Time each event page is shown (seconds)

pub const TICKER_SIZE: f32 = 24.0;            // Ticker text size
pub const TICKER_SPEED: f32 = 100.0;          // Ticker scroll speed (pixels per second)
pub const TICKER_Y: f32 = 440.0;              // Ticker baseline
pub const MAX_INSERTIONS_PER_FRAME: usize = 100; // Ticker replenishment bound

pub const GUIDE_REFRESH_SECS: f32 = 60.0;     // Re-feed event slides from the guide (seconds)
pub const PERF_REPORT_SECS: u64 = 5;          // Frame timing report interval (seconds)
