pub mod recording;

#[cfg(feature = "raylib")]
pub mod raylib;
#[cfg(feature = "raylib")]
pub mod texture_loader;

pub use recording::{DrawCall, RecordingRenderer};
