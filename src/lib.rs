//! Content scheduling for digital signage: rotating slides, a scrolling
//! ticker and a guide of timed events, drawn frame by frame through a
//! backend-neutral [`render::Renderer`].

pub mod app;
pub mod assets;
pub mod backend;
pub mod clock;
pub mod config;
pub mod constants;
pub mod engine;
pub mod engines;
pub mod error;
pub mod fps;
pub mod guide;
pub mod perf;
pub mod reload;
pub mod render;
pub mod slide;
pub mod slide_manager;
pub mod state;
pub mod ticker;

pub use error::{Error, Result};
