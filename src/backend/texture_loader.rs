use std::fs;
use std::path::Path;

use raylib::prelude::*;
use tracing::debug;

use crate::assets::{Orientation, exif_orientation, may_have_exif};
use crate::error::{Error, Result};

// --- Load Image, Apply EXIF Rotation, Create Texture ---
pub fn load_texture_with_exif_rotation(
    rl: &mut RaylibHandle,
    thread: &RaylibThread,
    image_path: &Path,
) -> Result<Texture2D> {
    let file_bytes = fs::read(image_path).map_err(|e| Error::io(image_path, e))?;

    let extension = image_path.extension().and_then(|s| s.to_str()).unwrap_or("").to_lowercase();
    let orientation = if may_have_exif(&extension) { exif_orientation(&file_bytes) } else { Orientation::Upright };

    // Extension hint for decoding from memory
    let mut image = Image::load_image_from_mem(&format!(".{extension}"), &file_bytes)
        .map_err(|e| Error::Render(format!("failed to decode {}: {e}", image_path.display())))?;

    match orientation {
        Orientation::Rotate180 => {
            image.rotate_cw();
            image.rotate_cw();
        }
        Orientation::Rotate90Cw => image.rotate_cw(),
        Orientation::Rotate90Ccw => image.rotate_ccw(),
        Orientation::Upright => {}
    }
    debug!(path = %image_path.display(), ?orientation, "image decoded");

    rl.load_texture_from_image(thread, &image)
        .map_err(|e| Error::Render(format!("failed to create texture for {}: {e}", image_path.display())))
}
