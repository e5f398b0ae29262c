//! Image orientation metadata, read before images are handed to a backend.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use tracing::warn;

/// Rotation needed to display an image upright.
///
/// EXIF values 1, 3, 6 and 8. The mirrored orientations are treated as
/// upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Rotate180,
    Rotate90Cw,
    Rotate90Ccw,
}

impl Orientation {
    pub fn from_exif(value: u32) -> Self {
        match value {
            3 => Orientation::Rotate180,
            6 => Orientation::Rotate90Cw,
            8 => Orientation::Rotate90Ccw,
            _ => Orientation::Upright,
        }
    }
}

/// Reads the orientation tag from JPEG or TIFF bytes; anything without
/// readable EXIF data is upright.
pub fn exif_orientation(bytes: &[u8]) -> Orientation {
    match Reader::new().read_from_container(&mut Cursor::new(bytes)) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map_or(Orientation::Upright, Orientation::from_exif),
        Err(exif::Error::NotFound(_)) => Orientation::Upright,
        Err(e) => {
            warn!("could not read EXIF data: {e}");
            Orientation::Upright
        }
    }
}

/// Whether `extension` names a format that can carry EXIF orientation.
pub fn may_have_exif(extension: &str) -> bool {
    matches!(extension.to_ascii_lowercase().as_str(), "jpg" | "jpeg" | "tif" | "tiff")
}
