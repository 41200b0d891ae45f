// Defaults for settings a template does not mention

use std::time::Duration;

use crate::{Color, ImageQuality, Safety};

pub(crate) const DEFAULT_SAFETY: Safety = Safety::Safe;
pub(crate) const DEFAULT_IMAGE_QUALITY: ImageQuality = ImageQuality::Smooth;

pub(crate) const MAX_OPEN_FILES: usize = 100;
pub(crate) const UPDATE_INTERVAL: Duration = Duration::from_secs(1);
pub(crate) const MAX_IMAGE_BUFSIZE: u64 = 100 * 1_048_576;

// Checkerboard drawn behind transparent images
pub(crate) const BACKGROUND_ONE: (u8, u8, u8) = (0x99, 0x99, 0x99);
pub(crate) const BACKGROUND_TWO: (u8, u8, u8) = (0x66, 0x66, 0x66);
pub(crate) const BACKGROUND_SQUARE_WIDTH: u32 = 16;

pub(crate) fn background_one() -> Color {
    let (r, g, b) = BACKGROUND_ONE;
    Color::from_rgb8(r, g, b)
}

pub(crate) fn background_two() -> Color {
    let (r, g, b) = BACKGROUND_TWO;
    Color::from_rgb8(r, g, b)
}
