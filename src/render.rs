//! Frame rendering: one bitmap per segment, replicated across its range.
//!
//! Every frame of a segment shows the same image, so only the frame at the
//! range start is encoded; the rest are file copies. Frames are written as
//! `<index>.jpg` so ffmpeg can consume them with an `%d.jpg` pattern.

use crate::error::{Result, SlidecastError};
use crate::schedule::FrameRange;
use image::imageops::FilterType;
use image::{ImageReader, Rgb, RgbImage};
use std::fs;
use std::path::Path;

/// Target canvas for rendered frames. Dimensions are forced even, which
/// H.264 requires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width: (width / 2) * 2,
            height: (height / 2) * 2,
        }
    }
}

/// Scale an image file onto the canvas, letterboxed on black.
pub fn compose_frame(image_path: &Path, canvas: Canvas) -> Result<RgbImage> {
    let render_error = |message: String| SlidecastError::FrameRender { message };

    let decoded = ImageReader::open(image_path)
        .map_err(|e| render_error(format!("failed to open {}: {e}", image_path.display())))?
        .with_guessed_format()
        .map_err(|e| render_error(format!("failed to sniff {}: {e}", image_path.display())))?
        .decode()
        .map_err(|e| render_error(format!("failed to decode {}: {e}", image_path.display())))?;

    let scaled = decoded
        .resize(canvas.width, canvas.height, FilterType::Triangle)
        .to_rgb8();

    let mut frame = blank_frame(canvas);
    let x = i64::from((canvas.width - scaled.width()) / 2);
    let y = i64::from((canvas.height - scaled.height()) / 2);
    image::imageops::overlay(&mut frame, &scaled, x, y);
    Ok(frame)
}

/// A plain black frame, used for the beginning segment when no image is
/// configured.
pub fn blank_frame(canvas: Canvas) -> RgbImage {
    RgbImage::from_pixel(canvas.width, canvas.height, Rgb([0, 0, 0]))
}

/// Write `frame` at the range's start index, then replicate it across the
/// full inclusive range.
pub fn write_segment_frames(frame: &RgbImage, range: FrameRange, frames_dir: &Path) -> Result<()> {
    let first = frames_dir.join(format!("{}.jpg", range.start));
    frame
        .save_with_format(&first, image::ImageFormat::Jpeg)
        .map_err(|e| SlidecastError::FrameRender {
            message: format!("failed to write {}: {e}", first.display()),
        })?;

    for index in range.start + 1..=range.end {
        fs::copy(&first, frames_dir.join(format!("{index}.jpg")))?;
    }
    Ok(())
}
