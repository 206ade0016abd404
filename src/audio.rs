//! Audio duration probing.

use crate::error::{Result, SlidecastError};
use std::path::Path;

/// Read the total duration of a WAV file in seconds.
///
/// Duration is the per-channel sample count divided by the sample rate, so
/// channel layout and bit depth do not matter.
pub fn wav_duration(path: &Path) -> Result<f64> {
    let reader = hound::WavReader::open(path).map_err(|e| SlidecastError::AudioRead {
        message: format!("failed to parse WAV file {}: {e}", path.display()),
    })?;

    let spec = reader.spec();
    if spec.sample_rate == 0 {
        return Err(SlidecastError::AudioRead {
            message: format!("{} declares a zero sample rate", path.display()),
        });
    }

    Ok(f64::from(reader.duration()) / f64::from(spec.sample_rate))
}
