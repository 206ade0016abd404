//! Word-level alignment and phrase timing.
//!
//! The forced aligner times every spoken word against the audio; the
//! reconciler matches that word stream back onto the parsed phrases, one
//! entry per transcript token, in strict order.

mod aligner;
mod reconciler;

pub use aligner::{parse_alignment, run_aligner};
pub use reconciler::reconcile;

/// One spoken word as timed by the forced aligner. Seconds, `start <= end`.
#[derive(Debug, Clone, PartialEq)]
pub struct WordAlignment {
    pub word: String,
    pub start: f64,
    pub end: f64,
}

/// Start and end of one phrase in seconds, rounded to two decimal places.
#[derive(Debug, Clone, PartialEq)]
pub struct PhraseTiming {
    /// Cleaned phrase text, carried so downstream consumers can key on it.
    pub text: String,
    pub start: f64,
    pub end: f64,
}

/// Round a timestamp to the precision kept in phrase timings.
pub(crate) fn round_timestamp(secs: f64) -> f64 {
    let scale = 10f64.powi(crate::defaults::TIMESTAMP_DECIMALS as i32);
    (secs * scale).round() / scale
}
