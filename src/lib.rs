//! slidecast - Slideshow videos from annotated transcripts
//!
//! Words are time-aligned to a narrated recording, phrases are mapped to
//! frame ranges, and each frame shows the image for its phrase's topic.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod align;
pub mod app;
pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod diagnostics;
pub mod error;
pub mod images;
pub mod render;
pub mod schedule;
pub mod transcript;
pub mod video;

// Core pipeline (parse → reconcile → schedule)
pub use align::{PhraseTiming, WordAlignment, parse_alignment, reconcile, run_aligner};
pub use schedule::{FrameRange, FrameSchedule, ScheduledPhrase, schedule_frames};
pub use transcript::{ImageMode, Phrase, TopicAnnotation, Transcript};

// Error handling
pub use error::{Result, SlidecastError};

// Config
pub use config::Config;

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
