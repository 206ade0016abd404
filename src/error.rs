//! Error types for slidecast.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlidecastError {
    // Transcript parse errors
    #[error("Conflicting annotations in fragment '{fragment}': a phrase may carry [..] or {{..}}, not both")]
    ConflictingAnnotation { fragment: String },

    #[error("Unterminated '{open}' annotation in fragment '{fragment}'")]
    UnterminatedAnnotation { open: char, fragment: String },

    #[error("Closing '{close}' without an opening bracket in fragment '{fragment}'")]
    UnexpectedClosingBracket { close: char, fragment: String },

    #[error("More than one annotation in fragment '{fragment}'")]
    DuplicateAnnotation { fragment: String },

    #[error("Transcript contains no phrases")]
    EmptyTranscript,

    // Alignment errors
    #[error("Failed to run forced aligner: {message}")]
    AlignerInvocation { message: String },

    #[error("Unusable aligner output: {message}")]
    AlignerOutput { message: String },

    #[error("Aligner word {position} is '{actual}' but transcript expects '{expected}'")]
    AlignmentMismatch {
        expected: String,
        actual: String,
        position: usize,
    },

    #[error("Aligner output ended before word '{word}' of phrase '{phrase}'")]
    AlignmentExhausted { word: String, phrase: String },

    #[error("Aligner produced {remaining} word(s) past the end of the transcript")]
    AlignmentLeftover { remaining: usize },

    // Scheduling errors
    #[error("Frame schedule invariant violated: {message}")]
    SchedulingInvariant { message: String },

    // Media errors
    #[error("Failed to read audio file: {message}")]
    AudioRead { message: String },

    #[error("Image search for '{query}' failed: {message}")]
    ImageSearch { query: String, message: String },

    #[error("Image download from {url} failed: {message}")]
    ImageDownload { url: String, message: String },

    #[error("Frame rendering failed: {message}")]
    FrameRender { message: String },

    #[error("Video encoding failed: {message}")]
    VideoEncode { message: String },

    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, SlidecastError>;
