//! Forced-aligner subprocess invocation.
//!
//! The aligner (Gentle by default) receives the audio path and a file with
//! the cleaned transcript, and prints JSON with one timed entry per spoken
//! word. Anything structurally off in that output is fatal: downstream frame
//! math depends on a complete, ordered word stream.

use crate::align::WordAlignment;
use crate::error::{Result, SlidecastError};
use serde::Deserialize;
use std::io::Write;
use std::path::Path;
use std::process::Command;

#[derive(Debug, Deserialize)]
struct AlignerResponse {
    words: Vec<AlignedWordEntry>,
}

/// Raw word entry as emitted by the aligner. Gentle omits `start`/`end`
/// for words it could not find in the audio.
#[derive(Debug, Deserialize)]
struct AlignedWordEntry {
    word: String,
    start: Option<f64>,
    end: Option<f64>,
    #[serde(default)]
    case: Option<String>,
}

/// Run the configured aligner command against an audio file and transcript.
///
/// The cleaned transcript is handed over via a temp file; the audio path and
/// the transcript path are appended to `command` as its final two arguments.
pub fn run_aligner(
    command: &[String],
    audio_path: &Path,
    cleaned_transcript: &str,
) -> Result<Vec<WordAlignment>> {
    let (program, args) = command
        .split_first()
        .ok_or_else(|| SlidecastError::AlignerInvocation {
            message: "aligner command is empty".to_string(),
        })?;

    let mut transcript_file =
        tempfile::NamedTempFile::new().map_err(|e| SlidecastError::AlignerInvocation {
            message: format!("failed to create transcript temp file: {e}"),
        })?;
    transcript_file
        .write_all(cleaned_transcript.as_bytes())
        .and_then(|_| transcript_file.flush())
        .map_err(|e| SlidecastError::AlignerInvocation {
            message: format!("failed to write transcript temp file: {e}"),
        })?;

    let output = Command::new(program)
        .args(args)
        .arg(audio_path)
        .arg(transcript_file.path())
        .output()
        .map_err(|e| {
            let message = if e.kind() == std::io::ErrorKind::NotFound {
                format!("'{program}' not found; is the aligner installed?")
            } else {
                format!("failed to spawn '{program}': {e}")
            };
            SlidecastError::AlignerInvocation { message }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SlidecastError::AlignerInvocation {
            message: format!(
                "'{program}' exited with {}: {}",
                output.status,
                stderr.trim()
            ),
        });
    }

    parse_alignment(&output.stdout)
}

/// Parse aligner JSON output into the ordered word-alignment sequence.
pub fn parse_alignment(json: &[u8]) -> Result<Vec<WordAlignment>> {
    let response: AlignerResponse =
        serde_json::from_slice(json).map_err(|e| SlidecastError::AlignerOutput {
            message: format!("invalid JSON from aligner: {e}"),
        })?;

    response
        .words
        .into_iter()
        .enumerate()
        .map(|(position, entry)| {
            let (start, end) = match (entry.start, entry.end) {
                (Some(start), Some(end)) => (start, end),
                _ => {
                    let case = entry.case.as_deref().unwrap_or("unknown");
                    return Err(SlidecastError::AlignerOutput {
                        message: format!(
                            "word {position} '{}' has no timing (case: {case})",
                            entry.word
                        ),
                    });
                }
            };
            if start < 0.0 || end < start {
                return Err(SlidecastError::AlignerOutput {
                    message: format!(
                        "word {position} '{}' has invalid timing {start}..{end}",
                        entry.word
                    ),
                });
            }
            Ok(WordAlignment {
                word: entry.word,
                start,
                end,
            })
        })
        .collect()
}
