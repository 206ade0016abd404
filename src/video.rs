//! Video assembly via ffmpeg.
//!
//! Two invocations: frames to an H.264 stream with captions burned in by
//! ffmpeg's drawtext filter (keyed to frame-number ranges), then a mux of
//! that stream with the narration audio. ffmpeg owns all codec and font
//! concerns; this module only builds argument vectors.

use crate::error::{Result, SlidecastError};
use crate::schedule::FrameSchedule;
use std::path::{Path, PathBuf};
use std::process::Command;

/// Encoder parameters taken from the video config.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeSettings {
    pub fps: u32,
    pub crf: u32,
}

/// Encode the rendered frames and mux in the narration audio.
///
/// Returns the output path on success. `frames_dir` must hold one
/// `<index>.jpg` per frame index in `[0, schedule.total_frames]`.
pub fn encode_video(
    frames_dir: &Path,
    audio_path: &Path,
    output_path: &Path,
    schedule: &FrameSchedule,
    settings: EncodeSettings,
) -> Result<PathBuf> {
    let silent_video = frames_dir.join("video-noaudio.mp4");
    let pattern = frames_dir.join("%d.jpg");

    let mut encode_args: Vec<String> = vec![
        "-y".into(),
        "-r".into(),
        settings.fps.to_string(),
        "-f".into(),
        "image2".into(),
        "-start_number".into(),
        "0".into(),
        "-i".into(),
        pattern.to_string_lossy().into_owned(),
    ];
    let filtergraph = caption_filtergraph(schedule);
    if !filtergraph.is_empty() {
        encode_args.push("-vf".into());
        encode_args.push(filtergraph);
    }
    encode_args.extend([
        "-vcodec".into(),
        "libx264".into(),
        "-crf".into(),
        settings.crf.to_string(),
        "-pix_fmt".into(),
        "yuv420p".into(),
        silent_video.to_string_lossy().into_owned(),
    ]);
    run_ffmpeg(&encode_args)?;

    let mux_args: Vec<String> = vec![
        "-y".into(),
        "-i".into(),
        silent_video.to_string_lossy().into_owned(),
        "-i".into(),
        audio_path.to_string_lossy().into_owned(),
        "-c:v".into(),
        "copy".into(),
        output_path.to_string_lossy().into_owned(),
    ];
    run_ffmpeg(&mux_args)?;

    Ok(output_path.to_path_buf())
}

/// One drawtext filter per phrase, enabled over its frame range. The
/// beginning segment carries no caption.
fn caption_filtergraph(schedule: &FrameSchedule) -> String {
    schedule
        .phrases
        .iter()
        .map(|phrase| {
            format!(
                "drawtext=text='{}':enable='between(n\\,{}\\,{})':\
                 x=(w-text_w)/2:y=h-text_h-24:fontsize=28:fontcolor=white:\
                 box=1:boxcolor=black@0.5:boxborderw=8",
                escape_drawtext(&phrase.text),
                phrase.range.start,
                phrase.range.end
            )
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// Escape caption text for a single-quoted drawtext `text` value.
///
/// Backslash first, then the characters drawtext and the filtergraph parser
/// treat specially.
fn escape_drawtext(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            ':' => escaped.push_str("\\:"),
            ',' => escaped.push_str("\\,"),
            '%' => escaped.push_str("\\%"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn run_ffmpeg(args: &[String]) -> Result<()> {
    let output = Command::new("ffmpeg").args(args).output().map_err(|e| {
        let message = if e.kind() == std::io::ErrorKind::NotFound {
            "ffmpeg not found; install it and make sure it is on PATH".to_string()
        } else {
            format!("failed to spawn ffmpeg: {e}")
        };
        SlidecastError::VideoEncode { message }
    })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(SlidecastError::VideoEncode {
            message: format!(
                "ffmpeg exited with {}: {}",
                output.status,
                tail(stderr.trim(), 500)
            ),
        });
    }
    Ok(())
}

/// Last `max` bytes of ffmpeg's stderr; the useful part is at the end.
fn tail(text: &str, max: usize) -> &str {
    let mut start = text.len().saturating_sub(max);
    while start > 0 && !text.is_char_boundary(start) {
        start += 1;
    }
    &text[start..]
}
