//! Slideshow rendering entry point.
//!
//! Orchestrates the complete transcript-to-video flow:
//! parse → download images → align → reconcile → schedule → render → encode

use crate::align::{reconcile, run_aligner};
use crate::audio::wav_duration;
use crate::config::Config;
use crate::error::Result;
use crate::images::{BingImageProvider, ImageProvider, fetch_topic_image, image_file_name};
use crate::render::{Canvas, blank_frame, compose_frame, write_segment_frames};
use crate::schedule::{FrameSchedule, schedule_frames};
use crate::transcript::{Transcript, TopicAnnotation};
use crate::video::{EncodeSettings, encode_video};
use futures_util::StreamExt;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// Run the render command: parse → images → align → schedule → frames → video.
///
/// # Arguments
/// * `config` - Base configuration (can be overridden by CLI args)
/// * `transcript_path` - Annotated transcript file
/// * `audio_path` - WAV narration of the transcript
/// * `output_path` - Where to write the video
/// * `fps` - Optional frame rate override from the CLI
/// * `keep_workdir` - Keep downloaded images and rendered frames on disk
/// * `quiet` - Suppress stage messages
/// * `verbosity` - Verbosity level (0=default, 1=progress + counts, 2=schedule dump)
///
/// # Returns
/// The absolute path of the created video.
#[allow(clippy::too_many_arguments)]
pub async fn run_render_command(
    mut config: Config,
    transcript_path: &Path,
    audio_path: &Path,
    output_path: &Path,
    fps: Option<u32>,
    keep_workdir: bool,
    quiet: bool,
    verbosity: u8,
) -> Result<PathBuf> {
    if let Some(fps) = fps {
        config.video.fps = fps;
    }
    config.validate()?;

    status(quiet, "Parsing transcript...");
    let raw = fs::read_to_string(transcript_path)?;
    let transcript = Transcript::parse(&raw)?;
    if verbosity >= 1 {
        eprintln!(
            "  {} phrases, {} words",
            transcript.phrases().len(),
            transcript.word_count()
        );
    }

    let workdir = tempfile::Builder::new().prefix("slidecast-").tempdir()?;
    let frames_dir = workdir.path().join("frames");
    fs::create_dir(&frames_dir)?;

    status(quiet, "Downloading images...");
    let client = reqwest::Client::new();
    let provider = BingImageProvider::with_client(client.clone());
    download_topic_images(
        &provider,
        &client,
        &transcript,
        workdir.path(),
        &config,
        verbosity >= 1,
    )
    .await?;

    status(quiet, "Aligning transcript...");
    let duration = wav_duration(audio_path)?;
    let words = run_aligner(&config.aligner.command, audio_path, transcript.cleaned_text())?;
    let timings = reconcile(transcript.phrases(), &words)?;
    let schedule = schedule_frames(&timings, duration, config.video.fps)?;
    if verbosity >= 2 {
        dump_schedule(&schedule);
    }

    status(quiet, "Rendering frames...");
    render_frames(&transcript, &schedule, workdir.path(), &frames_dir, &config)?;

    status(quiet, "Encoding video...");
    let settings = EncodeSettings {
        fps: config.video.fps,
        crf: config.video.crf,
    };
    encode_video(&frames_dir, audio_path, output_path, &schedule, settings)?;

    if keep_workdir {
        let kept = workdir.keep();
        status(
            quiet,
            &format!("Working directory kept at {}", kept.display()),
        );
    }

    Ok(fs::canonicalize(output_path)?)
}

/// Topics deduplicated by label, first occurrence wins.
///
/// Two phrases sharing a label share one image file, so a second download
/// would only race the first.
fn unique_topics(transcript: &Transcript) -> Vec<&TopicAnnotation> {
    let mut seen = HashSet::new();
    transcript
        .topics()
        .filter(|topic| seen.insert(topic.label.as_str()))
        .collect()
}

/// Download one image per unique topic, `images.concurrency` at a time.
async fn download_topic_images(
    provider: &dyn ImageProvider,
    client: &reqwest::Client,
    transcript: &Transcript,
    dir: &Path,
    config: &Config,
    progress: bool,
) -> Result<()> {
    let fetches = futures_util::stream::iter(unique_topics(transcript).into_iter().map(|topic| {
        fetch_topic_image(
            provider,
            client,
            topic,
            dir,
            config.images.search_limit,
            progress,
        )
    }))
    .buffer_unordered(config.images.concurrency)
    .collect::<Vec<_>>()
    .await;

    for result in fetches {
        result?;
    }
    Ok(())
}

/// Render every segment's frame and replicate it across its range.
fn render_frames(
    transcript: &Transcript,
    schedule: &FrameSchedule,
    images_dir: &Path,
    frames_dir: &Path,
    config: &Config,
) -> Result<()> {
    let canvas = Canvas::new(config.video.width, config.video.height);

    let beginning = match &config.images.beginning_image {
        Some(path) => compose_frame(path, canvas)?,
        None => blank_frame(canvas),
    };
    write_segment_frames(&beginning, schedule.beginning, frames_dir)?;

    // Schedule entries mirror transcript order one-to-one.
    for (phrase, scheduled) in transcript.phrases().iter().zip(&schedule.phrases) {
        let image_path = images_dir.join(image_file_name(&phrase.topic().label));
        let frame = compose_frame(&image_path, canvas)?;
        write_segment_frames(&frame, scheduled.range, frames_dir)?;
    }
    Ok(())
}

fn dump_schedule(schedule: &FrameSchedule) {
    eprintln!(
        "  frames {:>6}-{:<6} (beginning)",
        schedule.beginning.start, schedule.beginning.end
    );
    for phrase in &schedule.phrases {
        eprintln!(
            "  frames {:>6}-{:<6} {}",
            phrase.range.start, phrase.range.end, phrase.text
        );
    }
    eprintln!("  total: {} frames", schedule.total_frames + 1);
}

fn status(quiet: bool, message: &str) {
    if !quiet {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_topics_dedupes_by_label_keeping_order() {
        let t = Transcript::parse("a [cat]\nb [dog]\nc [cat]").unwrap();
        let topics = unique_topics(&t);
        let labels: Vec<&str> = topics.iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["cat", "dog"]);
    }

    #[test]
    fn unique_topics_treats_default_labels_like_annotated_ones() {
        let t = Transcript::parse("same words / same words").unwrap();
        assert_eq!(unique_topics(&t).len(), 1);
    }
}
