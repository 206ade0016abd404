//! Image acquisition for phrase topics.
//!
//! Each topic needs one representative image on disk before frames can be
//! rendered. A provider turns the topic label into candidate URLs; selection
//! depends on the topic mode; the download streams to the working directory.

mod bing;
mod download;

pub use bing::BingImageProvider;
pub use download::download_image;

use crate::error::{Result, SlidecastError};
use crate::transcript::{ImageMode, TopicAnnotation};
use async_trait::async_trait;
use rand::seq::SliceRandom;
use std::path::{Path, PathBuf};

/// Source of candidate image URLs for a search query, best match first.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<String>>;
}

/// Pick a candidate URL according to the topic mode.
///
/// `relevant` takes the first (best) result; `random` picks uniformly.
pub fn select_candidate(candidates: &[String], mode: ImageMode) -> Option<&String> {
    match mode {
        ImageMode::Relevant => candidates.first(),
        ImageMode::Random => candidates.choose(&mut rand::thread_rng()),
    }
}

/// File name an image for `label` is stored under in the working directory.
///
/// Labels never contain `/` (the transcript splits on it), so the label is
/// safe to embed directly.
pub fn image_file_name(label: &str) -> String {
    format!("{label}.jpg")
}

/// Search, select, and download the image for one topic.
///
/// Stores the result as `<label>.jpg` in `dir` and returns its path. The
/// stored bytes keep whatever format the server sent; the renderer sniffs
/// the actual format when decoding.
pub async fn fetch_topic_image(
    provider: &dyn ImageProvider,
    client: &reqwest::Client,
    topic: &TopicAnnotation,
    dir: &Path,
    limit: usize,
    progress: bool,
) -> Result<PathBuf> {
    let limit = match topic.mode {
        ImageMode::Relevant => 1,
        ImageMode::Random => limit,
    };

    let candidates = provider.search(&topic.label, limit).await?;
    let url = select_candidate(&candidates, topic.mode).ok_or_else(|| {
        SlidecastError::ImageSearch {
            query: topic.label.clone(),
            message: "no results".to_string(),
        }
    })?;

    let dest = dir.join(image_file_name(&topic.label));
    download_image(client, url, &dest, progress).await?;
    Ok(dest)
}
