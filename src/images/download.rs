//! Streaming image download.

use crate::error::{Result, SlidecastError};
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::path::Path;

/// Download `url` to `dest`, streaming chunks straight to disk.
///
/// With `progress` set, renders an indicatif bar sized from Content-Length
/// when the server provides one.
pub async fn download_image(
    client: &reqwest::Client,
    url: &str,
    dest: &Path,
    progress: bool,
) -> Result<()> {
    let download_error = |message: String| SlidecastError::ImageDownload {
        url: url.to_string(),
        message,
    };

    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| download_error(format!("request failed: {e}")))?;

    if !response.status().is_success() {
        return Err(download_error(format!(
            "server returned status {}",
            response.status()
        )));
    }

    let total_size = response.content_length().unwrap_or(0);
    let pb = if progress {
        let pb = ProgressBar::new(total_size);
        if let Ok(style) = ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {bytes}/{total_bytes} {wide_msg}")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb.set_message(
            dest.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
        );
        Some(pb)
    } else {
        None
    };

    let mut file = std::fs::File::create(dest)
        .map_err(|e| download_error(format!("failed to create {}: {e}", dest.display())))?;

    let mut stream = response.bytes_stream();
    let mut written = 0u64;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| download_error(format!("failed to read chunk: {e}")))?;
        file.write_all(&chunk)
            .map_err(|e| download_error(format!("failed to write {}: {e}", dest.display())))?;
        written += chunk.len() as u64;
        if let Some(ref pb) = pb {
            pb.inc(chunk.len() as u64);
        }
    }

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    if written == 0 {
        // An empty body decodes to nothing later; fail here with the URL.
        if let Err(e) = std::fs::remove_file(dest) {
            eprintln!("slidecast: failed to remove empty download: {e}");
        }
        return Err(download_error("server sent an empty body".to_string()));
    }

    Ok(())
}
