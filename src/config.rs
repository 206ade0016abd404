use crate::defaults;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub video: VideoConfig,
    pub images: ImagesConfig,
    pub aligner: AlignerConfig,
}

/// Video output configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VideoConfig {
    pub fps: u32,
    pub width: u32,
    pub height: u32,
    pub crf: u32,
}

/// Image acquisition configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ImagesConfig {
    /// Search results considered when picking a random-mode image.
    pub search_limit: usize,
    /// Concurrent downloads across topics.
    pub concurrency: usize,
    /// Image shown during the lead-in before the first word; black if unset.
    pub beginning_image: Option<PathBuf>,
}

/// Forced-aligner configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AlignerConfig {
    /// Command to run; the audio path and transcript path are appended.
    pub command: Vec<String>,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            fps: defaults::FPS,
            width: defaults::FRAME_WIDTH,
            height: defaults::FRAME_HEIGHT,
            crf: defaults::VIDEO_CRF,
        }
    }
}

impl Default for ImagesConfig {
    fn default() -> Self {
        Self {
            search_limit: defaults::IMAGE_SEARCH_LIMIT,
            concurrency: defaults::DOWNLOAD_CONCURRENCY,
            beginning_image: None,
        }
    }
}

impl Default for AlignerConfig {
    fn default() -> Self {
        Self {
            command: defaults::ALIGNER_COMMAND
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields will use default values.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if file doesn't exist
    pub fn load_or_default(path: &Path) -> anyhow::Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(e) => {
                if e.downcast_ref::<std::io::Error>()
                    .map(|io_err| io_err.kind() == std::io::ErrorKind::NotFound)
                    .unwrap_or(false)
                {
                    Ok(Self::default())
                } else {
                    Err(e)
                }
            }
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - SLIDECAST_FPS → video.fps
    /// - SLIDECAST_ALIGNER → aligner.command (whitespace-split)
    /// - SLIDECAST_BEGINNING_IMAGE → images.beginning_image
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(fps) = std::env::var("SLIDECAST_FPS")
            && let Ok(fps) = fps.parse::<u32>()
            && fps > 0
        {
            self.video.fps = fps;
        }

        if let Ok(command) = std::env::var("SLIDECAST_ALIGNER")
            && !command.trim().is_empty()
        {
            self.aligner.command = command.split_whitespace().map(str::to_string).collect();
        }

        if let Ok(path) = std::env::var("SLIDECAST_BEGINNING_IMAGE")
            && !path.is_empty()
        {
            self.images.beginning_image = Some(PathBuf::from(path));
        }

        self
    }

    /// Reject configurations the pipeline cannot run with.
    pub fn validate(&self) -> crate::error::Result<()> {
        use crate::error::SlidecastError;

        if self.video.fps == 0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.fps".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.video.width < 2 || self.video.height < 2 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.width/height".to_string(),
                message: "must be at least 2 pixels".to_string(),
            });
        }
        if self.video.crf > 51 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "video.crf".to_string(),
                message: "x264 accepts 0-51".to_string(),
            });
        }
        if self.images.search_limit == 0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "images.search_limit".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.images.concurrency == 0 {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "images.concurrency".to_string(),
                message: "must be positive".to_string(),
            });
        }
        if self.aligner.command.is_empty() {
            return Err(SlidecastError::ConfigInvalidValue {
                key: "aligner.command".to_string(),
                message: "must name a program to run".to_string(),
            });
        }
        Ok(())
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/slidecast/config.toml on Linux
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join("slidecast")
            .join("config.toml")
    }
}
