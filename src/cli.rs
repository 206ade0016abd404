//! Command-line interface for slidecast
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

/// Slideshow videos from annotated transcripts and narrated audio
#[derive(Parser, Debug)]
#[command(
    name = "slidecast",
    version,
    about = "Slideshow videos from annotated transcripts and narrated audio"
)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress status output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: progress + timings, -vv: full schedule dump)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to the annotated transcript
    #[arg(value_name = "TRANSCRIPT")]
    pub transcript: Option<PathBuf>,

    /// Path to the narrated WAV recording of the transcript
    #[arg(value_name = "AUDIO")]
    pub audio: Option<PathBuf>,

    /// Location to create the video
    #[arg(value_name = "OUTPUT")]
    pub output: Option<PathBuf>,

    /// Frames per second of the output video
    #[arg(long, value_name = "FPS")]
    pub fps: Option<u32>,

    /// Keep the working directory (downloaded images and rendered frames)
    #[arg(long)]
    pub keep_workdir: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check system dependencies (ffmpeg, forced aligner)
    Check,

    /// Parse a transcript and print its phrases and topics
    Inspect {
        /// Path to the annotated transcript
        #[arg(value_name = "TRANSCRIPT")]
        transcript: PathBuf,
    },

    /// Show or locate the configuration
    Config {
        /// Action to perform
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Configuration actions
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_invocation_parses_positionals() {
        let cli = Cli::parse_from(["slidecast", "talk.txt", "talk.wav", "out.mp4", "--fps", "24"]);
        assert!(cli.command.is_none());
        assert_eq!(cli.transcript, Some(PathBuf::from("talk.txt")));
        assert_eq!(cli.audio, Some(PathBuf::from("talk.wav")));
        assert_eq!(cli.output, Some(PathBuf::from("out.mp4")));
        assert_eq!(cli.fps, Some(24));
        assert!(!cli.keep_workdir);
    }

    #[test]
    fn check_subcommand_parses() {
        let cli = Cli::parse_from(["slidecast", "check"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn inspect_subcommand_takes_a_transcript() {
        let cli = Cli::parse_from(["slidecast", "inspect", "talk.txt"]);
        match cli.command {
            Some(Commands::Inspect { transcript }) => {
                assert_eq!(transcript, PathBuf::from("talk.txt"));
            }
            other => panic!("expected inspect, got {other:?}"),
        }
    }

    #[test]
    fn global_flags_apply_everywhere() {
        let cli = Cli::parse_from(["slidecast", "-q", "-vv", "check"]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 2);
    }
}
