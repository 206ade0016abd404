use anyhow::Result;
use clap::{CommandFactory, Parser};
use owo_colors::OwoColorize;
use slidecast::app::run_render_command;
use slidecast::cli::{Cli, Commands, ConfigAction};
use slidecast::config::Config;
use slidecast::diagnostics::check_dependencies;
use slidecast::transcript::Transcript;
use std::path::Path;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let (Some(transcript), Some(audio), Some(output)) = (
                cli.transcript.as_deref(),
                cli.audio.as_deref(),
                cli.output.as_deref(),
            ) else {
                Cli::command().print_help()?;
                anyhow::bail!("transcript, audio, and output paths are required");
            };
            let config = load_config(cli.config.as_deref())?;
            let path = run_render_command(
                config,
                transcript,
                audio,
                output,
                cli.fps,
                cli.keep_workdir,
                cli.quiet,
                cli.verbose,
            )
            .await?;
            println!("{}", path.display());
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            if !check_dependencies(&config.aligner.command) {
                std::process::exit(1);
            }
        }
        Some(Commands::Inspect { transcript }) => {
            inspect_transcript(&transcript)?;
        }
        Some(Commands::Config { action }) => match action {
            ConfigAction::Show => {
                let config = load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&config)?);
            }
            ConfigAction::Path => {
                println!("{}", Config::default_path().display());
            }
        },
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "slidecast",
                &mut std::io::stdout(),
            );
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)?,
        None => Config::load_or_default(&Config::default_path())?,
    };
    Ok(config.with_env_overrides())
}

/// Parse a transcript and print each phrase with its topic.
fn inspect_transcript(path: &Path) -> Result<()> {
    let raw = std::fs::read_to_string(path)?;
    let transcript = Transcript::parse(&raw)?;

    for (index, phrase) in transcript.phrases().iter().enumerate() {
        let topic = phrase.topic();
        println!(
            "{:>3}. {}  {} {}",
            index + 1,
            phrase.cleaned(),
            format!("({})", topic.mode).dimmed(),
            topic.label.cyan()
        );
    }
    println!(
        "{} phrases, {} words",
        transcript.phrases().len(),
        transcript.word_count()
    );
    Ok(())
}
