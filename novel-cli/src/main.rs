//! novel-cli - restructure plain-text novel files delimited by chapter
//! heading lines: extract chapter runs, insert volume markers, clean
//! duplicated headings, and synthesize audio.

mod clean;
mod config;
mod encoding;
mod extract;
mod fsutil;
mod text;
mod tts;
mod volume;

use anyhow::{bail, Result};
use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;
use text::{ChapterPattern, DEFAULT_CHAPTER_PATTERN};

#[derive(Parser, Debug)]
#[command(name = "novel-cli")]
#[command(about = "Tools for processing plain-text novel files", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(ClapArgs, Debug)]
struct CommonArgs {
    /// Path to the input novel file
    #[arg(short, long)]
    file: PathBuf,

    /// Regex for chapter heading detection
    #[arg(short = 'r', long, default_value = DEFAULT_CHAPTER_PATTERN)]
    regex_pattern: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Extract a run of chapters into a new file
    Extract {
        #[command(flatten)]
        common: CommonArgs,

        /// Start from the first chapter whose title contains this text
        #[arg(short, long)]
        start_pattern: Option<String>,

        /// Number of chapters to extract (0 or less: to end of file)
        #[arg(short, long, default_value_t = 1)]
        count: i64,
    },
    /// Insert a volume separator every N chapters
    Volume {
        #[command(flatten)]
        common: CommonArgs,

        /// Chapters per volume
        #[arg(short = 'n', long, default_value_t = 50)]
        interval: i64,
    },
    /// Fix common typos and remove duplicated chapter headings
    Clean {
        #[command(flatten)]
        common: CommonArgs,

        /// Extra replacement config (JSON object, highest priority)
        #[arg(long)]
        replacements: Option<PathBuf>,
    },
    /// Synthesize audio for chapters via a TTS endpoint
    Tts {
        #[command(flatten)]
        common: CommonArgs,

        /// Start from the first chapter whose title contains this text
        #[arg(short, long)]
        start_pattern: Option<String>,

        /// Number of chapters to synthesize (0 or less: to end of file)
        #[arg(short, long, default_value_t = 1)]
        count: i64,

        /// TTS API endpoint (default: NOVEL_CLI_TTS_API or local server)
        #[arg(long)]
        api_url: Option<String>,

        /// Reference audio path on the TTS server
        #[arg(long)]
        ref_audio: Option<String>,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Extract {
            common,
            start_pattern,
            count,
        } => {
            let pattern = ChapterPattern::new(&common.regex_pattern)?;
            match extract::extract(&common.file, start_pattern.as_deref(), count, &pattern)? {
                Some(path) => println!("Success! Saved to: {}", path.display()),
                None => bail!("Start chapter not found"),
            }
        }
        Commands::Volume { common, interval } => {
            let pattern = ChapterPattern::new(&common.regex_pattern)?;
            let path = volume::add_markers(&common.file, interval, &pattern)?;
            println!("Success! Saved to: {}", path.display());
        }
        Commands::Clean {
            common,
            replacements,
        } => {
            let pattern = ChapterPattern::new(&common.regex_pattern)?;
            let table = config::load_replacements(replacements.as_deref());
            let path = clean::clean(&common.file, &pattern, &table)?;
            println!("Success! Saved to: {}", path.display());
        }
        Commands::Tts {
            common,
            start_pattern,
            count,
            api_url,
            ref_audio,
        } => {
            let pattern = ChapterPattern::new(&common.regex_pattern)?;
            let api_url = api_url.unwrap_or_else(config::default_tts_api);
            let Some(ref_audio) = ref_audio.or_else(config::default_ref_audio) else {
                bail!("No reference audio configured. Pass --ref-audio or set NOVEL_CLI_REF_AUDIO.");
            };
            let (dir, report) = tts::synthesize_chapters(
                &common.file,
                start_pattern.as_deref(),
                count,
                &pattern,
                &api_url,
                &ref_audio,
            )?;
            println!(
                "TTS processing complete ({} completed, {} failed). Output in: {}",
                report.completed,
                report.failed,
                dir.display()
            );
            if report.failed > 0 {
                std::process::exit(1);
            }
        }
    }
    Ok(())
}
