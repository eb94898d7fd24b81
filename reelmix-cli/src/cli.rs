// reelmix-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use reelmix_core::metadata::MetadataPolicy;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "Reelmix: batch video download and remix tool",
    long_about = "Downloads videos from a URL list via yt-dlp and remixes \
                  local videos with randomized transformations via ffmpeg \
                  and exiftool."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Downloads videos listed in a text file, one URL per line
    Download(DownloadArgs),
    /// Applies randomized transformations to videos in a directory
    Remix(RemixArgs),
}

#[derive(Parser, Debug)]
pub struct DownloadArgs {
    /// Path to a text file of URLs (blank lines and '#' comments ignored)
    #[arg(required = true, value_name = "URLS_FILE")]
    pub urls_file: PathBuf,

    /// Directory where downloaded videos are saved
    #[arg(short = 'o', long = "output", default_value = "downloads", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Download and extract audio only (mp3)
    #[arg(long)]
    pub audio_only: bool,

    /// Quality ceiling: 'best' or a height like 720 or 1080
    #[arg(long, default_value = "best", value_name = "QUALITY")]
    pub quality: String,
}

#[derive(Parser, Debug)]
pub struct RemixArgs {
    /// Input directory containing videos
    #[arg(short = 'i', long = "input", default_value = "downloads", value_name = "DIR")]
    pub input_dir: PathBuf,

    /// Output directory for remixed videos
    #[arg(short = 'o', long = "output", default_value = "remixed", value_name = "DIR")]
    pub output_dir: PathBuf,

    /// Process a single video file instead of a directory
    #[arg(long, value_name = "FILE")]
    pub single: Option<PathBuf>,

    /// Print a freshly sampled parameter set and exit without processing
    #[arg(long)]
    pub show_params: bool,

    /// Drop the audio stream from the output
    #[arg(long)]
    pub no_audio: bool,

    /// How embedded metadata is rewritten after transcoding
    #[arg(long, value_enum, default_value_t = MetadataPolicyArg::Strip, value_name = "POLICY")]
    pub metadata_policy: MetadataPolicyArg,
}

/// CLI-facing mirror of the core metadata policy.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataPolicyArg {
    /// Erase every tag the metadata tool can touch
    Strip,
    /// Write a fabricated device identity
    Forge,
    /// Leave the transcoded file's tags alone
    None,
}

impl From<MetadataPolicyArg> for MetadataPolicy {
    fn from(arg: MetadataPolicyArg) -> Self {
        match arg {
            MetadataPolicyArg::Strip => MetadataPolicy::Strip,
            MetadataPolicyArg::Forge => MetadataPolicy::ForgeIdentity,
            MetadataPolicyArg::None => MetadataPolicy::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_download_basic_args() {
        let cli = Cli::parse_from(["reelmix", "download", "urls.txt"]);
        match cli.command {
            Commands::Download(args) => {
                assert_eq!(args.urls_file, PathBuf::from("urls.txt"));
                assert_eq!(args.output_dir, PathBuf::from("downloads"));
                assert!(!args.audio_only);
                assert_eq!(args.quality, "best");
            }
            _ => panic!("Expected Download command"),
        }
    }

    #[test]
    fn test_parse_download_with_flags() {
        let cli = Cli::parse_from([
            "reelmix",
            "download",
            "urls.txt",
            "-o",
            "my_videos",
            "--audio-only",
            "--quality",
            "720",
        ]);
        match cli.command {
            Commands::Download(args) => {
                assert_eq!(args.output_dir, PathBuf::from("my_videos"));
                assert!(args.audio_only);
                assert_eq!(args.quality, "720");
            }
            _ => panic!("Expected Download command"),
        }
    }

    #[test]
    fn test_parse_remix_defaults() {
        let cli = Cli::parse_from(["reelmix", "remix"]);
        match cli.command {
            Commands::Remix(args) => {
                assert_eq!(args.input_dir, PathBuf::from("downloads"));
                assert_eq!(args.output_dir, PathBuf::from("remixed"));
                assert!(args.single.is_none());
                assert!(!args.show_params);
                assert!(!args.no_audio);
                assert_eq!(args.metadata_policy, MetadataPolicyArg::Strip);
            }
            _ => panic!("Expected Remix command"),
        }
    }

    #[test]
    fn test_parse_remix_with_flags() {
        let cli = Cli::parse_from([
            "reelmix",
            "remix",
            "-i",
            "in",
            "-o",
            "out",
            "--single",
            "video.mp4",
            "--no-audio",
            "--metadata-policy",
            "forge",
        ]);
        match cli.command {
            Commands::Remix(args) => {
                assert_eq!(args.input_dir, PathBuf::from("in"));
                assert_eq!(args.output_dir, PathBuf::from("out"));
                assert_eq!(args.single, Some(PathBuf::from("video.mp4")));
                assert!(args.no_audio);
                assert_eq!(args.metadata_policy, MetadataPolicyArg::Forge);
            }
            _ => panic!("Expected Remix command"),
        }
    }
}
