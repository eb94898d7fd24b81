//! Implementation of the `download` command.

use reelmix_core::download::{self, DownloadConfig, Quality};
use reelmix_core::external::{check_dependency, ytdlp};
use reelmix_core::{CoreResult, SystemRunner};

use crate::cli::DownloadArgs;

pub fn run_download(args: DownloadArgs) -> CoreResult<()> {
    check_dependency(ytdlp::YT_DLP, "--version")?;

    let quality: Quality = args.quality.parse()?;
    let config = DownloadConfig {
        urls_file: args.urls_file,
        output_dir: args.output_dir,
        audio_only: args.audio_only,
        quality,
    };

    if config.audio_only {
        println!("Note: audio-only mode enabled");
    }
    println!("Saving to: {}/", config.output_dir.display());
    println!("{}", "-".repeat(50));

    let summary = download::run_batch(&config, &SystemRunner)?;

    println!();
    println!("{}", "=".repeat(50));
    println!("Download complete!");
    println!("  Successful: {}", summary.successful);
    println!("  Failed: {}", summary.failed);

    Ok(())
}
