//! Implementation of the `remix` command.

use rand::rngs::StdRng;
use rand::SeedableRng;

use reelmix_core::external::{check_dependency, exiftool, ffmpeg};
use reelmix_core::remix::{self, RemixConfig};
use reelmix_core::{CoreError, CoreResult, ParameterSet, SystemRunner};

use crate::cli::RemixArgs;

pub fn run_remix(args: RemixArgs) -> CoreResult<()> {
    let mut rng = StdRng::from_entropy();

    if args.show_params {
        let params = ParameterSet::random(&mut rng);
        println!("Random parameters that would be applied:");
        println!("{}", serde_json::to_string_pretty(&params)?);
        return Ok(());
    }

    check_dependency(ffmpeg::FFMPEG, "-version")?;
    // The metadata step is non-fatal at run time, so a missing exiftool is
    // only worth a warning up front.
    if args.metadata_policy != crate::cli::MetadataPolicyArg::None
        && check_dependency(exiftool::EXIFTOOL, "-ver").is_err()
    {
        log::warn!("exiftool not found; metadata rewriting will be skipped");
    }

    let config = RemixConfig {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        remove_audio: args.no_audio,
        metadata_policy: args.metadata_policy.into(),
    };

    if let Some(single) = args.single {
        if !single.is_file() {
            return Err(CoreError::InvalidPath(format!(
                "file '{}' not found",
                single.display()
            )));
        }
        let outcome = remix::process_video(&config, &SystemRunner, &mut rng, &single, None)?;
        println!("Successfully processed: {}", outcome.output_path.display());
        println!(
            "Metadata: {} removed, {} modified, {} added",
            outcome.diff.removed_count, outcome.diff.modified_count, outcome.diff.added_count
        );
        return Ok(());
    }

    let summary = match remix::run_batch(&config, &SystemRunner, &mut rng) {
        Ok(summary) => summary,
        Err(CoreError::NoFilesFound) => {
            println!("No video files found in {}", config.input_dir.display());
            return Ok(());
        }
        Err(e) => return Err(e),
    };

    println!();
    println!("{}", "=".repeat(50));
    println!("Processing complete!");
    println!("  Successful: {}", summary.successful);
    println!("  Failed: {}", summary.failed);
    println!("  Output directory: {}", config.output_dir.display());

    Ok(())
}
