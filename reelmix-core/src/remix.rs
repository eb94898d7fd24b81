//! Remix pipeline: discovery, per-file transcode, metadata rewrite, sidecar.
//!
//! Each input is processed to completion before the next begins. The ffmpeg
//! transcode is the only fatal step for an item; metadata rewriting and the
//! sidecar write happen after the output exists and are logged-only on
//! failure.

use std::fs;
use std::path::{Path, PathBuf};

use log::{error, info, warn};
use rand::Rng;
use serde::Serialize;

use crate::error::{CoreError, CoreResult};
use crate::external::{exiftool, ffmpeg, CommandRunner};
use crate::metadata::{diff_metadata, DeviceIdentity, MetadataDiff, MetadataMap, MetadataPolicy};
use crate::params::ParameterSet;
use crate::BatchSummary;

/// File extensions considered video inputs (case-insensitive).
pub const VIDEO_EXTENSIONS: &[&str] = &["mp4", "avi", "mov", "mkv", "webm"];

/// Configuration for the remix pipeline.
#[derive(Debug, Clone)]
pub struct RemixConfig {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub remove_audio: bool,
    pub metadata_policy: MetadataPolicy,
}

/// Result of one successfully remixed file.
#[derive(Debug, Clone)]
pub struct RemixOutcome {
    pub output_path: PathBuf,
    pub parameters: ParameterSet,
    pub diff: MetadataDiff,
}

/// Sidecar contents written next to each output file.
#[derive(Serialize)]
struct SidecarReport<'a> {
    parameters: &'a ParameterSet,
    metadata_diff: &'a MetadataDiff,
}

/// Finds video files in the top level of `input_dir`, sorted by name.
pub fn find_video_files(input_dir: &Path) -> CoreResult<Vec<PathBuf>> {
    let read_dir = fs::read_dir(input_dir)?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| {
            let entry = entry.ok()?;
            let path = entry.path();

            if !path.is_file() {
                return None;
            }

            path.extension()
                .and_then(|ext| ext.to_str())
                .filter(|ext| {
                    VIDEO_EXTENSIONS
                        .iter()
                        .any(|known| known.eq_ignore_ascii_case(ext))
                })
                .map(|_| path.clone())
        })
        .collect();

    if files.is_empty() {
        return Err(CoreError::NoFilesFound);
    }
    files.sort();
    Ok(files)
}

/// Generates an output file name: `remix_<timestamp>_<6-char suffix>.mp4`.
pub fn output_name<R: Rng + ?Sized>(rng: &mut R) -> String {
    const CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
    let timestamp = chrono::Local::now().format("%Y%m%d_%H%M%S");
    let suffix: String = (0..6)
        .map(|_| CHARSET[rng.gen_range(0..CHARSET.len())] as char)
        .collect();
    format!("remix_{timestamp}_{suffix}.mp4")
}

/// The JSON sidecar path for an output file (`<name>.mp4.json`).
pub fn sidecar_path(output: &Path) -> PathBuf {
    let mut name = output.as_os_str().to_os_string();
    name.push(".json");
    PathBuf::from(name)
}

/// Remixes one video file.
///
/// Uses `params` when supplied (e.g. replaying a saved sidecar), otherwise
/// samples a fresh set. Returns an error only when the transcode itself
/// cannot produce an output file.
pub fn process_video<R: Rng + ?Sized>(
    config: &RemixConfig,
    runner: &dyn CommandRunner,
    rng: &mut R,
    input: &Path,
    params: Option<ParameterSet>,
) -> CoreResult<RemixOutcome> {
    let mut params = match params {
        Some(params) => params,
        None => ParameterSet::random(rng),
    };
    if config.remove_audio {
        params.remove_audio = true;
    }

    fs::create_dir_all(&config.output_dir)?;
    let output_path = config.output_dir.join(output_name(rng));
    info!(
        "Processing: {} -> {}",
        input.display(),
        output_path.display()
    );

    let before = read_metadata_soft(runner, input);

    let args = ffmpeg::build_remix_args(input, &output_path, &params);
    let output = runner.run(ffmpeg::FFMPEG, &args)?;
    if !output.success() {
        return Err(CoreError::CommandExecution(format!(
            "ffmpeg exited with {:?} for {}: {}",
            output.status,
            input.display(),
            output.stderr.trim()
        )));
    }

    // The transcoded file exists from here on; nothing below may fail the item.
    apply_metadata_policy(config.metadata_policy, runner, rng, &output_path);

    let after = read_metadata_soft(runner, &output_path);
    let diff = diff_metadata(&before, &after);

    write_sidecar(&output_path, &params, &diff);

    Ok(RemixOutcome {
        output_path,
        parameters: params,
        diff,
    })
}

/// Remixes every video file in the input directory sequentially.
pub fn run_batch<R: Rng + ?Sized>(
    config: &RemixConfig,
    runner: &dyn CommandRunner,
    rng: &mut R,
) -> CoreResult<BatchSummary> {
    let files = find_video_files(&config.input_dir)?;
    info!("Found {} video(s) to process", files.len());

    let mut summary = BatchSummary::default();
    for file in &files {
        summary.attempted += 1;
        match process_video(config, runner, rng, file, None) {
            Ok(outcome) => {
                info!("Successfully processed: {}", outcome.output_path.display());
                summary.successful += 1;
            }
            Err(e) => {
                error!("Failed to process {}: {}", file.display(), e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

/// Metadata dumps are advisory; a failing exiftool yields an empty map.
fn read_metadata_soft(runner: &dyn CommandRunner, path: &Path) -> MetadataMap {
    match exiftool::read_metadata(runner, path) {
        Ok(map) => map,
        Err(e) => {
            warn!("Could not read metadata from {}: {}", path.display(), e);
            MetadataMap::new()
        }
    }
}

fn apply_metadata_policy<R: Rng + ?Sized>(
    policy: MetadataPolicy,
    runner: &dyn CommandRunner,
    rng: &mut R,
    output: &Path,
) {
    match policy {
        MetadataPolicy::None => {}
        MetadataPolicy::Strip => match exiftool::strip_metadata(runner, output) {
            Ok(()) => info!("Metadata stripped from {}", output.display()),
            Err(e) => warn!("Could not strip metadata: {}", e),
        },
        MetadataPolicy::ForgeIdentity => {
            let identity = DeviceIdentity::random(rng);
            match exiftool::forge_metadata(runner, &identity, output) {
                Ok(()) => info!(
                    "Forged identity {} {} on {}",
                    identity.make,
                    identity.model,
                    output.display()
                ),
                Err(e) => warn!("Could not forge metadata: {}", e),
            }
        }
    }
}

fn write_sidecar(output: &Path, params: &ParameterSet, diff: &MetadataDiff) {
    let report = SidecarReport {
        parameters: params,
        metadata_diff: diff,
    };
    let path = sidecar_path(output);
    let result = serde_json::to_string_pretty(&report)
        .map_err(CoreError::from)
        .and_then(|json| fs::write(&path, json).map_err(CoreError::from));
    if let Err(e) = result {
        warn!("Could not write sidecar {}: {}", path.display(), e);
    }
}
