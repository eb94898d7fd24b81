//! Core library for the reelmix toolkit: batch video downloading and
//! randomized video remixing over external engines.
//!
//! All substantive media work is delegated to yt-dlp, ffmpeg and exiftool;
//! this crate generates randomized remix parameters, assembles the argument
//! lists for those tools, interprets their output and diffs before/after
//! metadata.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use reelmix_core::external::SystemRunner;
//! use reelmix_core::metadata::MetadataPolicy;
//! use reelmix_core::remix::{self, RemixConfig};
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::path::PathBuf;
//!
//! let config = RemixConfig {
//!     input_dir: PathBuf::from("downloads"),
//!     output_dir: PathBuf::from("remixed"),
//!     remove_audio: false,
//!     metadata_policy: MetadataPolicy::Strip,
//! };
//! let mut rng = StdRng::from_entropy();
//! let summary = remix::run_batch(&config, &SystemRunner, &mut rng).unwrap();
//! println!("{} succeeded, {} failed", summary.successful, summary.failed);
//! ```

pub mod download;
pub mod error;
pub mod external;
pub mod filters;
pub mod metadata;
pub mod params;
pub mod remix;

// Re-exports for public API
pub use download::{read_url_list, DownloadConfig, Quality};
pub use error::{CoreError, CoreResult};
pub use external::{CommandOutput, CommandRunner, SystemRunner};
pub use filters::{build_audio_filters, build_video_filters};
pub use metadata::{diff_metadata, DeviceIdentity, MetadataDiff, MetadataMap, MetadataPolicy};
pub use params::ParameterSet;
pub use remix::{find_video_files, RemixConfig, RemixOutcome};

/// Running tally for one batch run, downloader or remixer alike.
///
/// Per-item failures only increment `failed`; they never abort the batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub attempted: usize,
    pub successful: usize,
    pub failed: usize,
}
