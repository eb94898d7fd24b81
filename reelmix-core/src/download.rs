//! Batch downloader: URL list parsing and the per-URL download loop.

use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::external::{ytdlp, CommandRunner};
use crate::BatchSummary;

/// Requested download quality ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Quality {
    /// Let the download engine pick its best format.
    #[default]
    Best,
    /// Constrain the video height, e.g. 720 or 1080.
    MaxHeight(u32),
}

impl FromStr for Quality {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("best") {
            Ok(Quality::Best)
        } else {
            s.parse::<u32>().map(Quality::MaxHeight).map_err(|_| {
                CoreError::Config(format!(
                    "invalid quality '{s}': expected 'best' or a height like 720"
                ))
            })
        }
    }
}

/// Configuration for one batch download run.
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub urls_file: PathBuf,
    pub output_dir: PathBuf,
    pub audio_only: bool,
    pub quality: Quality,
}

/// Reads a line-oriented URL list.
///
/// Lines are trimmed; blank lines and `#` comments are skipped. Order is
/// preserved.
pub fn read_url_list(path: &Path) -> CoreResult<Vec<String>> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CoreError::UrlList(format!("cannot read '{}': {}", path.display(), e))
    })?;

    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect())
}

/// Downloads every URL in the configured list, one at a time.
///
/// Per-URL failures (non-zero engine exit or a spawn error) are logged and
/// counted; they never abort the batch. An unreadable or empty URL list is
/// the only fatal condition.
pub fn run_batch(config: &DownloadConfig, runner: &dyn CommandRunner) -> CoreResult<BatchSummary> {
    let urls = read_url_list(&config.urls_file)?;
    if urls.is_empty() {
        return Err(CoreError::UrlList(format!(
            "no URLs found in '{}'",
            config.urls_file.display()
        )));
    }

    fs::create_dir_all(&config.output_dir)?;
    info!(
        "Found {} URL(s) to download into {}",
        urls.len(),
        config.output_dir.display()
    );

    let mut summary = BatchSummary::default();
    for (index, url) in urls.iter().enumerate() {
        info!("[{}/{}] Downloading: {}", index + 1, urls.len(), url);
        summary.attempted += 1;

        match runner.run(ytdlp::YT_DLP, &ytdlp::download_args(url, config)) {
            Ok(output) if output.success() => summary.successful += 1,
            Ok(output) => {
                warn!(
                    "Download failed for {} (exit {:?}): {}",
                    url,
                    output.status,
                    output.stderr.trim()
                );
                summary.failed += 1;
            }
            Err(e) => {
                warn!("Download failed for {}: {}", url, e);
                summary.failed += 1;
            }
        }
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_quality_from_str() {
        assert_eq!("best".parse::<Quality>().unwrap(), Quality::Best);
        assert_eq!("BEST".parse::<Quality>().unwrap(), Quality::Best);
        assert_eq!("720".parse::<Quality>().unwrap(), Quality::MaxHeight(720));
        assert!(matches!(
            "supreme".parse::<Quality>(),
            Err(CoreError::Config(_))
        ));
    }

    #[test]
    fn test_read_url_list_filters_comments_and_blanks() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "# header comment").unwrap();
        writeln!(file, "https://example.com/a").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "   ").unwrap();
        writeln!(file, "  https://example.com/b  ").unwrap();
        writeln!(file, "# trailing comment").unwrap();
        writeln!(file, "https://example.com/c").unwrap();

        let urls = read_url_list(file.path()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://example.com/a",
                "https://example.com/b",
                "https://example.com/c",
            ]
        );
    }

    #[test]
    fn test_read_url_list_missing_file() {
        let result = read_url_list(Path::new("no_such_urls_file.txt"));
        assert!(matches!(result, Err(CoreError::UrlList(_))));
    }
}
