//! yt-dlp argument assembly for the batch downloader.

use crate::download::{DownloadConfig, Quality};

pub const YT_DLP: &str = "yt-dlp";

/// Builds the yt-dlp argv for fetching a single URL.
///
/// Output files land in the configured directory named
/// `<title>-<id>.<ext>`. Partial downloads are resumed rather than
/// restarted.
pub fn download_args(url: &str, config: &DownloadConfig) -> Vec<String> {
    let template = config
        .output_dir
        .join("%(title)s-%(id)s.%(ext)s")
        .display()
        .to_string();

    let mut args: Vec<String> = vec!["-o".into(), template, "--continue".into()];

    if config.audio_only {
        args.extend([
            "-x".into(),
            "--audio-format".into(),
            "mp3".into(),
            "--audio-quality".into(),
            "192K".into(),
        ]);
    } else if let Quality::MaxHeight(height) = config.quality {
        args.push("-f".into());
        args.push(format!("best[height<={height}]/best"));
    }

    args.push(url.to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(audio_only: bool, quality: Quality) -> DownloadConfig {
        DownloadConfig {
            urls_file: PathBuf::from("urls.txt"),
            output_dir: PathBuf::from("downloads"),
            audio_only,
            quality,
        }
    }

    #[test]
    fn test_default_args() {
        let args = download_args("https://example.com/v/1", &config(false, Quality::Best));
        assert_eq!(args[0], "-o");
        assert_eq!(args[1], "downloads/%(title)s-%(id)s.%(ext)s");
        assert!(args.contains(&"--continue".to_string()));
        assert!(!args.contains(&"-f".to_string()));
        assert!(!args.contains(&"-x".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("https://example.com/v/1"));
    }

    #[test]
    fn test_audio_only_args() {
        let args = download_args("url", &config(true, Quality::Best));
        assert!(args.contains(&"-x".to_string()));
        assert!(args.contains(&"--audio-format".to_string()));
        assert!(args.contains(&"mp3".to_string()));
        assert!(args.contains(&"192K".to_string()));
        // audio extraction wins over a height cap
        assert!(!args.contains(&"-f".to_string()));
    }

    #[test]
    fn test_height_capped_args() {
        let args = download_args("url", &config(false, Quality::MaxHeight(720)));
        let pos = args.iter().position(|a| a == "-f").unwrap();
        assert_eq!(args[pos + 1], "best[height<=720]/best");
    }
}
