//! FFmpeg argument assembly for the remix transcode.

use std::path::Path;

use crate::filters::{build_audio_filters, build_video_filters};
use crate::params::ParameterSet;

pub const FFMPEG: &str = "ffmpeg";

/// Descriptive container tags overwritten with empty strings, in addition
/// to the global `-map_metadata -1` strip.
const CLEARED_TAGS: &[&str] = &[
    "title",
    "author",
    "comment",
    "description",
    "synopsis",
    "show",
    "episode_id",
    "network",
    "company",
];

/// Builds the complete ffmpeg argv for transcoding `input` into `output`
/// with the given parameter set applied.
///
/// The global flags strip all source metadata and request bitexact output so
/// the container carries no encoder fingerprint of its own.
pub fn build_remix_args(input: &Path, output: &Path, params: &ParameterSet) -> Vec<String> {
    let mut args: Vec<String> = vec![
        "-i".into(),
        input.display().to_string(),
        "-y".into(),
        "-map_metadata".into(),
        "-1".into(),
        "-fflags".into(),
        "+bitexact".into(),
        "-flags:v".into(),
        "+bitexact".into(),
        "-flags:a".into(),
        "+bitexact".into(),
    ];

    if let Some(video_filters) = build_video_filters(params) {
        args.push("-vf".into());
        args.push(video_filters);
    }

    if params.remove_audio {
        args.push("-an".into());
    } else if let Some(audio_filters) = build_audio_filters(params) {
        args.push("-af".into());
        args.push(audio_filters);
    }

    args.extend([
        "-c:v".into(),
        "libx264".into(),
        "-preset".into(),
        "medium".into(),
        "-crf".into(),
        params.crf.to_string(),
        "-b:v".into(),
        format!("{}k", params.video_bitrate_kbps()),
        "-c:a".into(),
        "aac".into(),
        "-b:a".into(),
        "128k".into(),
        "-movflags".into(),
        "+faststart".into(),
    ]);

    for tag in CLEARED_TAGS {
        args.push("-metadata".into());
        args.push(format!("{tag}="));
    }

    args.push(output.display().to_string());
    args
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn args_for(params: &ParameterSet) -> Vec<String> {
        build_remix_args(
            &PathBuf::from("in.mp4"),
            &PathBuf::from("out/remix.mp4"),
            params,
        )
    }

    fn value_after<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
        args.iter()
            .position(|a| a == flag)
            .and_then(|i| args.get(i + 1))
            .map(String::as_str)
    }

    #[test]
    fn test_global_strip_and_bitexact_flags() {
        let args = args_for(&ParameterSet::identity());
        assert_eq!(value_after(&args, "-i"), Some("in.mp4"));
        assert_eq!(value_after(&args, "-map_metadata"), Some("-1"));
        assert_eq!(value_after(&args, "-fflags"), Some("+bitexact"));
        assert_eq!(value_after(&args, "-flags:v"), Some("+bitexact"));
        assert_eq!(value_after(&args, "-flags:a"), Some("+bitexact"));
        assert_eq!(args.last().map(String::as_str), Some("out/remix.mp4"));
    }

    #[test]
    fn test_identity_params_emit_no_filters() {
        let args = args_for(&ParameterSet::identity());
        assert!(!args.contains(&"-vf".to_string()));
        assert!(!args.contains(&"-af".to_string()));
        assert!(!args.contains(&"-an".to_string()));
    }

    #[test]
    fn test_filters_are_attached() {
        let mut params = ParameterSet::identity();
        params.zoom_factor = 1.05;
        params.volume = 0.95;
        let args = args_for(&params);
        assert_eq!(
            value_after(&args, "-vf"),
            Some("scale=iw*1.05:ih*1.05,crop=iw/1.05:ih/1.05")
        );
        assert_eq!(value_after(&args, "-af"), Some("volume=0.95"));
    }

    #[test]
    fn test_remove_audio_replaces_audio_filters() {
        let mut params = ParameterSet::identity();
        params.remove_audio = true;
        params.volume = 0.95;
        let args = args_for(&params);
        assert!(args.contains(&"-an".to_string()));
        assert!(!args.contains(&"-af".to_string()));
    }

    #[test]
    fn test_encoding_parameters() {
        let mut params = ParameterSet::identity();
        params.crf = 21;
        params.bitrate_variation = 1.05;
        let args = args_for(&params);
        assert_eq!(value_after(&args, "-c:v"), Some("libx264"));
        assert_eq!(value_after(&args, "-preset"), Some("medium"));
        assert_eq!(value_after(&args, "-crf"), Some("21"));
        assert_eq!(value_after(&args, "-b:v"), Some("2100k"));
        assert_eq!(value_after(&args, "-c:a"), Some("aac"));
        assert_eq!(value_after(&args, "-b:a"), Some("128k"));
        assert_eq!(value_after(&args, "-movflags"), Some("+faststart"));
    }

    #[test]
    fn test_descriptive_tags_cleared() {
        let args = args_for(&ParameterSet::identity());
        for tag in CLEARED_TAGS {
            assert!(
                args.contains(&format!("{tag}=")),
                "missing cleared tag {tag}"
            );
        }
        let metadata_flags = args.iter().filter(|a| *a == "-metadata").count();
        assert_eq!(metadata_flags, CLEARED_TAGS.len());
    }
}
