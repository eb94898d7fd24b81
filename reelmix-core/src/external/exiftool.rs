//! Exiftool invocation: metadata dump, strip and identity forging.
//!
//! Exiftool is the only collaborator whose stdout we parse; `-j` dumps the
//! tags of each argument file as a JSON array of objects.

use std::path::Path;

use log::debug;

use crate::error::{CoreError, CoreResult};
use crate::external::CommandRunner;
use crate::metadata::{DeviceIdentity, MetadataMap};

pub const EXIFTOOL: &str = "exiftool";

/// Argv for dumping a file's metadata as JSON with numeric values.
pub fn dump_args(path: &Path) -> Vec<String> {
    vec!["-j".into(), "-n".into(), path.display().to_string()]
}

/// Argv for erasing every writable tag in place.
pub fn strip_args(path: &Path) -> Vec<String> {
    vec![
        "-all=".into(),
        "-overwrite_original".into(),
        path.display().to_string(),
    ]
}

/// Argv for writing a fabricated device identity in place.
pub fn forge_args(identity: &DeviceIdentity, path: &Path) -> Vec<String> {
    vec![
        "-overwrite_original".into(),
        format!("-Make={}", identity.make),
        format!("-Model={}", identity.model),
        format!("-Software={}", identity.software),
        format!("-CreateDate={}", identity.create_date),
        path.display().to_string(),
    ]
}

/// Reads a file's embedded metadata into a flat map.
pub fn read_metadata(runner: &dyn CommandRunner, path: &Path) -> CoreResult<MetadataMap> {
    let output = runner.run(EXIFTOOL, &dump_args(path))?;
    if !output.success() {
        return Err(CoreError::Metadata(format!(
            "exiftool dump failed for {}: {}",
            path.display(),
            output.stderr.trim()
        )));
    }
    parse_dump(&output.stdout)
}

/// Parses exiftool's JSON dump output (an array with one object per file).
fn parse_dump(stdout: &str) -> CoreResult<MetadataMap> {
    let entries: Vec<MetadataMap> = serde_json::from_str(stdout)?;
    entries
        .into_iter()
        .next()
        .ok_or_else(|| CoreError::Metadata("exiftool dump returned no entries".to_string()))
}

/// Erases all tags from `path`. Non-zero exit is surfaced as an error; the
/// caller decides whether that is fatal.
pub fn strip_metadata(runner: &dyn CommandRunner, path: &Path) -> CoreResult<()> {
    debug!("Stripping metadata from {}", path.display());
    let output = runner.run(EXIFTOOL, &strip_args(path))?;
    if output.success() {
        Ok(())
    } else {
        Err(CoreError::Metadata(format!(
            "exiftool strip failed for {}: {}",
            path.display(),
            output.stderr.trim()
        )))
    }
}

/// Writes a forged device identity into `path`.
pub fn forge_metadata(
    runner: &dyn CommandRunner,
    identity: &DeviceIdentity,
    path: &Path,
) -> CoreResult<()> {
    debug!(
        "Forging identity {} {} on {}",
        identity.make,
        identity.model,
        path.display()
    );
    let output = runner.run(EXIFTOOL, &forge_args(identity, path))?;
    if output.success() {
        Ok(())
    } else {
        Err(CoreError::Metadata(format!(
            "exiftool forge failed for {}: {}",
            path.display(),
            output.stderr.trim()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_dump_args() {
        let args = dump_args(&PathBuf::from("clip.mp4"));
        assert_eq!(args, vec!["-j", "-n", "clip.mp4"]);
    }

    #[test]
    fn test_strip_args() {
        let args = strip_args(&PathBuf::from("clip.mp4"));
        assert_eq!(args, vec!["-all=", "-overwrite_original", "clip.mp4"]);
    }

    #[test]
    fn test_forge_args_carry_all_identity_tags() {
        let identity = DeviceIdentity {
            make: "Apple".to_string(),
            model: "iPhone 13".to_string(),
            software: "17.5.1".to_string(),
            create_date: "2021:06:15 10:30:00".to_string(),
        };
        let args = forge_args(&identity, &PathBuf::from("clip.mp4"));
        assert_eq!(args[0], "-overwrite_original");
        assert!(args.contains(&"-Make=Apple".to_string()));
        assert!(args.contains(&"-Model=iPhone 13".to_string()));
        assert!(args.contains(&"-Software=17.5.1".to_string()));
        assert!(args.contains(&"-CreateDate=2021:06:15 10:30:00".to_string()));
        assert_eq!(args.last().map(String::as_str), Some("clip.mp4"));
    }

    #[test]
    fn test_parse_dump() {
        let stdout = r#"[{"SourceFile":"clip.mp4","Make":"Apple","Duration":12.5}]"#;
        let map = parse_dump(stdout).unwrap();
        assert_eq!(map.get("Make"), Some(&json!("Apple")));
        assert_eq!(map.get("Duration"), Some(&json!(12.5)));
    }

    #[test]
    fn test_parse_dump_empty_array() {
        assert!(matches!(
            parse_dump("[]"),
            Err(CoreError::Metadata(_))
        ));
    }

    #[test]
    fn test_parse_dump_invalid_json() {
        assert!(matches!(parse_dump("not json"), Err(CoreError::Json(_))));
    }
}
