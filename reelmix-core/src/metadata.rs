//! Metadata maps, structural diffing and the tag-rewrite policy.
//!
//! A metadata map is the flat key/value dump produced by querying a media
//! container's embedded tags. Diffing two maps partitions the keys into
//! removed, modified and added sets; the result is deterministic and
//! order-independent.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::Serialize;
use serde_json::Value;

/// Flat tag-name to value mapping extracted from a media file.
pub type MetadataMap = BTreeMap<String, Value>;

/// How embedded tags are rewritten after transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetadataPolicy {
    /// Erase every tag the metadata tool can touch.
    #[default]
    Strip,
    /// Write a fabricated but coherent device identity.
    ForgeIdentity,
    /// Leave the transcoded file's tags alone.
    None,
}

/// Before/after value pair for a modified key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueChange {
    pub before: Value,
    pub after: Value,
}

/// Structural difference between two metadata maps.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetadataDiff {
    pub removed: BTreeMap<String, Value>,
    pub modified: BTreeMap<String, ValueChange>,
    pub added: BTreeMap<String, Value>,
    pub removed_count: usize,
    pub modified_count: usize,
    pub added_count: usize,
    pub before_total: usize,
    pub after_total: usize,
}

impl MetadataDiff {
    /// True when the two maps were identical.
    pub fn is_empty(&self) -> bool {
        self.removed.is_empty() && self.modified.is_empty() && self.added.is_empty()
    }
}

/// Partitions the keys of `before` and `after` into removed, modified and
/// added sets with count summaries.
pub fn diff_metadata(before: &MetadataMap, after: &MetadataMap) -> MetadataDiff {
    let mut diff = MetadataDiff {
        before_total: before.len(),
        after_total: after.len(),
        ..Default::default()
    };

    for (key, old_value) in before {
        match after.get(key) {
            None => {
                diff.removed.insert(key.clone(), old_value.clone());
            }
            Some(new_value) if new_value != old_value => {
                diff.modified.insert(
                    key.clone(),
                    ValueChange {
                        before: old_value.clone(),
                        after: new_value.clone(),
                    },
                );
            }
            Some(_) => {}
        }
    }

    for (key, new_value) in after {
        if !before.contains_key(key) {
            diff.added.insert(key.clone(), new_value.clone());
        }
    }

    diff.removed_count = diff.removed.len();
    diff.modified_count = diff.modified.len();
    diff.added_count = diff.added.len();
    diff
}

/// Manufacturer catalog used for forged identities: vendor, model lineup
/// and a plausible software/firmware version string.
const DEVICE_CATALOG: &[(&str, &[&str], &str)] = &[
    (
        "Apple",
        &["iPhone 12", "iPhone 13", "iPhone 14 Pro", "iPhone 15"],
        "17.5.1",
    ),
    (
        "Samsung",
        &["SM-G991B", "SM-G998B", "SM-S918B"],
        "G998BXXU5DVJB",
    ),
    (
        "Google",
        &["Pixel 6", "Pixel 7", "Pixel 8 Pro"],
        "HDR+ 1.0.540104416zd",
    ),
    ("Xiaomi", &["2201123G", "M2102J20SG"], "MIUI 14.0.3"),
];

// Forged creation timestamps fall anywhere in 2018-01-01..2024-01-01 UTC.
const FORGE_DATE_MIN: i64 = 1_514_764_800;
const FORGE_DATE_MAX: i64 = 1_704_067_200;

/// A coherent fabricated device identity written by the forge policy.
///
/// The model is always drawn from the chosen manufacturer's own lineup so
/// the forged tags do not contradict each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub make: String,
    pub model: String,
    pub software: String,
    /// Formatted as `YYYY:MM:DD HH:MM:SS`, the tag convention of the
    /// metadata tool.
    pub create_date: String,
}

impl DeviceIdentity {
    /// Picks a manufacturer, one of its models and a creation timestamp
    /// uniformly from the documented date range.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let (make, models, software) = DEVICE_CATALOG[rng.gen_range(0..DEVICE_CATALOG.len())];
        let model = models[rng.gen_range(0..models.len())];
        let secs = rng.gen_range(FORGE_DATE_MIN..FORGE_DATE_MAX);
        let create_date = DateTime::<Utc>::from_timestamp(secs, 0)
            .map(|dt| dt.format("%Y:%m:%d %H:%M:%S").to_string())
            .unwrap_or_else(|| "2020:01:01 00:00:00".to_string());

        Self {
            make: make.to_string(),
            model: model.to_string(),
            software: software.to_string(),
            create_date,
        }
    }
}
