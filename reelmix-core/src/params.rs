//! Randomized remix parameter generation.
//!
//! Every knob is sampled independently from a fixed range. The RNG is passed
//! in explicitly so callers can seed it for reproducible parameter sets.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Rounds to two decimal places, matching the precision the filter builder
/// compares against identity values.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Rounds to one decimal place (hue and time shift).
fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// The full set of randomized knobs applied to one remix output.
///
/// Generated once per input file unless an explicit set is supplied, and
/// persisted verbatim into the output's JSON sidecar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterSet {
    // Basic adjustments
    pub zoom_factor: f64,
    pub playback_speed: f64,
    pub saturation: f64,
    pub brightness: f64,
    pub contrast: f64,
    pub volume: f64,

    // Color adjustments
    pub hue_shift: f64,
    pub gamma: f64,
    pub temperature: f64,

    // Pixel adjustments
    pub noise: f64,
    pub sharpness: f64,
    pub blend: f64,

    // Encoding adjustments
    pub bitrate_variation: f64,
    pub frame_blending: f64,
    pub time_shift: f64,
    pub crf: u8,

    // Structural toggles
    pub remove_audio: bool,
    pub flip_horizontal: bool,
    pub add_padding: u32,
}

impl ParameterSet {
    /// Samples a fresh parameter set from the documented ranges.
    ///
    /// The flip and padding knobs sit behind low-probability gates (10% and
    /// 30%) before a discrete value is chosen. Audio removal defaults to off
    /// and is only switched on by configuration.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            zoom_factor: round2(rng.gen_range(1.02..=1.08)),
            playback_speed: round2(rng.gen_range(0.92..=1.08)),
            saturation: round2(rng.gen_range(0.92..=1.08)),
            brightness: round2(rng.gen_range(-0.08..=0.08)),
            contrast: round2(rng.gen_range(0.92..=1.08)),
            volume: round2(rng.gen_range(0.92..=1.08)),

            hue_shift: round1(rng.gen_range(-5.0..=5.0)),
            gamma: round2(rng.gen_range(0.95..=1.05)),
            temperature: round2(rng.gen_range(0.95..=1.05)),

            noise: round2(rng.gen_range(0.0..=0.02)),
            sharpness: round2(rng.gen_range(0.95..=1.05)),
            blend: round2(rng.gen_range(0.0..=0.01)),

            bitrate_variation: round2(rng.gen_range(0.95..=1.05)),
            frame_blending: round2(rng.gen_range(0.0..=0.25)),
            time_shift: round1(rng.gen_range(-5.0..=5.0)),
            crf: rng.gen_range(20..=24),

            remove_audio: false,
            flip_horizontal: if rng.gen_bool(0.1) { rng.gen() } else { false },
            add_padding: if rng.gen_bool(0.3) {
                2 * rng.gen_range(1..=4)
            } else {
                0
            },
        }
    }

    /// A set where every knob is at its identity value, so the filter
    /// builder produces no expressions at all.
    pub fn identity() -> Self {
        Self {
            zoom_factor: 1.0,
            playback_speed: 1.0,
            saturation: 1.0,
            brightness: 0.0,
            contrast: 1.0,
            volume: 1.0,
            hue_shift: 0.0,
            gamma: 1.0,
            temperature: 1.0,
            noise: 0.0,
            sharpness: 1.0,
            blend: 0.0,
            bitrate_variation: 1.0,
            frame_blending: 0.0,
            time_shift: 0.0,
            crf: 22,
            remove_audio: false,
            flip_horizontal: false,
            add_padding: 0,
        }
    }

    /// Target video bitrate in kbit/s, scaled from a 2000k base.
    pub fn video_bitrate_kbps(&self) -> u32 {
        (2000.0 * self.bitrate_variation) as u32
    }
}
