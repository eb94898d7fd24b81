//! FFmpeg filter-graph construction from a parameter set.
//!
//! Builds the `-vf` and `-af` expressions. Any knob at its identity value
//! (1.0, 0 or false) contributes nothing. The video filter order is fixed:
//! speed must come last so cropping and scaling operate on the original
//! framing, and geometry changes precede color and pixel-level work.

use crate::params::ParameterSet;

/// Ordered chain of filter expressions, joined with `,`.
#[derive(Debug, Default)]
pub struct FilterChain {
    filters: Vec<String>,
}

impl FilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a filter expression, ignoring empty strings.
    pub fn push(&mut self, expr: impl Into<String>) {
        let expr = expr.into();
        if !expr.is_empty() {
            self.filters.push(expr);
        }
    }

    /// Builds the chain into a single filter string, or `None` when empty.
    pub fn build(self) -> Option<String> {
        if self.filters.is_empty() {
            None
        } else {
            Some(self.filters.join(","))
        }
    }
}

/// Builds the video filter string for a parameter set.
pub fn build_video_filters(params: &ParameterSet) -> Option<String> {
    let mut chain = FilterChain::new();

    // Zoom: upscale then crop back to the original frame size.
    if params.zoom_factor != 1.0 {
        let z = params.zoom_factor;
        chain.push(format!("scale=iw*{z}:ih*{z},crop=iw/{z}:ih/{z}"));
    }

    // Brightness, contrast, saturation and gamma fold into a single eq pass.
    let mut eq_parts = Vec::new();
    if params.brightness != 0.0 {
        eq_parts.push(format!("brightness={}", params.brightness));
    }
    if params.contrast != 1.0 {
        eq_parts.push(format!("contrast={}", params.contrast));
    }
    if params.saturation != 1.0 {
        eq_parts.push(format!("saturation={}", params.saturation));
    }
    if params.gamma != 1.0 {
        eq_parts.push(format!("gamma={}", params.gamma));
    }
    if !eq_parts.is_empty() {
        chain.push(format!("eq={}", eq_parts.join(":")));
    }

    if params.hue_shift != 0.0 {
        chain.push(format!("hue=h={}", params.hue_shift));
    }

    // Sharpness branches on sign: sharpen above 1.0, blur below.
    if params.sharpness != 1.0 {
        let delta = ((params.sharpness - 1.0) * 100.0).round() / 100.0;
        if delta > 0.0 {
            chain.push(format!("unsharp=5:5:{delta}:5:5:0"));
        } else {
            chain.push(format!("smartblur=1.5:{}:0", -delta));
        }
    }

    if params.noise > 0.0 {
        chain.push(format!("noise=alls={}:allf=t", (params.noise * 100.0) as u32));
    }

    if params.flip_horizontal {
        chain.push("hflip");
    }

    // Letterbox padding above and below.
    if params.add_padding > 0 {
        let pad = params.add_padding;
        chain.push(format!("pad=iw:ih+{}:0:{}:black", pad * 2, pad));
    }

    // Speed last: setpts after all geometry and pixel work.
    if params.playback_speed != 1.0 {
        chain.push(format!("setpts={}*PTS", 1.0 / params.playback_speed));
    }

    chain.build()
}

/// Builds the audio filter string for a parameter set.
///
/// Independent of the video chain; tempo tracks the video speed so streams
/// stay in sync.
pub fn build_audio_filters(params: &ParameterSet) -> Option<String> {
    let mut chain = FilterChain::new();

    if params.volume != 1.0 {
        chain.push(format!("volume={}", params.volume));
    }
    if params.playback_speed != 1.0 {
        chain.push(format!("atempo={}", params.playback_speed));
    }

    chain.build()
}
