use std::path::Path;

use anyhow::Context;

use crate::{
    foundation::core::Rgb,
    foundation::error::{LumaError, LumaResult},
    foundation::math::{lerp, srgb_to_linear},
    grade::preset::GradePreset,
};

const LOW_THRESHOLD: f32 = 0.35;
const HIGH_THRESHOLD: f32 = 0.65;
const MAX_SAMPLES: usize = 4096;

#[derive(Clone, Copy, Debug)]
struct Bucket {
    sum: Rgb,
    count: u32,
}

impl Bucket {
    const EMPTY: Self = Self {
        sum: Rgb::BLACK,
        count: 0,
    };

    fn push(&mut self, c: Rgb) {
        self.sum = self.sum + c;
        self.count += 1;
    }

    /// Average hue of the bucket with its brightest channel scaled to 1.
    fn normalized_tint(&self) -> Rgb {
        if self.count == 0 {
            return Rgb::WHITE;
        }
        let n = self.count as f32;
        let avg = self.sum.map(|v| v / n);
        let max = avg.max_channel();
        if max <= 0.01 {
            return Rgb::WHITE;
        }
        avg.map(|v| v / max)
    }
}

/// HSV saturation and value of an RGB color.
fn saturation_value(c: Rgb) -> (f32, f32) {
    let max = c.max_channel();
    let min = c.r.min(c.g).min(c.b);
    let s = if max > 0.0 { (max - min) / max } else { 0.0 };
    (s, max)
}

/// Derive a preset that approximates the look of a reference image.
///
/// At most ~4096 pixels are sampled at a fixed stride. Pixels are bucketed into shadows,
/// mids and highlights by HSV value; each bucket's average becomes that range's tint.
/// Threshold, gamma, pivot and strength are reset to fixed values.
pub fn match_preset(pixels: &[Rgb]) -> LumaResult<GradePreset> {
    if pixels.is_empty() {
        return Err(LumaError::validation("cannot match a preset from zero pixels"));
    }

    let step = (pixels.len() / MAX_SAMPLES).max(1);
    let mut shadow = Bucket::EMPTY;
    let mut mid = Bucket::EMPTY;
    let mut high = Bucket::EMPTY;
    let mut total_v = 0.0f32;
    let mut total_s = 0.0f32;
    let mut samples = 0u32;

    for &c in pixels.iter().step_by(step) {
        let (s, v) = saturation_value(c);
        total_v += v;
        total_s += s;
        samples += 1;

        if v < LOW_THRESHOLD {
            shadow.push(c);
        } else if v > HIGH_THRESHOLD {
            high.push(c);
        } else {
            mid.push(c);
        }
    }

    let avg_v = total_v / samples as f32;
    let avg_s = total_s / samples as f32;

    Ok(GradePreset {
        shadow_tint: shadow.normalized_tint(),
        mid_tint: mid.normalized_tint(),
        highlight_tint: high.normalized_tint(),
        saturation: lerp(0.5, 1.5, avg_s),
        exposure: (avg_v - 0.5) * 0.05,
        contrast: 1.1,
        shadow_end: LOW_THRESHOLD,
        highlight_start: HIGH_THRESHOLD,
        gamma: 1.0,
        pivot: 0.5,
        strength: 1.0,
    })
}

/// Load an image file and run [`match_preset`] over its linearized pixels.
///
/// Stored channels are treated as sRGB encoded, so buckets and averages see linear light.
pub fn match_image(path: &Path) -> LumaResult<GradePreset> {
    let img = image::open(path).with_context(|| format!("open image '{}'", path.display()))?;
    let rgb = img.to_rgb32f();
    let pixels: Vec<Rgb> = rgb
        .pixels()
        .map(|p| Rgb::from(p.0).map(srgb_to_linear))
        .collect();
    tracing::debug!(
        width = rgb.width(),
        height = rgb.height(),
        "matching preset from image"
    );
    match_preset(&pixels)
}

#[cfg(test)]
#[path = "../../tests/unit/grade/matcher.rs"]
mod tests;
