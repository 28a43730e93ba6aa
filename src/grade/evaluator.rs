use crate::{
    foundation::core::{Rgb, Rgba},
    foundation::math::{clamp01, smoothstep},
    grade::preset::GradePreset,
};

const MIN_SPAN: f32 = 0.0001;
const MIN_FEATHER: f32 = 0.02;
const MAX_FEATHER: f32 = 0.12;
const MIN_POSITIVE: f32 = 0.0001;

#[derive(Clone, Copy, Debug, PartialEq)]
/// Pure color-grade function bound to one preset snapshot.
///
/// Construction corrects malformed preset values (inverted thresholds, non-positive
/// contrast/gamma, negative saturation) so that [`GradeEvaluator::apply`] is total.
///
/// The grade runs in a fixed order: tint, exposure, contrast, saturation, gamma, then the
/// strength blend against the input. Existing presets depend on this order.
pub struct GradeEvaluator {
    shadow_tint: Rgb,
    mid_tint: Rgb,
    highlight_tint: Rgb,
    shadow_end: f32,
    highlight_start: f32,
    feather: f32,
    strength: f32,
    contrast: f32,
    pivot: f32,
    saturation: f32,
    exposure: f32,
    inv_gamma: f32,
}

impl GradeEvaluator {
    /// Snapshot `preset`, normalizing its values.
    pub fn new(preset: &GradePreset) -> Self {
        let mut shadow_end = clamp01(preset.shadow_end);
        let mut highlight_start = clamp01(preset.highlight_start);
        if highlight_start < shadow_end {
            std::mem::swap(&mut shadow_end, &mut highlight_start);
        }

        let span = (highlight_start - shadow_end).max(MIN_SPAN);
        let feather = (span * 0.25).clamp(MIN_FEATHER, MAX_FEATHER);
        let gamma = preset.gamma.max(MIN_POSITIVE);

        Self {
            shadow_tint: preset.shadow_tint,
            mid_tint: preset.mid_tint,
            highlight_tint: preset.highlight_tint,
            shadow_end,
            highlight_start,
            feather,
            strength: clamp01(preset.strength),
            contrast: preset.contrast.max(MIN_POSITIVE),
            pivot: clamp01(preset.pivot),
            saturation: preset.saturation.max(0.0),
            exposure: preset.exposure,
            inv_gamma: 1.0 / gamma,
        }
    }

    /// Shadow and highlight thresholds after clamping and ordering.
    pub fn thresholds(&self) -> (f32, f32) {
        (self.shadow_end, self.highlight_start)
    }

    /// Width of the smoothstep transition around each threshold.
    pub fn feather(&self) -> f32 {
        self.feather
    }

    /// Tonal weights `(shadow, mid, highlight)` for luminance `lum`.
    pub fn tonal_weights(&self, lum: f32) -> (f32, f32, f32) {
        let f = self.feather;
        let w_shadow = 1.0 - smoothstep(self.shadow_end - f, self.shadow_end + f, lum);
        let w_highlight = smoothstep(self.highlight_start - f, self.highlight_start + f, lum);
        let w_mid = clamp01(1.0 - w_shadow - w_highlight);
        (w_shadow, w_mid, w_highlight)
    }

    /// Grade a linear color. Output channels are in `[0, 1]`.
    pub fn apply(&self, c: Rgb) -> Rgb {
        let (ws, wm, wh) = self.tonal_weights(c.luminance());
        let tint = self.shadow_tint * ws + self.mid_tint * wm + self.highlight_tint * wh;

        let mut graded = c * tint + Rgb::splat(self.exposure);

        let pivot = Rgb::splat(self.pivot);
        graded = (graded - pivot) * self.contrast + pivot;

        let grey = Rgb::splat(graded.luminance());
        graded = grey.lerp(graded, self.saturation);

        let inv_gamma = self.inv_gamma;
        graded = graded.map(|v| v.max(0.0).powf(inv_gamma));

        c.lerp(graded, self.strength).map(clamp01)
    }

    /// Grade a linear color with alpha; alpha is returned unchanged.
    pub fn apply_rgba(&self, c: Rgba) -> Rgba {
        Rgba {
            rgb: self.apply(c.rgb),
            a: c.a,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grade/evaluator.rs"]
mod tests;
