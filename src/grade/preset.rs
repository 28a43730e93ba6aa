use std::{
    path::Path,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use anyhow::Context;

use crate::foundation::{
    core::Rgb,
    error::{LumaError, LumaResult},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
/// Split-toning color grade authored as a preset.
///
/// Presets are plain data: the grading engine only reads them. Out-of-range values are
/// tolerated here and corrected when an evaluator is built (see
/// [`crate::GradeEvaluator::new`]).
pub struct GradePreset {
    /// Multiplier applied to shadows (linear).
    pub shadow_tint: Rgb,
    /// Multiplier applied to midtones (linear).
    pub mid_tint: Rgb,
    /// Multiplier applied to highlights (linear).
    pub highlight_tint: Rgb,
    /// Luminance where shadows end, `[0, 1]`.
    pub shadow_end: f32,
    /// Luminance where highlights start, `[0, 1]`.
    pub highlight_start: f32,
    /// Mix between the original and the graded color.
    pub strength: f32,
    /// Scale around `pivot`.
    pub contrast: f32,
    /// Contrast pivot, `[0, 1]`.
    pub pivot: f32,
    /// 0 is greyscale, 1 is unchanged, above 1 oversaturates.
    pub saturation: f32,
    /// Additive linear offset.
    pub exposure: f32,
    /// Power-curve exponent; output is raised to `1 / gamma`.
    pub gamma: f32,
}

impl Default for GradePreset {
    fn default() -> Self {
        Self {
            shadow_tint: Rgb::new(0.90, 1.00, 1.10),
            mid_tint: Rgb::WHITE,
            highlight_tint: Rgb::new(1.10, 1.00, 0.90),
            shadow_end: 0.35,
            highlight_start: 0.55,
            strength: 1.0,
            contrast: 1.05,
            pivot: 0.5,
            saturation: 1.05,
            exposure: 0.0,
            gamma: 1.0,
        }
    }
}

impl GradePreset {
    /// A preset whose grade leaves every color unchanged.
    pub fn neutral() -> Self {
        Self {
            shadow_tint: Rgb::WHITE,
            mid_tint: Rgb::WHITE,
            highlight_tint: Rgb::WHITE,
            shadow_end: 0.0,
            highlight_start: 0.0,
            strength: 1.0,
            contrast: 1.0,
            pivot: 0.5,
            saturation: 1.0,
            exposure: 0.0,
            gamma: 1.0,
        }
    }

    /// Parse a preset from JSON. Missing fields take their default values.
    pub fn from_json_str(s: &str) -> LumaResult<Self> {
        let preset: Self =
            serde_json::from_str(s).map_err(|e| LumaError::serde(format!("preset json: {e}")))?;
        preset.validate()?;
        Ok(preset)
    }

    /// Read and parse a preset JSON file.
    pub fn from_path(path: &Path) -> LumaResult<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read preset '{}'", path.display()))?;
        Self::from_json_str(&text)
    }

    /// Serialize as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> LumaResult<String> {
        serde_json::to_string_pretty(self).map_err(|e| LumaError::serde(e.to_string()))
    }

    /// Write the preset as pretty-printed JSON, creating parent directories.
    pub fn save(&self, path: &Path) -> LumaResult<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create preset dir '{}'", parent.display()))?;
        }
        std::fs::write(path, self.to_json_pretty()?)
            .with_context(|| format!("write preset '{}'", path.display()))?;
        Ok(())
    }

    /// Reject non-finite values. Finite out-of-range values are accepted and clamped later.
    pub fn validate(&self) -> LumaResult<()> {
        let scalars = [
            ("shadow_end", self.shadow_end),
            ("highlight_start", self.highlight_start),
            ("strength", self.strength),
            ("contrast", self.contrast),
            ("pivot", self.pivot),
            ("saturation", self.saturation),
            ("exposure", self.exposure),
            ("gamma", self.gamma),
        ];
        for (name, v) in scalars {
            if !v.is_finite() {
                return Err(LumaError::validation(format!("{name} must be finite")));
            }
        }
        let tints = [
            ("shadow_tint", self.shadow_tint),
            ("mid_tint", self.mid_tint),
            ("highlight_tint", self.highlight_tint),
        ];
        for (name, t) in tints {
            if !t.to_array().iter().all(|c| c.is_finite()) {
                return Err(LumaError::validation(format!("{name} must be finite")));
            }
        }
        Ok(())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
/// Identity token of a live preset instance, independent of its content.
pub struct PresetId(u64);

static NEXT_PRESET_ID: AtomicU64 = AtomicU64::new(1);

impl PresetId {
    /// Allocate a process-unique identifier.
    pub fn next() -> Self {
        Self(NEXT_PRESET_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Construct from a caller-owned raw value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug)]
/// Shared preset paired with its identity token.
///
/// The id survives content edits; [`crate::LutCache`] detects those by fingerprint.
pub struct PresetHandle {
    id: PresetId,
    preset: Arc<GradePreset>,
}

impl PresetHandle {
    /// Wrap a preset with a freshly allocated id.
    pub fn new(preset: GradePreset) -> Self {
        Self::with_id(PresetId::next(), preset)
    }

    /// Wrap a preset with an explicit id.
    pub fn with_id(id: PresetId, preset: GradePreset) -> Self {
        Self {
            id,
            preset: Arc::new(preset),
        }
    }

    /// Identity token.
    pub fn id(&self) -> PresetId {
        self.id
    }

    /// Current preset content.
    pub fn preset(&self) -> &GradePreset {
        &self.preset
    }

    /// Replace the content while keeping the identity, as an editor would on save.
    pub fn update(&mut self, preset: GradePreset) {
        self.preset = Arc::new(preset);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grade/preset.rs"]
mod tests;
