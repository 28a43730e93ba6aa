use std::sync::Arc;

use crate::{
    foundation::error::LumaResult,
    lut::{blend::blend_tables, table::LutTable},
};

/// Compositor that grades a live passthrough feed and interpolates LUTs natively.
pub trait PassthroughSink {
    /// Apply one LUT at `contribution` in `[0, 1]`.
    fn set_color_lut(&mut self, lut: &Arc<LutTable>, contribution: f32);

    /// Interpolate from `a` to `b` by `blend` in `[0, 1]`.
    fn set_color_lut_blend(&mut self, a: &Arc<LutTable>, b: &Arc<LutTable>, blend: f32);

    /// Remove any color mapping.
    fn disable_color_map(&mut self);
}

#[derive(Clone, Debug, Default, PartialEq)]
/// The `(texture, contribution)` pair of a post-process color lookup.
pub struct VolumeState {
    /// Active strip, `None` when the lookup has no texture.
    pub lut: Option<Arc<LutTable>>,
    /// Lookup strength in `[0, 1]`.
    pub contribution: f32,
}

/// Post-process volume whose color lookup the mixer overwrites and later restores.
pub trait VolumeSink {
    /// Current lookup configuration.
    fn volume_state(&self) -> VolumeState;

    /// Replace the lookup configuration.
    fn set_volume_state(&mut self, state: VolumeState);
}

/// Produces a per-cell crossfade of two strips for the post-process path.
pub trait LutBlender {
    /// Strip equal to `a` at `blend = 0` and `b` at `blend = 1`, in `a`'s layout.
    fn blend(&mut self, a: &LutTable, b: &LutTable, blend: f32) -> LumaResult<Arc<LutTable>>;
}

#[derive(Debug, Default)]
/// [`LutBlender`] that mixes strips on the CPU.
pub struct CpuLutBlender {
    blended: u64,
}

impl CpuLutBlender {
    /// Fresh blender.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of strips produced so far.
    pub fn blended_count(&self) -> u64 {
        self.blended
    }
}

impl LutBlender for CpuLutBlender {
    fn blend(&mut self, a: &LutTable, b: &LutTable, blend: f32) -> LumaResult<Arc<LutTable>> {
        let table = blend_tables(a, b, blend)?;
        self.blended += 1;
        Ok(Arc::new(table))
    }
}
