use std::sync::Arc;

use crate::{
    lut::{source::ResolvedLuts, table::LutTable},
    mixer::sink::{LutBlender, PassthroughSink, VolumeSink, VolumeState},
};

#[derive(Clone, Debug)]
/// One timeline input feeding the mixer this frame.
pub struct MixerInput {
    /// Timeline weight; inputs at or below zero are inactive.
    pub weight: f32,
    /// Strips for the clip, `None` when the clip has no LUT assigned.
    pub luts: Option<ResolvedLuts>,
}

impl MixerInput {
    /// Input carrying `luts` at `weight`.
    pub fn new(weight: f32, luts: ResolvedLuts) -> Self {
        Self {
            weight,
            luts: Some(luts),
        }
    }
}

#[derive(Default)]
/// Output targets for one [`CrossfadeMixer::process_frame`] call. Absent targets are skipped.
pub struct MixerTargets<'a> {
    /// Passthrough compositor.
    pub passthrough: Option<&'a mut dyn PassthroughSink>,
    /// Post-process volume.
    pub volume: Option<&'a mut dyn VolumeSink>,
    /// Blend facility for post-process crossfades.
    pub blender: Option<&'a mut dyn LutBlender>,
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// What the mixer applied this frame.
pub enum MixOutcome {
    /// Nothing active and nothing to restore.
    Inactive,
    /// Became inactive this frame; outputs were disabled and restored.
    Disabled,
    /// One input applied at `contribution`.
    Single {
        /// The input's weight.
        contribution: f32,
    },
    /// Two inputs crossfaded.
    Crossfade {
        /// `weight_b / (weight_a + weight_b)`.
        blend: f32,
        /// The post-process path fell back to a hard cut.
        hard_cut: bool,
    },
}

#[derive(Debug, Default)]
/// Per-binding LUT mixer for a timeline track.
///
/// Picks the first two active inputs each frame. A single input fades by its weight, two inputs
/// crossfade by their normalized weights. When the last input goes away the outputs are disabled
/// once and the volume lookup is restored to the configuration seen on the first frame.
pub struct CrossfadeMixer {
    was_active: bool,
    original: Option<VolumeState>,
}

impl CrossfadeMixer {
    /// Mixer with no captured state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the last frame applied any LUT.
    pub fn was_active(&self) -> bool {
        self.was_active
    }

    /// Volume configuration captured before the first write.
    pub fn original_state(&self) -> Option<&VolumeState> {
        self.original.as_ref()
    }

    /// Evaluate one frame.
    pub fn process_frame(
        &mut self,
        inputs: &[MixerInput],
        targets: &mut MixerTargets<'_>,
    ) -> MixOutcome {
        self.capture_original(targets);

        let mut active = inputs
            .iter()
            .filter(|input| input.weight > 0.0)
            .filter_map(|input| input.luts.as_ref().map(|luts| (input.weight, luts)));

        match (active.next(), active.next()) {
            (Some((weight_a, a)), Some((weight_b, b))) => {
                let blend = weight_b / (weight_a + weight_b);
                if let Some(sink) = targets.passthrough.as_deref_mut() {
                    sink.set_color_lut_blend(&a.passthrough, &b.passthrough, blend);
                }
                let hard_cut = apply_volume_crossfade(targets, &a.volume, &b.volume, blend);
                self.was_active = true;
                MixOutcome::Crossfade { blend, hard_cut }
            }
            (Some((weight, a)), None) => {
                if let Some(sink) = targets.passthrough.as_deref_mut() {
                    sink.set_color_lut(&a.passthrough, weight);
                }
                if let Some(volume) = targets.volume.as_deref_mut() {
                    volume.set_volume_state(VolumeState {
                        lut: Some(Arc::clone(&a.volume)),
                        contribution: weight,
                    });
                }
                self.was_active = true;
                MixOutcome::Single {
                    contribution: weight,
                }
            }
            _ if self.was_active => {
                self.disable_all(targets);
                self.was_active = false;
                MixOutcome::Disabled
            }
            _ => MixOutcome::Inactive,
        }
    }

    /// Tear down the binding, restoring outputs if a LUT is still applied.
    pub fn destroy(&mut self, targets: &mut MixerTargets<'_>) {
        if self.was_active {
            self.disable_all(targets);
            self.was_active = false;
        }
    }

    fn capture_original(&mut self, targets: &MixerTargets<'_>) {
        if self.original.is_none()
            && let Some(volume) = targets.volume.as_deref()
        {
            self.original = Some(volume.volume_state());
        }
    }

    fn disable_all(&self, targets: &mut MixerTargets<'_>) {
        tracing::debug!("no active luts, disabling color maps");
        if let Some(sink) = targets.passthrough.as_deref_mut() {
            sink.disable_color_map();
        }
        if let (Some(volume), Some(original)) = (targets.volume.as_deref_mut(), &self.original) {
            volume.set_volume_state(original.clone());
        }
    }
}

fn apply_volume_crossfade(
    targets: &mut MixerTargets<'_>,
    a: &Arc<LutTable>,
    b: &Arc<LutTable>,
    blend: f32,
) -> bool {
    let Some(volume) = targets.volume.as_deref_mut() else {
        return false;
    };

    let blended = targets
        .blender
        .as_deref_mut()
        .and_then(|blender| match blender.blend(a, b, blend) {
            Ok(table) => Some(table),
            Err(err) => {
                tracing::warn!(error = %err, "lut blend failed, using hard cut");
                None
            }
        });

    let (lut, hard_cut) = match blended {
        Some(table) => (table, false),
        None if blend < 0.5 => (Arc::clone(a), true),
        None => (Arc::clone(b), true),
    };
    volume.set_volume_state(VolumeState {
        lut: Some(lut),
        contribution: 1.0,
    });
    hard_cut
}

#[cfg(test)]
#[path = "../../tests/unit/mixer/crossfade.rs"]
mod tests;
