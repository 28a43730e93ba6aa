use crate::{foundation::core::Rgb, foundation::math::Fnv1a64, grade::preset::GradePreset};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// 128-bit content hash of every preset field.
pub struct PresetFingerprint {
    /// High 64 bits.
    pub hi: u64,
    /// Low 64 bits.
    pub lo: u64,
}

/// Hash all 8 scalar fields and 3 tints of `preset`. Bit-exact: `0.0` and `-0.0` differ.
pub fn fingerprint_preset(preset: &GradePreset) -> PresetFingerprint {
    let mut a = Fnv1a64::new_default();
    let mut b = Fnv1a64::new(0x9ae1_6a3b_2f90_404f);

    for tint in [preset.shadow_tint, preset.mid_tint, preset.highlight_tint] {
        write_rgb_pair(&mut a, &mut b, tint);
    }
    for v in [
        preset.shadow_end,
        preset.highlight_start,
        preset.strength,
        preset.contrast,
        preset.pivot,
        preset.saturation,
        preset.exposure,
        preset.gamma,
    ] {
        write_f32_pair(&mut a, &mut b, v);
    }

    PresetFingerprint {
        hi: a.finish(),
        lo: b.finish(),
    }
}

fn write_rgb_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, c: Rgb) {
    for v in c.to_array() {
        write_f32_pair(a, b, v);
    }
}

fn write_f32_pair(a: &mut Fnv1a64, b: &mut Fnv1a64, v: f32) {
    a.write_u32(v.to_bits());
    b.write_u32(v.to_bits());
}

#[cfg(test)]
#[path = "../../tests/unit/lut/fingerprint.rs"]
mod tests;
