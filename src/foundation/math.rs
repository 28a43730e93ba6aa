#[derive(Clone, Copy, Debug)]
pub(crate) struct Fnv1a64(u64);

impl Fnv1a64 {
    pub(crate) const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01B3;

    pub(crate) fn new(seed: u64) -> Self {
        Self(seed)
    }

    pub(crate) fn new_default() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    pub(crate) fn write_u32(&mut self, v: u32) {
        self.write_bytes(&v.to_le_bytes());
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        let mut h = self.0;
        for &b in bytes {
            h ^= u64::from(b);
            h = h.wrapping_mul(Self::PRIME);
        }
        self.0 = h;
    }

    pub(crate) fn finish(self) -> u64 {
        self.0
    }
}

/// BT.709 luma weights.
pub(crate) const LUMA_R: f32 = 0.2126;
pub(crate) const LUMA_G: f32 = 0.7152;
pub(crate) const LUMA_B: f32 = 0.0722;

pub(crate) fn luminance(r: f32, g: f32, b: f32) -> f32 {
    r * LUMA_R + g * LUMA_G + b * LUMA_B
}

pub(crate) fn clamp01(v: f32) -> f32 {
    v.clamp(0.0, 1.0)
}

pub(crate) fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Position of `x` between `a` and `b`, clamped to `[0, 1]`. Degenerate ranges yield 0.
pub(crate) fn inverse_lerp(a: f32, b: f32, x: f32) -> f32 {
    if a == b {
        return 0.0;
    }
    clamp01((x - a) / (b - a))
}

pub(crate) fn smoothstep(a: f32, b: f32, x: f32) -> f32 {
    let t = inverse_lerp(a, b, x);
    t * t * (3.0 - 2.0 * t)
}

pub(crate) fn approx_eq_f64(a: f64, b: f64, eps: f64) -> bool {
    (a - b).abs() < eps
}

pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

/// 8-bit quantization used by the strip layout: `round(clamp01(v) * 255)`, ties to even.
pub(crate) fn quantize_u8(v: f32) -> u8 {
    (clamp01(v) * 255.0).round_ties_even() as u8
}

/// IEC 61966-2-1 transfer: gamma-encoded sRGB channel to linear.
pub(crate) fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;
