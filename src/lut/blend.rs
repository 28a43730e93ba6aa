use crate::{
    foundation::error::{LumaError, LumaResult},
    foundation::math::mul_div255_u16,
    lut::table::LutTable,
};

/// Linear mix of two RGBA8 pixels, `t = 0` is `a` and `t = 1` is `b`.
pub fn crossfade(a: [u8; 4], b: [u8; 4], t: f32) -> [u8; 4] {
    let t = t.clamp(0.0, 1.0);
    let tt = ((t * 255.0).round() as i32).clamp(0, 255) as u16;
    let it = 255u16 - tt;

    let mut out = [0u8; 4];
    for i in 0..4 {
        let av = mul_div255_u16(u16::from(a[i]), it);
        let bv = mul_div255_u16(u16::from(b[i]), tt);
        out[i] = (av + bv).min(255) as u8;
    }
    out
}

/// Crossfade `a` and `b` into `dst`. All three must be equal-length RGBA8 buffers.
pub fn crossfade_in_place(dst: &mut [u8], a: &[u8], b: &[u8], t: f32) -> LumaResult<()> {
    if dst.len() != a.len() || dst.len() != b.len() || !dst.len().is_multiple_of(4) {
        return Err(LumaError::lut(
            "crossfade_in_place expects equal-length rgba8 buffers",
        ));
    }
    for ((d, a), b) in dst
        .chunks_exact_mut(4)
        .zip(a.chunks_exact(4))
        .zip(b.chunks_exact(4))
    {
        let out = crossfade([a[0], a[1], a[2], a[3]], [b[0], b[1], b[2], b[3]], t);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Cell-wise blend of two strips. The result takes `a`'s layout; `b` is reoriented first.
pub fn blend_tables(a: &LutTable, b: &LutTable, t: f32) -> LumaResult<LutTable> {
    let b = b.to_layout(a.layout());
    let mut data = vec![0u8; a.as_bytes().len()];
    crossfade_in_place(&mut data, a.as_bytes(), b.as_bytes(), t)?;
    LutTable::from_rgba8(a.width(), a.height(), data, a.layout())
}

#[cfg(test)]
#[path = "../../tests/unit/lut/blend.rs"]
mod tests;
