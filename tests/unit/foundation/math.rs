use super::*;

#[test]
fn fnv_seeded_hash_is_stable() {
    let mut a = Fnv1a64::new_default();
    a.write_bytes(b"lumasync");
    let mut b = Fnv1a64::new(Fnv1a64::OFFSET_BASIS);
    b.write_bytes(b"luma");
    b.write_bytes(b"sync");
    assert_eq!(a.finish(), b.finish());
}

#[test]
fn smoothstep_clamps_outside_edges() {
    assert_eq!(smoothstep(0.2, 0.4, 0.0), 0.0);
    assert_eq!(smoothstep(0.2, 0.4, 1.0), 1.0);
    assert!((smoothstep(0.2, 0.4, 0.3) - 0.5).abs() < 1e-6);
}

#[test]
fn inverse_lerp_degenerate_range_is_zero() {
    assert_eq!(inverse_lerp(0.5, 0.5, 0.9), 0.0);
}

#[test]
fn luminance_of_white_is_one() {
    assert!((luminance(1.0, 1.0, 1.0) - 1.0).abs() < 1e-6);
}

#[test]
fn quantize_rounds_and_clamps() {
    assert_eq!(quantize_u8(-1.0), 0);
    assert_eq!(quantize_u8(2.0), 255);
    assert_eq!(quantize_u8(0.5), 128);
}

#[test]
fn quantize_ties_round_to_even() {
    let mut ties = 0;
    for k in 0..255u32 {
        let half = k as f32 + 0.5;
        let v = half / 255.0;
        if v * 255.0 == half {
            ties += 1;
            assert_eq!(quantize_u8(v) % 2, 0, "tie at {half}");
        }
    }
    assert!(ties > 0);
}

#[test]
fn srgb_to_linear_matches_reference_points() {
    assert_eq!(srgb_to_linear(0.0), 0.0);
    assert!((srgb_to_linear(1.0) - 1.0).abs() < 1e-6);
    assert!((srgb_to_linear(0.04) - 0.04 / 12.92).abs() < 1e-7);
    assert!((srgb_to_linear(128.0 / 255.0) - 0.215_861).abs() < 1e-5);
}

#[test]
fn mul_div255_identity_at_full_scale() {
    for x in [0u16, 1, 127, 255] {
        assert_eq!(mul_div255_u16(x, 255), x);
    }
}

#[test]
fn write_u32_is_little_endian_bytes() {
    let mut a = Fnv1a64::new_default();
    a.write_u32(0x0403_0201);
    let mut b = Fnv1a64::new_default();
    b.write_bytes(&[1, 2, 3, 4]);
    assert_eq!(a.finish(), b.finish());
}
