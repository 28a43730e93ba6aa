use super::*;

fn grid() -> Vec<Rgb> {
    let steps = [0.0f32, 0.1, 0.25, 0.5, 0.75, 0.9, 1.0];
    let mut out = Vec::new();
    for &r in &steps {
        for &g in &steps {
            for &b in &steps {
                out.push(Rgb::new(r, g, b));
            }
        }
    }
    out
}

fn assert_close(a: Rgb, b: Rgb, eps: f32) {
    for (x, y) in a.to_array().into_iter().zip(b.to_array()) {
        assert!((x - y).abs() <= eps, "{a:?} != {b:?}");
    }
}

#[test]
fn outputs_are_always_in_unit_range() {
    let presets = [
        GradePreset::default(),
        GradePreset {
            exposure: 0.25,
            contrast: 3.0,
            saturation: 2.0,
            gamma: 0.5,
            shadow_tint: Rgb::new(2.0, 0.0, 2.0),
            ..GradePreset::default()
        },
        GradePreset {
            exposure: -0.25,
            contrast: 0.1,
            saturation: 0.0,
            gamma: 2.0,
            strength: 2.0,
            ..GradePreset::default()
        },
    ];
    for preset in &presets {
        let ev = GradeEvaluator::new(preset);
        for c in grid() {
            for v in ev.apply(c).to_array() {
                assert!((0.0..=1.0).contains(&v), "{v} out of range for {c:?}");
            }
        }
    }
}

#[test]
fn alpha_passes_through() {
    let ev = GradeEvaluator::new(&GradePreset::default());
    let out = ev.apply_rgba(Rgba::new(0.3, 0.4, 0.5, 0.42));
    assert_eq!(out.a, 0.42);
}

#[test]
fn zero_strength_is_identity() {
    let ev = GradeEvaluator::new(&GradePreset {
        strength: 0.0,
        contrast: 2.5,
        exposure: 0.2,
        ..GradePreset::default()
    });
    for c in grid() {
        assert_eq!(ev.apply(c), c);
    }
}

#[test]
fn neutral_pipeline_is_identity() {
    let ev = GradeEvaluator::new(&GradePreset::neutral());
    for c in grid() {
        assert_close(ev.apply(c), c, 1e-5);
    }
}

#[test]
fn inverted_thresholds_are_swapped() {
    let a = GradeEvaluator::new(&GradePreset {
        shadow_end: 0.7,
        highlight_start: 0.2,
        ..GradePreset::default()
    });
    let b = GradeEvaluator::new(&GradePreset {
        shadow_end: 0.2,
        highlight_start: 0.7,
        ..GradePreset::default()
    });
    assert_eq!(a.thresholds(), (0.2, 0.7));
    assert_eq!(a, b);
}

#[test]
fn thresholds_are_clamped_to_unit_range() {
    let ev = GradeEvaluator::new(&GradePreset {
        shadow_end: -1.0,
        highlight_start: 4.0,
        ..GradePreset::default()
    });
    assert_eq!(ev.thresholds(), (0.0, 1.0));
}

#[test]
fn feather_is_bounded() {
    let narrow = GradeEvaluator::new(&GradePreset {
        shadow_end: 0.5,
        highlight_start: 0.5,
        ..GradePreset::default()
    });
    assert_eq!(narrow.feather(), 0.02);
    let wide = GradeEvaluator::new(&GradePreset {
        shadow_end: 0.0,
        highlight_start: 1.0,
        ..GradePreset::default()
    });
    assert_eq!(wide.feather(), 0.12);
}

#[test]
fn tonal_weights_cover_shadow_mid_highlight() {
    let ev = GradeEvaluator::new(&GradePreset::default());
    let (s, m, h) = ev.tonal_weights(0.0);
    assert_eq!((s, m, h), (1.0, 0.0, 0.0));
    let (s, m, h) = ev.tonal_weights(0.45);
    assert_eq!((s, m, h), (0.0, 1.0, 0.0));
    let (s, m, h) = ev.tonal_weights(1.0);
    assert_eq!((s, m, h), (0.0, 0.0, 1.0));
}

#[test]
fn non_positive_contrast_and_gamma_do_not_blow_up() {
    let ev = GradeEvaluator::new(&GradePreset {
        contrast: -3.0,
        gamma: 0.0,
        ..GradePreset::default()
    });
    for c in grid() {
        for v in ev.apply(c).to_array() {
            assert!(v.is_finite());
        }
    }
}

#[test]
fn zero_saturation_produces_grey() {
    let ev = GradeEvaluator::new(&GradePreset {
        saturation: 0.0,
        ..GradePreset::neutral()
    });
    let out = ev.apply(Rgb::new(0.8, 0.2, 0.1));
    assert!((out.r - out.g).abs() < 1e-6);
    assert!((out.g - out.b).abs() < 1e-6);
}

#[test]
fn exposure_offsets_all_channels() {
    let ev = GradeEvaluator::new(&GradePreset {
        exposure: 0.1,
        ..GradePreset::neutral()
    });
    assert_close(ev.apply(Rgb::new(0.2, 0.3, 0.4)), Rgb::new(0.3, 0.4, 0.5), 1e-5);
}

#[test]
fn mid_tint_scales_midtones() {
    let ev = GradeEvaluator::new(&GradePreset {
        mid_tint: Rgb::new(0.5, 1.0, 1.0),
        shadow_end: 0.1,
        highlight_start: 0.9,
        ..GradePreset::neutral()
    });
    let out = ev.apply(Rgb::splat(0.5));
    assert_close(out, Rgb::new(0.25, 0.5, 0.5), 1e-5);
}

#[test]
fn full_pipeline_matches_hand_computed_value() {
    // Midtone input, so only the mid tint applies. Every other stage is active.
    let ev = GradeEvaluator::new(&GradePreset {
        shadow_tint: Rgb::new(0.5, 0.5, 2.0),
        mid_tint: Rgb::new(1.0, 0.9, 0.8),
        highlight_tint: Rgb::new(2.0, 0.5, 0.5),
        shadow_end: 0.2,
        highlight_start: 0.8,
        exposure: 0.05,
        contrast: 1.2,
        pivot: 0.5,
        saturation: 1.5,
        gamma: 2.0,
        strength: 0.75,
    });
    let out = ev.apply(Rgb::new(0.6, 0.4, 0.3));
    // tint (0.60, 0.36, 0.24), exposure (0.65, 0.41, 0.29), contrast (0.68, 0.392, 0.248),
    // saturation around 0.442832 (0.798584, 0.366584, 0.150584), gamma sqrt, strength 0.75.
    assert_close(out, Rgb::new(0.820_226, 0.554_097, 0.366_038), 1e-4);
}
