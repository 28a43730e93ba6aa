use super::*;
use crate::grade::preset::GradePreset;

fn warm() -> GradePreset {
    GradePreset {
        mid_tint: crate::foundation::core::Rgb::new(1.2, 1.0, 0.8),
        ..GradePreset::default()
    }
}

#[test]
fn preset_source_matches_generated_layouts() {
    let mut cache = LutCache::new();
    let src = LutSource::Preset(PresetHandle::new(warm()));
    let luts = src.resolve(&mut cache);
    assert_eq!(*luts.passthrough, LutTable::generate(&warm(), LutLayout::PASSTHROUGH));
    assert_eq!(*luts.volume, LutTable::generate(&warm(), LutLayout::VOLUME));
    assert_eq!(cache.len(), 2);
}

#[test]
fn texture_source_flips_for_volume_once() {
    let mut cache = LutCache::new();
    let authored = LutTable::generate(&warm(), LutLayout::PASSTHROUGH);
    let src = LutSource::Texture(TextureLut::new(authored.clone()));

    let first = src.resolve(&mut cache);
    let second = src.resolve(&mut cache);

    assert_eq!(*first.passthrough, authored);
    assert_eq!(first.volume.layout(), LutLayout::VOLUME);
    for y in 0..16 {
        assert_eq!(first.volume.row(y), authored.row(15 - y));
    }
    assert!(Arc::ptr_eq(&first.volume, &second.volume));
    assert!(cache.is_empty());
}

#[test]
fn volume_authored_texture_converts_for_passthrough_once() {
    let mut cache = LutCache::new();
    let authored = LutTable::generate(&warm(), LutLayout::VOLUME);
    let tex = TextureLut::new(authored.clone());
    let src = LutSource::Texture(tex.clone());

    let first = src.resolve(&mut cache);
    let second = src.resolve(&mut cache);

    assert_eq!(*first.passthrough, authored.to_layout(LutLayout::PASSTHROUGH));
    assert!(Arc::ptr_eq(&first.passthrough, &second.passthrough));
    assert!(Arc::ptr_eq(&first.volume, tex.table()));
}
