use super::*;

#[test]
fn repeated_lookups_reuse_the_strip() {
    let mut cache = LutCache::new();
    let h = PresetHandle::new(GradePreset::default());
    let a = cache.get_or_generate(&h, LutLayout::PASSTHROUGH);
    let b = cache.get_or_generate(&h, LutLayout::PASSTHROUGH);
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(cache.generated_count(), 1);
}

#[test]
fn layouts_are_cached_separately() {
    let mut cache = LutCache::new();
    let h = PresetHandle::new(GradePreset::default());
    let pt = cache.get_or_generate(&h, LutLayout::PASSTHROUGH);
    let vol = cache.get_or_generate(&h, LutLayout::VOLUME);
    assert_eq!(cache.len(), 2);
    assert_ne!(pt.as_bytes(), vol.as_bytes());
}

#[test]
fn content_change_invalidates() {
    let mut cache = LutCache::new();
    let mut h = PresetHandle::new(GradePreset::default());
    let before = cache.get_or_generate(&h, LutLayout::VOLUME);
    h.update(GradePreset {
        contrast: 2.0,
        ..GradePreset::default()
    });
    let after = cache.get_or_generate(&h, LutLayout::VOLUME);
    assert!(!Arc::ptr_eq(&before, &after));
    assert_ne!(before.as_bytes(), after.as_bytes());
    assert_eq!(cache.len(), 1);
    assert_eq!(cache.generated_count(), 2);
}

#[test]
fn distinct_identities_do_not_share_entries() {
    let mut cache = LutCache::new();
    let a = PresetHandle::new(GradePreset::default());
    let b = PresetHandle::new(GradePreset::default());
    cache.get_or_generate(&a, LutLayout::VOLUME);
    cache.get_or_generate(&b, LutLayout::VOLUME);
    assert_eq!(cache.len(), 2);
}

#[test]
fn rebuild_forces_regeneration() {
    let mut cache = LutCache::new();
    let h = PresetHandle::new(GradePreset::default());
    let a = cache.get_or_generate(&h, LutLayout::VOLUME);
    let b = cache.rebuild(&h, LutLayout::VOLUME);
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(a.as_bytes(), b.as_bytes());
    assert_eq!(cache.generated_count(), 2);
}

#[test]
fn invalidate_drops_all_layouts_for_identity() {
    let mut cache = LutCache::new();
    let a = PresetHandle::new(GradePreset::default());
    let b = PresetHandle::new(GradePreset::default());
    cache.get_or_generate(&a, LutLayout::VOLUME);
    cache.get_or_generate(&a, LutLayout::PASSTHROUGH);
    cache.get_or_generate(&b, LutLayout::VOLUME);
    cache.invalidate(a.id());
    assert_eq!(cache.len(), 1);
    cache.clear();
    assert!(cache.is_empty());
}
