use std::{collections::HashMap, sync::Arc};

use crate::{
    grade::preset::{GradePreset, PresetHandle, PresetId},
    lut::fingerprint::{PresetFingerprint, fingerprint_preset},
    lut::table::{LutLayout, LutTable},
};

#[derive(Clone, Debug)]
struct CacheEntry {
    fingerprint: PresetFingerprint,
    table: Arc<LutTable>,
}

#[derive(Debug, Default)]
/// Generated strips keyed by preset identity and layout.
///
/// Each entry remembers the fingerprint of the preset content it was baked from; a lookup
/// with different content regenerates in place. There is no other eviction: the number of
/// live presets and layouts is small.
pub struct LutCache {
    entries: HashMap<(PresetId, LutLayout), CacheEntry>,
    generated: u64,
}

impl LutCache {
    /// Empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Strip for `handle` in `layout`, regenerating when the preset content changed.
    pub fn get_or_generate(&mut self, handle: &PresetHandle, layout: LutLayout) -> Arc<LutTable> {
        self.get_or_generate_for(handle.id(), handle.preset(), layout)
    }

    /// Strip for an explicit identity/content pair.
    pub fn get_or_generate_for(
        &mut self,
        id: PresetId,
        preset: &GradePreset,
        layout: LutLayout,
    ) -> Arc<LutTable> {
        let fingerprint = fingerprint_preset(preset);
        if let Some(entry) = self.entries.get(&(id, layout))
            && entry.fingerprint == fingerprint
        {
            return Arc::clone(&entry.table);
        }
        self.insert(id, preset, layout, fingerprint)
    }

    /// Regenerate unconditionally and replace any cached entry.
    #[tracing::instrument(skip(self, handle), fields(id = handle.id().as_u64()))]
    pub fn rebuild(&mut self, handle: &PresetHandle, layout: LutLayout) -> Arc<LutTable> {
        let fingerprint = fingerprint_preset(handle.preset());
        self.insert(handle.id(), handle.preset(), layout, fingerprint)
    }

    /// Drop every layout cached for `id`.
    pub fn invalidate(&mut self, id: PresetId) {
        self.entries.retain(|(entry_id, _), _| *entry_id != id);
    }

    /// Drop everything.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Number of cached strips.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total strips generated over the cache's lifetime.
    pub fn generated_count(&self) -> u64 {
        self.generated
    }

    fn insert(
        &mut self,
        id: PresetId,
        preset: &GradePreset,
        layout: LutLayout,
        fingerprint: PresetFingerprint,
    ) -> Arc<LutTable> {
        tracing::debug!(id = id.as_u64(), ?layout, "generating lut strip");
        let table = Arc::new(LutTable::generate(preset, layout));
        self.generated += 1;
        self.entries.insert(
            (id, layout),
            CacheEntry {
                fingerprint,
                table: Arc::clone(&table),
            },
        );
        table
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lut/cache.rs"]
mod tests;
