use std::{cell::OnceCell, sync::Arc};

use crate::{
    grade::preset::PresetHandle,
    lut::cache::LutCache,
    lut::table::{LutLayout, LutTable},
};

#[derive(Clone, Debug)]
/// A prebuilt strip texture with its lazily converted target variants.
pub struct TextureLut {
    table: Arc<LutTable>,
    passthrough: OnceCell<Arc<LutTable>>,
    volume: OnceCell<Arc<LutTable>>,
}

impl TextureLut {
    /// Wrap a strip loaded from disk or handed over by the host.
    pub fn new(table: LutTable) -> Self {
        Self {
            table: Arc::new(table),
            passthrough: OnceCell::new(),
            volume: OnceCell::new(),
        }
    }

    /// The strip as authored.
    pub fn table(&self) -> &Arc<LutTable> {
        &self.table
    }

    fn passthrough(&self) -> Arc<LutTable> {
        Arc::clone(self.passthrough.get_or_init(|| self.converted(LutLayout::PASSTHROUGH)))
    }

    fn volume(&self) -> Arc<LutTable> {
        Arc::clone(self.volume.get_or_init(|| self.converted(LutLayout::VOLUME)))
    }

    fn converted(&self, layout: LutLayout) -> Arc<LutTable> {
        if self.table.layout() == layout {
            Arc::clone(&self.table)
        } else {
            Arc::new(self.table.to_layout(layout))
        }
    }
}

#[derive(Clone, Debug)]
/// Where a timeline clip's grade comes from.
pub enum LutSource {
    /// A prebuilt strip.
    Texture(TextureLut),
    /// A preset baked on demand through a [`LutCache`].
    Preset(PresetHandle),
}

#[derive(Clone, Debug)]
/// The two strips a clip feeds to the mixer targets.
pub struct ResolvedLuts {
    /// Strip in [`LutLayout::PASSTHROUGH`].
    pub passthrough: Arc<LutTable>,
    /// Strip in [`LutLayout::VOLUME`].
    pub volume: Arc<LutTable>,
}

impl LutSource {
    /// Strips for both targets, generating or converting as needed.
    pub fn resolve(&self, cache: &mut LutCache) -> ResolvedLuts {
        match self {
            LutSource::Texture(tex) => ResolvedLuts {
                passthrough: tex.passthrough(),
                volume: tex.volume(),
            },
            LutSource::Preset(handle) => ResolvedLuts {
                passthrough: cache.get_or_generate(handle, LutLayout::PASSTHROUGH),
                volume: cache.get_or_generate(handle, LutLayout::VOLUME),
            },
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/lut/source.rs"]
mod tests;
