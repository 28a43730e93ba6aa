//! Lumasync bakes color-grade presets into LUT strips and keeps video backends in step with a
//! host timeline.
//!
//! The crate is organized around three per-frame pieces:
//!
//! - [`GradeEvaluator`] / [`LutTable`]: turn a [`GradePreset`] into a 256x16 RGBA8 strip, cached
//!   per preset and layout by [`LutCache`]
//! - [`ClockDriver`]: issue de-duplicated `play` requests to an injected [`VideoBackend`] and report
//!   the effective video time
//! - [`CrossfadeMixer`]: apply up to two weighted LUTs to passthrough and post-process outputs
//!
//! Everything runs synchronously on the host's frame callback; nothing here spawns threads.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod grade;
pub(crate) mod lut;
pub(crate) mod mixer;
pub(crate) mod playback;

pub use crate::foundation::core::{Rgb, Rgba};
pub use crate::foundation::error::{LumaError, LumaResult};

pub use crate::grade::evaluator::GradeEvaluator;
pub use crate::grade::matcher::{match_image, match_preset};
pub use crate::grade::preset::{GradePreset, PresetHandle, PresetId};

pub use crate::lut::blend::{blend_tables, crossfade};
pub use crate::lut::cache::LutCache;
pub use crate::lut::fingerprint::{PresetFingerprint, fingerprint_preset};
pub use crate::lut::source::{LutSource, ResolvedLuts, TextureLut};
pub use crate::lut::table::{LUT_HEIGHT, LUT_SIZE, LUT_WIDTH, LutEncoding, LutLayout, LutTable};

pub use crate::mixer::crossfade::{CrossfadeMixer, MixOutcome, MixerInput, MixerTargets};
pub use crate::mixer::sink::{CpuLutBlender, LutBlender, PassthroughSink, VolumeSink, VolumeState};

pub use crate::playback::backend::{BackendId, VideoBackend, try_play, try_seek};
pub use crate::playback::driver::{ClockDriver, DriveOutcome, DriverOpts, DriverState};
pub use crate::playback::events::{BackendEvent, EventReceiver, EventSender, event_channel};
pub use crate::playback::link::{LinkTick, TimelineLink};
pub use crate::playback::memory::InMemoryBackend;
pub use crate::playback::request::{OFFSET_EPSILON_SECS, PlaybackRequest};
pub use crate::playback::texture_store::{
    ColorSpace, MAX_PLANES, PixelFormat, StoreEvent, TextureHandle, VideoTextureStore,
};
pub use crate::playback::track::VideoTrackMixer;
pub use crate::playback::url::{UrlRoots, resolve_video_url};
