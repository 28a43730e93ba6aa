use std::sync::atomic::{AtomicU64, Ordering};

use crate::{foundation::error::LumaResult, playback::request::PlaybackRequest};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Identity of a bound video backend instance.
pub struct BackendId(u64);

static NEXT_BACKEND_ID: AtomicU64 = AtomicU64::new(1);

impl BackendId {
    /// Allocate a process-unique identifier.
    pub fn next() -> Self {
        Self(NEXT_BACKEND_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Construct from a caller-owned raw value.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

/// Timeline-facing contract of a video playback backend.
///
/// Time is in seconds in the master video's reference frame. Implementations must be cheap
/// enough to call every frame. Status queries never fail; they report best-effort `false` or
/// `None`. Commands report failure through [`LumaResult`] and callers retry later.
pub trait VideoBackend {
    /// Stable identity of this instance.
    fn id(&self) -> BackendId;

    /// Actively playing and not seeking.
    fn is_playing(&self) -> bool;

    /// Seeking or buffering; time and progress should not be trusted.
    fn is_seeking(&self) -> bool;

    /// Current playback time, when known.
    fn time_secs(&self) -> Option<f64>;

    /// Playback progress in `[0, 1]`, when known.
    fn normalized_progress(&self) -> Option<f32>;

    /// Start playback of `request`. May be a no-op when that request is already active.
    fn play(&mut self, request: &PlaybackRequest) -> LumaResult<()>;

    /// Seek to `secs`.
    fn seek(&mut self, secs: f64) -> LumaResult<()>;
}

/// Issue `play`, logging and flattening any failure to `false`.
pub fn try_play(backend: &mut dyn VideoBackend, request: &PlaybackRequest) -> bool {
    match backend.play(request) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                backend = backend.id().as_u64(),
                url = %request.url,
                error = %err,
                "play request failed"
            );
            false
        }
    }
}

/// Issue `seek`, logging and flattening any failure to `false`.
pub fn try_seek(backend: &mut dyn VideoBackend, secs: f64) -> bool {
    match backend.seek(secs) {
        Ok(()) => true,
        Err(err) => {
            tracing::debug!(
                backend = backend.id().as_u64(),
                secs,
                error = %err,
                "seek not applied"
            );
            false
        }
    }
}
