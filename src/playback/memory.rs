use crate::{
    foundation::error::{LumaError, LumaResult},
    playback::backend::{BackendId, VideoBackend},
    playback::events::{BackendEvent, EventSender},
    playback::request::PlaybackRequest,
};

#[derive(Debug)]
/// Simulated backend for tests, dry runs and the CLI `simulate` command.
///
/// Behaves like a URL-based decoder: a new URL must prepare (on the next [`advance`]) before it
/// reports time or accepts seeks, and playback starts automatically once prepared.
///
/// [`advance`]: InMemoryBackend::advance
pub struct InMemoryBackend {
    id: BackendId,
    url: Option<String>,
    prepared: bool,
    playing: bool,
    seeking: bool,
    time_secs: f64,
    duration_secs: f64,
    fps: f64,
    reject_play: bool,
    events: Option<EventSender>,
    /// Every accepted `play` request, in call order.
    pub play_calls: Vec<PlaybackRequest>,
    /// Every `seek` target, accepted or not, in call order.
    pub seek_calls: Vec<f64>,
}

impl Default for InMemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryBackend {
    /// Idle backend with a fresh id, 30 fps and unknown duration.
    pub fn new() -> Self {
        Self {
            id: BackendId::next(),
            url: None,
            prepared: false,
            playing: false,
            seeking: false,
            time_secs: 0.0,
            duration_secs: 0.0,
            fps: 30.0,
            reject_play: false,
            events: None,
            play_calls: Vec::new(),
            seek_calls: Vec::new(),
        }
    }

    /// Report progress against `secs` of media.
    pub fn with_duration(mut self, secs: f64) -> Self {
        self.duration_secs = secs;
        self
    }

    /// Publish [`BackendEvent`]s to `events`.
    pub fn with_events(mut self, events: EventSender) -> Self {
        self.events = Some(events);
        self
    }

    /// Make subsequent `play` calls fail.
    pub fn set_reject_play(&mut self, reject: bool) {
        self.reject_play = reject;
    }

    /// Simulate a buffering stall.
    pub fn set_seeking(&mut self, seeking: bool) {
        self.seeking = seeking;
    }

    /// Pause without dropping the prepared URL.
    pub fn pause(&mut self) {
        self.playing = false;
    }

    /// URL currently loaded.
    pub fn url(&self) -> Option<&str> {
        self.url.as_deref()
    }

    /// Whether the loaded URL finished preparing.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// Advance the decoder clock by `dt` seconds, finishing any pending prepare first.
    pub fn advance(&mut self, dt: f64) {
        if self.url.is_some() && !self.prepared {
            self.prepared = true;
            self.emit(BackendEvent::Prepared);
            return;
        }
        if self.prepared && self.playing && !self.seeking {
            self.time_secs += dt.max(0.0);
            if self.duration_secs > 0.0 {
                self.time_secs = self.time_secs.min(self.duration_secs);
            }
            let frame = (self.time_secs * self.fps).floor() as u64;
            self.emit(BackendEvent::FrameReady(frame));
        }
    }

    fn emit(&self, event: BackendEvent) {
        if let Some(tx) = &self.events {
            tx.emit(event);
        }
    }
}

impl VideoBackend for InMemoryBackend {
    fn id(&self) -> BackendId {
        self.id
    }

    fn is_playing(&self) -> bool {
        self.prepared && self.playing && !self.seeking
    }

    fn is_seeking(&self) -> bool {
        self.seeking
    }

    fn time_secs(&self) -> Option<f64> {
        self.prepared.then_some(self.time_secs)
    }

    fn normalized_progress(&self) -> Option<f32> {
        if !self.prepared || self.duration_secs <= 0.0001 {
            return None;
        }
        Some((self.time_secs / self.duration_secs).clamp(0.0, 1.0) as f32)
    }

    fn play(&mut self, request: &PlaybackRequest) -> LumaResult<()> {
        if self.reject_play {
            self.emit(BackendEvent::Error(format!("play rejected: {}", request.url)));
            return Err(LumaError::backend(format!(
                "play rejected for '{}'",
                request.url
            )));
        }
        request.validate()?;

        if self.url.as_deref() != Some(request.url.as_str()) {
            self.url = Some(request.url.clone());
            self.prepared = false;
            self.time_secs = 0.0;
        }
        if request.fps > 0.0 {
            self.fps = f64::from(request.fps);
        }
        if request.duration_secs > 0.0 && self.duration_secs <= 0.0 {
            self.duration_secs = f64::from(request.duration_secs);
        }
        self.playing = true;
        self.play_calls.push(request.clone());
        Ok(())
    }

    fn seek(&mut self, secs: f64) -> LumaResult<()> {
        self.seek_calls.push(secs);
        if !self.prepared {
            return Err(LumaError::backend("seek before prepare"));
        }
        self.time_secs = secs.max(0.0);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/memory.rs"]
mod tests;
