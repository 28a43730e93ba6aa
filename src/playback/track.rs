use crate::playback::{
    backend::VideoBackend,
    driver::{ClockDriver, DriveOutcome, DriverOpts},
    request::PlaybackRequest,
    texture_store::VideoTextureStore,
};

#[derive(Debug, Default)]
/// Per-track frame callback for a video clip track.
///
/// Drives the bound backend and publishes the effective video time into the
/// [`VideoTextureStore`] once frames are flowing.
pub struct VideoTrackMixer {
    driver: ClockDriver,
}

impl VideoTrackMixer {
    /// Mixer with default driver options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mixer whose driver uses `opts`.
    pub fn with_opts(opts: DriverOpts) -> Self {
        Self {
            driver: ClockDriver::with_opts(opts),
        }
    }

    /// Underlying clock driver.
    pub fn driver(&self) -> &ClockDriver {
        &self.driver
    }

    /// Evaluate one frame of the track.
    pub fn process_frame(
        &mut self,
        request: Option<&PlaybackRequest>,
        host_time_secs: f64,
        backend: Option<&mut dyn VideoBackend>,
        store: &mut VideoTextureStore,
    ) -> DriveOutcome {
        let outcome = self.driver.drive(request, host_time_secs, backend);
        if outcome.driving && store.plane(0).is_some() {
            store.set_video_time(outcome.effective_time_secs);
        }
        outcome
    }

    /// The owning graph stopped; drop the session so re-entry starts clean.
    pub fn graph_stopped(&mut self) {
        self.driver.reset();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/track.rs"]
mod tests;
