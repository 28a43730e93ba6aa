use crate::{
    foundation::error::{LumaError, LumaResult},
    playback::backend::{BackendId, VideoBackend, try_play, try_seek},
    playback::request::{OFFSET_EPSILON_SECS, PlaybackRequest},
};

#[derive(Clone, Copy, Debug, PartialEq)]
/// What the host timeline should do after [`TimelineLink::tick`].
pub enum LinkTick {
    /// No clip requested yet.
    Idle,
    /// The backend cannot report time yet; evaluate the timeline at its current time.
    AwaitingVideoTime,
    /// The backend reported a negative or non-finite time; leave the timeline untouched.
    InvalidVideoTime,
    /// Video is not playing; pause the timeline.
    Paused,
    /// Video is playing; move the timeline to `timeline_secs` and evaluate.
    Playing {
        /// Video time minus the clip offset, never negative.
        timeline_secs: f64,
        /// Normalized progress, reported only while not seeking.
        progress: Option<f32>,
    },
}

#[derive(Debug)]
/// Video-as-clock link: the video backend's time drives the timeline.
///
/// Child timelines target a section of the master video with a start offset, so timeline time is
/// `video_time - offset`. The link is itself a [`VideoBackend`], so a [`crate::ClockDriver`] can be
/// bound to it directly.
pub struct TimelineLink<B> {
    id: BackendId,
    backend: B,
    clip: Option<PlaybackRequest>,
    issued: Option<(String, f64)>,
    pending_seek: Option<f64>,
}

impl<B: VideoBackend> TimelineLink<B> {
    /// Link owning `backend`.
    pub fn new(backend: B) -> Self {
        Self {
            id: BackendId::next(),
            backend,
            clip: None,
            issued: None,
            pending_seek: None,
        }
    }

    /// Wrapped backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Wrapped backend, mutably.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Unwrap the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    /// Clip most recently requested.
    pub fn active_clip(&self) -> Option<&PlaybackRequest> {
        self.clip.as_ref()
    }

    /// Offset seek still waiting for the backend to accept it.
    pub fn pending_seek(&self) -> Option<f64> {
        self.pending_seek
    }

    /// Make `request` the active clip and start it on the backend.
    ///
    /// Returns `false` for an empty URL or when the backend rejects playback. Re-requesting the
    /// clip that is already playing is accepted without touching the backend.
    pub fn request_clip(&mut self, request: &PlaybackRequest) -> bool {
        if request.url.is_empty() {
            tracing::warn!("cannot start playback: url is empty");
            return false;
        }

        let mut request = request.clone();
        request.start_offset_secs = request.start_offset_secs.max(0.0);

        if let Some(current) = &self.clip
            && current.url != request.url
        {
            tracing::warn!(
                from = %current.url,
                to = %request.url,
                "requested url changed; master and child timelines should share one video"
            );
        }

        let same_clip = self.clip.as_ref().is_some_and(|current| {
            current.matches(&request.url, request.start_offset_secs, OFFSET_EPSILON_SECS)
        });
        let already_issued = self.was_issued(&request);
        self.clip = Some(request.clone());

        if same_clip && already_issued {
            return true;
        }

        if !self.issue(&request) {
            tracing::warn!(url = %request.url, "failed to issue playback");
            return false;
        }
        true
    }

    /// Advance one host frame: retry pending work, then read the video clock.
    pub fn tick(&mut self) -> LinkTick {
        self.retry_playback();
        self.apply_pending_seek();

        let Some(clip) = &self.clip else {
            return LinkTick::Idle;
        };
        let offset = clip.start_offset_secs;

        let Some(video_secs) = self.backend.time_secs() else {
            return LinkTick::AwaitingVideoTime;
        };
        if !video_secs.is_finite() || video_secs < 0.0 {
            return LinkTick::InvalidVideoTime;
        }
        if !self.backend.is_playing() {
            return LinkTick::Paused;
        }

        let progress = if self.backend.is_seeking() {
            None
        } else {
            self.backend.normalized_progress()
        };
        LinkTick::Playing {
            timeline_secs: (video_secs - offset).max(0.0),
            progress,
        }
    }

    fn was_issued(&self, request: &PlaybackRequest) -> bool {
        self.issued.as_ref().is_some_and(|(url, offset)| {
            request.matches(url, *offset, OFFSET_EPSILON_SECS)
        })
    }

    fn issue(&mut self, request: &PlaybackRequest) -> bool {
        if !try_play(&mut self.backend, request) {
            return false;
        }
        self.issued = Some((request.url.clone(), request.start_offset_secs));
        self.pending_seek = Some(request.start_offset_secs);
        self.apply_pending_seek();
        true
    }

    fn retry_playback(&mut self) {
        let Some(clip) = self.clip.clone() else {
            return;
        };
        if !self.was_issued(&clip) {
            self.issue(&clip);
        }
    }

    fn apply_pending_seek(&mut self) {
        if let Some(target) = self.pending_seek
            && try_seek(&mut self.backend, target)
        {
            self.pending_seek = None;
        }
    }
}

impl<B: VideoBackend> VideoBackend for TimelineLink<B> {
    fn id(&self) -> BackendId {
        self.id
    }

    fn is_playing(&self) -> bool {
        self.backend.is_playing()
    }

    fn is_seeking(&self) -> bool {
        self.backend.is_seeking()
    }

    fn time_secs(&self) -> Option<f64> {
        self.backend.time_secs()
    }

    fn normalized_progress(&self) -> Option<f32> {
        self.backend.normalized_progress()
    }

    fn play(&mut self, request: &PlaybackRequest) -> LumaResult<()> {
        if self.request_clip(request) {
            Ok(())
        } else {
            Err(LumaError::backend(format!(
                "link could not start '{}'",
                request.url
            )))
        }
    }

    fn seek(&mut self, secs: f64) -> LumaResult<()> {
        self.backend.seek(secs)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/link.rs"]
mod tests;
