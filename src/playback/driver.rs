use crate::playback::{
    backend::{BackendId, VideoBackend, try_play},
    request::{OFFSET_EPSILON_SECS, PlaybackRequest},
    url::{UrlRoots, resolve_video_url},
};

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// Tuning for [`ClockDriver`].
pub struct DriverOpts {
    /// Offsets closer than this are considered the same request.
    pub offset_epsilon_secs: f64,
    /// Roots used to resolve relative clip paths.
    #[serde(default)]
    pub roots: UrlRoots,
}

impl Default for DriverOpts {
    fn default() -> Self {
        Self {
            offset_epsilon_secs: OFFSET_EPSILON_SECS,
            roots: UrlRoots::default(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
/// Session state of a [`ClockDriver`].
pub enum DriverState {
    /// Nothing issued on the bound backend.
    #[default]
    Idle,
    /// `play` was accepted for this resolved URL and offset.
    Requested {
        /// Resolved URL that was issued.
        url: String,
        /// Clip offset that was issued.
        offset_secs: f64,
    },
}

#[derive(Clone, Copy, Debug, PartialEq)]
/// Result of one [`ClockDriver::drive`] call.
pub struct DriveOutcome {
    /// A backend is bound and received (or already had) the request.
    pub driving: bool,
    /// `start_offset_secs + host_time_secs`, or `0` when there is no playable request.
    pub effective_time_secs: f64,
    /// A `play` command was sent during this call.
    pub issued_play: bool,
}

impl DriveOutcome {
    const NOT_DRIVING: Self = Self {
        driving: false,
        effective_time_secs: 0.0,
        issued_play: false,
    };
}

#[derive(Debug, Default)]
/// Keeps one video backend playing the clip a timeline currently wants.
///
/// Call [`drive`](Self::drive) once per evaluated frame. Requests are de-duplicated so an
/// unchanged clip issues exactly one `play`; a rejected `play` leaves the driver idle so the
/// next frame retries. Call [`reset`](Self::reset) when the owning graph stops.
pub struct ClockDriver {
    opts: DriverOpts,
    state: DriverState,
    bound: Option<BackendId>,
}

impl ClockDriver {
    /// Driver with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Driver with explicit options.
    pub fn with_opts(opts: DriverOpts) -> Self {
        Self {
            opts,
            state: DriverState::Idle,
            bound: None,
        }
    }

    /// Current session state.
    pub fn state(&self) -> &DriverState {
        &self.state
    }

    /// Identity of the backend the session belongs to.
    pub fn bound_backend(&self) -> Option<BackendId> {
        self.bound
    }

    /// Forget the issued request and the backend binding.
    pub fn reset(&mut self) {
        self.state = DriverState::Idle;
        self.bound = None;
    }

    /// Evaluate one frame.
    ///
    /// `host_time_secs` is the clip-local time from the host timeline. The effective time is
    /// reported as soon as the request resolves, whether or not a backend is bound or has
    /// confirmed playback.
    pub fn drive(
        &mut self,
        request: Option<&PlaybackRequest>,
        host_time_secs: f64,
        backend: Option<&mut dyn VideoBackend>,
    ) -> DriveOutcome {
        let Some(request) = request else {
            return DriveOutcome::NOT_DRIVING;
        };
        let Some(url) = resolve_video_url(&request.url, &self.opts.roots) else {
            return DriveOutcome::NOT_DRIVING;
        };

        let mut outcome = DriveOutcome {
            driving: false,
            effective_time_secs: request.start_offset_secs + host_time_secs,
            issued_play: false,
        };
        let Some(backend) = backend else {
            return outcome;
        };
        outcome.driving = true;

        let id = backend.id();
        if self.bound != Some(id) {
            if let Some(previous) = self.bound {
                tracing::debug!(
                    from = previous.as_u64(),
                    to = id.as_u64(),
                    "backend changed, resetting session"
                );
            }
            self.bound = Some(id);
            self.state = DriverState::Idle;
        }

        let resolved = PlaybackRequest {
            url,
            ..request.clone()
        };
        if let DriverState::Requested { url: issued, offset_secs } = &self.state
            && resolved.matches(issued, *offset_secs, self.opts.offset_epsilon_secs)
        {
            return outcome;
        }

        outcome.issued_play = true;
        self.state = if try_play(backend, &resolved) {
            tracing::debug!(
                backend = id.as_u64(),
                url = %resolved.url,
                offset = resolved.start_offset_secs,
                "play issued"
            );
            DriverState::Requested {
                url: resolved.url,
                offset_secs: resolved.start_offset_secs,
            }
        } else {
            DriverState::Idle
        };
        outcome
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/driver.rs"]
mod tests;
