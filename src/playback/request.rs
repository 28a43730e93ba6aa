use crate::foundation::{
    error::{LumaError, LumaResult},
    math::approx_eq_f64,
};

/// Tolerance used when comparing clip offsets, in seconds.
pub const OFFSET_EPSILON_SECS: f64 = 1e-4;

#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
/// One logical clip to play on a video backend.
pub struct PlaybackRequest {
    /// Media URL or path, resolved with [`crate::resolve_video_url`].
    pub url: String,
    /// Optional clip duration metadata, in seconds.
    #[serde(default)]
    pub duration_secs: f32,
    /// Optional source frame rate metadata.
    #[serde(default)]
    pub fps: f32,
    /// Master-video time where this clip's local time zero lands.
    #[serde(default)]
    pub start_offset_secs: f64,
}

impl PlaybackRequest {
    /// Request for `url` starting at `start_offset_secs`, with no metadata.
    pub fn new(url: impl Into<String>, start_offset_secs: f64) -> Self {
        Self {
            url: url.into(),
            duration_secs: 0.0,
            fps: 0.0,
            start_offset_secs,
        }
    }

    /// Reject blank URLs and non-finite offsets.
    pub fn validate(&self) -> LumaResult<()> {
        if self.url.trim().is_empty() {
            return Err(LumaError::validation("playback url must be non-empty"));
        }
        if !self.start_offset_secs.is_finite() {
            return Err(LumaError::validation("start_offset_secs must be finite"));
        }
        Ok(())
    }

    /// Same URL (ordinal) and offsets equal within `eps`.
    pub fn matches(&self, url: &str, offset_secs: f64, eps: f64) -> bool {
        self.url == url && approx_eq_f64(self.start_offset_secs, offset_secs, eps)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/request.rs"]
mod tests;
