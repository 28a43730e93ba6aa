use std::sync::mpsc;

/// Number of plane slots consumers can sample.
pub const MAX_PLANES: usize = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
/// Host-owned handle to a GPU or CPU texture written by a video backend.
pub struct TextureHandle(u64);

impl TextureHandle {
    /// Wrap a host texture id.
    pub fn from_u64(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw host texture id.
    pub fn as_u64(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// Layout of the planes in [`VideoTextureStore::textures`].
pub enum PixelFormat {
    /// One interleaved RGBA plane.
    Rgba,
    /// Luma plane plus interleaved chroma plane.
    Nv12,
    /// Luma plane plus two chroma planes.
    #[default]
    Yuv420p,
}

impl PixelFormat {
    /// Planes a complete frame occupies.
    pub fn plane_count(self) -> usize {
        match self {
            Self::Rgba => 1,
            Self::Nv12 => 2,
            Self::Yuv420p => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
/// YUV matrix the decoded planes use.
pub enum ColorSpace {
    /// ITU-R BT.709.
    #[default]
    Bt709,
    /// ITU-R BT.601.
    Bt601,
    /// ITU-R BT.2020.
    Bt2020,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
/// Notification sent to [`VideoTextureStore::subscribe`] receivers.
pub enum StoreEvent {
    /// The texture set was replaced.
    TexturesChanged,
}

#[derive(Debug, Default)]
/// Explicitly owned registry of the current video frame textures.
///
/// Written by the active video backend, read by shading consumers. Created once per player and
/// passed to whoever needs it.
pub struct VideoTextureStore {
    textures: Vec<TextureHandle>,
    pixel_format: PixelFormat,
    color_space: ColorSpace,
    video_time_secs: f32,
    subscribers: Vec<mpsc::Sender<StoreEvent>>,
}

impl VideoTextureStore {
    /// Empty store: no textures, `Yuv420p`, `Bt709`, time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current texture set, in plane order.
    pub fn textures(&self) -> &[TextureHandle] {
        &self.textures
    }

    /// Texture bound to plane slot `index`, if any.
    pub fn plane(&self, index: usize) -> Option<TextureHandle> {
        if index >= MAX_PLANES {
            return None;
        }
        self.textures.get(index).copied()
    }

    /// Replace the texture set, reset video time and notify subscribers.
    pub fn set_textures(&mut self, textures: Vec<TextureHandle>) {
        if textures.len() > MAX_PLANES {
            tracing::debug!(
                count = textures.len(),
                "texture set exceeds plane slots; extra planes are not sampled"
            );
        }
        self.textures = textures;
        self.video_time_secs = 0.0;
        self.notify(StoreEvent::TexturesChanged);
    }

    /// Drop all textures.
    pub fn clear(&mut self) {
        self.set_textures(Vec::new());
    }

    /// Plane layout.
    pub fn pixel_format(&self) -> PixelFormat {
        self.pixel_format
    }

    /// Set the plane layout.
    pub fn set_pixel_format(&mut self, format: PixelFormat) {
        self.pixel_format = format;
    }

    /// YUV matrix.
    pub fn color_space(&self) -> ColorSpace {
        self.color_space
    }

    /// Set the YUV matrix.
    pub fn set_color_space(&mut self, color_space: ColorSpace) {
        self.color_space = color_space;
    }

    /// Video time published for consumers, in seconds.
    pub fn video_time_secs(&self) -> f32 {
        self.video_time_secs
    }

    /// Publish the video time consumers should sample at.
    pub fn set_video_time(&mut self, secs: f64) {
        self.video_time_secs = secs as f32;
    }

    /// Receive a [`StoreEvent`] after every change of the texture set.
    pub fn subscribe(&mut self) -> mpsc::Receiver<StoreEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribers.push(tx);
        rx
    }

    fn notify(&mut self, event: StoreEvent) {
        self.subscribers.retain(|tx| tx.send(event).is_ok());
    }
}

#[cfg(test)]
#[path = "../../tests/unit/playback/texture_store.rs"]
mod tests;
