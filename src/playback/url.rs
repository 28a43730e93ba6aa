use std::path::{Path, PathBuf};

#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Base locations searched when a clip names a relative path.
pub struct UrlRoots {
    /// Bundled read-only content; may itself be a URL (e.g. `jar:` on Android).
    #[serde(default)]
    pub streaming: Option<String>,
    /// Writable per-install storage.
    #[serde(default)]
    pub persistent: Option<PathBuf>,
    /// Application data directory.
    #[serde(default)]
    pub data: Option<PathBuf>,
}

fn starts_with_ignore_case(value: &str, prefix: &str) -> bool {
    value
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn looks_like_url(value: &str) -> bool {
    starts_with_ignore_case(value, "file://")
        || starts_with_ignore_case(value, "jar:")
        || value.contains("://")
}

fn to_file_url(path: &str) -> String {
    let normalized = path.replace('\\', "/");
    if starts_with_ignore_case(&normalized, "file://") {
        return normalized;
    }
    format!("file://{normalized}")
}

fn is_rooted(path: &str) -> bool {
    // Windows drive paths count as rooted on every host.
    let bytes = path.as_bytes();
    let drive = bytes.len() >= 3
        && bytes[0].is_ascii_alphabetic()
        && bytes[1] == b':'
        && (bytes[2] == b'\\' || bytes[2] == b'/');
    Path::new(path).has_root() || drive || path.starts_with('\\')
}

fn resolve_relative(relative: &str, roots: &UrlRoots) -> Option<String> {
    if let Some(streaming) = roots.streaming.as_deref().filter(|s| !s.is_empty()) {
        if looks_like_url(streaming) {
            let rel = relative.replace('\\', "/");
            return Some(format!("{}/{}", streaming.trim_end_matches('/'), rel));
        }
        let candidate = Path::new(streaming).join(relative);
        if candidate.is_file() {
            return Some(to_file_url(&candidate.to_string_lossy()));
        }
    }

    for root in [roots.persistent.as_ref(), roots.data.as_ref()]
        .into_iter()
        .flatten()
    {
        let candidate = root.join(relative);
        if candidate.is_file() {
            return Some(to_file_url(&candidate.to_string_lossy()));
        }
    }

    None
}

/// Turn a clip's authored location into a playable URL.
///
/// Blank input yields `None`. URLs pass through trimmed, rooted paths become `file://` URLs,
/// relative paths are looked up under `roots` (streaming, then persistent, then data) and are
/// returned unchanged when no root contains them.
pub fn resolve_video_url(input: &str, roots: &UrlRoots) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }
    if looks_like_url(trimmed) {
        return Some(trimmed.to_string());
    }
    if is_rooted(trimmed) {
        return Some(to_file_url(trimmed));
    }
    Some(resolve_relative(trimmed, roots).unwrap_or_else(|| trimmed.to_string()))
}

#[cfg(test)]
#[path = "../../tests/unit/playback/url.rs"]
mod tests;
