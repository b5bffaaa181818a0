//! Media references and kind inference

use serde::{Deserialize, Serialize};

/// Extensions played back as video; everything else is treated as an image
const VIDEO_EXTENSIONS: [&str; 2] = ["mp4", "webm"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MediaKind {
    #[default]
    Image,
    Video,
}

impl MediaKind {
    /// Infer from a filename or URL extension (case-insensitive)
    pub fn infer(source: &str) -> Self {
        // Ignore query/fragment on URLs
        let path = source.split(['?', '#']).next().unwrap_or(source);
        let file = path.rsplit('/').next().unwrap_or(path);
        match file.rsplit_once('.') {
            Some((_, ext)) if VIDEO_EXTENSIONS.iter().any(|v| v.eq_ignore_ascii_case(ext)) => {
                MediaKind::Video
            }
            _ => MediaKind::Image,
        }
    }
}

/// A photo or video to hang in the gallery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaItem {
    pub source: String,
    pub kind: MediaKind,
}

impl MediaItem {
    pub fn new(source: impl Into<String>) -> Self {
        let source = source.into();
        let kind = MediaKind::infer(&source);
        Self { source, kind }
    }

    /// Build items from a list of filenames, preserving order
    pub fn from_sources<I, S>(sources: I) -> Vec<MediaItem>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        sources.into_iter().map(MediaItem::new).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_inference() {
        assert_eq!(MediaKind::infer("gallery_memory_01.jpg"), MediaKind::Image);
        assert_eq!(MediaKind::infer("gallery_memory_34.mp4"), MediaKind::Video);
        assert_eq!(MediaKind::infer("clip.WEBM"), MediaKind::Video);
        assert_eq!(MediaKind::infer("https://cdn/x/clip.mp4?t=3"), MediaKind::Video);
    }

    #[test]
    fn test_unknown_extension_defaults_to_image() {
        assert_eq!(MediaKind::infer("notes.txt"), MediaKind::Image);
        assert_eq!(MediaKind::infer("no_extension"), MediaKind::Image);
        assert_eq!(MediaKind::infer(""), MediaKind::Image);
        assert_eq!(MediaKind::infer("dir.mp4/photo"), MediaKind::Image);
    }
}
