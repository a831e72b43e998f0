//! Core data types for the media upload field.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

/// The kind of media a field accepts.
///
/// Fixed per field instance. Determines the [`AcceptPolicy`] and the
/// rendering surface (static image vs. video player).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    /// JPEG or PNG still image.
    #[default]
    Image,
    /// MP4 video.
    Video,
}

impl MediaKind {
    /// Lowercase noun used in prompts ("Drag and drop a video ...").
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Image => "image",
            Self::Video => "video",
        }
    }

    /// The accept filter for this kind.
    #[must_use]
    pub const fn accept_policy(self) -> AcceptPolicy {
        match self {
            Self::Image => AcceptPolicy::IMAGE,
            Self::Video => AcceptPolicy::VIDEO,
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Which MIME types and file extensions a capture may yield.
///
/// Exactly one policy exists per [`MediaKind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptPolicy {
    mimes: &'static [&'static str],
    extensions: &'static [&'static str],
}

impl AcceptPolicy {
    /// Policy for [`MediaKind::Image`].
    pub const IMAGE: Self = Self {
        mimes: &["image/jpeg", "image/png", "image/jpg"],
        extensions: &["jpg", "jpeg", "png"],
    };

    /// Policy for [`MediaKind::Video`].
    pub const VIDEO: Self = Self {
        mimes: &["video/mp4"],
        extensions: &["mp4"],
    };

    /// Accepted MIME types.
    #[must_use]
    pub const fn mimes(&self) -> &'static [&'static str] {
        self.mimes
    }

    /// Accepted file extensions, without the leading dot.
    #[must_use]
    pub const fn extensions(&self) -> &'static [&'static str] {
        self.extensions
    }

    /// Whether a file with this name and (optional) MIME type passes
    /// the filter.
    ///
    /// A reported MIME type is authoritative. Drag sources and some
    /// platforms report an empty type, in which case the extension of
    /// `name` decides.
    #[must_use]
    pub fn accepts(&self, name: &str, mime: Option<&str>) -> bool {
        match mime.map(str::trim).filter(|m| !m.is_empty()) {
            Some(mime) => self.mimes.iter().any(|m| m.eq_ignore_ascii_case(mime)),
            None => self.extension_of(name).is_some(),
        }
    }

    /// Canonical MIME type for a file name, derived from its extension.
    ///
    /// Returns `None` when the extension is outside this policy.
    #[must_use]
    pub fn mime_for_name(&self, name: &str) -> Option<&'static str> {
        let ext = self.extension_of(name)?;
        match ext {
            "png" => Some("image/png"),
            "jpg" | "jpeg" => Some("image/jpeg"),
            "mp4" => Some("video/mp4"),
            _ => None,
        }
    }

    /// Value for the `accept` attribute of an `<input type="file">`.
    #[must_use]
    pub fn input_accept(&self) -> String {
        let mimes = self.mimes.iter().map(|m| (*m).to_owned());
        let extensions = self.extensions.iter().map(|e| format!(".{e}"));
        mimes.chain(extensions).collect::<Vec<_>>().join(",")
    }

    /// Return the matching policy extension for `name`, if any.
    fn extension_of(&self, name: &str) -> Option<&'static str> {
        let (_, ext) = name.rsplit_once('.')?;
        self.extensions
            .iter()
            .copied()
            .find(|a| a.eq_ignore_ascii_case(ext))
    }
}

/// A file chosen through the field's own drop/pick interaction.
///
/// `bytes` is the exact payload handed to the host form. Cloning is
/// cheap; the payload is shared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    /// Original file name as reported by the browser.
    pub name: String,
    /// MIME type the file was accepted under.
    pub mime: String,
    /// Full binary content.
    pub bytes: Arc<[u8]>,
}

impl RawFile {
    /// Create a raw file from its name, MIME type, and content.
    #[must_use]
    pub fn new(name: impl Into<String>, mime: impl Into<String>, bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            name: name.into(),
            mime: mime.into(),
            bytes: bytes.into(),
        }
    }

    /// Size of the payload in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the payload is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// A self-contained display string for a file (a data URI or URL).
pub type PreviewSource = String;

/// The field's current value.
///
/// Exactly one shape is active at a time; there is no way to hold a
/// raw file without its preview, or a preview from two sources.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Selection {
    /// No value.
    #[default]
    Empty,
    /// A file chosen in this session plus its generated preview.
    Committed {
        /// The exact payload pushed to the host form.
        file: RawFile,
        /// Display-only data URI derived from `file`.
        preview: PreviewSource,
    },
    /// A pre-existing value supplied by the caller (view snapshot,
    /// edit value, or store fallback). No raw file is attached.
    External {
        /// URL or data URI of the existing media.
        preview: PreviewSource,
    },
}

impl Selection {
    /// The preview to render, if any.
    #[must_use]
    pub fn preview(&self) -> Option<&str> {
        match self {
            Self::Empty => None,
            Self::Committed { preview, .. } | Self::External { preview } => Some(preview),
        }
    }

    /// The raw file, present only for [`Selection::Committed`].
    #[must_use]
    pub const fn file(&self) -> Option<&RawFile> {
        match self {
            Self::Committed { file, .. } => Some(file),
            Self::Empty | Self::External { .. } => None,
        }
    }

    /// Whether no value is held.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        matches!(self, Self::Empty)
    }
}

/// Construction-time configuration for one field.
///
/// The shared application store is not consulted by the field; a caller
/// that wants a store-backed default passes it in as `fallback_value`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Key under which the field registers with the host form.
    pub name: String,
    /// Human-readable label.
    pub label: String,
    /// Image or video.
    #[serde(default)]
    pub media_kind: MediaKind,
    /// View-only field: no capture, no remove/replace, no required marker.
    #[serde(default)]
    pub read_only: bool,
    /// Existing value shown when the field is used for viewing.
    #[serde(default)]
    pub existing_view_value: Option<String>,
    /// Existing value being edited.
    #[serde(default)]
    pub existing_edit_value: Option<String>,
    /// Value supplied by the shared application store when neither of
    /// the above is present.
    #[serde(default)]
    pub fallback_value: Option<String>,
}

impl FieldConfig {
    /// Create an editable field configuration with no existing value.
    #[must_use]
    pub fn new(name: impl Into<String>, label: impl Into<String>, media_kind: MediaKind) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            media_kind,
            read_only: false,
            existing_view_value: None,
            existing_edit_value: None,
            fallback_value: None,
        }
    }

    /// Mark the field view-only.
    #[must_use]
    pub fn read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Set the view snapshot value.
    #[must_use]
    pub fn with_view_value(mut self, value: impl Into<String>) -> Self {
        self.existing_view_value = Some(value.into());
        self
    }

    /// Set the current edit value.
    #[must_use]
    pub fn with_edit_value(mut self, value: impl Into<String>) -> Self {
        self.existing_edit_value = Some(value.into());
        self
    }

    /// Set the store-supplied fallback value.
    #[must_use]
    pub fn with_fallback_value(mut self, value: impl Into<String>) -> Self {
        self.fallback_value = Some(value.into());
        self
    }

    /// The pre-existing value the field starts from.
    ///
    /// Precedence is view, then edit, then fallback. Empty strings are
    /// treated as absent.
    #[must_use]
    pub fn initial_preview(&self) -> Option<&str> {
        [
            &self.existing_view_value,
            &self.existing_edit_value,
            &self.fallback_value,
        ]
        .into_iter()
        .filter_map(Option::as_deref)
        .find(|v| !v.is_empty())
    }

    /// The selection the field starts in.
    #[must_use]
    pub fn initial_selection(&self) -> Selection {
        self.initial_preview()
            .map_or(Selection::Empty, |preview| Selection::External {
                preview: preview.to_owned(),
            })
    }
}

/// Errors from the capture controller.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CaptureError {
    /// Capture is disabled on a view-only field.
    #[error("field is read-only")]
    ReadOnly,

    /// The drop or pick carried no files.
    #[error("no file was provided")]
    NoFile,

    /// The file is outside the field's accept policy.
    #[error("unsupported file type: {name}")]
    Unsupported {
        /// Name of the rejected file.
        name: String,
    },

    /// The platform file picker could not be opened.
    #[error("file picker unavailable: {0}")]
    Picker(String),
}

/// Errors from the preview pipeline.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// Reading the file content failed.
    #[error("failed to read file: {0}")]
    Read(String),
}

/// Any locally contained failure the field reports to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FieldError {
    /// A capture was rejected.
    #[error(transparent)]
    Capture(#[from] CaptureError),

    /// Preview generation failed.
    #[error(transparent)]
    Preview(#[from] PreviewError),
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn image_policy_accepts_listed_mimes() {
        let policy = MediaKind::Image.accept_policy();
        for mime in ["image/jpeg", "image/png", "image/jpg", "IMAGE/PNG"] {
            assert!(policy.accepts("x", Some(mime)), "{mime} should be accepted");
        }
        assert!(!policy.accepts("x.png", Some("image/gif")));
        assert!(!policy.accepts("x.png", Some("video/mp4")));
    }

    #[test]
    fn video_policy_accepts_only_mp4() {
        let policy = MediaKind::Video.accept_policy();
        assert!(policy.accepts("clip.mp4", Some("video/mp4")));
        assert!(!policy.accepts("clip.webm", Some("video/webm")));
        assert!(!policy.accepts("photo.png", Some("image/png")));
    }

    #[test]
    fn empty_mime_falls_back_to_extension() {
        let policy = AcceptPolicy::IMAGE;
        assert!(policy.accepts("photo.PNG", None));
        assert!(policy.accepts("photo.jpeg", Some("")));
        assert!(!policy.accepts("photo.gif", None));
        assert!(!policy.accepts("no_extension", None));
    }

    #[test]
    fn mime_for_name_is_canonical() {
        assert_eq!(AcceptPolicy::IMAGE.mime_for_name("a.JPG"), Some("image/jpeg"));
        assert_eq!(AcceptPolicy::IMAGE.mime_for_name("a.png"), Some("image/png"));
        assert_eq!(AcceptPolicy::IMAGE.mime_for_name("a.mp4"), None);
        assert_eq!(AcceptPolicy::VIDEO.mime_for_name("a.mp4"), Some("video/mp4"));
    }

    #[test]
    fn input_accept_lists_mimes_then_extensions() {
        assert_eq!(AcceptPolicy::VIDEO.input_accept(), "video/mp4,.mp4");
        let image = AcceptPolicy::IMAGE.input_accept();
        assert!(image.contains("image/png"));
        assert!(image.contains(".jpeg"));
    }

    #[test]
    fn initial_preview_prefers_view_then_edit_then_fallback() {
        let base = FieldConfig::new("thumbnail", "Thumbnail", MediaKind::Image);
        assert_eq!(base.initial_preview(), None);

        let fallback = base.clone().with_fallback_value("https://x/store.png");
        assert_eq!(fallback.initial_preview(), Some("https://x/store.png"));

        let edit = fallback.clone().with_edit_value("https://x/edit.png");
        assert_eq!(edit.initial_preview(), Some("https://x/edit.png"));

        let view = edit.with_view_value("https://x/view.png");
        assert_eq!(view.initial_preview(), Some("https://x/view.png"));
    }

    #[test]
    fn empty_existing_values_are_ignored() {
        let config = FieldConfig::new("video", "Video", MediaKind::Video)
            .with_view_value("")
            .with_edit_value("https://x/video.mp4");
        assert_eq!(
            config.initial_selection(),
            Selection::External {
                preview: "https://x/video.mp4".into()
            }
        );
    }

    #[test]
    fn field_config_deserializes_with_defaults() {
        let json = r#"{ "name": "courseVideo", "label": "Course Video", "media_kind": "video" }"#;
        let config: FieldConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.media_kind, MediaKind::Video);
        assert!(!config.read_only);
        assert_eq!(config.initial_selection(), Selection::Empty);
    }

    #[test]
    fn selection_accessors() {
        let file = RawFile::new("a.png", "image/png", vec![1, 2, 3]);
        let committed = Selection::Committed {
            file: file.clone(),
            preview: "data:image/png;base64,AQID".into(),
        };
        assert_eq!(committed.file(), Some(&file));
        assert_eq!(committed.preview(), Some("data:image/png;base64,AQID"));
        assert!(Selection::Empty.preview().is_none());
        assert!(Selection::External { preview: "u".into() }.file().is_none());
    }
}
