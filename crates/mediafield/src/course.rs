//! Course snapshot (the shared application store) and per-mode field
//! configurations for the demo form.

use std::fmt;

use mediafield_core::{FieldConfig, FormStore, MediaKind};
use serde::{Deserialize, Serialize};

/// Form key for the thumbnail field.
pub const THUMBNAIL_FIELD: &str = "courseImage";

/// Form key for the promo video field.
pub const VIDEO_FIELD: &str = "courseVideo";

/// The course as currently stored, used to seed edit and view modes.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CourseSnapshot {
    /// Course title.
    pub name: String,
    /// Current thumbnail URL.
    #[serde(default)]
    pub thumbnail: Option<String>,
    /// Current promo video URL.
    #[serde(default)]
    pub video: Option<String>,
}

impl CourseSnapshot {
    /// Parse the snapshot from JSON.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error if the JSON is malformed.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

/// How the form is being used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormMode {
    /// Creating a new course; fields start empty.
    Add,
    /// Editing; fields start from the stored course.
    Edit,
    /// Viewing; fields are read-only.
    View,
}

impl FormMode {
    /// All modes, in toolbar order.
    pub const ALL: [Self; 3] = [Self::Add, Self::Edit, Self::View];

    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add",
            Self::Edit => "Edit",
            Self::View => "View",
        }
    }
}

impl fmt::Display for FormMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Configurations for the thumbnail and video fields in `mode`.
///
/// The stored course is injected as the fallback value in edit mode
/// and as the view value in view mode; the fields never read the
/// store themselves.
#[must_use]
pub fn field_configs(mode: FormMode, course: &CourseSnapshot) -> [FieldConfig; 2] {
    let mut thumbnail = FieldConfig::new(THUMBNAIL_FIELD, "Course Thumbnail", MediaKind::Image);
    let mut video = FieldConfig::new(VIDEO_FIELD, "Course Video", MediaKind::Video);

    match mode {
        FormMode::Add => {}
        FormMode::Edit => {
            thumbnail.fallback_value.clone_from(&course.thumbnail);
            video.fallback_value.clone_from(&course.video);
        }
        FormMode::View => {
            thumbnail = thumbnail.read_only(true);
            video = video.read_only(true);
            thumbnail.existing_view_value.clone_from(&course.thumbnail);
            video.existing_view_value.clone_from(&course.video);
        }
    }

    [thumbnail, video]
}

/// One-line summary of the files a valid form would submit.
#[must_use]
pub fn summarize(form: &FormStore) -> String {
    let files: Vec<String> = form
        .files()
        .map(|(field, file)| format!("{field}: {} ({} bytes)", file.name, file.len()))
        .collect();
    if files.is_empty() {
        "No new files selected".to_owned()
    } else {
        format!("Saved {}", files.join(", "))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use mediafield_core::{FormValue, HostForm, RawFile, Selection};

    use super::*;

    fn course() -> CourseSnapshot {
        CourseSnapshot {
            name: "Course".into(),
            thumbnail: Some("https://x/thumb.png".into()),
            video: Some("https://x/video.mp4".into()),
        }
    }

    #[test]
    fn bundled_snapshot_parses() {
        let snapshot = CourseSnapshot::from_json(include_str!("../assets/course.json")).unwrap();
        assert!(snapshot.thumbnail.is_some());
        assert!(snapshot.video.is_some());
    }

    #[test]
    fn add_mode_starts_empty_and_editable() {
        for config in field_configs(FormMode::Add, &course()) {
            assert_eq!(config.initial_selection(), Selection::Empty);
            assert!(!config.read_only);
        }
    }

    #[test]
    fn edit_mode_injects_store_values_as_fallback() {
        let [thumb, video] = field_configs(FormMode::Edit, &course());
        assert_eq!(thumb.fallback_value.as_deref(), Some("https://x/thumb.png"));
        assert_eq!(video.initial_preview(), Some("https://x/video.mp4"));
        assert!(!thumb.read_only);
    }

    #[test]
    fn view_mode_is_read_only() {
        let [thumb, video] = field_configs(FormMode::View, &course());
        assert!(thumb.read_only && video.read_only);
        assert_eq!(video.existing_view_value.as_deref(), Some("https://x/video.mp4"));
    }

    #[test]
    fn missing_store_values_leave_fields_empty() {
        let [thumb, _] = field_configs(FormMode::Edit, &CourseSnapshot::default());
        assert_eq!(thumb.initial_selection(), Selection::Empty);
    }

    #[test]
    fn summary_lists_files() {
        let mut form = FormStore::new();
        assert_eq!(summarize(&form), "No new files selected");
        form.set_value(
            THUMBNAIL_FIELD,
            FormValue::File(RawFile::new("a.png", "image/png", vec![0u8; 3])),
        );
        assert_eq!(summarize(&form), "Saved courseImage: a.png (3 bytes)");
    }

    #[test]
    fn summary_skips_existing_values() {
        let mut form = FormStore::new();
        form.set_value(VIDEO_FIELD, FormValue::Existing("https://x/video.mp4".into()));
        assert_eq!(summarize(&form), "No new files selected");
    }
}
