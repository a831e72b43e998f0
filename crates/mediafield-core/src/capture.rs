//! Capture controller: drag-and-drop and click-to-browse input.
//!
//! The controller owns the accept filter and the "drag active" flag.
//! It never reads file content; a successful capture yields an
//! [`AcceptedFile`] describing which file the preview pipeline should
//! read.
//!
//! Opening the platform picker goes through the [`FilePicker`]
//! capability so that every decorative click target (preview image,
//! "Change File" link, empty-state prompt) funnels into one explicit
//! `open()` instead of relying on the drop surface's native click.

use crate::types::{AcceptPolicy, CaptureError, MediaKind};

/// Capability to open the platform file picker.
///
/// Implemented by the browser glue (a hidden `<input type="file">`)
/// and by test doubles.
pub trait FilePicker {
    /// Ask the platform to show the picker.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::Picker`] if the picker cannot be shown.
    fn open(&self) -> Result<(), CaptureError>;
}

/// Name and reported MIME type of a file offered by a drop or pick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    /// File name including extension.
    pub name: String,
    /// MIME type reported by the platform; often empty for drags.
    pub mime: Option<String>,
}

impl FileMeta {
    /// Metadata with no reported MIME type.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            mime: None,
        }
    }

    /// Attach a reported MIME type.
    #[must_use]
    pub fn with_mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }
}

/// A file that passed the accept filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptedFile {
    /// File name including extension.
    pub name: String,
    /// Resolved MIME type (reported, or derived from the extension).
    pub mime: String,
}

/// Drag/drop and picker input for one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureController {
    kind: MediaKind,
    read_only: bool,
    drag_active: bool,
}

impl CaptureController {
    /// Create a controller for `kind`. Read-only controllers reject
    /// every capture.
    #[must_use]
    pub const fn new(kind: MediaKind, read_only: bool) -> Self {
        Self {
            kind,
            read_only,
            drag_active: false,
        }
    }

    /// The accept filter in force.
    #[must_use]
    pub const fn policy(&self) -> AcceptPolicy {
        self.kind.accept_policy()
    }

    /// Whether a drag is hovering over the drop surface.
    #[must_use]
    pub const fn is_drag_active(&self) -> bool {
        self.drag_active
    }

    /// A drag entered (or moved over) the drop surface.
    pub const fn drag_enter(&mut self) {
        if !self.read_only {
            self.drag_active = true;
        }
    }

    /// A drag left the drop surface.
    pub const fn drag_leave(&mut self) {
        self.drag_active = false;
    }

    /// Pick the file to capture from a drop or picker result.
    ///
    /// Only the first file is considered; any others are discarded.
    /// Ends any active drag.
    ///
    /// # Errors
    ///
    /// - [`CaptureError::ReadOnly`] on a view-only field.
    /// - [`CaptureError::NoFile`] if `files` is empty.
    /// - [`CaptureError::Unsupported`] if the first file fails the
    ///   accept filter.
    pub fn select<I>(&mut self, files: I) -> Result<AcceptedFile, CaptureError>
    where
        I: IntoIterator<Item = FileMeta>,
    {
        self.drag_active = false;
        if self.read_only {
            return Err(CaptureError::ReadOnly);
        }

        let mut files = files.into_iter();
        let first = files.next().ok_or(CaptureError::NoFile)?;
        let discarded = files.count();
        if discarded > 0 {
            tracing::debug!(discarded, "multiple files offered, using the first");
        }

        let policy = self.policy();
        if !policy.accepts(&first.name, first.mime.as_deref()) {
            tracing::info!(name = %first.name, mime = ?first.mime, kind = %self.kind, "rejected file outside accept policy");
            return Err(CaptureError::Unsupported { name: first.name });
        }

        let mime = first
            .mime
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_ascii_lowercase)
            .or_else(|| policy.mime_for_name(&first.name).map(str::to_owned))
            .unwrap_or_default();

        Ok(AcceptedFile {
            name: first.name,
            mime,
        })
    }

    /// Open the file picker through the explicit capability.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::ReadOnly`] on a view-only field, or the
    /// picker's own error.
    pub fn open(&self, picker: &dyn FilePicker) -> Result<(), CaptureError> {
        if self.read_only {
            return Err(CaptureError::ReadOnly);
        }
        picker.open()
    }
}
