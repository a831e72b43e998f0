//! Field state and form bridge.
//!
//! [`FieldState`] owns the single [`Selection`] of one upload field and
//! is the only thing that mutates it. Transitions:
//!
//! ```text
//! Empty     --capture--> Committed
//! External  --capture--> Committed
//! Committed --capture--> Committed
//! Committed --remove---> Empty
//! External  --remove---> Empty      (editable fields only)
//! ```
//!
//! A capture is split in two so the file read can run in the
//! background: [`FieldState::begin_capture`] tags the request with the
//! current generation, and [`FieldState::complete_capture`] commits it
//! only if nothing newer (another capture or a remove) happened in
//! between. A slow read can therefore never overwrite a newer
//! selection.

use std::sync::Arc;

use crate::capture::{AcceptedFile, CaptureController, FileMeta, FilePicker};
use crate::form::{FieldRules, FormValue, HostForm};
use crate::preview::generate_preview;
use crate::types::{CaptureError, FieldConfig, FieldError, MediaKind, PreviewError, RawFile, Selection};

/// A capture that passed the accept filter and awaits its file read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingCapture {
    generation: u64,
    file: AcceptedFile,
}

impl PendingCapture {
    /// Name of the file being read.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.file.name
    }

    /// MIME type the file was accepted under.
    #[must_use]
    pub fn mime(&self) -> &str {
        &self.file.mime
    }

    /// Selection version this capture was started against.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }
}

/// What [`FieldState::complete_capture`] did with a finished read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// The selection is now committed to the new file.
    Committed,
    /// A newer capture or a remove superseded this one; discarded.
    Stale,
    /// The read failed; the selection is unchanged.
    Failed,
}

/// State of one media upload field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldState {
    config: FieldConfig,
    capture: CaptureController,
    selection: Selection,
    generation: u64,
    mounted: bool,
    notice: Option<FieldError>,
}

impl FieldState {
    /// Create the field from its configuration.
    ///
    /// Starts in [`Selection::External`] when the configuration carries
    /// an existing value, otherwise [`Selection::Empty`].
    #[must_use]
    pub fn new(config: FieldConfig) -> Self {
        let capture = CaptureController::new(config.media_kind, config.read_only);
        let selection = config.initial_selection();
        Self {
            config,
            capture,
            selection,
            generation: 0,
            mounted: false,
            notice: None,
        }
    }

    /// The configuration the field was built from.
    #[must_use]
    pub const fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Field name used as the host form key.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Image or video.
    #[must_use]
    pub const fn kind(&self) -> MediaKind {
        self.config.media_kind
    }

    /// Whether the field is view-only.
    #[must_use]
    pub const fn is_read_only(&self) -> bool {
        self.config.read_only
    }

    /// The current selection.
    #[must_use]
    pub const fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Current selection version. Bumped by every capture and remove.
    #[must_use]
    pub const fn generation(&self) -> u64 {
        self.generation
    }

    /// The capture controller (accept policy, drag flag).
    #[must_use]
    pub const fn capture(&self) -> &CaptureController {
        &self.capture
    }

    /// Last rejected capture or failed read, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&FieldError> {
        self.notice.as_ref()
    }

    /// Register with the host form. Only the first call has an effect.
    ///
    /// A field that starts from an existing value also seeds the form
    /// with it, so a required field that was never touched still
    /// validates.
    pub fn mount(&mut self, form: &mut impl HostForm) {
        if self.mounted {
            return;
        }
        let rules = FieldRules {
            required: !self.config.read_only,
        };
        form.register(&self.config.name, rules);
        if let Selection::External { preview } = &self.selection {
            form.set_value(&self.config.name, FormValue::Existing(preview.clone()));
        }
        self.mounted = true;
        tracing::debug!(field = %self.config.name, required = rules.required, "registered field");
    }

    /// A drag entered the drop surface.
    pub const fn drag_enter(&mut self) {
        self.capture.drag_enter();
    }

    /// A drag left the drop surface.
    pub const fn drag_leave(&mut self) {
        self.capture.drag_leave();
    }

    /// Whether a drag is hovering over the drop surface.
    #[must_use]
    pub const fn is_drag_active(&self) -> bool {
        self.capture.is_drag_active()
    }

    /// Whether the drop surface takes drops at all.
    #[must_use]
    pub const fn accepts_drops(&self) -> bool {
        !self.config.read_only
    }

    /// Open the file picker through the explicit capability.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::ReadOnly`] on a view-only field, or the
    /// picker's error (also recorded as the field notice).
    pub fn open(&mut self, picker: &dyn FilePicker) -> Result<(), CaptureError> {
        let result = self.capture.open(picker);
        if let Err(ref e @ CaptureError::Picker(_)) = result {
            tracing::warn!(field = %self.config.name, error = %e, "could not open file picker");
            self.notice = Some(e.clone().into());
        }
        result
    }

    /// Start capturing the first of `files`.
    ///
    /// Returns the pending capture to read in the background, or `None`
    /// if nothing was accepted. Rejections leave the selection as it
    /// was; an unsupported type is recorded as the field notice.
    pub fn begin_capture<I>(&mut self, files: I) -> Option<PendingCapture>
    where
        I: IntoIterator<Item = FileMeta>,
    {
        match self.capture.select(files) {
            Ok(file) => {
                self.generation += 1;
                self.notice = None;
                tracing::debug!(
                    field = %self.config.name,
                    name = %file.name,
                    generation = self.generation,
                    "capture started"
                );
                Some(PendingCapture {
                    generation: self.generation,
                    file,
                })
            }
            Err(e @ CaptureError::Unsupported { .. }) => {
                self.notice = Some(e.into());
                None
            }
            Err(e) => {
                tracing::debug!(field = %self.config.name, error = %e, "capture ignored");
                None
            }
        }
    }

    /// Finish a capture with the result of reading its content.
    ///
    /// On success the selection becomes [`Selection::Committed`], the
    /// previous preview is dropped, and the raw file is pushed to the
    /// host form. Results for a superseded generation are discarded.
    pub fn complete_capture<B>(
        &mut self,
        pending: PendingCapture,
        read: Result<B, PreviewError>,
        form: &mut impl HostForm,
    ) -> CaptureOutcome
    where
        B: Into<Arc<[u8]>>,
    {
        if pending.generation != self.generation {
            tracing::debug!(
                field = %self.config.name,
                stale = pending.generation,
                current = self.generation,
                "discarding superseded capture"
            );
            return CaptureOutcome::Stale;
        }

        let bytes = match read {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(field = %self.config.name, error = %e, "preview generation failed");
                self.notice = Some(e.into());
                return CaptureOutcome::Failed;
            }
        };

        let file = RawFile::new(pending.file.name, pending.file.mime, bytes);
        let preview = generate_preview(&file);
        form.set_value(&self.config.name, FormValue::File(file.clone()));
        tracing::info!(field = %self.config.name, name = %file.name, bytes = file.len(), "committed selection");
        self.selection = Selection::Committed { file, preview };
        self.notice = None;
        CaptureOutcome::Committed
    }

    /// Clear the selection and push an explicit empty value to the form.
    ///
    /// Any capture still reading becomes stale.
    ///
    /// # Errors
    ///
    /// Returns [`CaptureError::ReadOnly`] on a view-only field; the
    /// selection is left untouched.
    pub fn remove(&mut self, form: &mut impl HostForm) -> Result<(), CaptureError> {
        if self.config.read_only {
            return Err(CaptureError::ReadOnly);
        }
        self.generation += 1;
        self.selection = Selection::Empty;
        self.notice = None;
        form.set_value(&self.config.name, FormValue::Cleared);
        tracing::info!(field = %self.config.name, "removed selection");
        Ok(())
    }

    /// Whether Remove and Change File are offered.
    #[must_use]
    pub fn show_actions(&self) -> bool {
        !self.config.read_only && !self.selection.is_empty()
    }

    /// Whether the label carries a required marker.
    #[must_use]
    pub const fn show_required_marker(&self) -> bool {
        !self.config.read_only
    }

    /// Static message shown when the host form flags this field.
    #[must_use]
    pub fn error_message(&self, form: &impl HostForm) -> Option<String> {
        form.has_error(&self.config.name)
            .then(|| format!("{} is required", self.config.label))
    }

    /// Empty-state prompt text.
    #[must_use]
    pub fn prompt(&self) -> String {
        format!("Drag and drop a {}, or click to", self.kind().label())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::form::FormStore;

    fn image_field() -> (FieldState, FormStore) {
        let mut form = FormStore::new();
        let mut field = FieldState::new(FieldConfig::new("thumbnail", "Course Thumbnail", MediaKind::Image));
        field.mount(&mut form);
        (field, form)
    }

    fn png(name: &str) -> FileMeta {
        FileMeta::new(name).with_mime("image/png")
    }

    #[test]
    fn mount_registers_required_once() {
        let (mut field, mut form) = image_field();
        assert_eq!(form.rules("thumbnail"), Some(FieldRules { required: true }));
        field.mount(&mut form);
        assert!(form.is_registered("thumbnail"));
    }

    #[test]
    fn read_only_registers_as_optional() {
        let mut form = FormStore::new();
        let mut field = FieldState::new(
            FieldConfig::new("video", "Video", MediaKind::Video)
                .read_only(true)
                .with_view_value("https://x/video.mp4"),
        );
        field.mount(&mut form);
        assert_eq!(form.rules("video"), Some(FieldRules { required: false }));
    }

    #[test]
    fn capture_commits_and_pushes_file() {
        let (mut field, mut form) = image_field();
        let pending = field.begin_capture([png("a.png")]).unwrap();
        let outcome = field.complete_capture(pending, Ok(vec![1u8, 2, 3]), &mut form);
        assert_eq!(outcome, CaptureOutcome::Committed);

        let file = field.selection().file().unwrap().clone();
        assert_eq!(file, RawFile::new("a.png", "image/png", vec![1u8, 2, 3]));
        assert_eq!(form.value("thumbnail"), &FormValue::File(file));
        assert!(!field.selection().preview().unwrap().is_empty());
    }

    #[test]
    fn slower_earlier_read_cannot_overwrite_newer_selection() {
        let (mut field, mut form) = image_field();
        let first = field.begin_capture([png("first.png")]).unwrap();
        let second = field.begin_capture([png("second.png")]).unwrap();

        assert_eq!(
            field.complete_capture(second, Ok(vec![2u8]), &mut form),
            CaptureOutcome::Committed
        );
        assert_eq!(
            field.complete_capture(first, Ok(vec![1u8]), &mut form),
            CaptureOutcome::Stale
        );
        assert_eq!(field.selection().file().unwrap().name, "second.png");
        assert_eq!(form.value("thumbnail").file().unwrap().name, "second.png");
    }

    #[test]
    fn remove_supersedes_in_flight_read() {
        let (mut field, mut form) = image_field();
        let pending = field.begin_capture([png("a.png")]).unwrap();
        field.remove(&mut form).unwrap();
        assert_eq!(
            field.complete_capture(pending, Ok(vec![1u8]), &mut form),
            CaptureOutcome::Stale
        );
        assert_eq!(field.selection(), &Selection::Empty);
        assert_eq!(form.value("thumbnail"), &FormValue::Cleared);
    }

    #[test]
    fn replacing_discards_previous_preview() {
        let (mut field, mut form) = image_field();
        let p = field.begin_capture([png("a.png")]).unwrap();
        field.complete_capture(p, Ok(vec![1u8]), &mut form);
        let old_preview = field.selection().preview().unwrap().to_owned();

        let p = field.begin_capture([png("b.png")]).unwrap();
        field.complete_capture(p, Ok(vec![9u8, 9, 9]), &mut form);
        let new_preview = field.selection().preview().unwrap();
        assert_ne!(new_preview, old_preview);
        assert_eq!(new_preview, "data:image/png;base64,CQkJ");
    }

    #[test]
    fn unsupported_type_keeps_selection_and_sets_notice() {
        let mut form = FormStore::new();
        let mut field = FieldState::new(
            FieldConfig::new("thumbnail", "Thumbnail", MediaKind::Image).with_edit_value("https://x/t.png"),
        );
        field.mount(&mut form);
        let before = field.selection().clone();
        let generation = field.generation();

        assert!(field.begin_capture([FileMeta::new("clip.mp4").with_mime("video/mp4")]).is_none());
        assert_eq!(field.selection(), &before);
        assert_eq!(field.generation(), generation);
        assert!(matches!(
            field.notice(),
            Some(FieldError::Capture(CaptureError::Unsupported { .. }))
        ));
    }

    #[test]
    fn failed_read_keeps_selection_and_sets_notice() {
        let (mut field, mut form) = image_field();
        let pending = field.begin_capture([png("a.png")]).unwrap();
        let outcome = field.complete_capture::<Vec<u8>>(
            pending,
            Err(PreviewError::Read("aborted".into())),
            &mut form,
        );
        assert_eq!(outcome, CaptureOutcome::Failed);
        assert_eq!(field.selection(), &Selection::Empty);
        assert_eq!(form.value("thumbnail"), &FormValue::Unset);
        assert!(matches!(field.notice(), Some(FieldError::Preview(_))));
    }

    #[test]
    fn existing_edit_value_passes_validation_after_mount() {
        let mut form = FormStore::new();
        let mut field = FieldState::new(
            FieldConfig::new("courseImage", "Course Thumbnail", MediaKind::Image)
                .with_fallback_value("https://x/thumb.png"),
        );
        field.mount(&mut form);
        assert_eq!(
            form.value("courseImage"),
            &FormValue::Existing("https://x/thumb.png".into())
        );
        assert!(form.validate());
        assert_eq!(field.error_message(&form), None);
    }

    #[test]
    fn empty_field_does_not_seed_form() {
        let (_, form) = image_field();
        assert_eq!(form.value("thumbnail"), &FormValue::Unset);
    }

    #[test]
    fn only_editable_fields_accept_drops() {
        let (field, _) = image_field();
        assert!(field.accepts_drops());
        let view_only = FieldState::new(
            FieldConfig::new("video", "Video", MediaKind::Video).read_only(true),
        );
        assert!(!view_only.accepts_drops());
    }

    #[test]
    fn external_remove_goes_empty() {
        let mut form = FormStore::new();
        let mut field = FieldState::new(
            FieldConfig::new("thumbnail", "Thumbnail", MediaKind::Image).with_edit_value("https://x/t.png"),
        );
        field.mount(&mut form);
        assert!(field.show_actions());
        field.remove(&mut form).unwrap();
        assert_eq!(field.selection(), &Selection::Empty);
        assert_eq!(form.value("thumbnail"), &FormValue::Cleared);
        assert!(!field.show_actions());
    }

    #[test]
    fn read_only_never_changes_or_exposes_actions() {
        let mut form = FormStore::new();
        let mut field = FieldState::new(
            FieldConfig::new("video", "Video", MediaKind::Video)
                .read_only(true)
                .with_view_value("https://x/video.mp4"),
        );
        field.mount(&mut form);
        assert!(!field.show_actions());
        assert!(!field.show_required_marker());
        assert!(field.begin_capture([FileMeta::new("v.mp4")]).is_none());
        assert_eq!(field.remove(&mut form), Err(CaptureError::ReadOnly));
        assert!(matches!(field.selection(), Selection::External { .. }));
        assert!(field.notice().is_none());
    }

    #[test]
    fn error_message_is_static() {
        let (field, mut form) = image_field();
        assert_eq!(field.error_message(&form), None);
        form.validate();
        assert_eq!(
            field.error_message(&form).as_deref(),
            Some("Course Thumbnail is required")
        );
    }

    #[test]
    fn prompt_names_the_media_kind() {
        let (field, _) = image_field();
        assert_eq!(field.prompt(), "Drag and drop a image, or click to");
    }
}
