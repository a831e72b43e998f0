//! mediafield-core: State machine and preview pipeline for a single
//! image/video upload field (sans-IO).
//!
//! The field is split into three cooperating parts:
//!
//! - [`capture`]: drag/drop and picker input behind an accept filter
//! - [`preview`]: raw file to data URI
//! - [`field`]: the [`Selection`] state machine and its bridge to the
//!   host [`form`]
//!
//! This crate has **no browser dependencies**. Dioxus components and
//! `web_sys` glue live in `mediafield-io`.

pub mod capture;
pub mod field;
pub mod form;
pub mod preview;
pub mod types;

pub use capture::{AcceptedFile, CaptureController, FileMeta, FilePicker};
pub use field::{CaptureOutcome, FieldState, PendingCapture};
pub use form::{FieldRules, FormStore, FormValue, HostForm};
pub use preview::generate_preview;
pub use types::{
    AcceptPolicy, CaptureError, FieldConfig, FieldError, MediaKind, PreviewError, PreviewSource,
    RawFile, Selection,
};
