//! Dioxus UI components for mediafield.
//!
//! Provides the upload field (drop zone, picker, preview, remove and
//! change actions) and the media rendering surface.

mod surface;
mod upload;

pub use surface::MediaSurface;
pub use upload::MediaUpload;
