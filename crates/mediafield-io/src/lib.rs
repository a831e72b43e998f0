//! mediafield-io: Browser I/O and Dioxus component library.
//!
//! Provides the [`MediaUpload`] field component, the [`MediaSurface`]
//! image/video renderer, and [`BrowserPicker`], the `web_sys` backed
//! file picker capability.

pub mod components;
pub mod picker;

pub use components::{MediaSurface, MediaUpload};
pub use picker::BrowserPicker;
