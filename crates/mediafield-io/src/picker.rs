//! File picker capability backed by a hidden `<input type="file">`.
//!
//! The drop surface has no click handler of its own. Every click
//! target that should open the picker calls [`FilePicker::open`] on a
//! [`BrowserPicker`], which clicks the field's hidden input.
//!
//! Opening requires a browser environment (`wasm32-unknown-unknown`
//! target) and a user-gesture context.

use mediafield_core::{CaptureError, FilePicker};
use wasm_bindgen::JsCast;

/// Errors that can occur when locating the hidden file input.
#[derive(Debug, thiserror::Error)]
pub enum PickerError {
    /// A browser API call failed or a required object was missing.
    #[error("browser API error: {0}")]
    JsError(String),
}

/// Opens the picker of one field's hidden file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserPicker {
    input_id: String,
}

impl BrowserPicker {
    /// Picker for the field registered under `name`.
    #[must_use]
    pub fn for_field(name: &str) -> Self {
        Self {
            input_id: input_id(name),
        }
    }

    /// DOM id of the hidden input.
    #[must_use]
    pub fn input_id(&self) -> &str {
        &self.input_id
    }

    /// Clear the input so picking the same file again still fires
    /// `change`.
    ///
    /// Best-effort: a missing input is ignored.
    pub fn reset(&self) {
        if let Ok(input) = self.input() {
            input.set_value("");
        }
    }

    fn input(&self) -> Result<web_sys::HtmlInputElement, PickerError> {
        let window =
            web_sys::window().ok_or_else(|| PickerError::JsError("no global window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PickerError::JsError("no document".into()))?;
        document
            .get_element_by_id(&self.input_id)
            .ok_or_else(|| PickerError::JsError(format!("no element #{}", self.input_id)))?
            .dyn_into::<web_sys::HtmlInputElement>()
            .map_err(|e| PickerError::JsError(format!("failed to cast element: {e:?}")))
    }
}

impl FilePicker for BrowserPicker {
    fn open(&self) -> Result<(), CaptureError> {
        let input = self
            .input()
            .map_err(|e| CaptureError::Picker(e.to_string()))?;
        input.click();
        Ok(())
    }
}

/// DOM id for a field's hidden input.
///
/// Characters outside `[A-Za-z0-9_-]` are replaced so any form key
/// yields a valid id.
#[must_use]
pub fn input_id(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("mediafield-{safe}")
}
