//! Host form boundary.
//!
//! The field talks to its surrounding form only through [`HostForm`]:
//! one `register` at mount, a `set_value` on every selection change,
//! and `has_error` when rendering. [`FormStore`] is a small in-memory
//! implementation with required-field validation.

use std::collections::BTreeMap;

use crate::types::{PreviewSource, RawFile};

/// Validation rules a field declares when registering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FieldRules {
    /// The form must hold a file or an existing value for this field
    /// to be valid.
    pub required: bool,
}

/// A value stored in the host form under a field name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormValue {
    /// Never set.
    #[default]
    Unset,
    /// Explicitly cleared by a remove action.
    Cleared,
    /// A pre-existing value the field started from (view snapshot,
    /// edit value, or store fallback). Present, but nothing new to submit.
    Existing(PreviewSource),
    /// A captured file.
    File(RawFile),
}

impl FormValue {
    /// The file, if one is stored.
    #[must_use]
    pub const fn file(&self) -> Option<&RawFile> {
        match self {
            Self::File(file) => Some(file),
            Self::Unset | Self::Cleared | Self::Existing(_) => None,
        }
    }

    /// Whether the value satisfies a required rule.
    #[must_use]
    pub const fn is_present(&self) -> bool {
        matches!(self, Self::Existing(_) | Self::File(_))
    }
}

/// The surrounding form system.
pub trait HostForm {
    /// Announce a field and its rules.
    fn register(&mut self, name: &str, rules: FieldRules);

    /// Store a field's value.
    fn set_value(&mut self, name: &str, value: FormValue);

    /// Whether the last validation flagged this field.
    fn has_error(&self, name: &str) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct Entry {
    rules: FieldRules,
    value: FormValue,
    error: bool,
}

/// In-memory host form with required-field validation.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormStore {
    fields: BTreeMap<String, Entry>,
}

impl FormStore {
    /// Create an empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `name` has been registered.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Rules registered for `name`.
    #[must_use]
    pub fn rules(&self, name: &str) -> Option<FieldRules> {
        self.fields.get(name).map(|e| e.rules)
    }

    /// Current value of `name`; [`FormValue::Unset`] if unknown.
    #[must_use]
    pub fn value(&self, name: &str) -> &FormValue {
        static UNSET: FormValue = FormValue::Unset;
        self.fields.get(name).map_or(&UNSET, |e| &e.value)
    }

    /// Flag every required field that holds neither a file nor an
    /// existing value.
    ///
    /// Returns `true` when no field is flagged.
    pub fn validate(&mut self) -> bool {
        let mut valid = true;
        for (name, entry) in &mut self.fields {
            entry.error = entry.rules.required && !entry.value.is_present();
            if entry.error {
                tracing::debug!(field = %name, "required field is missing a value");
                valid = false;
            }
        }
        valid
    }

    /// Names of fields currently flagged.
    pub fn errors(&self) -> impl Iterator<Item = &str> {
        self.fields
            .iter()
            .filter(|(_, e)| e.error)
            .map(|(name, _)| name.as_str())
    }

    /// Files held by the form, keyed by field name.
    pub fn files(&self) -> impl Iterator<Item = (&str, &RawFile)> {
        self.fields
            .iter()
            .filter_map(|(name, e)| e.value.file().map(|f| (name.as_str(), f)))
    }
}

impl HostForm for FormStore {
    fn register(&mut self, name: &str, rules: FieldRules) {
        self.fields.entry(name.to_owned()).or_default().rules = rules;
    }

    fn set_value(&mut self, name: &str, value: FormValue) {
        let entry = self.fields.entry(name.to_owned()).or_default();
        if value.is_present() {
            entry.error = false;
        }
        entry.value = value;
    }

    fn has_error(&self, name: &str) -> bool {
        self.fields.get(name).is_some_and(|e| e.error)
    }
}
