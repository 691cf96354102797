//! Field-level validation errors.

use std::collections::BTreeMap;

use thiserror::Error;

use super::fields::{FormField, ProfileFormData};

/// Why a single field is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Please enter a value for this field")]
    Required,
}

/// Current validation errors, keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors {
    errors: BTreeMap<FormField, FieldError>,
}

impl FormErrors {
    /// Compute the errors for `data` from scratch.
    pub fn validate(data: &ProfileFormData) -> Self {
        let mut errors = Self::default();
        if data.name.trim().is_empty() {
            errors.insert(FormField::Name, FieldError::Required);
        }
        errors
    }

    pub fn insert(&mut self, field: FormField, error: FieldError) {
        self.errors.insert(field, error);
    }

    /// Drop the error for `field`, returning it if one was set.
    pub fn clear(&mut self, field: FormField) -> Option<FieldError> {
        self.errors.remove(&field)
    }

    pub fn get(&self, field: FormField) -> Option<FieldError> {
        self.errors.get(&field).copied()
    }

    /// Display message for `field`, if it has an error.
    pub fn message(&self, field: FormField) -> Option<String> {
        self.get(field).map(|e| e.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FormField, FieldError)> + '_ {
        self.errors.iter().map(|(field, error)| (*field, *error))
    }
}
