//! Non-empty checks for the add/edit form.

use thiserror::Error;

use crate::types::{RecipeField, RecipeForm};

/// A required form field was empty after trimming.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Please fill out the {0} field.")]
pub struct FieldMissing(pub RecipeField);

/// Returns the first field, in declaration order, whose trimmed value is empty.
pub fn validate(form: &RecipeForm) -> Result<(), FieldMissing> {
    match RecipeField::ALL.into_iter().find(|f| form.get(*f).trim().is_empty()) {
        Some(field) => Err(FieldMissing(field)),
        None => Ok(()),
    }
}
