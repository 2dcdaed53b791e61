//! In-memory state behind the recipe view.
//!
//! # Design
//! `RecipeStore` is plain owned data with no I/O. The record list is the
//! snapshot of the last successful full fetch and is replaced wholesale,
//! never patched. All mutation goes through the methods below so the
//! form's four-field invariant and the edit-mode flag stay consistent.

use crate::types::{Recipe, RecipeField, RecipeForm, RecipeId};

#[derive(Debug, Clone, Default)]
pub struct RecipeStore {
    records: Vec<Recipe>,
    form: RecipeForm,
    status: String,
    editing: bool,
    lookup_query: String,
    lookup_result: Option<Recipe>,
}

impl RecipeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[Recipe] {
        &self.records
    }

    pub fn form(&self) -> &RecipeForm {
        &self.form
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn is_editing(&self) -> bool {
        self.editing
    }

    pub fn lookup_query(&self) -> &str {
        &self.lookup_query
    }

    pub fn lookup_result(&self) -> Option<&Recipe> {
        self.lookup_result.as_ref()
    }

    pub fn find_record(&self, id: &RecipeId) -> Option<&Recipe> {
        self.records.iter().find(|r| r.recipe_id.same_recipe(id))
    }

    /// Replace one form field. No validation happens here.
    ///
    /// The identifier is fixed while editing; returns `false` and leaves the
    /// form untouched for that case.
    pub fn set_form_field(&mut self, field: RecipeField, value: impl Into<String>) -> bool {
        if self.editing && field == RecipeField::RecipeId {
            return false;
        }
        self.form.set(field, value.into());
        true
    }

    /// Load `record` into the form and switch to edit mode.
    pub fn begin_edit(&mut self, record: &Recipe) {
        self.form = RecipeForm::from(record);
        self.editing = true;
        self.status = format!("Editing recipe with ID {}", record.recipe_id);
    }

    pub fn reset_form(&mut self) {
        self.form = RecipeForm::default();
        self.editing = false;
    }

    /// Replace the status message. It stays until overwritten.
    pub fn set_status(&mut self, text: impl Into<String>) {
        self.status = text.into();
    }

    pub fn clear_status(&mut self) {
        self.status.clear();
    }

    pub fn set_records(&mut self, records: Vec<Recipe>) {
        self.records = records;
    }

    pub fn clear_records(&mut self) {
        self.records.clear();
    }

    pub fn set_lookup_query(&mut self, query: impl Into<String>) {
        self.lookup_query = query.into();
    }

    pub fn set_lookup_result(&mut self, record: Recipe) {
        self.lookup_result = Some(record);
    }

    pub fn clear_lookup(&mut self) {
        self.lookup_result = None;
    }

    /// Drop the displayed lookup result if it is the recipe `id`.
    /// Returns whether anything was cleared.
    pub fn clear_lookup_if_matches(&mut self, id: &RecipeId) -> bool {
        let matches = self.lookup_result.as_ref().is_some_and(|r| r.recipe_id.same_recipe(id));
        if matches {
            self.lookup_result = None;
        }
        matches
    }
}
