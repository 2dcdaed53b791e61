//! Domain DTOs for the recipe API.
//!
//! # Design
//! These types mirror the mock-server's schema but are defined independently.
//! The backend stores identifiers as integers while the form edits them as
//! text, so `RecipeId` accepts either on the way in and always writes a
//! string on the way out. Integration tests catch any schema drift between
//! the two crates.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Caller-supplied recipe identifier. Doubles as the lookup and deletion key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "IdRepr", into = "String")]
pub struct RecipeId(String);

impl RecipeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether both ids name the same stored recipe. The backend keys
    /// recipes by integer, so `01` and `1` are the same recipe.
    pub fn same_recipe(&self, other: &RecipeId) -> bool {
        let (a, b) = (self.0.trim(), other.0.trim());
        match (a.parse::<i64>(), b.parse::<i64>()) {
            (Ok(x), Ok(y)) => x == y,
            _ => a == b,
        }
    }

    /// `.` and `..` are swallowed by URL path normalization and cannot be
    /// sent as a path segment.
    pub fn is_path_safe(&self) -> bool {
        !matches!(self.0.trim(), "" | "." | "..")
    }
}

impl fmt::Display for RecipeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecipeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<RecipeId> for String {
    fn from(id: RecipeId) -> Self {
        id.0
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdRepr {
    Number(i64),
    Text(String),
}

impl From<IdRepr> for RecipeId {
    fn from(repr: IdRepr) -> Self {
        match repr {
            IdRepr::Number(n) => Self(n.to_string()),
            IdRepr::Text(s) => Self(s),
        }
    }
}

/// A single recipe returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub recipe_id: RecipeId,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
    /// Assigned by the server; never sent by the client.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

/// The draft record behind the add/edit form. Also the create and update
/// request payload.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecipeForm {
    pub recipe_id: String,
    pub name: String,
    pub ingredients: String,
    pub instructions: String,
}

impl RecipeForm {
    pub fn get(&self, field: RecipeField) -> &str {
        match field {
            RecipeField::RecipeId => &self.recipe_id,
            RecipeField::Name => &self.name,
            RecipeField::Ingredients => &self.ingredients,
            RecipeField::Instructions => &self.instructions,
        }
    }

    pub fn set(&mut self, field: RecipeField, value: String) {
        let slot = match field {
            RecipeField::RecipeId => &mut self.recipe_id,
            RecipeField::Name => &mut self.name,
            RecipeField::Ingredients => &mut self.ingredients,
            RecipeField::Instructions => &mut self.instructions,
        };
        *slot = value;
    }

    pub fn is_empty(&self) -> bool {
        RecipeField::ALL.iter().all(|f| self.get(*f).is_empty())
    }
}

impl From<&Recipe> for RecipeForm {
    fn from(recipe: &Recipe) -> Self {
        Self {
            recipe_id: recipe.recipe_id.to_string(),
            name: recipe.name.clone(),
            ingredients: recipe.ingredients.clone(),
            instructions: recipe.instructions.clone(),
        }
    }
}

/// One of the four required form fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecipeField {
    RecipeId,
    Name,
    Ingredients,
    Instructions,
}

impl RecipeField {
    /// Declaration order; validation reports the first empty field in this order.
    pub const ALL: [RecipeField; 4] = [
        RecipeField::RecipeId,
        RecipeField::Name,
        RecipeField::Ingredients,
        RecipeField::Instructions,
    ];

    /// JSON key, also used in user-facing messages.
    pub fn wire_name(self) -> &'static str {
        match self {
            RecipeField::RecipeId => "recipeId",
            RecipeField::Name => "name",
            RecipeField::Ingredients => "ingredients",
            RecipeField::Instructions => "instructions",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            RecipeField::RecipeId => "Recipe ID",
            RecipeField::Name => "Recipe Name",
            RecipeField::Ingredients => "Ingredients",
            RecipeField::Instructions => "Instructions",
        }
    }
}

impl fmt::Display for RecipeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wire_name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field `{0}` (expected one of recipeId, name, ingredients, instructions)")]
pub struct UnknownField(pub String);

impl FromStr for RecipeField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecipeField::ALL
            .into_iter()
            .find(|f| f.wire_name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}
