//! Plain-text rendering of the recipe page.
//!
//! The page is, top to bottom: title, status line, add/edit form, the
//! optional find-by-id panel, and the recipe table.

use std::fmt;

use crate::store::RecipeStore;
use crate::types::{Recipe, RecipeField};

const TITLE: &str = "Recipe Book Manager";
const EMPTY_TABLE: &str = "No recipes found.";
const WRAP_WIDTH: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewOptions {
    pub lookup_panel: bool,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self { lookup_panel: true }
    }
}

pub fn render(store: &RecipeStore, options: &ViewOptions) -> String {
    RecipePage { store, options }.to_string()
}

struct RecipePage<'a> {
    store: &'a RecipeStore,
    options: &'a ViewOptions,
}

impl fmt::Display for RecipePage<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{TITLE}")?;
        writeln!(f, "{}", "=".repeat(TITLE.len()))?;

        if !self.store.status().is_empty() {
            writeln!(f)?;
            writeln!(f, "> {}", self.store.status())?;
        }

        writeln!(f)?;
        self.form(f)?;

        if self.options.lookup_panel {
            writeln!(f)?;
            self.lookup(f)?;
        }

        writeln!(f)?;
        table(f, self.store.records())
    }
}

impl RecipePage<'_> {
    fn form(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let editing = self.store.is_editing();
        writeln!(f, "{}", if editing { "Edit Recipe" } else { "Add Recipe" })?;
        let width = RecipeField::ALL.iter().map(|field| field.label().len()).max().unwrap_or(0);
        for field in RecipeField::ALL {
            let label = format!("{}:", field.label());
            writeln!(f, "  {label:<w$} {}", self.store.form().get(field), w = width + 1)?;
        }
        if editing {
            writeln!(f, "  [Update Recipe] [Cancel]")
        } else {
            writeln!(f, "  [Save Recipe]")
        }
    }

    fn lookup(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Find Recipe By ID")?;
        writeln!(f, "  ID: {}", self.store.lookup_query())?;
        let Some(found) = self.store.lookup_result() else {
            return Ok(());
        };
        writeln!(f, "  {}", found.name)?;
        writeln!(f, "    Ingredients:  {}", found.ingredients)?;
        writeln!(f, "    Instructions: {}", found.instructions)?;
        if let Some(date) = &found.date {
            writeln!(f, "    Date:         {date}")?;
        }
        Ok(())
    }
}

fn table(f: &mut fmt::Formatter<'_>, records: &[Recipe]) -> fmt::Result {
    let header = ["ID", "Name", "Ingredients", "Instructions"];
    let rows: Vec<[Vec<String>; 4]> = records
        .iter()
        .map(|r| {
            [
                cell(r.recipe_id.as_str()),
                cell(&r.name),
                cell(&r.ingredients),
                cell(&r.instructions),
            ]
        })
        .collect();

    let mut widths = header.map(|h| h.len());
    for row in &rows {
        for (w, lines) in widths.iter_mut().zip(row) {
            for value in lines {
                *w = (*w).max(value.chars().count());
            }
        }
    }

    line(f, &header, &widths)?;
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    writeln!(f, "{}", rule.join("-+-"))?;

    if rows.is_empty() {
        return writeln!(f, "{EMPTY_TABLE}");
    }
    for row in &rows {
        let height = row.iter().map(Vec::len).max().unwrap_or(1);
        for i in 0..height {
            let cells = row.each_ref().map(|lines| lines.get(i).map_or("", String::as_str));
            line(f, &cells, &widths)?;
        }
    }
    Ok(())
}

fn line(f: &mut fmt::Formatter<'_>, cells: &[&str; 4], widths: &[usize; 4]) -> fmt::Result {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(value, w)| format!("{value:<w$}", w = *w))
        .collect();
    writeln!(f, "{}", padded.join(" | ").trim_end())
}

/// Cell text word-wrapped to `WRAP_WIDTH` columns. Embedded newlines start a
/// new line; other control characters become spaces. Never empty.
fn cell(value: &str) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in value.split('\n') {
        let flat: String = paragraph
            .chars()
            .map(|c| if c.is_control() { ' ' } else { c })
            .collect();
        wrap(&flat, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap(text: &str, lines: &mut Vec<String>) {
    let mut current = String::new();
    let mut len = 0;
    for word in text.split_whitespace() {
        let mut word: Vec<char> = word.chars().collect();
        // Words wider than a line are split hard.
        while word.len() > WRAP_WIDTH {
            if len > 0 {
                lines.push(std::mem::take(&mut current));
                len = 0;
            }
            lines.push(word.drain(..WRAP_WIDTH).collect());
        }
        if word.is_empty() {
            continue;
        }
        if len > 0 && len + 1 + word.len() > WRAP_WIDTH {
            lines.push(std::mem::take(&mut current));
            len = 0;
        }
        if len > 0 {
            current.push(' ');
            len += 1;
        }
        current.extend(&word);
        len += word.len();
    }
    if len > 0 {
        lines.push(current);
    }
}
