//! Line-oriented front end for `RecipeManager`.
//!
//! Every command maps to one manager action; the page is re-rendered after
//! each one so the status line always reflects the last action.

use std::io::{BufRead, Write};

use recipe_core::{RecipeField, RecipeId, RecipeManager, Transport, UnknownField};
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  set <field> <value>   edit a form field (recipeId, name, ingredients, instructions)
  save                  add the form, or update it in edit mode
  edit <id>             load a table row into the form
  cancel                leave edit mode and clear the form
  delete <id>           delete a recipe
  find [id]             look up a recipe by ID
  refresh               reload the table
  show                  redraw the page
  help                  show this help
  quit                  exit";

const PROMPT: &str = "recipe> ";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(RecipeField, String),
    Save,
    Edit(RecipeId),
    Cancel,
    Delete(RecipeId),
    Find(Option<String>),
    Refresh,
    Show,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("unknown command `{0}`; type `help` for a list")]
    Unknown(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a usable recipe ID")]
    BadId(String),
    #[error(transparent)]
    Field(#[from] UnknownField),
}

pub fn parse_command(line: &str) -> Result<Command, ParseError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "set" => {
            let (field, value) = match rest.split_once(char::is_whitespace) {
                Some((field, value)) => (field, value.trim()),
                None if !rest.is_empty() => (rest, ""),
                None => return Err(ParseError::Usage("set <field> <value>")),
            };
            Command::Set(field.parse()?, unescape(value))
        }
        "save" => Command::Save,
        "edit" => Command::Edit(required_id(rest, "edit <id>")?),
        "cancel" => Command::Cancel,
        "delete" | "rm" => Command::Delete(required_id(rest, "delete <id>")?),
        "find" | "get" => match rest {
            "" => Command::Find(None),
            _ => Command::Find(Some(usable_id(rest)?.to_string())),
        },
        "refresh" | "list" => Command::Refresh,
        "show" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        _ => return Err(ParseError::Unknown(word.to_string())),
    };
    Ok(command)
}

fn required_id(rest: &str, usage: &'static str) -> Result<RecipeId, ParseError> {
    if rest.is_empty() {
        return Err(ParseError::Usage(usage));
    }
    usable_id(rest)
}

/// `.` and `..` would be folded away by URL normalization and hit the
/// wrong endpoint.
fn usable_id(text: &str) -> Result<RecipeId, ParseError> {
    let id = RecipeId::new(text);
    if !id.is_path_safe() {
        return Err(ParseError::BadId(text.to_string()));
    }
    Ok(id)
}

/// Lets multi-line instructions be typed on one line.
fn unescape(value: &str) -> String {
    value.replace("\\n", "\n")
}

/// Apply one command. Returns a note for the user when the command could not
/// be carried out before reaching the manager.
pub fn apply<T: Transport>(manager: &mut RecipeManager<T>, command: Command) -> Option<String> {
    match command {
        Command::Set(field, value) => {
            manager.set_field(field, value);
        }
        Command::Save => {
            manager.submit();
        }
        Command::Edit(id) => {
            let Some(record) = manager.store().find_record(&id).cloned() else {
                return Some(format!("No recipe with ID {id} in the table."));
            };
            manager.edit(&record);
        }
        Command::Cancel => manager.cancel_edit(),
        Command::Delete(id) => {
            // Prefer the table's spelling of the id so `01` deletes row `1`.
            let id = manager
                .store()
                .find_record(&id)
                .map(|record| record.recipe_id.clone())
                .unwrap_or(id);
            manager.delete(&id);
        }
        Command::Find(query) => {
            if !manager.options().lookup_panel {
                return Some("Lookup is disabled.".to_string());
            }
            if let Some(query) = query {
                manager.set_lookup_query(query);
            }
            manager.lookup();
        }
        Command::Refresh => {
            manager.refresh();
        }
        Command::Show | Command::Help | Command::Quit => {}
    }
    None
}

pub fn run<T, R, W>(manager: &mut RecipeManager<T>, mut input: R, mut out: W) -> std::io::Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    manager.mount();
    writeln!(out, "{}", manager.render())?;

    let mut line = String::new();
    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;
        line.clear();
        if input.read_line(&mut line)? == 0 {
            writeln!(out)?;
            return Ok(());
        }
        if line.trim().is_empty() {
            continue;
        }
        match parse_command(&line) {
            Ok(Command::Quit) => return Ok(()),
            Ok(Command::Help) => writeln!(out, "{HELP}")?,
            Ok(command) => {
                if let Some(note) = apply(manager, command) {
                    writeln!(out, "{note}")?;
                }
                writeln!(out, "{}", manager.render())?;
            }
            Err(err) => writeln!(out, "{err}")?,
        }
    }
}
