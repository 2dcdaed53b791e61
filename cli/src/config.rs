use std::{fs, path::Path};

use anyhow::{bail, Context};
use serde::Deserialize;

pub const DEFAULT_CONFIG_FILE: &str = "recipe.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub api_url: String,
    pub lookup_panel: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:8080".into(),
            lookup_panel: true,
        }
    }
}

/// Defaults, then the config file, then the environment.
///
/// An explicitly named file must exist; the default `recipe.toml` is optional.
pub fn load_settings(explicit: Option<&Path>) -> anyhow::Result<Settings> {
    let mut settings = match explicit {
        Some(path) => read_file(path)?,
        None => {
            let path = Path::new(DEFAULT_CONFIG_FILE);
            if path.exists() {
                read_file(path)?
            } else {
                Settings::default()
            }
        }
    };
    apply_env(&mut settings, |key| std::env::var(key).ok())?;
    Ok(settings)
}

fn read_file(path: &Path) -> anyhow::Result<Settings> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file '{}'", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("invalid config file '{}'", path.display()))
}

pub fn apply_env(
    settings: &mut Settings,
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<()> {
    if let Some(v) = var("VITE_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("RECIPE_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = var("RECIPE_LOOKUP_PANEL") {
        settings.lookup_panel = parse_flag(&v)
            .with_context(|| format!("invalid RECIPE_LOOKUP_PANEL value '{v}'"))?;
    }
    Ok(())
}

fn parse_flag(raw: &str) -> anyhow::Result<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("expected a boolean, got '{other}'"),
    }
}
