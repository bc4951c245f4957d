use anyhow::{Result, anyhow};
use colored::Colorize;
use gametl_core::config::{ConfigField, ParamName, TranslatorConfig};
use strum::IntoEnumIterator;

use crate::app::AppState;

pub fn show(state: &AppState) -> Result<()> {
    let config = state.config.get();
    for field in ConfigField::iter() {
        println!("{}", render_line(field, &config));
    }
    Ok(())
}

pub fn get(state: &AppState, field: &str) -> Result<()> {
    let field = parse_field(field)?;
    println!("{}", field.read(&state.config.get()));
    Ok(())
}

pub fn set(state: &AppState, field: &str, value: &str) -> Result<()> {
    let field = parse_field(field)?;
    let config = state.config.try_update(|config| field.apply(config, value))?;
    println!("{} = {}", field.to_string().bright_blue(), field.read(&config));
    Ok(())
}

pub fn toggle(state: &AppState, param: &str, enabled: bool) -> Result<()> {
    let param: ParamName = param.parse().map_err(|_| {
        let known: Vec<String> = ParamName::iter().map(|p| p.to_string()).collect();
        anyhow!("Unknown parameter '{}' (expected one of: {})", param, known.join(", "))
    })?;
    let config = state.config.set_param_enabled(param, enabled);

    // Parameter and field names share their snake_case spelling.
    let field: ConfigField = param.to_string().parse()?;
    println!("{} = {}", param.to_string().bright_blue(), field.read(&config));
    Ok(())
}

pub fn reset(state: &AppState) -> Result<()> {
    state.config.set(TranslatorConfig::default());
    println!("{}", "Configuration reset to defaults.".green());
    Ok(())
}

fn parse_field(raw: &str) -> Result<ConfigField> {
    raw.parse().map_err(|_| {
        let known: Vec<String> = ConfigField::iter().map(|f| f.to_string()).collect();
        anyhow!("Unknown field '{}' (expected one of: {})", raw, known.join(", "))
    })
}

/// One `show` line; multi-line values collapse to their first line.
fn render_line(field: ConfigField, config: &TranslatorConfig) -> String {
    let value = field.read(config);
    let line_count = value.lines().count();
    let value = if line_count > 1 {
        let first = value.lines().next().unwrap_or_default();
        format!("{} ... ({} lines)", first, line_count)
    } else {
        value
    };
    format!("{:<14} {}", field.to_string(), value)
}
