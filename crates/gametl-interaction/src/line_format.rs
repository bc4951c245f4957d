//! The `ID:::text` record format of translation input and output files.

use std::collections::HashMap;

pub const SEPARATOR: &str = ":::";

/// Prefix of the header record that is copied through untranslated.
pub const HEADER_PREFIX: &str = "0:::";

/// Appended to every batch prompt.
pub const FORMAT_REMINDER: &str = "\n\nREMINDER: Format 'ID:::TranslatedText'.";

/// Trimmed id of a record; the whole trimmed line when it has no separator.
pub fn record_id(line: &str) -> &str {
    line.split(SEPARATOR).next().unwrap_or("").trim()
}

/// Input lines prepared for a run.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInput {
    /// Output buffer before any batch finished: header as-is, records
    /// reduced to `"{id}:::"`, separator-less lines unchanged.
    pub initial_output: Vec<String>,
    /// `(line index, original line)` for every line sent to the model.
    pub work_items: Vec<(usize, String)>,
}

pub fn parse_input(content: &str) -> ParsedInput {
    let lines: Vec<&str> = content.lines().collect();
    let has_header = lines
        .first()
        .map(|line| line.starts_with(HEADER_PREFIX))
        .unwrap_or(false);

    let mut initial_output = Vec::with_capacity(lines.len());
    let mut work_items = Vec::with_capacity(lines.len());

    for (index, line) in lines.iter().enumerate() {
        if index == 0 && has_header {
            initial_output.push(line.to_string());
            continue;
        }

        match line.split_once(SEPARATOR) {
            Some((id, _)) => initial_output.push(format!("{}{}", id.trim(), SEPARATOR)),
            None => initial_output.push(line.to_string()),
        }
        work_items.push((index, line.to_string()));
    }

    ParsedInput {
        initial_output,
        work_items,
    }
}

/// User message for one batch.
pub fn build_prompt(lines: &[String]) -> String {
    lines.join("\n") + FORMAT_REMINDER
}

/// Replaces each batch line whose id appears in `response` with
/// `"{id}:::{translated}"`; other lines are returned unchanged.
pub fn merge_translation(lines: &[String], response: &str) -> Vec<String> {
    let translated: HashMap<&str, &str> = response
        .trim()
        .split('\n')
        .filter_map(|line| line.split_once(SEPARATOR))
        .map(|(id, text)| (id.trim(), text.trim()))
        .collect();

    lines
        .iter()
        .map(|line| {
            let id = record_id(line);
            match translated.get(id) {
                Some(text) if !id.is_empty() => format!("{}{}{}", id, SEPARATOR, text),
                _ => line.clone(),
            }
        })
        .collect()
}
