//! Format-preserving config edits.
//!
//! Setting a value rewrites only that key, so comments, ordering and
//! unknown fields in the user's file survive.

use anyhow::{Context, Result};
use toml_edit::{table, value, Array, DocumentMut, Item, Table, Value};

/// A single change to the config file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    SetMuted(bool),
    SetSound(String),
    AddIgnore(String),
    RemoveIgnore(String),
}

/// Apply `edit` to the TOML text in `content`.
///
/// Returns the new text and whether anything changed.
pub fn apply_edit(content: &str, edit: &ConfigEdit) -> Result<(String, bool)> {
    let mut doc: DocumentMut = content
        .parse()
        .context("Failed to parse existing config as TOML")?;

    let changed = match edit {
        ConfigEdit::SetMuted(muted) => set_scalar(&mut doc, "sound", "muted", Value::from(*muted))?,
        ConfigEdit::SetSound(path) => {
            set_scalar(&mut doc, "sound", "path", Value::from(path.as_str()))?
        }
        ConfigEdit::AddIgnore(command) => {
            let list = ignore_list(&mut doc)?;
            if list.iter().any(|v| v.as_str() == Some(command)) {
                false
            } else {
                list.push(command.as_str());
                true
            }
        }
        ConfigEdit::RemoveIgnore(command) => {
            let list = ignore_list(&mut doc)?;
            let before = list.len();
            list.retain(|v| v.as_str() != Some(command));
            list.len() != before
        }
    };

    Ok((doc.to_string(), changed))
}

fn section<'a>(doc: &'a mut DocumentMut, name: &str) -> Result<&'a mut Table> {
    doc.as_table_mut()
        .entry(name)
        .or_insert(table())
        .as_table_mut()
        .with_context(|| format!("[{name}] must be a table"))
}

/// Set `[table].key`, keeping the old value's trailing comment.
fn set_scalar(doc: &mut DocumentMut, table: &str, key: &str, new: Value) -> Result<bool> {
    let table = section(doc, table)?;
    match table.get_mut(key).and_then(Item::as_value_mut) {
        Some(old) if old.as_bool() == new.as_bool() && old.as_str() == new.as_str() => Ok(false),
        Some(old) => {
            let decor = old.decor().clone();
            *old = new;
            *old.decor_mut() = decor;
            Ok(true)
        }
        None => {
            table[key] = Item::Value(new);
            Ok(true)
        }
    }
}

fn ignore_list(doc: &mut DocumentMut) -> Result<&mut Array> {
    let run = section(doc, "run")?;
    if run.get("ignore_commands").is_none() {
        run["ignore_commands"] = value(Array::new());
    }
    run.get_mut("ignore_commands")
        .and_then(Item::as_array_mut)
        .context("[run].ignore_commands must be an array")
}
