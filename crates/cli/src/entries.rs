//! Building a menu from `name=description` arguments.

use indexmap::IndexSet;
use log::debug;
use quick_prompt_core::error::Error::{EntryFormat, NonUniqueEntryName};
use quick_prompt_core::error::Result;
use quick_prompt_core::menu::{Menu, MenuOptions};

/// Splits `name=description`. Only the first `=` separates, so descriptions
/// may contain more of them; the name may not be empty.
pub fn parse_entry(entry: &str) -> Result<(String, String)> {
    match entry.split_once('=') {
        Some((name, description)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), description.trim().to_string()))
        }
        _ => Err(EntryFormat(entry.to_string())),
    }
}

/// A menu of the named `entries` followed by the numbered `items`.
///
/// # Errors
///
/// Returns an error if an entry is malformed or two entries share a name.
pub fn build_menu(entries: &[String], items: &[String], options: MenuOptions) -> Result<Menu> {
    let mut menu = Menu::with_options(options);
    let mut names = IndexSet::new();

    for entry in entries {
        let (name, description) = parse_entry(entry)?;
        if !names.insert(name.clone()) {
            return Err(NonUniqueEntryName(name));
        }
        menu.add(name, description);
    }

    menu.enumerate(items.iter().map(String::as_str));

    for entry in &menu.entries()[entries.len()..] {
        if !names.insert(entry.name.clone()) {
            return Err(NonUniqueEntryName(entry.name.clone()));
        }
    }

    debug!("Built menu with entries {names:?}");
    Ok(menu)
}
