//! Rendering a menu and taking a selection.

use std::str::FromStr;

use log::debug;

use super::entry::MenuEntry;
use super::paging::show_limit;
use crate::config::DEFAULT_MENU_MESSAGE;
use crate::console::Console;
use crate::error::{Error, Result};
use crate::output::alert;
use crate::prompt::{ask, AskOptions};
use crate::validation::Rule;
use crate::value::Value;

/// Which part of the selected entry a menu returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnField {
    #[default]
    Name,
    Description,
}

impl FromStr for ReturnField {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "name" => Ok(ReturnField::Name),
            "desc" | "description" => Ok(ReturnField::Description),
            other => Err(Error::Misc(format!("Unknown menu return field: `{other}`"))),
        }
    }
}

impl MenuEntry {
    #[must_use]
    pub fn field(&self, field: ReturnField) -> &str {
        match field {
            ReturnField::Name => &self.name,
            ReturnField::Description => &self.description,
        }
    }
}

/// Display settings for [`show_menu`].
///
/// Every field is optional so that a menu's stored options can be layered
/// under per-call options with [`MenuOptions::overlay`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MenuOptions {
    /// Shown in the banner as `-- MENU: header --`
    pub header: Option<String>,
    /// Shown as an alert below the entries
    pub note: Option<String>,
    /// Prompt message, "Enter menu selection" when unset
    pub message: Option<String>,
    /// Entry name selected by a blank answer; ignored unless it is a name
    pub default: Option<Value>,
    /// Skips the banner and entry lines
    pub compact: Option<bool>,
    /// What to return for the selected entry
    pub returns: Option<ReturnField>,
    /// Page size; zero or unset shows every entry
    pub limit: Option<usize>,
}

impl MenuOptions {
    #[must_use]
    pub fn new() -> Self {
        Default::default()
    }

    /// `self` with every option set in `other` taking precedence.
    #[must_use]
    pub fn overlay(&self, other: &MenuOptions) -> MenuOptions {
        MenuOptions {
            header: other.header.clone().or_else(|| self.header.clone()),
            note: other.note.clone().or_else(|| self.note.clone()),
            message: other.message.clone().or_else(|| self.message.clone()),
            default: other.default.clone().or_else(|| self.default.clone()),
            compact: other.compact.or(self.compact),
            returns: other.returns.or(self.returns),
            limit: other.limit.or(self.limit),
        }
    }

    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = Some(header.into());
        self
    }

    #[must_use]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    #[must_use]
    pub fn default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn compact(mut self, compact: bool) -> Self {
        self.compact = Some(compact);
        self
    }

    #[must_use]
    pub fn returns(mut self, returns: ReturnField) -> Self {
        self.returns = Some(returns);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn hdr(self, header: impl Into<String>) -> Self {
        self.header(header)
    }

    #[must_use]
    pub fn msg(self, message: impl Into<String>) -> Self {
        self.message(message)
    }

    #[must_use]
    pub fn dft(self, default: impl Into<Value>) -> Self {
        self.default(default)
    }
}

fn banner(header: Option<&str>) -> String {
    match header.filter(|h| !h.is_empty()) {
        Some(header) => format!("-- MENU: {header} --"),
        None => "-- MENU --".to_string(),
    }
}

/// Shows `entries`, asks for a selection, runs the selected entry's action
/// and returns the requested field of that entry.
///
/// With a positive `limit` the menu is paged through [`show_limit`].
///
/// # Errors
///
/// Action errors are returned as-is. [`Error::EntryNotFound`] means the
/// accepted answer named no entry, which only happens for an empty menu.
pub fn show_menu<C: Console + ?Sized>(
    console: &mut C,
    entries: &[MenuEntry],
    options: &MenuOptions,
) -> Result<String> {
    if options.limit.is_some_and(|limit| limit > 0) {
        return show_limit(console, entries, options);
    }

    let names: Vec<&str> = entries.iter().map(|entry| entry.name.as_str()).collect();

    let default = options
        .default
        .as_ref()
        .map(ToString::to_string)
        .filter(|default| names.contains(&default.as_str()));

    if !options.compact.unwrap_or(false) {
        console.write_line(&banner(options.header.as_deref()))?;
        for entry in entries {
            console.write_line(&entry.to_string())?;
        }
    }

    if let Some(note) = options.note.as_deref().filter(|n| !n.is_empty()) {
        alert(console, note)?;
    }

    let mut ask_options = AskOptions::new(
        options
            .message
            .as_deref()
            .unwrap_or(DEFAULT_MENU_MESSAGE),
    )
    .rules(names.iter().map(|name| Rule::from(*name)));

    if let Some(default) = default {
        ask_options = ask_options.default(default);
    }

    let choice = ask(console, &ask_options)?.to_string();
    debug!("Menu selection `{choice}`");

    let entry = entries
        .iter()
        .find(|entry| entry.name == choice)
        .ok_or(Error::EntryNotFound(choice))?;

    entry.run()?;

    Ok(entry.field(options.returns.unwrap_or_default()).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::Terminal;
    use crate::menu::Action;
    use std::cell::Cell;
    use std::rc::Rc;

    fn arithmetic_entries(counter: &Rc<Cell<u32>>) -> Vec<MenuEntry> {
        let add_counter = Rc::clone(counter);
        vec![
            MenuEntry::new("a", "Add").action(Action::new(move || {
                add_counter.set(add_counter.get() + 1);
                Ok(())
            })),
            MenuEntry::new("b", "Subtract"),
        ]
    }

    #[test]
    fn test_banner() {
        assert_eq!(banner(None), "-- MENU --");
        assert_eq!(banner(Some("")), "-- MENU --");
        assert_eq!(banner(Some("Main")), "-- MENU: Main --");
    }

    #[test]
    fn test_show_menu_runs_action_once() {
        let counter = Rc::new(Cell::new(0));
        let entries = arithmetic_entries(&counter);
        let mut terminal = Terminal::scripted(["a"]);

        let selection = show_menu(&mut terminal, &entries, &MenuOptions::new()).unwrap();

        assert_eq!(selection, "a");
        assert_eq!(counter.get(), 1);
        assert_eq!(
            terminal.transcript(),
            "-- MENU --\n  (a) Add\n  (b) Subtract\n[?] Enter menu selection: a\n"
        );
    }

    #[test]
    fn test_show_menu_returns_description() {
        let counter = Rc::new(Cell::new(0));
        let entries = arithmetic_entries(&counter);
        let mut terminal = Terminal::scripted(["x", "b"]);
        let options = MenuOptions::new().returns(ReturnField::Description);

        assert_eq!(
            show_menu(&mut terminal, &entries, &options).unwrap(),
            "Subtract"
        );
        assert_eq!(counter.get(), 0);
    }

    #[test]
    fn test_compact_menu_with_header_and_note() {
        let counter = Rc::new(Cell::new(0));
        let entries = arithmetic_entries(&counter);

        let mut terminal = Terminal::scripted(["b"]);
        let options = MenuOptions::new().header("Math").note("Choose wisely").compact(true);
        show_menu(&mut terminal, &entries, &options).unwrap();
        assert_eq!(
            terminal.transcript(),
            "[!] Choose wisely\n[?] Enter menu selection: b\n"
        );

        let mut terminal = Terminal::scripted(["b"]);
        let options = MenuOptions::new().header("Math").message("Operation");
        show_menu(&mut terminal, &entries, &options).unwrap();
        assert!(terminal.transcript().starts_with("-- MENU: Math --\n"));
        assert!(terminal.transcript().contains("[?] Operation: b\n"));
    }

    #[test]
    fn test_valid_default_is_used() {
        let counter = Rc::new(Cell::new(0));
        let entries = arithmetic_entries(&counter);
        let mut terminal = Terminal::scripted([""]);
        let options = MenuOptions::new().default("b").compact(true);

        assert_eq!(show_menu(&mut terminal, &entries, &options).unwrap(), "b");
        assert!(terminal.transcript().contains("[?] Enter menu selection [b]: "));
    }

    #[test]
    fn test_unknown_default_is_ignored() {
        let counter = Rc::new(Cell::new(0));
        let entries = arithmetic_entries(&counter);
        let mut terminal = Terminal::scripted(["", "a"]);
        let options = MenuOptions::new().default("z").compact(true);

        assert_eq!(show_menu(&mut terminal, &entries, &options).unwrap(), "a");
        assert!(!terminal.transcript().contains("[z]"));
    }

    #[test]
    fn test_numeric_default_matches_ordinal_name() {
        let entries = vec![MenuEntry::new("1", "One"), MenuEntry::new("2", "Two")];
        let mut terminal = Terminal::scripted([""]);
        let options = MenuOptions::new().default(2).compact(true);
        assert_eq!(show_menu(&mut terminal, &entries, &options).unwrap(), "2");
    }

    #[test]
    fn test_empty_menu_is_a_consistency_fault() {
        let mut terminal = Terminal::scripted(["anything"]);
        let error = show_menu(&mut terminal, &[], &MenuOptions::new()).unwrap_err();
        assert!(matches!(error, Error::EntryNotFound(name) if name == "anything"));
    }

    #[test]
    fn test_overlay() {
        let base = MenuOptions::new().header("Base").limit(3).compact(true);
        let merged = base.overlay(&MenuOptions::new().header("Call").note("n"));
        assert_eq!(merged.header.as_deref(), Some("Call"));
        assert_eq!(merged.note.as_deref(), Some("n"));
        assert_eq!(merged.limit, Some(3));
        assert_eq!(merged.compact, Some(true));
    }

    #[test]
    fn test_return_field_from_str() {
        assert_eq!("name".parse::<ReturnField>().unwrap(), ReturnField::Name);
        assert_eq!(
            "Description".parse::<ReturnField>().unwrap(),
            ReturnField::Description
        );
        assert!("other".parse::<ReturnField>().is_err());
    }
}
