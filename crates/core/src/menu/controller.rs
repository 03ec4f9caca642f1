//! The [`Menu`] type: entries, stored display options and the main loop.

use log::info;

use super::display::{show_menu, MenuOptions};
use super::entry::{Action, MenuEntry};
use crate::config::{DEFAULT_QUIT_ENTRY, LOOP_NOTE, SINGLE_NOTE};
use crate::console::{with_scripted_input, Console};
use crate::error::Result;

/// Settings for [`Menu::main`].
#[derive(Debug, Clone, PartialEq)]
pub struct MainOptions {
    /// Answers to use instead of reading the console's input; an empty list
    /// leaves the input alone
    pub auto: Option<Vec<String>>,
    /// Keep showing the menu until the quit entry is selected
    pub looping: bool,
    /// Name and description of the quit entry to append
    pub quit: Option<(String, String)>,
    /// Display options for this run, layered over the menu's own
    pub show: MenuOptions,
}

impl Default for MainOptions {
    fn default() -> Self {
        Self {
            auto: None,
            looping: false,
            quit: Some((
                DEFAULT_QUIT_ENTRY.0.to_string(),
                DEFAULT_QUIT_ENTRY.1.to_string(),
            )),
            show: MenuOptions::new(),
        }
    }
}

impl MainOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn auto<I, S>(mut self, answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.auto = Some(answers.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn looping(mut self, looping: bool) -> Self {
        self.looping = looping;
        self
    }

    #[must_use]
    pub fn quit(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.quit = Some((name.into(), description.into()));
        self
    }

    /// Don't append a quit entry.
    #[must_use]
    pub fn without_quit(mut self) -> Self {
        self.quit = None;
        self
    }

    #[must_use]
    pub fn show(mut self, show: MenuOptions) -> Self {
        self.show = show;
        self
    }
}

/// An ordered list of entries with default display options.
///
/// Entries hold their actions behind `Rc`, so a menu stays on the thread
/// that built it.
#[derive(Debug, Clone, Default)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    options: MenuOptions,
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A menu whose every `show` starts from `options`.
    #[must_use]
    pub fn with_options(options: MenuOptions) -> Self {
        Self {
            entries: Vec::new(),
            options,
        }
    }

    /// A menu with one numbered entry per item.
    pub fn enumerated<I, S>(items: I, options: MenuOptions) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut menu = Self::with_options(options);
        menu.enumerate(items);
        menu
    }

    #[must_use]
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    #[must_use]
    pub fn options(&self) -> &MenuOptions {
        &self.options
    }

    /// Appends an entry without an action.
    pub fn add(&mut self, name: impl Into<String>, description: impl Into<String>) -> &mut Self {
        self.add_entry(MenuEntry::new(name, description))
    }

    /// Appends an entry that runs `action` when selected.
    pub fn add_action(
        &mut self,
        name: impl Into<String>,
        description: impl Into<String>,
        action: Action,
    ) -> &mut Self {
        self.add_entry(MenuEntry::new(name, description).action(action))
    }

    pub fn add_entry(&mut self, entry: MenuEntry) -> &mut Self {
        self.entries.push(entry);
        self
    }

    /// Appends one entry per item, named by its 1-based position in the menu.
    pub fn enumerate<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for item in items {
            let name = (self.entries.len() + 1).to_string();
            self.add(name, item);
        }
        self
    }

    /// Shows the menu with the stored options overlaid by `overrides`.
    pub fn show<C: Console + ?Sized>(
        &self,
        console: &mut C,
        overrides: &MenuOptions,
    ) -> Result<String> {
        show_menu(console, &self.entries, &self.options.overlay(overrides))
    }

    /// Runs the action of the first entry called `name`; unknown names are
    /// ignored.
    pub fn run(&self, name: &str) -> Result<()> {
        match self.entries.iter().find(|entry| entry.name == name) {
            Some(entry) => entry.run(),
            None => Ok(()),
        }
    }

    /// Standard menu flow.
    ///
    /// Appends the quit entry unless it is already last, then shows the menu
    /// once and returns the selection, or loops until the quit entry is chosen
    /// and returns `None`. With `auto` answers, the console's input is
    /// restored afterwards even if an action fails.
    pub fn main<C: Console + ?Sized>(
        &mut self,
        console: &mut C,
        options: &MainOptions,
    ) -> Result<Option<String>> {
        if let Some((name, description)) = &options.quit {
            let already_last = self
                .entries
                .last()
                .is_some_and(|last| last.name == *name && last.description == *description);
            if !already_last {
                self.add(name.clone(), description.clone());
            }
        }

        match options.auto.as_ref().filter(|answers| !answers.is_empty()) {
            Some(answers) => with_scripted_input(console, answers.clone(), |console| {
                self.run_main(console, options)
            }),
            None => self.run_main(console, options),
        }
    }

    fn run_main<C: Console + ?Sized>(
        &self,
        console: &mut C,
        options: &MainOptions,
    ) -> Result<Option<String>> {
        if !options.looping {
            let show = options.show.clone().note(SINGLE_NOTE);
            return self.show(console, &show).map(Some);
        }

        let show = options.show.clone().note(LOOP_NOTE);
        loop {
            let selection = self.show(console, &show)?;
            if options
                .quit
                .as_ref()
                .is_some_and(|(name, description)| selection == *name || selection == *description)
            {
                info!("Quit selected, leaving menu loop");
                return Ok(None);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::{ScriptedInput, Terminal};
    use crate::error::Error;
    use crate::menu::ReturnField;
    use std::cell::Cell;
    use std::rc::Rc;

    fn counting_action(counter: &Rc<Cell<u32>>) -> Action {
        let counter = Rc::clone(counter);
        Action::new(move || {
            counter.set(counter.get() + 1);
            Ok(())
        })
    }

    #[test]
    fn test_enumerate_names_by_position() {
        let mut menu = Menu::new();
        menu.add("x", "Existing").enumerate(["red", "green"]);
        let names: Vec<&str> = menu.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["x", "2", "3"]);
        assert_eq!(menu.entries()[1].description, "red");
    }

    #[test]
    fn test_enumerated() {
        let menu = Menu::enumerated(["a", "b"], MenuOptions::new().header("Letters"));
        assert_eq!(menu.entries().len(), 2);
        assert_eq!(menu.entries()[1].name, "2");
        assert_eq!(menu.options().header.as_deref(), Some("Letters"));
    }

    #[test]
    fn test_run_by_name() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::new();
        menu.add_action("a", "Add", counting_action(&counter));

        menu.run("a").unwrap();
        menu.run("missing").unwrap();
        assert_eq!(counter.get(), 1);
    }

    #[test]
    fn test_show_uses_stored_options() {
        let mut menu = Menu::with_options(MenuOptions::new().returns(ReturnField::Description));
        menu.add("a", "Add").add("b", "Subtract");

        let mut terminal = Terminal::scripted(["b", "b"]);
        assert_eq!(menu.show(&mut terminal, &MenuOptions::new()).unwrap(), "Subtract");
        let overrides = MenuOptions::new().returns(ReturnField::Name);
        assert_eq!(menu.show(&mut terminal, &overrides).unwrap(), "b");
    }

    #[test]
    fn test_main_single_shot_appends_quit() {
        let mut menu = Menu::new();
        menu.add("a", "Add");

        let mut terminal = Terminal::scripted(["a"]);
        let selection = menu.main(&mut terminal, &MainOptions::new()).unwrap();

        assert_eq!(selection, Some("a".to_string()));
        assert_eq!(menu.entries().last().unwrap().name, "q");
        assert!(terminal.transcript().contains("  (q) Quit\n"));
        assert!(terminal.transcript().contains("[!] Menu does not loop, single entry.\n"));
    }

    #[test]
    fn test_main_does_not_duplicate_quit() {
        let mut menu = Menu::new();
        menu.add("a", "Add");

        let mut terminal = Terminal::scripted(["q", "q"]);
        menu.main(&mut terminal, &MainOptions::new()).unwrap();
        menu.main(&mut terminal, &MainOptions::new()).unwrap();
        assert_eq!(menu.entries().len(), 2);
    }

    #[test]
    fn test_main_loops_until_quit() {
        let counter = Rc::new(Cell::new(0));
        let mut menu = Menu::new();
        menu.add_action("g", "Go", counting_action(&counter));

        let mut terminal = Terminal::scripted(["g", "g", "Quit"]);
        let options = MainOptions::new().looping(true);
        // Quit typed as its description is not a valid name
        assert!(menu.main(&mut terminal, &options).unwrap_err().is_end_of_input());

        let mut terminal = Terminal::scripted(["g", "g", "q"]);
        assert_eq!(menu.main(&mut terminal, &options).unwrap(), None);
        assert_eq!(counter.get(), 4);
        assert!(terminal.transcript().contains("[!] Menu loops until quit.\n"));
    }

    #[test]
    fn test_main_loop_quits_on_description() {
        let mut menu = Menu::new();
        menu.add("g", "Go");

        let mut terminal = Terminal::scripted(["g", "x"]);
        let options = MainOptions::new()
            .looping(true)
            .quit("x", "Exit")
            .show(MenuOptions::new().returns(ReturnField::Description));
        assert_eq!(menu.main(&mut terminal, &options).unwrap(), None);
    }

    #[test]
    fn test_main_without_quit() {
        let mut menu = Menu::new();
        menu.add("a", "Add");

        let mut terminal = Terminal::scripted(["a"]);
        menu.main(&mut terminal, &MainOptions::new().without_quit()).unwrap();
        assert_eq!(menu.entries().len(), 1);
    }

    #[test]
    fn test_auto_restores_input_source() {
        let mut menu = Menu::new();
        menu.add("a", "Add");

        let mut terminal = Terminal::new(
            Vec::new(),
            Box::new(ScriptedInput::new(["from the real source"])),
        );
        let selection = menu
            .main(&mut terminal, &MainOptions::new().auto(["q"]))
            .unwrap();

        assert_eq!(selection, Some("q".to_string()));
        assert_eq!(terminal.read_line("> ").unwrap(), "from the real source");
    }

    #[test]
    fn test_auto_restores_input_source_after_action_error() {
        let mut menu = Menu::new();
        menu.add_action(
            "f",
            "Fail",
            Action::new(|| Err(Error::action("f", "broken"))),
        );

        let mut terminal = Terminal::scripted(["real"]);
        let error = menu
            .main(&mut terminal, &MainOptions::new().auto(["f"]))
            .unwrap_err();

        assert!(matches!(error, Error::Action { .. }));
        assert_eq!(terminal.read_line("> ").unwrap(), "real");
    }

    #[test]
    fn test_empty_auto_reads_the_console_input() {
        let mut menu = Menu::new();
        menu.add("a", "Add");

        let mut terminal = Terminal::scripted(["a"]);
        let selection = menu
            .main(&mut terminal, &MainOptions::new().auto(Vec::<String>::new()))
            .unwrap();

        assert_eq!(selection, Some("a".to_string()));
    }
}
