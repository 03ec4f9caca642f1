//! Paged menus that show a sliding window of entries.
//!
//! Each page gets synthetic "next" and "previous" entries when there is
//! something to move to. Selecting one of them moves the window by a full
//! page and shows the menu again; any other selection is returned.

use log::debug;

use super::display::{show_menu, MenuOptions};
use super::entry::MenuEntry;
use crate::config::{DEFAULT_PAGE_LIMIT, NEXT_ENTRY_NAMES, PREVIOUS_ENTRY_NAMES};
use crate::console::Console;
use crate::error::Result;

/// The visible range `[start, end)` of a paged menu.
///
/// Always `start <= end <= total` and `end - start <= limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub start: usize,
    pub end: usize,
}

impl PageWindow {
    /// A window of `limit` entries starting at `start`, pulled back so that
    /// it ends at `total` if it would run past it.
    #[must_use]
    pub fn new(start: usize, limit: usize, total: usize) -> Self {
        let mut start = start;
        let mut end = start + limit;

        if end > total {
            end = total;
            start = end.saturating_sub(limit);
        }
        if start == 0 {
            end = limit.min(total);
        }

        Self { start, end }
    }

    #[must_use]
    pub fn next(self, limit: usize, total: usize) -> Self {
        Self::new(self.start + limit, limit, total)
    }

    #[must_use]
    pub fn previous(self, limit: usize, total: usize) -> Self {
        Self::new(self.start.saturating_sub(limit), limit, total)
    }

    #[must_use]
    pub fn len(self) -> usize {
        self.end - self.start
    }

    #[must_use]
    pub fn is_empty(self) -> bool {
        self.start == self.end
    }
}

/// A window's entries plus the synthetic navigation entries.
struct Page {
    entries: Vec<MenuEntry>,
    next: Option<MenuEntry>,
    previous: Option<MenuEntry>,
}

fn pick_name<'a>(candidates: &[&'a str], taken: &[String]) -> Option<&'a str> {
    candidates
        .iter()
        .copied()
        .find(|candidate| !taken.iter().any(|name| name == candidate))
}

impl Page {
    fn build(entries: &[MenuEntry], window: PageWindow) -> Self {
        let total = entries.len();
        let mut page_entries = entries[window.start..window.end].to_vec();
        let mut names: Vec<String> = page_entries.iter().map(|e| e.name.clone()).collect();

        let next_count = total - window.end;
        let next = (next_count > 0)
            .then(|| pick_name(&NEXT_ENTRY_NAMES, &names))
            .flatten()
            .map(|name| MenuEntry::new(name, format!("Next {next_count} of {total} entries")));

        if let Some(next) = &next {
            names.push(next.name.clone());
            page_entries.push(next.clone());
        }

        let previous_count = window.start;
        let previous = (previous_count > 0)
            .then(|| pick_name(&PREVIOUS_ENTRY_NAMES, &names))
            .flatten()
            .map(|name| {
                MenuEntry::new(name, format!("Previous {previous_count} of {total} entries"))
            });

        if let Some(previous) = &previous {
            page_entries.push(previous.clone());
        }

        Self {
            entries: page_entries,
            next,
            previous,
        }
    }

    fn has_name(&self, name: &str) -> bool {
        self.entries.iter().any(|entry| entry.name == name)
    }

    /// The default to offer on this page.
    ///
    /// A requested default that is not visible is redirected to the "next"
    /// entry when there is one, and dropped otherwise.
    fn default_for(&self, requested: Option<&str>) -> Option<String> {
        let requested = requested?;
        if self.has_name(requested) {
            Some(requested.to_string())
        } else {
            self.next.as_ref().map(|next| next.name.clone())
        }
    }
}

/// Shows `entries` a page at a time.
///
/// The page size is `options.limit`, or 5 when unset; a limit of zero shows
/// all entries at once. Blocks on one selection per page shown.
pub fn show_limit<C: Console + ?Sized>(
    console: &mut C,
    entries: &[MenuEntry],
    options: &MenuOptions,
) -> Result<String> {
    let limit = options.limit.unwrap_or(DEFAULT_PAGE_LIMIT);

    let page_options = MenuOptions {
        limit: None,
        default: None,
        ..options.clone()
    };

    if limit == 0 {
        return show_menu(
            console,
            entries,
            &MenuOptions {
                default: options.default.clone(),
                ..page_options
            },
        );
    }

    let requested_default = options.default.as_ref().map(ToString::to_string);
    let total = entries.len();
    let mut window = PageWindow::new(0, limit, total);

    loop {
        let page = Page::build(entries, window);

        let mut shown_options = page_options.clone();
        shown_options.default = page
            .default_for(requested_default.as_deref())
            .map(Into::into);

        let selection = show_menu(console, &page.entries, &shown_options)?;

        if page
            .next
            .as_ref()
            .is_some_and(|next| next.is_selected_by(&selection))
        {
            window = window.next(limit, total);
            debug!("Paged forward to entries {}..{}", window.start, window.end);
        } else if page
            .previous
            .as_ref()
            .is_some_and(|previous| previous.is_selected_by(&selection))
        {
            window = window.previous(limit, total);
            debug!("Paged back to entries {}..{}", window.start, window.end);
        } else {
            return Ok(selection);
        }
    }
}
