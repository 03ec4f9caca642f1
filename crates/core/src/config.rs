//! Library-wide prompt and layout settings.
//!
//! These constants control how prompts, menus and the output helpers are
//! rendered. Per-call behaviour is configured through the option structs in
//! [`crate::prompt`] and [`crate::menu`].

/// Prefix printed before every prompt message
pub const PROMPT_PREFIX: &str = "[?] ";
/// Marker printed after the prompt message, where the user starts typing
pub const INPUT_MARKER: &str = ": ";

/// Answer that prints the help text instead of being validated
pub const HELP_REQUEST: &str = "?";

/// Default horizontal rule width
pub const RULE_WIDTH: usize = 65;
/// Default horizontal rule character
pub const RULE_CHAR: char = '-';
/// Default top border character for [`crate::output::wrap`]
pub const WRAP_TOP_CHAR: char = '-';
/// Default bottom border character for [`crate::output::wrap`]
pub const WRAP_BOTTOM_CHAR: char = '-';

/// Default message shown when asking for a menu selection
pub const DEFAULT_MENU_MESSAGE: &str = "Enter menu selection";
/// Page size used by [`crate::menu::show_limit`] when none is configured
pub const DEFAULT_PAGE_LIMIT: usize = 5;

/// Candidate names for the synthetic "next page" entry, tried in order
pub const NEXT_ENTRY_NAMES: [&str; 7] = ["n", "N", "next", "NEXT", "->", ">>", ">>>"];
/// Candidate names for the synthetic "previous page" entry, tried in order
pub const PREVIOUS_ENTRY_NAMES: [&str; 7] = ["p", "P", "prev", "PREV", "<-", "<<", "<<<"];

/// Name and description of the quit entry [`crate::menu::Menu::main`] appends
pub const DEFAULT_QUIT_ENTRY: (&str, &str) = ("q", "Quit");
/// Note shown by a looping [`crate::menu::Menu::main`]
pub const LOOP_NOTE: &str = "Menu loops until quit.";
/// Note shown by a single-shot [`crate::menu::Menu::main`]
pub const SINGLE_NOTE: &str = "Menu does not loop, single entry.";

/// Message shown by [`crate::prompt::pause`]
pub const PAUSE_MESSAGE: &str = "Press ENTER to continue...";
/// Default captcha length for [`crate::prompt::ask_captcha`]
pub const DEFAULT_CAPTCHA_LENGTH: usize = 4;
