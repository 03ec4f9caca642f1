//! Menus of named entries.
//!
//! # Key Features
//!
//! - **Entries**: named, described, optionally bound to an [`Action`]
//! - **Selection**: validated through the prompt engine, with defaults and
//!   `?` help
//! - **Paging**: long menus can be shown a window at a time with synthetic
//!   "next"/"previous" entries
//! - **Main loop**: single-shot or looping until a quit entry is chosen, with
//!   optional scripted answers
//!
//! # Examples
//!
//! ```
//! use quick_prompt_core::console::Terminal;
//! use quick_prompt_core::menu::{MainOptions, Menu};
//!
//! let mut menu = Menu::new();
//! menu.add("a", "Add").add("b", "Subtract");
//!
//! let mut terminal = Terminal::scripted(["b"]);
//! let selection = menu.main(&mut terminal, &MainOptions::new())?;
//! assert_eq!(selection.as_deref(), Some("b"));
//! # Ok::<(), quick_prompt_core::error::Error>(())
//! ```

// Export public items from submodules
pub mod controller;
pub mod display;
pub mod entry;
pub mod paging;

// Re-exports for convenience
pub use controller::{MainOptions, Menu};
pub use display::{show_menu, MenuOptions, ReturnField};
pub use entry::{Action, MenuEntry, NamedArgs};
pub use paging::{show_limit, PageWindow};
