//! Quick Prompt Core Library
//!
//! This crate provides the building blocks of quick-prompt, a toolkit for
//! interactive terminal programs: validated questions, yes/no confirmations,
//! menus of selectable entries and paged menus for long lists.
//!
//! # Key Features
//!
//! - **Validated Prompts**: [`prompt::ask`] re-asks until an answer matches a
//!   literal, a type or a predicate [`validation::Rule`]
//! - **Menus**: [`menu::Menu`] holds named entries with optional actions and
//!   runs single-shot or looping selection flows
//! - **Paging**: long entry lists are shown a window at a time with generated
//!   next/previous entries
//! - **Scripted Input**: any [`console::Console`] can temporarily answer from a
//!   list of lines, which is how `auto` answers and tests work
//! - **Output Helpers**: alerts, warnings, rules and wrapped blocks in
//!   [`output`]
//!
//! # Examples
//!
//! Asking for one of a few numbers from scripted answers:
//!
//! ```
//! use quick_prompt_core::console::Terminal;
//! use quick_prompt_core::prompt::{ask, AskOptions};
//! use quick_prompt_core::value::Value;
//!
//! let mut terminal = Terminal::scripted(["5", "2"]);
//! let answer = ask(&mut terminal, &AskOptions::new("Pick").rules([1, 2, 3]))?;
//! assert_eq!(answer, Value::Int(2));
//! # Ok::<(), quick_prompt_core::error::Error>(())
//! ```

pub mod config;
pub mod console;
pub mod error;
pub mod menu;
pub mod output;
pub mod prompt;
pub mod validation;
pub mod value;
