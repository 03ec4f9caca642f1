//! Quick Prompt CLI Library
//!
//! This crate provides `qp`, a command-line front end to quick-prompt. It
//! lets shell scripts ask validated questions, confirmations and menu
//! selections. The questions are shown on stderr and only the answer is
//! printed on stdout.
//!
//! # Key Features
//!
//! - **Questions**: free text, restricted answers, integers and floats
//! - **Confirmations**: yes/no questions that set the exit status
//! - **Menus**: entries from `name=description` pairs or plain items, with
//!   paging and looping
//! - **Scripted Answers**: `--answer` values stand in for the keyboard
//!
//! # Architecture
//!
//! - [`cli_args`]: Command-line argument parsing
//! - [`entries`]: Menu construction from arguments
//! - [`commands`]: Running a parsed command against a console
//!
//! # Examples
//!
//! ```bash
//! # Restricted question
//! qp ask "Environment" -v dev -v prod -d dev
//!
//! # Confirmation, exit status 1 on "no"
//! qp yesno "Deploy now?" && ./deploy.sh
//!
//! # Menu of numbered items, five per page
//! qp menu --limit 5 red green blue cyan magenta yellow black
//!
//! # Scripted answers
//! qp -a 42 int "How many?"
//! ```

pub mod cli_args;
pub mod commands;
pub mod entries;
