//! Console access for prompts and menus.
//!
//! Everything that talks to the user goes through the [`Console`] trait.
//! [`Terminal`] is the standard implementation: it writes to any
//! [`Write`] (stdout by default) and reads from a swappable
//! [`InputSource`]. Swapping the source is how scripted input works; see
//! [`with_scripted_input`].
//!
//! A console is a single-threaded object. Only one scripted override should
//! be active on a console at a time.

use std::collections::VecDeque;
use std::io::{stdin, stdout, Stdout, Write};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::tty::IsTty;
use log::{debug, info};

use crate::error::{Error, Result};

/// Where answers come from.
pub trait InputSource {
    /// Reads one line without its line terminator; `None` at end of input.
    fn read_line(&mut self, hidden: bool) -> Result<Option<String>>;

    /// Interactive sources echo typed text themselves.
    fn is_interactive(&self) -> bool {
        true
    }
}

/// The text console collaborator used by prompts and menus.
pub trait Console {
    /// Writes `text` without a newline and flushes.
    fn write(&mut self, text: &str) -> Result<()>;

    /// Writes `text` followed by a newline and flushes.
    fn write_line(&mut self, text: &str) -> Result<()>;

    /// Shows `prompt` and blocks until a line is read.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EndOfInput`] when the input source is exhausted.
    fn read_line(&mut self, prompt: &str) -> Result<String>;

    /// Like [`Console::read_line`] but the typed text is not echoed.
    fn read_line_hidden(&mut self, prompt: &str) -> Result<String>;

    /// Installs `source` and hands back the one it replaced.
    fn replace_input(&mut self, source: Box<dyn InputSource>) -> Box<dyn InputSource>;
}

fn strip_line_ending(mut line: String) -> String {
    if line.ends_with('\n') {
        line.pop();
        if line.ends_with('\r') {
            line.pop();
        }
    }
    line
}

struct RawModeGuard;

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        // Disable raw mode on drop
        let _ = disable_raw_mode();
    }
}

/// Reads a line from the keyboard with echo turned off.
fn read_hidden_line() -> Result<Option<String>> {
    enable_raw_mode()?;
    let _raw_mode_guard = RawModeGuard;

    let mut line = String::new();
    loop {
        let Event::Key(KeyEvent {
            code,
            modifiers,
            kind,
            ..
        }) = event::read()?
        else {
            continue;
        };

        if kind != KeyEventKind::Press {
            continue;
        }

        match code {
            KeyCode::Enter => return Ok(Some(line)),
            KeyCode::Backspace => {
                line.pop();
            }
            KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
                return Err(Error::Interrupted)
            }
            KeyCode::Char('d') if modifiers.contains(KeyModifiers::CONTROL) && line.is_empty() => {
                return Ok(None)
            }
            KeyCode::Char(c) => line.push(c),
            _ => {}
        }
    }
}

/// Reads from the process standard input.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinInput;

impl InputSource for StdinInput {
    fn read_line(&mut self, hidden: bool) -> Result<Option<String>> {
        // Raw mode needs a real terminal; piped input is read as-is
        if hidden && stdin().is_tty() {
            return read_hidden_line();
        }

        let mut line = String::new();
        if stdin().read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(strip_line_ending(line)))
    }
}

/// A fixed list of answers, served in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    lines: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    /// Splits newline separated text into answers.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        Self::new(text.lines())
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lines.len()
    }
}

impl InputSource for ScriptedInput {
    fn read_line(&mut self, _hidden: bool) -> Result<Option<String>> {
        Ok(self.lines.pop_front())
    }

    fn is_interactive(&self) -> bool {
        false
    }
}

/// A [`Console`] over a writer and an input source.
pub struct Terminal<W: Write = Stdout> {
    output: W,
    input: Box<dyn InputSource>,
}

impl Terminal<Stdout> {
    /// The process console: stdout and stdin.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(stdout(), Box::new(StdinInput))
    }
}

impl Default for Terminal<Stdout> {
    fn default() -> Self {
        Self::stdio()
    }
}

impl Terminal<Vec<u8>> {
    /// An in-memory console answering from `lines`.
    pub fn scripted<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(Vec::new(), Box::new(ScriptedInput::new(lines)))
    }

    /// Everything written so far.
    #[must_use]
    pub fn transcript(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }
}

impl<W: Write> Terminal<W> {
    pub fn new(output: W, input: Box<dyn InputSource>) -> Self {
        Self { output, input }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn read(&mut self, prompt: &str, hidden: bool) -> Result<String> {
        self.write(prompt)?;

        let line = self
            .input
            .read_line(hidden)?
            .ok_or_else(|| Error::end_of_input(prompt))?;

        if hidden {
            self.write_line("")?;
        } else if !self.input.is_interactive() {
            self.write_line(&line)?;
        }

        debug!(
            "Read {} answer for prompt `{}`",
            if hidden { "hidden" } else { "visible" },
            prompt.trim_end()
        );
        Ok(line)
    }
}

impl<W: Write> Console for Terminal<W> {
    fn write(&mut self, text: &str) -> Result<()> {
        self.output.write_all(text.as_bytes())?;
        self.output.flush()?;
        Ok(())
    }

    fn write_line(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        self.read(prompt, false)
    }

    fn read_line_hidden(&mut self, prompt: &str) -> Result<String> {
        self.read(prompt, true)
    }

    fn replace_input(&mut self, source: Box<dyn InputSource>) -> Box<dyn InputSource> {
        std::mem::replace(&mut self.input, source)
    }
}

/// Puts the replaced input source back on drop.
struct InputRestoreGuard<'a, C: Console + ?Sized> {
    console: &'a mut C,
    previous: Option<Box<dyn InputSource>>,
}

impl<C: Console + ?Sized> Drop for InputRestoreGuard<'_, C> {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            self.console.replace_input(previous);
            info!("Restored the previous input source");
        }
    }
}

/// Runs `f` with `lines` as the console's input, then restores the previous
/// source whether `f` succeeded, failed or panicked.
pub fn with_scripted_input<C, T, I, S>(
    console: &mut C,
    lines: I,
    f: impl FnOnce(&mut C) -> Result<T>,
) -> Result<T>
where
    C: Console + ?Sized,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let scripted = ScriptedInput::new(lines);
    info!("Using {} scripted answer(s)", scripted.remaining());

    let previous = console.replace_input(Box::new(scripted));
    let mut guard = InputRestoreGuard {
        console,
        previous: Some(previous),
    };
    f(&mut *guard.console)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("abc\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc\r\n".to_string()), "abc");
        assert_eq!(strip_line_ending("abc".to_string()), "abc");
        assert_eq!(strip_line_ending(" x \n".to_string()), " x ");
    }

    #[test]
    fn test_scripted_terminal_reads_in_order() {
        let mut terminal = Terminal::scripted(["one", "two"]);
        assert_eq!(terminal.read_line("> ").unwrap(), "one");
        assert_eq!(terminal.read_line("> ").unwrap(), "two");
        assert!(terminal.read_line("> ").unwrap_err().is_end_of_input());
    }

    #[test]
    fn test_transcript_echoes_scripted_answers() {
        let mut terminal = Terminal::scripted(["yes"]);
        terminal.write_line("hello").unwrap();
        terminal.read_line("Continue: ").unwrap();
        assert_eq!(terminal.transcript(), "hello\nContinue: yes\n");
    }

    #[test]
    fn test_hidden_answers_are_not_echoed() {
        let mut terminal = Terminal::scripted(["secret"]);
        assert_eq!(terminal.read_line_hidden("Password: ").unwrap(), "secret");
        assert_eq!(terminal.transcript(), "Password: \n");
    }

    #[test]
    fn test_from_text_splits_lines() {
        let mut input = ScriptedInput::from_text("a\nb\n");
        assert_eq!(input.remaining(), 2);
        assert_eq!(input.read_line(false).unwrap(), Some("a".to_string()));
        assert_eq!(input.read_line(true).unwrap(), Some("b".to_string()));
        assert_eq!(input.read_line(false).unwrap(), None);
    }

    #[test]
    fn test_with_scripted_input_restores_on_success() {
        let mut terminal = Terminal::scripted(["original"]);
        let answer = with_scripted_input(&mut terminal, ["scripted"], |console| {
            console.read_line("? ")
        })
        .unwrap();

        assert_eq!(answer, "scripted");
        assert_eq!(terminal.read_line("? ").unwrap(), "original");
    }

    #[test]
    fn test_with_scripted_input_restores_on_error() {
        let mut terminal = Terminal::scripted(["original"]);
        let result: Result<()> = with_scripted_input(&mut terminal, ["scripted"], |console| {
            console.read_line("? ")?;
            Err(Error::Misc("failed".to_string()))
        });

        assert!(result.is_err());
        assert_eq!(terminal.read_line("? ").unwrap(), "original");
    }

    #[test]
    fn test_with_scripted_input_restores_on_panic() {
        let mut terminal = Terminal::scripted(["original"]);
        let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            with_scripted_input(&mut terminal, ["scripted"], |_| -> Result<()> {
                panic!("action blew up")
            })
        }));

        assert!(outcome.is_err());
        assert_eq!(terminal.read_line("? ").unwrap(), "original");
    }
}
