//! Menu entries and the actions bound to them.

use std::fmt::{Debug, Display, Formatter};
use std::rc::Rc;

use indexmap::IndexMap;
use log::info;

use crate::error::Result;
use crate::value::Value;

/// Named arguments handed to an [`Action`], in insertion order
pub type NamedArgs = IndexMap<String, Value>;

type ActionFn = dyn Fn(&[Value], &NamedArgs) -> Result<()>;

/// Code run when a menu entry is selected.
///
/// Errors returned by an action are passed straight back to whoever showed
/// the menu.
#[derive(Clone)]
pub struct Action(Rc<ActionFn>);

impl Action {
    /// An action that takes no arguments.
    pub fn new(action: impl Fn() -> Result<()> + 'static) -> Self {
        Self(Rc::new(move |_, _| action()))
    }

    /// An action that receives the entry's positional and named arguments.
    pub fn with_args(action: impl Fn(&[Value], &NamedArgs) -> Result<()> + 'static) -> Self {
        Self(Rc::new(action))
    }

    pub fn call(&self, args: &[Value], kwargs: &NamedArgs) -> Result<()> {
        (self.0)(args, kwargs)
    }
}

impl Debug for Action {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Action(..)")
    }
}

/// One selectable line of a menu.
#[derive(Debug, Clone)]
pub struct MenuEntry {
    pub name: String,
    pub description: String,
    pub action: Option<Action>,
    pub args: Vec<Value>,
    pub kwargs: NamedArgs,
}

impl MenuEntry {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            action: None,
            args: Vec::new(),
            kwargs: NamedArgs::new(),
        }
    }

    #[must_use]
    pub fn action(mut self, action: Action) -> Self {
        self.action = Some(action);
        self
    }

    #[must_use]
    pub fn args<I, V>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn kwarg(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(key.into(), value.into());
        self
    }

    /// Whether `selection` is this entry's name or description.
    #[must_use]
    pub fn is_selected_by(&self, selection: &str) -> bool {
        self.name == selection || self.description == selection
    }

    /// Runs the bound action, if any, with the stored arguments.
    pub fn run(&self) -> Result<()> {
        if let Some(action) = &self.action {
            info!("Running action for menu entry `{}`", self.name);
            action.call(&self.args, &self.kwargs)?;
        }
        Ok(())
    }
}

impl Display for MenuEntry {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "  ({}) {}", self.name, self.description)
    }
}
