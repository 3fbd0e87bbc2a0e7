//! Leaf command nodes.

use std::sync::Arc;

use tracing::debug;

use crate::bind::{self, Binding};
use crate::param::{Arg, Flag, Opt, Param, Params};
use crate::{help, Outcome, Result, Value};

/// Handler invoked with the bound values in parameter-list order.
///
/// Handlers own their output: they write to stdout themselves and the
/// framework interprets no return value beyond success or failure. Host-bound
/// handlers capture their receiver in the closure.
pub type Handler = Arc<dyn Fn(&[Value]) -> Result<()> + Send + Sync>;

/// A leaf in the command tree: a named handler plus its parameter list.
#[derive(Clone)]
pub struct Command {
    pub(crate) name: String,
    pub(crate) about: String,
    pub(crate) hidden: bool,
    pub(crate) params: Params,
    pub(crate) handler: Handler,
}

impl Command {
    /// Start declaring a command.
    pub fn builder(name: impl Into<String>) -> CommandBuilder {
        CommandBuilder {
            name: name.into(),
            about: String::new(),
            hidden: false,
            specs: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn about(&self) -> &str {
        &self.about
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn params(&self) -> &Params {
        &self.params
    }

    /// Bind the token slice against this command's parameters and call the
    /// handler. A literal `--help` anywhere short-circuits to help before any
    /// binding occurs.
    pub fn invoke(&self, tokens: &[String]) -> Result<Outcome> {
        if bind::wants_help(tokens) {
            return Ok(Outcome::Help(help::command(self)));
        }
        let Binding { values, .. } = bind::bind(&self.params, tokens)?;
        debug!(command = %self.name, bound = values.len(), "invoking handler");
        (self.handler)(&values)?;
        Ok(Outcome::Completed)
    }

    /// Invoke with the process's own argument vector and report the result.
    /// Returns the exit code for the caller to pass to `std::process::exit`.
    pub fn run(&self) -> i32 {
        let tokens: Vec<String> = std::env::args().skip(1).collect();
        self.run_from(&tokens)
    }

    /// Invoke with an explicit token sequence and report the result.
    pub fn run_from(&self, tokens: &[String]) -> i32 {
        crate::report(self.invoke(tokens))
    }
}

/// Accumulates a command declaration in source order.
///
/// `build` validates the parameter-list invariants and freezes the node.
pub struct CommandBuilder {
    name: String,
    about: String,
    hidden: bool,
    specs: Vec<Param>,
}

impl CommandBuilder {
    pub fn about(mut self, text: impl Into<String>) -> Self {
        self.about = text.into();
        self
    }

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn arg(mut self, spec: Arg) -> Self {
        self.specs.push(Param::Arg(spec));
        self
    }

    pub fn opt(mut self, spec: Opt) -> Self {
        self.specs.push(Param::Opt(spec));
        self
    }

    pub fn flag(mut self, spec: Flag) -> Self {
        self.specs.push(Param::Flag(spec));
        self
    }

    pub fn build<F>(self, handler: F) -> Result<Command>
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        Ok(Command {
            name: self.name,
            about: self.about,
            hidden: self.hidden,
            params: Params::from_specs(self.specs)?,
            handler: Arc::new(handler),
        })
    }
}
