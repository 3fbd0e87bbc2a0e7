//! Explicit host-object attachment.
//!
//! No runtime reflection: a host opts in once by implementing
//! [`Discoverable`], listing its members as [`HostCommand`] entries whose
//! handlers capture the `Arc` receiver; that capture is the receiver binding,
//! so the command runs as a method on the host. [`crate::Group::attach`]
//! appends every discovered member as a child.

use std::sync::Arc;

use crate::command::{Command, Handler};
use crate::param::{Arg, Flag, Opt, Param, Params};
use crate::{Result, Value};

/// A host object exposing command-shaped members for attachment.
pub trait Discoverable {
    /// Every command-shaped member on this host, handlers bound to it.
    fn commands(self: Arc<Self>) -> Vec<HostCommand>;
}

/// One command-shaped member declared by a host: the (name, handler,
/// parameters, hidden) tuple that attachment turns into a child command.
pub struct HostCommand {
    name: String,
    about: String,
    hidden: bool,
    specs: Vec<Param>,
    handler: Handler,
}

impl HostCommand {
    pub fn new<F>(name: impl Into<String>, about: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            about: about.into(),
            hidden: false,
            specs: Vec::new(),
            handler: Arc::new(handler),
        }
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

    pub fn hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub(crate) fn into_command(self) -> Result<Command> {
        Ok(Command {
            name: self.name,
            about: self.about,
            hidden: self.hidden,
            params: Params::from_specs(self.specs)?,
            handler: self.handler,
        })
    }
}
