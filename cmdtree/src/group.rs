//! Interior group nodes and the routing state machine.
//!
//! A group owns an ordered list of children (commands or nested groups) and
//! may declare parameters of its own. One dispatch pass consumes the group's
//! own parameter tokens, locates a child by name token, and hands the child
//! the rest of the slice. Routing is purely functional over immutable token
//! slices: no transient state lives on the node, so a group can be dispatched
//! any number of times.

use std::sync::Arc;

use tracing::debug;

use crate::bind::{self, Binding, HELP_TOKEN};
use crate::command::{Command, Handler};
use crate::host::Discoverable;
use crate::param::{Arg, Flag, Opt, Param, Params};
use crate::{help, Error, Outcome, Result, Value};

/// One child of a group.
#[derive(Clone)]
pub enum Node {
    Command(Command),
    Group(Group),
}

impl Node {
    pub fn name(&self) -> &str {
        match self {
            Node::Command(c) => c.name(),
            Node::Group(g) => g.name(),
        }
    }

    pub fn about(&self) -> &str {
        match self {
            Node::Command(c) => c.about(),
            Node::Group(g) => g.about(),
        }
    }

    pub fn hidden(&self) -> bool {
        match self {
            Node::Command(c) => c.hidden(),
            Node::Group(g) => g.hidden(),
        }
    }

    fn set_hidden(&mut self, hidden: bool) {
        match self {
            Node::Command(c) => c.hidden = hidden,
            Node::Group(g) => g.hidden = hidden,
        }
    }
}

impl From<Command> for Node {
    fn from(command: Command) -> Self {
        Node::Command(command)
    }
}

impl From<Group> for Node {
    fn from(group: Group) -> Self {
        Node::Group(group)
    }
}

/// An interior node: routes one level of the token sequence per dispatch.
#[derive(Clone)]
pub struct Group {
    pub(crate) name: String,
    pub(crate) about: String,
    pub(crate) hidden: bool,
    pub(crate) params: Params,
    handler: Option<Handler>,
    pub(crate) children: Vec<Node>,
}

impl Group {
    /// A group with no parameters of its own.
    pub fn new(name: impl Into<String>, about: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            about: about.into(),
            hidden: false,
            params: Params::new(),
            handler: None,
            children: Vec::new(),
        }
    }

    /// Start declaring a group that takes its own parameters or handler.
    pub fn builder(name: impl Into<String>) -> GroupBuilder {
        GroupBuilder {
            name: name.into(),
            about: String::new(),
            hidden: false,
            specs: Vec::new(),
            handler: None,
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

    pub fn children(&self) -> impl Iterator<Item = &Node> {
        self.children.iter()
    }

    pub fn child_names(&self) -> Vec<&str> {
        self.children.iter().map(Node::name).collect()
    }

    /// Append a command as a child.
    pub fn add_command(&mut self, command: Command) -> Result<()> {
        self.add_node(command.into(), None)
    }

    /// Append a nested group as a child.
    pub fn add_group(&mut self, group: Group) -> Result<()> {
        self.add_node(group.into(), None)
    }

    /// Append a child, optionally overriding its hidden flag. Sibling names
    /// must stay unique.
    pub fn add_node(&mut self, mut node: Node, hidden: Option<bool>) -> Result<()> {
        if let Some(hidden) = hidden {
            node.set_hidden(hidden);
        }
        if self.children.iter().any(|c| c.name() == node.name()) {
            return Err(Error::DuplicateCommand {
                name: node.name().to_string(),
            });
        }
        self.children.push(node);
        Ok(())
    }

    /// Append every command-shaped member a host object declares, with
    /// handlers bound to that host.
    pub fn attach<H>(&mut self, host: Arc<H>) -> Result<()>
    where
        H: Discoverable + Send + Sync + 'static,
    {
        for member in host.clone().commands() {
            let command = member.into_command()?;
            self.add_node(command.into(), None)?;
        }
        Ok(())
    }

    /// Route one level of the token sequence.
    ///
    /// Scans left to right for the first token equal to an immediate child's
    /// name. Tokens before it belong to this group's own parameters; tokens
    /// after it go to the child. With no child-name token the pass terminates
    /// in help, or in an unknown-command error when a stray token remains
    /// after the group's own parameters claimed theirs.
    pub fn dispatch(&self, tokens: &[String]) -> Result<Outcome> {
        let route = tokens.iter().enumerate().find_map(|(i, token)| {
            self.children
                .iter()
                .find(|child| child.name() == token)
                .map(|child| (i, child))
        });
        let help_at = tokens.iter().position(|token| token == HELP_TOKEN);

        // Help wins whenever it appears at or before the routing token.
        match (route, help_at) {
            (Some((at, _)), Some(h)) if h <= at => return Ok(Outcome::Help(help::group(self))),
            (None, Some(_)) => return Ok(Outcome::Help(help::group(self))),
            _ => {}
        }

        if let Some((at, child)) = route {
            self.bind_own(&tokens[..at])?;
            let rest = &tokens[at + 1..];
            debug!(group = %self.name, child = %child.name(), remaining = rest.len(), "routing");
            return match child {
                Node::Group(group) => group.dispatch(rest),
                Node::Command(command) => command.invoke(rest),
            };
        }

        let binding = self.bind_own(tokens)?;
        if let Some(stray) = binding.first_unconsumed() {
            let name = tokens[stray].clone();
            debug!(group = %self.name, token = %name, "no child matched");
            return Err(Error::UnknownCommand {
                help: help::unknown(self, &name),
                name,
            });
        }
        Ok(Outcome::Help(help::group(self)))
    }

    /// Dispatch the process's own argument vector and report the result.
    /// Returns the exit code for the caller to pass to `std::process::exit`.
    pub fn run(&self) -> i32 {
        let tokens: Vec<String> = std::env::args().skip(1).collect();
        self.run_from(&tokens)
    }

    /// Dispatch an explicit token sequence and report the result.
    pub fn run_from(&self, tokens: &[String]) -> i32 {
        crate::report(self.dispatch(tokens))
    }

    /// Bind this group's own parameters and run its handler, if any.
    fn bind_own(&self, tokens: &[String]) -> Result<Binding> {
        let binding = bind::bind(&self.params, tokens)?;
        if let Some(handler) = &self.handler {
            handler(&binding.values)?;
        }
        Ok(binding)
    }
}

/// Accumulates a group declaration in source order.
pub struct GroupBuilder {
    name: String,
    about: String,
    hidden: bool,
    specs: Vec<Param>,
    handler: Option<Handler>,
}

impl GroupBuilder {
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

    /// Handler run with the group's own bound values on every dispatch pass.
    pub fn handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&[Value]) -> Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    pub fn build(self) -> Result<Group> {
        Ok(Group {
            name: self.name,
            about: self.about,
            hidden: self.hidden,
            params: Params::from_specs(self.specs)?,
            handler: self.handler,
            children: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    fn tokens(strs: &[&str]) -> Vec<String> {
        strs.iter().map(|s| s.to_string()).collect()
    }

    fn probe() -> (Arc<Mutex<Vec<String>>>, Command) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let cmd = Command::builder("list")
            .about("list things")
            .build(move |values| {
                log.lock()
                    .unwrap()
                    .push(format!("list:{}", values.len()));
                Ok(())
            })
            .unwrap();
        (seen, cmd)
    }

    #[test]
    fn routes_through_nested_groups() {
        let (seen, list) = probe();
        let mut users = Group::new("users", "user commands");
        users.add_command(list).unwrap();

        let mut cli = Group::new("cli", "root");
        cli.add_group(users).unwrap();
        cli.add_group(Group::new("perms", "permission commands"))
            .unwrap();

        let outcome = cli.dispatch(&tokens(&["users", "list"])).unwrap();
        assert!(matches!(outcome, Outcome::Completed));
        assert_eq!(seen.lock().unwrap().as_slice(), ["list:0"]);
    }

    #[test]
    fn duplicate_sibling_names_are_rejected() {
        let mut cli = Group::new("cli", "root");
        cli.add_group(Group::new("users", "a")).unwrap();
        let err = cli.add_group(Group::new("users", "b")).unwrap_err();
        assert!(matches!(err, Error::DuplicateCommand { name } if name == "users"));
    }

    #[test]
    fn hidden_override_applies_on_add() {
        let (_, cmd) = probe();
        let mut cli = Group::new("cli", "root");
        cli.add_node(cmd.into(), Some(true)).unwrap();
        assert!(cli.children().next().unwrap().hidden());
    }

    #[test]
    fn empty_tokens_terminate_in_help() {
        let cli = Group::new("cli", "root");
        assert!(matches!(
            cli.dispatch(&tokens(&[])).unwrap(),
            Outcome::Help(_)
        ));
    }

    #[test]
    fn help_before_child_name_wins() {
        let (seen, list) = probe();
        let mut cli = Group::new("cli", "root");
        cli.add_command(list).unwrap();

        let outcome = cli.dispatch(&tokens(&["--help", "list"])).unwrap();
        assert!(matches!(outcome, Outcome::Help(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn help_after_child_name_belongs_to_the_child() {
        let (seen, list) = probe();
        let mut cli = Group::new("cli", "root");
        cli.add_command(list).unwrap();

        let outcome = cli.dispatch(&tokens(&["list", "--help"])).unwrap();
        assert!(matches!(outcome, Outcome::Help(_)));
        assert!(seen.lock().unwrap().is_empty());
    }

    #[test]
    fn stray_token_is_an_unknown_command() {
        let cli = Group::new("cli", "root");
        let err = cli.dispatch(&tokens(&["bogus"])).unwrap_err();
        match err {
            Error::UnknownCommand { name, help } => {
                assert_eq!(name, "bogus");
                assert!(help.contains("bogus"));
            }
            other => panic!("expected unknown command, got {other}"),
        }
    }

    #[test]
    fn group_params_bind_from_tokens_before_the_child_name() {
        let (seen, list) = probe();
        let verbose_seen = Arc::new(Mutex::new(None));
        let verbose_log = verbose_seen.clone();

        let mut cli = Group::builder("cli")
            .about("root")
            .flag(Flag::new("--verbose", "-v"))
            .handler(move |values| {
                *verbose_log.lock().unwrap() = values[0].as_bool();
                Ok(())
            })
            .build()
            .unwrap();
        cli.add_command(list).unwrap();

        let outcome = cli.dispatch(&tokens(&["-v", "list"])).unwrap();
        assert!(matches!(outcome, Outcome::Completed));
        assert_eq!(*verbose_seen.lock().unwrap(), Some(true));
        assert_eq!(seen.lock().unwrap().as_slice(), ["list:0"]);
    }

    #[test]
    fn group_flag_with_no_child_terminates_in_help() {
        let cli = Group::builder("cli")
            .flag(Flag::new("--verbose", "-v"))
            .build()
            .unwrap();
        assert!(matches!(
            cli.dispatch(&tokens(&["-v"])).unwrap(),
            Outcome::Help(_)
        ));
    }

    #[test]
    fn dispatch_is_repeatable_on_one_node() {
        let (seen, list) = probe();
        let mut cli = Group::new("cli", "root");
        cli.add_command(list).unwrap();

        for _ in 0..3 {
            cli.dispatch(&tokens(&["list"])).unwrap();
        }
        assert_eq!(seen.lock().unwrap().len(), 3);
    }
}
