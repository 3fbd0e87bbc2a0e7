//! Parameter declarations and the ordered parameter list.
//!
//! Three kinds exist: positional [`Arg`], valued [`Opt`], and presence-only
//! [`Flag`]. Builders accumulate specs in declaration order, which for
//! arguments must equal the handler's expected positional call order.
//! Option and flag names carry their dashes as declared (`--count`, `-c`);
//! argument names are bare words.

use std::sync::Arc;

use crate::convert::{self, Convert};
use crate::{Error, Result};

/// Positional argument declaration.
#[derive(Clone)]
pub struct Arg {
    pub(crate) name: String,
    pub(crate) help: String,
    pub(crate) converter: Arc<dyn Convert>,
}

impl Arg {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            help: String::new(),
            converter: convert::identity(),
        }
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    pub fn converter(mut self, converter: impl Convert + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }
}

/// Valued option declaration.
#[derive(Clone)]
pub struct Opt {
    pub(crate) name: String,
    pub(crate) short: String,
    pub(crate) help: String,
    pub(crate) converter: Arc<dyn Convert>,
    pub(crate) default: Option<String>,
    pub(crate) multiple: bool,
    pub(crate) required: bool,
}

impl Opt {
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            help: String::new(),
            converter: convert::identity(),
            default: None,
            multiple: false,
            required: false,
        }
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }

    pub fn converter(mut self, converter: impl Convert + 'static) -> Self {
        self.converter = Arc::new(converter);
        self
    }

    /// Raw default, converted through this option's converter at bind time.
    pub fn default(mut self, value: impl ToString) -> Self {
        self.default = Some(value.to_string());
        self
    }

    /// Collect every occurrence instead of the first.
    pub fn multiple(mut self) -> Self {
        self.multiple = true;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// Presence-only flag declaration. Always binds a boolean, never errors.
#[derive(Clone)]
pub struct Flag {
    pub(crate) name: String,
    pub(crate) short: String,
    pub(crate) help: String,
}

impl Flag {
    pub fn new(name: impl Into<String>, short: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            short: short.into(),
            help: String::new(),
        }
    }

    pub fn help(mut self, text: impl Into<String>) -> Self {
        self.help = text.into();
        self
    }
}

/// One declared parameter of any kind.
#[derive(Clone)]
pub enum Param {
    Arg(Arg),
    Opt(Opt),
    Flag(Flag),
}

// Manual impl: `Arc<dyn Convert>` fields prevent deriving `Debug`.
impl std::fmt::Debug for Param {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Param::Arg(a) => f.debug_struct("Arg").field("name", &a.name).finish_non_exhaustive(),
            Param::Opt(o) => f.debug_struct("Opt").field("name", &o.name).finish_non_exhaustive(),
            Param::Flag(fl) => f
                .debug_struct("Flag")
                .field("name", &fl.name)
                .finish_non_exhaustive(),
        }
    }
}

impl Param {
    pub fn name(&self) -> &str {
        match self {
            Param::Arg(a) => &a.name,
            Param::Opt(o) => &o.name,
            Param::Flag(f) => &f.name,
        }
    }

    pub fn short_name(&self) -> Option<&str> {
        match self {
            Param::Arg(_) => None,
            Param::Opt(o) => Some(&o.short),
            Param::Flag(f) => Some(&f.short),
        }
    }

    pub fn help(&self) -> &str {
        match self {
            Param::Arg(a) => &a.help,
            Param::Opt(o) => &o.help,
            Param::Flag(f) => &f.help,
        }
    }

    /// Type name shown in help tables.
    pub fn type_name(&self) -> &str {
        match self {
            Param::Arg(a) => a.converter.type_name(),
            Param::Opt(o) => o.converter.type_name(),
            Param::Flag(_) => "bool",
        }
    }
}

impl From<Arg> for Param {
    fn from(spec: Arg) -> Self {
        Param::Arg(spec)
    }
}

impl From<Opt> for Param {
    fn from(spec: Opt) -> Self {
        Param::Opt(spec)
    }
}

impl From<Flag> for Param {
    fn from(spec: Flag) -> Self {
        Param::Flag(spec)
    }
}

/// Ordered parameter list owned by one node.
///
/// Insertion enforces the node-level invariants: no two parameters share a
/// name, no two options/flags share a short name.
#[derive(Clone, Debug, Default)]
pub struct Params {
    order: Vec<Param>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and append the specs accumulated by a builder.
    pub(crate) fn from_specs(specs: Vec<Param>) -> Result<Self> {
        let mut params = Self::new();
        for spec in specs {
            params.push(spec)?;
        }
        Ok(params)
    }

    pub(crate) fn push(&mut self, param: Param) -> Result<()> {
        if self.order.iter().any(|p| p.name() == param.name()) {
            return Err(Error::DuplicateParameter {
                name: param.name().to_string(),
            });
        }
        if let Some(short) = param.short_name() {
            if self.order.iter().any(|p| p.short_name() == Some(short)) {
                return Err(Error::DuplicateParameter {
                    name: short.to_string(),
                });
            }
        }
        self.order.push(param);
        Ok(())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Param> {
        self.order.iter()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
